use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rhc_core::{
    questions, scoring, validation, AssessmentService, AssessmentStore, CoreConfig, ProcessError,
    DEFAULT_DATA_DIR,
};
use rhc_mail::{SmtpConfig, SmtpMailer};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "rhc")]
#[command(about = "Remote Home Check assessment scorer CLI")]
struct Cli {
    /// Directory holding stored assessments and reports
    #[arg(long, global = true, env = "RHC_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the question catalogue
    Questions,
    /// Validate and score an assessment file without storing it
    Score {
        /// Assessment JSON file
        file: PathBuf,
    },
    /// Score, store and email an assessment file
    Process {
        /// Assessment JSON file
        file: PathBuf,
    },
    /// List stored assessment ids
    List,
    /// Show the SMTP settings found in the environment
    CheckSmtp,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("rhc=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Questions => {
            for question in questions::catalogue() {
                println!("{} ({})", question.label, question.name);
                for option in question.options {
                    println!("  - {}", option.label);
                }
            }
        }
        Commands::Score { file } => {
            let data = read_assessment(&file)?;
            let assessment = validation::validate_assessment(&data).map_err(invalid)?;
            let scores = scoring::calculate(&assessment.responses);
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
        Commands::Process { file } => {
            let data = read_assessment(&file)?;
            let smtp = SmtpConfig::from_lookup(|key| std::env::var(key).ok())?;
            let mailer = Arc::new(SmtpMailer::new(smtp));
            let service = AssessmentService::new(open_store(cli.data_dir)?, mailer);

            let outcome = service.process(&data).map_err(|e| match e {
                ProcessError::Invalid(messages) => invalid(messages),
                ProcessError::Failed(e) => anyhow::Error::new(e).context("Processing failed"),
            })?;

            println!("Assessment ID: {}", outcome.assessment_id);
            println!("{}", serde_json::to_string_pretty(&outcome.scores)?);
            println!("JSON:   {}", outcome.json_path.display());
            println!("CSV:    {}", outcome.csv_path.display());
            println!("Report: {}", outcome.report_path.display());
            println!("Email sent: {}", outcome.email_sent);
        }
        Commands::List => {
            let ids = open_store(cli.data_dir)?.list_ids()?;
            if ids.is_empty() {
                println!("No assessments found.");
            }
            for id in ids {
                println!("{}", id);
            }
        }
        Commands::CheckSmtp => {
            let smtp = SmtpConfig::from_lookup(|key| std::env::var(key).ok())?;
            println!("{}", serde_json::to_string_pretty(&smtp.status())?);
            let missing = smtp.missing();
            if !missing.is_empty() {
                eprintln!("Missing: {}", missing.join(", "));
            }
        }
    }

    Ok(())
}

fn read_assessment(path: &Path) -> anyhow::Result<Value> {
    let contents =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn open_store(data_dir: PathBuf) -> anyhow::Result<AssessmentStore> {
    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    Ok(AssessmentStore::open(cfg)?)
}

fn invalid(messages: Vec<String>) -> anyhow::Error {
    anyhow::anyhow!("Invalid assessment data:\n  {}", messages.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn data_dir_flag_is_accepted_before_or_after_the_subcommand() {
        let cli = Cli::try_parse_from(["rhc", "--data-dir", "/srv/rhc", "list"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/rhc"));
        assert!(matches!(cli.command, Commands::List));

        let cli =
            Cli::try_parse_from(["rhc", "process", "a.json", "--data-dir", "/srv/rhc"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/srv/rhc"));
        assert!(
            matches!(cli.command, Commands::Process { ref file } if file == Path::new("a.json"))
        );
    }

    #[test]
    fn data_dir_defaults_when_neither_flag_nor_env_is_set() {
        if std::env::var_os("RHC_DATA_DIR").is_some() {
            return;
        }
        let cli = Cli::try_parse_from(["rhc", "questions"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn data_dir_reads_rhc_data_dir_from_env() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "data_dir")
            .unwrap();
        assert_eq!(arg.get_env(), Some(OsStr::new("RHC_DATA_DIR")));
        assert!(arg.is_global_set());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["rhc", "--data-dir", "x"]).is_err());
    }
}
