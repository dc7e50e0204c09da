//! The assessment processing pipeline.
//!
//! `process` runs validate, score, persist (JSON, CSV, PDF) and notify, in that order. Every
//! step before notification is required; notification is best effort and only reported.

use crate::assessment::Assessment;
use crate::error::{CoreError, CoreResult, ProcessError};
use crate::questions::{self, QuestionView};
use crate::report::build_report;
use crate::scoring::{self, Scores};
use crate::storage::AssessmentStore;
use crate::{notification, validation};
use chrono::Utc;
use rhc_mail::{Mailer, SmtpStatus};
use rhc_types::EmailAddress;
use rhc_uuid::AssessmentId;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of a successfully processed assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOutcome {
    pub assessment_id: AssessmentId,
    pub scores: Scores,
    pub email_sent: bool,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
}

/// Pure assessment operations - no HTTP concerns.
///
/// All methods block on file and network I/O; async callers should run them on a blocking
/// worker.
#[derive(Clone)]
pub struct AssessmentService {
    store: AssessmentStore,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for AssessmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentService")
            .field("store", &self.store)
            .field("mailer_configured", &self.mailer.is_configured())
            .finish()
    }
}

impl AssessmentService {
    pub fn new(store: AssessmentStore, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    pub fn store(&self) -> &AssessmentStore {
        &self.store
    }

    pub fn questions(&self) -> Vec<QuestionView> {
        questions::views()
    }

    pub fn smtp_status(&self) -> SmtpStatus {
        self.mailer.status()
    }

    /// Validates and scores a submission without persisting anything.
    pub fn score(&self, data: &Value) -> Result<(Assessment, Scores), ProcessError> {
        let assessment = validation::validate_assessment(data).map_err(ProcessError::Invalid)?;
        let scores = scoring::calculate(&assessment.responses);
        Ok((assessment, scores))
    }

    /// Processes a submitted assessment end to end.
    ///
    /// # Arguments
    /// * `data` - The submitted assessment document, as parsed from the request body
    ///
    /// # Returns
    /// A [`ProcessOutcome`] with the shared assessment id, the scores, the paths written and
    /// whether the result email was sent.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::Invalid`] with every validation message if the submission is rejected.
    /// - [`ProcessError::Failed`] if the JSON, CSV or PDF output cannot be produced.
    ///
    /// Email delivery problems are logged and surface only as `email_sent == false`.
    pub fn process(&self, data: &Value) -> Result<ProcessOutcome, ProcessError> {
        let (assessment, scores) = self.score(data)?;

        let assessment_id = AssessmentId::new();
        let processed_at = Utc::now();

        let json_path = self
            .store
            .save_json(&assessment_id, &assessment, &scores, &processed_at)?;
        let csv_path = self
            .store
            .save_csv(&assessment_id, &assessment, &scores, &processed_at)?;

        let report = build_report(&assessment, &scores)
            .render()
            .map_err(CoreError::from)?;
        let report_path = self.store.save_report(&assessment_id, &report)?;

        tracing::info!(
            assessment_id = %assessment_id,
            tier = %scores.tier,
            insight_score = scores.insight_score,
            "assessment processed"
        );

        let email_sent = self.notify(&assessment, &scores, report);

        Ok(ProcessOutcome {
            assessment_id,
            scores,
            email_sent,
            json_path,
            csv_path,
            report_path,
        })
    }

    fn notify(&self, assessment: &Assessment, scores: &Scores, report: Vec<u8>) -> bool {
        if let Err(e) = EmailAddress::parse(&assessment.patient.email) {
            tracing::warn!("assessment email not sent: {}", e);
            return false;
        }

        let email = notification::compose(assessment, scores, Some(report));

        match self.mailer.send(&email) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("assessment email to {} not sent: {}", email.to, e);
                false
            }
        }
    }

    pub fn load_assessment(&self, id: &AssessmentId) -> CoreResult<Value> {
        self.store.load_json(id)
    }

    pub fn load_report(&self, id: &AssessmentId) -> CoreResult<Vec<u8>> {
        self.store.load_report(id)
    }

    pub fn list_assessments(&self) -> CoreResult<Vec<AssessmentId>> {
        self.store.list_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use rhc_mail::{MailError, MailResult, OutgoingEmail, SmtpConfig};
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingMailer {
        fail: bool,
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, email: &OutgoingEmail) -> MailResult<()> {
            if self.fail {
                return Err(MailError::Transport("connection refused".into()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }

        fn is_configured(&self) -> bool {
            !self.fail
        }

        fn status(&self) -> SmtpStatus {
            SmtpConfig::default().status()
        }
    }

    fn service(dir: &TempDir, mailer: Arc<RecordingMailer>) -> AssessmentService {
        let cfg = Arc::new(CoreConfig::new(dir.path().join("data")).unwrap());
        AssessmentService::new(AssessmentStore::open(cfg).unwrap(), mailer)
    }

    fn submission() -> Value {
        let responses: serde_json::Map<String, Value> = questions::catalogue()
            .iter()
            .map(|q| (q.name.to_string(), json!(q.options[0].label)))
            .collect();
        json!({
            "timestamp": "2025-06-01T10:00:00Z",
            "patient": { "email": "jane@example.com", "name": "Jane" },
            "responses": responses
        })
    }

    #[test]
    fn process_persists_every_output_under_one_id() {
        let tmp = TempDir::new().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(&tmp, mailer.clone());

        let outcome = service.process(&submission()).expect("should process");
        let id = outcome.assessment_id.to_string();

        for path in [&outcome.json_path, &outcome.csv_path, &outcome.report_path] {
            assert!(path.is_file(), "{} missing", path.display());
            assert!(path.to_string_lossy().contains(&id));
        }
        assert_eq!(outcome.scores.tier, scoring::Tier::Independent);
        assert!(outcome.email_sent);

        let stored = service.load_assessment(&outcome.assessment_id).unwrap();
        assert_eq!(stored["assessment_id"], id);
        assert_eq!(service.list_assessments().unwrap(), vec![outcome.assessment_id]);
    }

    #[test]
    fn process_emails_patient_with_pdf() {
        let tmp = TempDir::new().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(&tmp, mailer.clone());

        service.process(&submission()).unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        let attachment = sent[0].attachment.as_ref().expect("pdf attached");
        assert!(attachment.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn mail_failure_does_not_fail_processing() {
        let tmp = TempDir::new().unwrap();
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        });
        let service = service(&tmp, mailer);

        let outcome = service.process(&submission()).expect("should still process");
        assert!(!outcome.email_sent);
        assert!(outcome.report_path.is_file());
    }

    #[test]
    fn undeliverable_email_is_stored_but_not_sent() {
        let tmp = TempDir::new().unwrap();
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(&tmp, mailer.clone());
        let mut data = submission();
        data["patient"]["email"] = json!("");

        let outcome = service.process(&data).expect("should process");
        assert!(!outcome.email_sent);
        assert!(outcome.json_path.is_file());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn invalid_submission_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(RecordingMailer::default()));

        let err = service
            .process(&json!({ "timestamp": "x" }))
            .expect_err("should be rejected");
        match err {
            ProcessError::Invalid(details) => {
                assert!(details.contains(&"Missing required field: patient".to_string()));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(service.list_assessments().unwrap().is_empty());
    }

    #[test]
    fn storage_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let service = service(&tmp, Arc::new(RecordingMailer::default()));
        std::fs::remove_dir_all(service.store().config().assessments_dir()).unwrap();

        let err = service.process(&submission()).expect_err("should fail");
        assert!(matches!(err, ProcessError::Failed(CoreError::FileWrite(_))));
    }
}
