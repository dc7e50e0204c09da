//! File-backed assessment storage.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   all_assessments.csv        # one row per processed assessment, header on first write
//!   assessments/
//!     <id>.json                # submitted document + id, scores, processed_at
//!     <id>.csv                 # header + single row
//!   reports/
//!     <id>.pdf
//! ```
//!
//! Per-assessment files are written once and never modified. The master CSV is append-only.

use crate::assessment::Assessment;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::questions;
use crate::scoring::Scores;
use chrono::{DateTime, Utc};
use rhc_types::NonEmptyText;
use rhc_uuid::AssessmentId;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const FIXED_CSV_COLUMNS: [&str; 13] = [
    "assessment_id",
    "timestamp",
    "processed_at",
    "email",
    "name",
    "age",
    "gender",
    "physical_score",
    "mental_score",
    "insight_score",
    "tier",
    "physical_delta",
    "mental_delta",
];

/// CSV header: the fixed columns followed by every question name in catalogue order.
pub fn csv_header() -> Vec<String> {
    FIXED_CSV_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(questions::catalogue().iter().map(|q| q.name.to_string()))
        .collect()
}

fn optional_text(value: Option<&NonEmptyText>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_row(
    id: &AssessmentId,
    assessment: &Assessment,
    scores: &Scores,
    processed_at: &DateTime<Utc>,
) -> Vec<String> {
    let patient = &assessment.patient;
    let mut row = vec![
        id.to_string(),
        assessment.timestamp.clone(),
        processed_at.to_rfc3339(),
        patient.email.clone(),
        optional_text(patient.name.as_ref()),
        optional_text(patient.age.as_ref()),
        optional_text(patient.gender.as_ref()),
        scores.physical_score.to_string(),
        scores.mental_score.to_string(),
        format!("{:.1}", scores.insight_score),
        scores.tier.to_string(),
        scores.physical_delta.to_string(),
        scores.mental_delta.to_string(),
    ];
    row.extend(
        questions::catalogue()
            .iter()
            .map(|q| assessment.response(q.name).unwrap_or_default().to_string()),
    );
    row
}

/// Storage for processed assessments under a single data directory.
///
/// Cloning is cheap; clones share the lock guarding the master CSV.
#[derive(Clone, Debug)]
pub struct AssessmentStore {
    cfg: Arc<CoreConfig>,
    master_csv_lock: Arc<Mutex<()>>,
}

impl AssessmentStore {
    /// Opens the store, creating the data, assessments and reports directories if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StorageDirCreation`] if any directory cannot be created.
    pub fn open(cfg: Arc<CoreConfig>) -> CoreResult<Self> {
        for dir in [
            cfg.data_dir().to_path_buf(),
            cfg.assessments_dir(),
            cfg.reports_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(CoreError::StorageDirCreation)?;
        }

        Ok(Self {
            cfg,
            master_csv_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn json_path(&self, id: &AssessmentId) -> PathBuf {
        id.file_path(&self.cfg.assessments_dir(), "json")
    }

    pub fn csv_path(&self, id: &AssessmentId) -> PathBuf {
        id.file_path(&self.cfg.assessments_dir(), "csv")
    }

    pub fn report_path(&self, id: &AssessmentId) -> PathBuf {
        id.file_path(&self.cfg.reports_dir(), "pdf")
    }

    /// Writes the submitted document with `assessment_id`, `scores` and `processed_at` added.
    ///
    /// # Arguments
    /// * `id` - Identifier shared by every output of this assessment
    /// * `assessment` - Validated submission; its raw document is what gets stored
    /// * `scores` - Scores computed from the responses
    /// * `processed_at` - Server-side processing time, stored as RFC 3339
    ///
    /// # Returns
    /// The path of the written `<id>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FileWrite`] if the file cannot be written.
    pub fn save_json(
        &self,
        id: &AssessmentId,
        assessment: &Assessment,
        scores: &Scores,
        processed_at: &DateTime<Utc>,
    ) -> CoreResult<PathBuf> {
        let mut document = match &assessment.raw {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        document.insert("assessment_id".into(), Value::String(id.to_string()));
        document.insert(
            "scores".into(),
            serde_json::to_value(scores).map_err(CoreError::Serialization)?,
        );
        document.insert(
            "processed_at".into(),
            Value::String(processed_at.to_rfc3339()),
        );

        let rendered =
            serde_json::to_string_pretty(&Value::Object(document)).map_err(CoreError::Serialization)?;

        let path = self.json_path(id);
        fs::write(&path, rendered).map_err(CoreError::FileWrite)?;
        Ok(path)
    }

    /// Writes `<id>.csv` and appends the same row to the master CSV.
    ///
    /// A failure to append to the master CSV is logged and does not fail the call.
    ///
    /// # Returns
    /// The path of the written `<id>.csv`.
    pub fn save_csv(
        &self,
        id: &AssessmentId,
        assessment: &Assessment,
        scores: &Scores,
        processed_at: &DateTime<Utc>,
    ) -> CoreResult<PathBuf> {
        let header = csv_header();
        let row = csv_row(id, assessment, scores, processed_at);

        let path = self.csv_path(id);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&header)?;
        writer.write_record(&row)?;
        writer.flush().map_err(CoreError::FileWrite)?;

        if let Err(e) = self.append_master_csv(&header, &row) {
            tracing::warn!(
                "failed to append to {}: {}",
                self.cfg.master_csv_path().display(),
                e
            );
        }

        Ok(path)
    }

    fn append_master_csv(&self, header: &[String], row: &[String]) -> CoreResult<()> {
        // A poisoned lock only means another append panicked; the file itself is still usable.
        let _guard = self
            .master_csv_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let path = self.cfg.master_csv_path();
        let is_new = !path.is_file();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(CoreError::FileWrite)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(header)?;
        }
        writer.write_record(row)?;
        writer.flush().map_err(CoreError::FileWrite)?;
        Ok(())
    }

    pub fn save_report(&self, id: &AssessmentId, bytes: &[u8]) -> CoreResult<PathBuf> {
        let path = self.report_path(id);
        fs::write(&path, bytes).map_err(CoreError::FileWrite)?;
        Ok(path)
    }

    /// Reads a stored assessment document.
    pub fn load_json(&self, id: &AssessmentId) -> CoreResult<Value> {
        let contents = read_existing(&self.json_path(id), id)?;
        serde_json::from_slice(&contents).map_err(CoreError::Deserialization)
    }

    /// Reads a stored PDF report.
    pub fn load_report(&self, id: &AssessmentId) -> CoreResult<Vec<u8>> {
        read_existing(&self.report_path(id), id)
    }

    /// Identifiers of all stored assessment documents, sorted.
    ///
    /// Files whose names are not canonical identifiers are skipped.
    pub fn list_ids(&self) -> CoreResult<Vec<AssessmentId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(self.cfg.assessments_dir()).map_err(CoreError::FileRead)? {
            let path = entry.map_err(CoreError::FileRead)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            match AssessmentId::parse(stem) {
                Ok(id) => ids.push(id),
                Err(_) => tracing::debug!("skipping unrecognised file {}", path.display()),
            }
        }

        ids.sort();
        Ok(ids)
    }
}

fn read_existing(path: &Path, id: &AssessmentId) -> CoreResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CoreError::NotFound(format!("assessment {}", id)),
        _ => CoreError::FileRead(e),
    })
}
