#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write assessment file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read assessment file: {0}")]
    FileRead(std::io::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to serialize assessment: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize assessment: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to render report: {0}")]
    Report(#[from] rhc_report::ReportError),
    #[error("invalid assessment id: {0}")]
    Uuid(#[from] rhc_uuid::UuidError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Outcome of a failed [`AssessmentService::process`](crate::AssessmentService::process) call.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The submission was rejected; every problem found is listed.
    #[error("invalid assessment data: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// The submission was valid but could not be persisted or rendered.
    #[error("processing failed: {0}")]
    Failed(#[from] CoreError),
}
