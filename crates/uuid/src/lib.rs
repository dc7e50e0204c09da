//! Assessment identifiers.
//!
//! Every processed assessment is identified by a random (v4) UUID. The same identifier names the
//! stored JSON document, the CSV row file and the PDF report:
//!
//! ```text
//! data/
//!   assessments/<id>.json
//!   assessments/<id>.csv
//!   reports/<id>.pdf
//! ```
//!
//! ## Canonical form
//! - Length: 36
//! - Lowercase hex in `8-4-4-4-12` groups separated by hyphens
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! Identifiers arriving from outside the process (URL paths, CLI arguments) are accepted only in
//! canonical form, so a parsed [`AssessmentId`] is always safe to embed in a file name.

mod id;

pub use id::{AssessmentId, Uuid};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
