//! Constants used throughout the core crate.
//!
//! Path, filename and wording constants live here so storage, reports and email agree.

/// Default data directory when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default HTTP port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Directory (under the data directory) holding per-assessment JSON and CSV files.
pub const ASSESSMENTS_DIR_NAME: &str = "assessments";

/// Directory (under the data directory) holding PDF reports.
pub const REPORTS_DIR_NAME: &str = "reports";

/// Cumulative CSV of every processed assessment.
pub const MASTER_CSV_FILENAME: &str = "all_assessments.csv";

/// Starting physical score before response impacts are applied.
pub const BASE_PHYSICAL_SCORE: i32 = 100;

/// Starting mental score before response impacts are applied.
pub const BASE_MENTAL_SCORE: i32 = 100;

pub const REPORT_TITLE: &str = "Remote Home Check Assessment Report";

pub const EMAIL_SUBJECT: &str = "Remote Home Check Assessment Results";

/// Filename of the PDF attached to result emails.
pub const REPORT_ATTACHMENT_FILENAME: &str = "health_assessment_report.pdf";

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Placeholder for absent patient details in reports.
pub const NOT_AVAILABLE: &str = "N/A";
