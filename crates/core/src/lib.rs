//! # Remote Home Check Core
//!
//! Core business logic for scoring remote home-check assessments:
//! - The question catalogue and per-answer score impacts
//! - Physical, mental and insight scoring with care tiers
//! - Care plan suggestions, including escalation on tier changes
//! - File storage of assessments (JSON, CSV) and PDF reports under the data directory
//! - Composition of the result email
//!
//! **No API concerns**: HTTP servers and request/response shapes belong in `api-rest` and
//! `api-shared`.

pub mod assessment;
pub mod care_plan;
pub mod config;
pub mod constants;
pub mod error;
pub mod notification;
pub mod questions;
pub mod report;
pub mod scoring;
pub mod service;
pub mod storage;
pub mod validation;

pub use assessment::{Assessment, PatientDetails};
pub use config::CoreConfig;
pub use constants::{DEFAULT_DATA_DIR, DEFAULT_PORT};
pub use error::{CoreError, CoreResult, ProcessError};
pub use questions::QuestionView;
pub use scoring::{Scores, Tier};
pub use service::{AssessmentService, ProcessOutcome};
pub use storage::AssessmentStore;

pub use rhc_types::{EmailAddress, NonEmptyText};
pub use rhc_uuid::AssessmentId;
