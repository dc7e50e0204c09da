//! Request and response bodies.
//!
//! Field names are part of the public JSON contract and match what existing clients send and
//! expect.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub message: String,
}

/// SMTP settings as seen by the server. The password itself is never reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SmtpStatusRes {
    pub smtp_configured: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password_set: bool,
}

/// One catalogue question and its permitted answers, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionRes {
    pub name: String,
    pub label: String,
    pub options: Vec<String>,
}

/// Patient block of an assessment submission. Only `email` is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    /// Required. Only checked for presence; an undeliverable address means no email is sent.
    pub email: String,
    pub name: Option<String>,
    /// Number or string.
    #[schema(value_type = Option<String>)]
    pub age: Option<Value>,
    pub gender: Option<String>,
    /// Tier reported by the patient's previous assessment. Shown as sent; when it names a tier
    /// it also drives escalation advice.
    pub previous_tier: Option<String>,
}

/// Assessment submission. Unrecognised top-level fields are kept in the stored JSON.
///
/// Only used to document `POST /assess`; the handler validates the raw document so that every
/// problem can be reported at once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessReq {
    pub timestamp: String,
    pub patient: PatientReq,
    /// `question name -> option label` for every catalogue question.
    pub responses: std::collections::BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoresRes {
    pub physical_score: i32,
    pub mental_score: i32,
    /// Weighted blend: 60% physical, 40% mental, one decimal place.
    pub insight_score: f64,
    /// One of `Independent`, `Monitor`, `Assist`, `Intervene`.
    pub tier: String,
    pub physical_delta: i32,
    pub mental_delta: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessRes {
    pub success: bool,
    pub assessment_id: String,
    pub scores: ScoresRes,
    /// False when SMTP is not configured or delivery failed; the assessment is still stored.
    pub email_sent: bool,
}

/// Error body. `details` is a list of messages for validation failures, a string otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<Value>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentSummary {
    pub assessment_id: String,
    pub has_report: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListAssessmentsRes {
    pub assessments: Vec<AssessmentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_without_details_omits_the_field() {
        let json = serde_json::to_value(ErrorRes::new("No JSON data provided")).unwrap();
        assert_eq!(json, json!({ "error": "No JSON data provided" }));
    }

    #[test]
    fn validation_details_serialise_as_list() {
        let res = ErrorRes::with_details(
            "Invalid assessment data",
            vec!["Missing patient email".to_string()],
        );
        assert_eq!(
            serde_json::to_value(res).unwrap(),
            json!({
                "error": "Invalid assessment data",
                "details": ["Missing patient email"]
            })
        );
    }
}
