//! Submission validation.
//!
//! Validation collects every problem it finds rather than stopping at the first, so a client can
//! fix a submission in one round trip. Messages are part of the HTTP contract.

use crate::assessment::{display_value, scalar_text, Assessment, PatientDetails};
use crate::questions;
use serde_json::Value;
use std::collections::BTreeMap;

const REQUIRED_FIELDS: [&str; 3] = ["timestamp", "patient", "responses"];

/// Validates a submitted assessment document.
///
/// # Errors
///
/// Returns every validation message, in document order, when the submission is rejected.
pub fn validate_assessment(data: &Value) -> Result<Assessment, Vec<String>> {
    let Some(object) = data.as_object() else {
        return Err(vec!["Assessment must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    let patient = object
        .get("patient")
        .and_then(|p| validate_patient(p, &mut errors));

    let responses = object
        .get("responses")
        .and_then(|r| validate_responses(r, &mut errors));

    let timestamp = match object.get("timestamp") {
        Some(Value::String(ts)) => Some(ts.clone()),
        Some(_) => {
            errors.push("Timestamp must be a string".to_string());
            None
        }
        None => None,
    };

    match (timestamp, patient, responses) {
        (Some(timestamp), Some(patient), Some(responses)) if errors.is_empty() => Ok(Assessment {
            timestamp,
            patient,
            responses,
            raw: data.clone(),
        }),
        _ => Err(errors),
    }
}

fn validate_patient(value: &Value, errors: &mut Vec<String>) -> Option<PatientDetails> {
    let Some(patient) = value.as_object() else {
        errors.push("Patient field must be a dictionary".to_string());
        return None;
    };

    let Some(email) = patient.get("email") else {
        errors.push("Missing patient email".to_string());
        return None;
    };

    Some(PatientDetails {
        email: match email {
            Value::Null => String::new(),
            other => display_value(other),
        },
        name: scalar_text(patient.get("name")),
        age: scalar_text(patient.get("age")),
        gender: scalar_text(patient.get("gender")),
        previous_tier: scalar_text(patient.get("previous_tier")),
    })
}

/// Checks every catalogue question has a recognised answer. Extra keys are ignored.
fn validate_responses(value: &Value, errors: &mut Vec<String>) -> Option<BTreeMap<String, String>> {
    let Some(responses) = value.as_object() else {
        errors.push("Responses field must be a dictionary".to_string());
        return None;
    };

    let mut valid = BTreeMap::new();
    let mut complete = true;

    for question in questions::catalogue() {
        let Some(answer) = responses.get(question.name) else {
            errors.push(format!("Missing response for {}", question.name));
            complete = false;
            continue;
        };

        match answer.as_str().and_then(|a| question.option(a)) {
            Some(option) => {
                valid.insert(question.name.to_string(), option.label.to_string());
            }
            None => {
                errors.push(format!(
                    "Invalid response '{}' for {}",
                    display_value(answer),
                    question.name
                ));
                complete = false;
            }
        }
    }

    complete.then_some(valid)
}
