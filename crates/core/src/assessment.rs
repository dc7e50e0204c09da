//! Validated assessment submissions.

use crate::scoring::Tier;
use rhc_types::NonEmptyText;
use serde_json::Value;
use std::collections::BTreeMap;

/// Patient details carried by a submission.
///
/// Only `email` is required, and only its presence is checked; an address that cannot be
/// delivered to is reported when the email is sent. Optional fields that are absent, `null` or
/// blank are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientDetails {
    /// As submitted. `null` becomes the empty string.
    pub email: String,
    pub name: Option<NonEmptyText>,
    /// Rendered as text; submissions send both numbers and strings.
    pub age: Option<NonEmptyText>,
    pub gender: Option<NonEmptyText>,
    /// Free text, shown verbatim in the report and email.
    pub previous_tier: Option<NonEmptyText>,
}

impl PatientDetails {
    /// The submitted previous tier as text, if any.
    pub fn previous_tier_label(&self) -> Option<&str> {
        self.previous_tier.as_ref().map(NonEmptyText::as_str)
    }

    /// The previous tier when it names a known [`Tier`] exactly.
    pub fn known_previous_tier(&self) -> Option<Tier> {
        self.previous_tier_label()?.parse().ok()
    }
}

/// A submission that has passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    /// Client-supplied assessment time, stored verbatim.
    pub timestamp: String,
    pub patient: PatientDetails,
    /// `question name -> option label` for every catalogue question.
    pub responses: BTreeMap<String, String>,
    /// The submitted document, kept so unrecognised fields survive into storage.
    pub raw: Value,
}

impl Assessment {
    pub fn response(&self, question: &str) -> Option<&str> {
        self.responses.get(question).map(String::as_str)
    }
}

/// Text form of an optional JSON scalar: strings verbatim, other non-null values as JSON.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<NonEmptyText> {
    let text = match value? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    NonEmptyText::new(text).ok()
}

/// Display form of any JSON value in error messages.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
