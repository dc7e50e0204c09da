//! Assessment report layout.

use crate::assessment::Assessment;
use crate::care_plan;
use crate::constants::{NOT_AVAILABLE, REPORT_TITLE};
use crate::questions;
use crate::scoring::Scores;
use rhc_report::{FontWeight, ReportDocument};
use rhc_types::NonEmptyText;

const BODY_SIZE: f32 = 12.0;

/// Lays out the PDF report for one scored assessment.
pub fn build_report(assessment: &Assessment, scores: &Scores) -> ReportDocument {
    let patient = &assessment.patient;
    let or_na = |value: Option<&NonEmptyText>| {
        value
            .map(NonEmptyText::as_str)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };
    let previous_tier = patient.previous_tier_label().unwrap_or(NOT_AVAILABLE);

    let mut doc = ReportDocument::new(REPORT_TITLE);

    doc.line(format!("Patient: {}", or_na(patient.name.as_ref())), FontWeight::Bold, BODY_SIZE)
        .line(format!("Email: {}", patient.email), FontWeight::Bold, BODY_SIZE)
        .line(format!("Age: {}", or_na(patient.age.as_ref())), FontWeight::Bold, BODY_SIZE)
        .line(
            format!("Assessment Date: {}", assessment.timestamp),
            FontWeight::Bold,
            BODY_SIZE,
        )
        .line(format!("Previous Tier: {}", previous_tier), FontWeight::Bold, BODY_SIZE)
        .spacer(10.0);

    doc.heading("Assessment Scores")
        .line(
            format!("Physical Health Score: {:.1}/100", f64::from(scores.physical_score)),
            FontWeight::Regular,
            BODY_SIZE,
        )
        .line(
            format!("Mental Health Score: {:.1}/100", f64::from(scores.mental_score)),
            FontWeight::Regular,
            BODY_SIZE,
        )
        .line(
            format!("Insight Score: {:.1}/100", scores.insight_score),
            FontWeight::Regular,
            BODY_SIZE,
        )
        .line(format!("Tier: {}", scores.tier), FontWeight::Regular, BODY_SIZE)
        .spacer(10.0);

    doc.heading("Assessment Responses");
    for question in questions::catalogue() {
        let answer = assessment.response(question.name).unwrap_or("Not answered");
        doc.paragraph(format!("{}: {}", question.label, answer), BODY_SIZE)
            .spacer(2.0);
    }
    doc.spacer(10.0);

    doc.heading("Care Plan Suggestion").paragraph(
        care_plan::suggestion(scores.tier, patient.previous_tier_label()),
        BODY_SIZE,
    );

    doc
}
