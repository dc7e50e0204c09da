//! Result email composition.

use crate::assessment::Assessment;
use crate::care_plan;
use crate::constants::{EMAIL_SUBJECT, NOT_AVAILABLE, PDF_CONTENT_TYPE, REPORT_ATTACHMENT_FILENAME};
use crate::scoring::Scores;
use rhc_mail::{Attachment, OutgoingEmail};
use rhc_types::NonEmptyText;

/// Plain-text body summarising the scores and care plan.
pub fn email_body(assessment: &Assessment, scores: &Scores) -> String {
    let patient = &assessment.patient;
    let name = patient
        .name
        .as_ref()
        .map(NonEmptyText::as_str)
        .unwrap_or("User");
    let previous_tier = patient.previous_tier_label().unwrap_or(NOT_AVAILABLE);
    let suggestion = care_plan::suggestion(scores.tier, patient.previous_tier_label());

    format!(
        "Dear {name},

Your Remote Home Check assessment has been completed.

Scores:
- Physical Health: {physical:.1}/100
- Mental Health: {mental:.1}/100
- Insight Score: {insight:.1}/100
- Tier: {tier}
- Previous Tier: {previous_tier}

Care Plan Suggestion:
{suggestion}

Please see the attached PDF for detailed results.

Best regards,
Remote Home Check Team
",
        physical = f64::from(scores.physical_score),
        mental = f64::from(scores.mental_score),
        insight = scores.insight_score,
        tier = scores.tier,
    )
}

/// The email sent to the patient, with the PDF report attached when one was rendered.
pub fn compose(assessment: &Assessment, scores: &Scores, report: Option<Vec<u8>>) -> OutgoingEmail {
    OutgoingEmail {
        to: assessment.patient.email.clone(),
        subject: EMAIL_SUBJECT.to_string(),
        body: email_body(assessment, scores),
        attachment: report.map(|bytes| Attachment {
            filename: REPORT_ATTACHMENT_FILENAME.to_string(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            bytes,
        }),
    }
}
