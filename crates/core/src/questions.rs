//! The assessment question catalogue.
//!
//! Each question has a fixed, ordered list of answer options. Every option carries the amount it
//! moves the physical and mental scores; most options are neutral.

use serde::Serialize;

/// One selectable answer and its score impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: &'static str,
    pub physical: i32,
    pub mental: i32,
}

/// A single assessment question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    /// Key used in the `responses` object of a submission.
    pub name: &'static str,
    /// Human-readable label used in reports.
    pub label: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    /// Looks up an option by its exact label.
    pub fn option(&self, label: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }

    pub fn option_labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.label.to_string()).collect()
    }

    pub fn view(&self) -> QuestionView {
        QuestionView {
            name: self.name.to_string(),
            label: self.label.to_string(),
            options: self.option_labels(),
        }
    }
}

/// Serialisable form of a [`Question`] without score impacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub name: String,
    pub label: String,
    pub options: Vec<String>,
}

const fn opt(label: &'static str, physical: i32, mental: i32) -> AnswerOption {
    AnswerOption {
        label,
        physical,
        mental,
    }
}

static CATALOGUE: [Question; 9] = [
    Question {
        name: "fall_risk",
        label: "Fall Risk Assessment",
        options: &[opt("Low", 0, 0), opt("Moderate", -3, 0), opt("High", -8, 0)],
    },
    Question {
        name: "medication_adherence",
        label: "Medication Adherence",
        options: &[
            opt("Excellent (95-100%)", 0, 0),
            opt("Good (80-94%)", 0, 0),
            opt("Fair (65-79%)", -1, -1),
            opt("Poor (Below 65%)", -2, -2),
        ],
    },
    Question {
        name: "cognitive_function",
        label: "Cognitive Function Score",
        options: &[
            opt("Normal (26-30)", 0, 0),
            opt("Mild Impairment (21-25)", 0, -1),
            opt("Moderate Impairment (10-20)", 0, -3),
            opt("Severe Impairment (0-9)", 0, -5),
        ],
    },
    Question {
        name: "uti_risk",
        label: "UTI Risk Factors",
        options: &[
            opt("Low Risk", 0, 0),
            opt("Moderate Risk", -2, 0),
            opt("High Risk", -4, 0),
        ],
    },
    Question {
        name: "balance_test",
        label: "Balance Test Result",
        options: &[
            opt("Excellent (45-56 seconds)", 0, 0),
            opt("Good (35-44 seconds)", 0, 0),
            opt("Fair (25-34 seconds)", -1, 0),
            opt("Poor (Below 25 seconds)", -2, 0),
        ],
    },
    Question {
        name: "driving_safety",
        label: "Driving Safety Status",
        options: &[
            opt("Safe Driver", 0, 0),
            opt("Minor Concerns", -1, 0),
            opt("Major Concerns", -2, 0),
            opt("Unsafe to Drive", -3, 0),
        ],
    },
    Question {
        name: "nighttime_movement",
        label: "Nighttime Movement Patterns",
        options: &[
            opt("Normal Patterns", 0, 0),
            opt("Slightly Increased", 0, 0),
            opt("Significantly Increased", -1, -1),
            opt("Concerning Patterns", -2, -2),
        ],
    },
    Question {
        name: "social_engagement",
        label: "Social Engagement Level",
        options: &[
            opt("Highly Engaged", 0, 0),
            opt("Moderately Engaged", 0, 0),
            opt("Minimally Engaged", 0, -2),
            opt("Socially Isolated", 0, -4),
        ],
    },
    Question {
        name: "toilet_flush_count",
        label: "Daily Toilet Flush Count",
        options: &[
            opt("Normal (6-8 times)", 0, 0),
            opt("Slightly Elevated (9-12 times)", 0, 0),
            opt("Elevated (13-16 times)", -1, 0),
            opt("Very High (17+ times)", -2, 0),
        ],
    },
];

/// All questions in presentation order.
pub fn catalogue() -> &'static [Question] {
    &CATALOGUE
}

pub fn find(name: &str) -> Option<&'static Question> {
    CATALOGUE.iter().find(|q| q.name == name)
}

/// Serialisable views of every question, in catalogue order.
pub fn views() -> Vec<QuestionView> {
    CATALOGUE.iter().map(Question::view).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_nine_uniquely_named_questions() {
        let names: HashSet<_> = catalogue().iter().map(|q| q.name).collect();
        assert_eq!(catalogue().len(), 9);
        assert_eq!(names.len(), 9);
        assert_eq!(catalogue()[0].name, "fall_risk");
        assert_eq!(catalogue()[8].name, "toilet_flush_count");
    }

    #[test]
    fn first_option_of_every_question_is_neutral() {
        for question in catalogue() {
            let first = question.options[0];
            assert_eq!((first.physical, first.mental), (0, 0), "{}", question.name);
        }
    }

    #[test]
    fn impacts_never_raise_scores() {
        assert!(catalogue()
            .iter()
            .flat_map(|q| q.options)
            .all(|o| o.physical <= 0 && o.mental <= 0));
    }

    #[test]
    fn find_and_option_lookup() {
        let fall = find("fall_risk").expect("fall_risk exists");
        assert_eq!(fall.label, "Fall Risk Assessment");
        assert_eq!(fall.option("High").map(|o| o.physical), Some(-8));
        assert!(fall.option("high").is_none());
        assert!(find("unknown").is_none());
    }

    #[test]
    fn view_exposes_labels_only() {
        let view = find("uti_risk").unwrap().view();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "uti_risk",
                "label": "UTI Risk Factors",
                "options": ["Low Risk", "Moderate Risk", "High Risk"]
            })
        );
    }
}
