//! Score calculation and tiering.
//!
//! Both scores start from 100 for every calculation. Option impacts are summed into a delta per
//! dimension and the result is clamped to `0..=100`. The insight score weights physical health
//! at 60% and mental health at 40%, rounded to one decimal place.

use crate::constants::{BASE_MENTAL_SCORE, BASE_PHYSICAL_SCORE};
use crate::questions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Care-need band derived from the insight score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Independent,
    Monitor,
    Assist,
    Intervene,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Independent, Tier::Monitor, Tier::Assist, Tier::Intervene];

    /// Band for an insight score: `>= 90`, `>= 70`, `>= 50`, otherwise intervene.
    pub fn from_insight_score(score: f64) -> Self {
        if score >= 90.0 {
            Tier::Independent
        } else if score >= 70.0 {
            Tier::Monitor
        } else if score >= 50.0 {
            Tier::Assist
        } else {
            Tier::Intervene
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Independent => "Independent",
            Tier::Monitor => "Monitor",
            Tier::Assist => "Assist",
            Tier::Intervene => "Intervene",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tier '{}'", s))
    }
}

/// Result of scoring one assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub physical_score: i32,
    pub mental_score: i32,
    pub insight_score: f64,
    pub tier: Tier,
    pub physical_delta: i32,
    pub mental_delta: i32,
}

/// Scores a set of `question name -> option label` responses.
///
/// Unknown questions and unknown options contribute nothing.
pub fn calculate(responses: &BTreeMap<String, String>) -> Scores {
    let (physical_delta, mental_delta) = responses
        .iter()
        .filter_map(|(name, answer)| questions::find(name)?.option(answer))
        .fold((0, 0), |(p, m), option| (p + option.physical, m + option.mental));

    let physical_score = (BASE_PHYSICAL_SCORE + physical_delta).clamp(0, 100);
    let mental_score = (BASE_MENTAL_SCORE + mental_delta).clamp(0, 100);
    let insight_score = insight_score(physical_score, mental_score);

    Scores {
        physical_score,
        mental_score,
        insight_score,
        tier: Tier::from_insight_score(insight_score),
        physical_delta,
        mental_delta,
    }
}

/// `0.6 * physical + 0.4 * mental`, to one decimal.
///
/// Both inputs are integers, so ten times the blend is the exact integer `6p + 4m`.
pub fn insight_score(physical: i32, mental: i32) -> f64 {
    f64::from(6 * physical + 4 * mental) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn best_case() -> BTreeMap<String, String> {
        questions::catalogue()
            .iter()
            .map(|q| (q.name.to_string(), q.options[0].label.to_string()))
            .collect()
    }

    fn worst_case() -> BTreeMap<String, String> {
        questions::catalogue()
            .iter()
            .map(|q| {
                let last = q.options[q.options.len() - 1];
                (q.name.to_string(), last.label.to_string())
            })
            .collect()
    }

    #[test]
    fn neutral_responses_score_full_marks() {
        let scores = calculate(&best_case());

        assert_eq!(scores.physical_score, 100);
        assert_eq!(scores.mental_score, 100);
        assert_eq!(scores.insight_score, 100.0);
        assert_eq!(scores.tier, Tier::Independent);
        assert_eq!((scores.physical_delta, scores.mental_delta), (0, 0));
    }

    #[test]
    fn worst_responses_accumulate_all_impacts() {
        let scores = calculate(&worst_case());

        assert_eq!(scores.physical_delta, -23);
        assert_eq!(scores.mental_delta, -13);
        assert_eq!(scores.physical_score, 77);
        assert_eq!(scores.mental_score, 87);
        assert_eq!(scores.insight_score, 81.0);
        assert_eq!(scores.tier, Tier::Monitor);
    }

    #[test]
    fn mixed_responses_round_to_one_decimal() {
        let scores = calculate(&responses(&[
            ("fall_risk", "Moderate"),
            ("cognitive_function", "Mild Impairment (21-25)"),
        ]));

        assert_eq!(scores.physical_score, 97);
        assert_eq!(scores.mental_score, 99);
        assert_eq!(scores.insight_score, 97.8);
    }

    #[test]
    fn unknown_questions_and_options_are_ignored() {
        let scores = calculate(&responses(&[
            ("fall_risk", "Catastrophic"),
            ("favourite_colour", "Blue"),
        ]));

        assert_eq!(scores.physical_score, 100);
        assert_eq!(scores.mental_score, 100);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_insight_score(90.0), Tier::Independent);
        assert_eq!(Tier::from_insight_score(89.9), Tier::Monitor);
        assert_eq!(Tier::from_insight_score(70.0), Tier::Monitor);
        assert_eq!(Tier::from_insight_score(69.9), Tier::Assist);
        assert_eq!(Tier::from_insight_score(50.0), Tier::Assist);
        assert_eq!(Tier::from_insight_score(49.9), Tier::Intervene);
        assert_eq!(Tier::from_insight_score(0.0), Tier::Intervene);
    }

    #[test]
    fn tier_parses_exact_names_only() {
        assert_eq!("Assist".parse::<Tier>(), Ok(Tier::Assist));
        assert!("assist".parse::<Tier>().is_err());
    }

    #[test]
    fn scores_serialise_with_snake_case_keys() {
        let json = serde_json::to_value(calculate(&best_case())).unwrap();
        assert_eq!(json["tier"], "Independent");
        assert_eq!(json["physical_score"], 100);
        assert_eq!(json["insight_score"], 100.0);
    }
}
