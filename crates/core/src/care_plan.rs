//! Care plan suggestions.
//!
//! A tier change since the previous assessment takes precedence over the per-tier default, but
//! only for deteriorations the table below names. Improvements fall back to the default.
//!
//! The previous tier arrives as free text. A value that names no tier still counts as a change,
//! so a drop to `Intervene` escalates whatever was recorded before.

use crate::scoring::Tier;

/// Suggested next step for `tier`.
///
/// # Arguments
/// * `tier` - Tier of the assessment being processed
/// * `previous_tier` - Tier text the patient's previous assessment reported, if any
///
/// # Returns
/// An escalation step when the tier worsened in a way that needs one, otherwise
/// [`default_for`]`(tier)`.
pub fn suggestion(tier: Tier, previous_tier: Option<&str>) -> &'static str {
    if let Some(previous) = previous_tier.filter(|p| *p != tier.as_str()) {
        match (tier, previous.parse::<Tier>().ok()) {
            (Tier::Monitor, Some(Tier::Independent)) => {
                return "Schedule balance & home-safety assessment; brief caregiver check-in";
            }
            (Tier::Assist, Some(Tier::Independent | Tier::Monitor)) => {
                return "Initiate physical-therapy evaluation; schedule telehealth PCP visit within 72h";
            }
            (Tier::Intervene, _) => {
                return "Convene multidisciplinary care conference (PCP, PT/OT, social worker); consider long-term-care placement";
            }
            _ => {}
        }
    }

    default_for(tier)
}

/// Standing recommendation for a tier with no escalation.
pub fn default_for(tier: Tier) -> &'static str {
    match tier {
        Tier::Independent => {
            "Resume standard monitoring; schedule motivational check-in and goal-setting session"
        }
        Tier::Monitor => {
            "Conduct comprehensive medication reconciliation; recommend a daytime activity or exercise program"
        }
        Tier::Assist => {
            "Arrange part-time home-care aide (e.g., 12h/week); review medication-adherence log"
        }
        Tier::Intervene => {
            "Recommend car-key removal; seek a senior-living community or arrange for a full-time in-home provider; enrol in fall-prevention PT"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_previous_tier_uses_default() {
        for tier in Tier::ALL {
            assert_eq!(suggestion(tier, None), default_for(tier));
        }
    }

    #[test]
    fn unchanged_tier_uses_default() {
        assert_eq!(
            suggestion(Tier::Assist, Some("Assist")),
            default_for(Tier::Assist)
        );
    }

    #[test]
    fn independent_to_monitor_escalates() {
        assert!(suggestion(Tier::Monitor, Some("Independent")).starts_with("Schedule balance"));
    }

    #[test]
    fn drop_to_assist_escalates_from_higher_tiers() {
        for previous in [Tier::Independent, Tier::Monitor] {
            assert!(
                suggestion(Tier::Assist, Some(previous.as_str()))
                    .starts_with("Initiate physical-therapy")
            );
        }
    }

    #[test]
    fn intervene_escalates_from_any_other_tier() {
        for previous in [Tier::Independent, Tier::Monitor, Tier::Assist] {
            assert!(suggestion(Tier::Intervene, Some(previous.as_str())).starts_with("Convene"));
        }
    }

    #[test]
    fn improvements_use_default() {
        assert_eq!(
            suggestion(Tier::Independent, Some("Monitor")),
            default_for(Tier::Independent)
        );
        assert_eq!(
            suggestion(Tier::Monitor, Some("Assist")),
            default_for(Tier::Monitor)
        );
        assert_eq!(
            suggestion(Tier::Assist, Some("Intervene")),
            default_for(Tier::Assist)
        );
    }

    #[test]
    fn unrecognised_previous_tier_counts_as_a_change() {
        assert!(suggestion(Tier::Intervene, Some("Assisted Living")).starts_with("Convene"));
        assert_eq!(
            suggestion(Tier::Monitor, Some("independent")),
            default_for(Tier::Monitor)
        );
    }
}
