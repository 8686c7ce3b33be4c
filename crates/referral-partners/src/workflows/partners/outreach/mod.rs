mod hooks;

pub use hooks::{detect_signal, generate_hook, tier_one_hooks, HookSignal, OutreachHook};

use super::domain::{Practice, Tier, TierLabel};

pub const TEMPLATED_EMAIL_ACTION: &str =
    "Templated intro email - Use standard Rula referral partner template";
pub const NURTURE_ACTION: &str = "Nurture list - Add to drip sequence; revisit in 90 days";

/// Recommended next touch for a practice given its tier.
pub fn outreach_action(practice: &Practice, tier: TierLabel) -> String {
    match tier {
        TierLabel::Tier(Tier::Tier1) => {
            format!("Personalized email - Lead with: {}", practice.first_clause())
        }
        TierLabel::Tier(Tier::Tier2) => TEMPLATED_EMAIL_ACTION.to_string(),
        TierLabel::Tier(Tier::Tier3) | TierLabel::Unclassified => NURTURE_ACTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::partners::fixtures::sample_practices;

    fn practice(name: &str) -> Practice {
        sample_practices()
            .into_iter()
            .find(|p| p.name == name)
            .expect("fixture present")
    }

    #[test]
    fn tier_one_leads_with_first_note_clause() {
        let action = outreach_action(
            &practice("Sunrise Family Medicine"),
            TierLabel::Tier(Tier::Tier1),
        );
        assert_eq!(action, "Personalized email - Lead with: Large suburban group");
    }

    #[test]
    fn tier_one_strips_trailing_period_without_semicolon() {
        let mut p = practice("Valley Primary Care");
        p.notes = "Providers cite BH as biggest unmet patient need.".to_string();
        let action = outreach_action(&p, TierLabel::Tier(Tier::Tier1));
        assert_eq!(
            action,
            "Personalized email - Lead with: Providers cite BH as biggest unmet patient need"
        );
    }

    #[test]
    fn lower_tiers_use_fixed_templates() {
        let p = practice("Lakewood Medical Group");
        assert_eq!(
            outreach_action(&p, TierLabel::Tier(Tier::Tier2)),
            TEMPLATED_EMAIL_ACTION
        );
        assert_eq!(outreach_action(&p, TierLabel::Tier(Tier::Tier3)), NURTURE_ACTION);
        assert_eq!(outreach_action(&p, TierLabel::Unclassified), NURTURE_ACTION);
    }
}
