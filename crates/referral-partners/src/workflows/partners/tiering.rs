use super::domain::{Tier, TierLabel};

/// Score range owned by a tier. Lower bound inclusive, upper bound per `upper_inclusive`.
#[derive(Debug, Clone, Copy)]
pub struct TierRule {
    pub tier: Tier,
    pub min: f64,
    pub max: f64,
    pub upper_inclusive: bool,
}

impl TierRule {
    pub fn matches(&self, score: f64) -> bool {
        let below_max = if self.upper_inclusive {
            score <= self.max
        } else {
            score < self.max
        };
        score >= self.min && below_max
    }
}

/// Evaluated in order; the first matching rule wins.
pub const TIER_RULES: [TierRule; 3] = [
    TierRule {
        tier: Tier::Tier1,
        min: 70.0,
        max: 100.0,
        upper_inclusive: true,
    },
    TierRule {
        tier: Tier::Tier2,
        min: 50.0,
        max: 70.0,
        upper_inclusive: false,
    },
    TierRule {
        tier: Tier::Tier3,
        min: 0.0,
        max: 50.0,
        upper_inclusive: false,
    },
];

pub fn classify(score: f64) -> TierLabel {
    TIER_RULES
        .iter()
        .find(|rule| rule.matches(score))
        .map(|rule| TierLabel::Tier(rule.tier))
        .unwrap_or(TierLabel::Unclassified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_fall_into_the_higher_tier() {
        assert_eq!(classify(70.0), TierLabel::Tier(Tier::Tier1));
        assert_eq!(classify(69.9), TierLabel::Tier(Tier::Tier2));
        assert_eq!(classify(50.0), TierLabel::Tier(Tier::Tier2));
        assert_eq!(classify(49.9), TierLabel::Tier(Tier::Tier3));
        assert_eq!(classify(0.0), TierLabel::Tier(Tier::Tier3));
        assert_eq!(classify(100.0), TierLabel::Tier(Tier::Tier1));
    }

    #[test]
    fn out_of_range_scores_are_unclassified() {
        assert_eq!(classify(-0.1), TierLabel::Unclassified);
        assert_eq!(classify(100.1), TierLabel::Unclassified);
        assert_eq!(classify(f64::NAN), TierLabel::Unclassified);
    }

    proptest! {
        #[test]
        fn exactly_one_rule_matches_in_domain(score in 0.0f64..=100.0) {
            let matching = TIER_RULES.iter().filter(|rule| rule.matches(score)).count();
            prop_assert_eq!(matching, 1);
        }
    }
}
