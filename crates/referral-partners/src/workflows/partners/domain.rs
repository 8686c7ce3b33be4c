use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How much of the practice's behavioral health need goes unserved today.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BhReferralGap {
    None,
    Partial,
    Full,
    /// Unrecognized source value, kept verbatim for display.
    Unknown(String),
}

impl BhReferralGap {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "partial" => Self::Partial,
            "full" => Self::Full,
            _ => Self::Unknown(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Partial => "partial",
            Self::Full => "full",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for BhReferralGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prospective referral partner as captured by the field team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    pub name: String,
    pub practice_type: String,
    pub location: String,
    pub provider_count: u32,
    pub bh_referral_gap: BhReferralGap,
    pub insurance_networks: Vec<String>,
    pub monthly_patient_volume: u32,
    pub notes: String,
}

impl Practice {
    /// Number of distinct networks the practice shares with `accepted`.
    pub fn network_overlap(&self, accepted: &BTreeSet<String>) -> usize {
        distinct_overlap(&self.insurance_networks, accepted)
    }

    /// Notes up to the first `;`, trimmed, without trailing periods.
    pub fn first_clause(&self) -> &str {
        self.notes
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches('.')
    }
}

pub(crate) fn distinct_overlap(networks: &[String], accepted: &BTreeSet<String>) -> usize {
    networks
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|network| accepted.contains(*network))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Tier1, Self::Tier2, Self::Tier3]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1 - High Priority   (score >= 70)",
            Self::Tier2 => "Tier 2 - Medium Priority (score 50-69)",
            Self::Tier3 => "Tier 3 - Lower Priority  (score <  50)",
        }
    }

    /// RGB colour used when charting scores.
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::Tier1 => [0x2e, 0x7d, 0x32],
            Self::Tier2 => [0xed, 0x6c, 0x02],
            Self::Tier3 => [0x75, 0x75, 0x75],
        }
    }
}

/// Result of tier classification. Scores outside every rule are kept visible
/// as `Unclassified` rather than forced into a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLabel {
    Tier(Tier),
    Unclassified,
}

impl TierLabel {
    pub const fn tier(self) -> Option<Tier> {
        match self {
            Self::Tier(tier) => Some(tier),
            Self::Unclassified => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.label(),
            Self::Unclassified => "Unknown",
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.heading(),
            Self::Unclassified => "Unclassified",
        }
    }

    /// Sort key for report ordering: Tier 1 first, unclassified last.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Tier(Tier::Tier1) => 0,
            Self::Tier(Tier::Tier2) => 1,
            Self::Tier(Tier::Tier3) => 2,
            Self::Unclassified => 9,
        }
    }

    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::Tier(tier) => tier.color(),
            Self::Unclassified => [0x9e, 0x9e, 0x9e],
        }
    }

    pub fn is(self, tier: Tier) -> bool {
        self == Self::Tier(tier)
    }
}

impl From<Tier> for TierLabel {
    fn from(value: Tier) -> Self {
        Self::Tier(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn practice(notes: &str, networks: &[&str]) -> Practice {
        Practice {
            name: "Test Clinic".to_string(),
            practice_type: "Primary Care".to_string(),
            location: "Austin, TX".to_string(),
            provider_count: 4,
            bh_referral_gap: BhReferralGap::Partial,
            insurance_networks: networks.iter().map(|n| n.to_string()).collect(),
            monthly_patient_volume: 800,
            notes: notes.to_string(),
        }
    }

    #[test]
    fn gap_parsing_is_case_insensitive_and_keeps_unknown_values() {
        assert_eq!(BhReferralGap::parse(" FULL "), BhReferralGap::Full);
        assert_eq!(BhReferralGap::parse("Partial"), BhReferralGap::Partial);
        assert_eq!(
            BhReferralGap::parse("sometimes"),
            BhReferralGap::Unknown("sometimes".to_string())
        );
        assert_eq!(BhReferralGap::parse("sometimes").as_str(), "sometimes");
    }

    #[test]
    fn first_clause_stops_at_semicolon_and_strips_period() {
        let p = practice("Rural clinic.; long drive to psych", &[]);
        assert_eq!(p.first_clause(), "Rural clinic");

        let p = practice("  Only one clause here.  ", &[]);
        assert_eq!(p.first_clause(), "Only one clause here");
    }

    #[test]
    fn network_overlap_counts_distinct_matches() {
        let accepted: BTreeSet<String> = ["Aetna", "Cigna"].iter().map(|s| s.to_string()).collect();
        let p = practice("", &["Aetna", "Aetna", "Cigna", "Kaiser"]);
        assert_eq!(p.network_overlap(&accepted), 2);
    }

    #[test]
    fn unclassified_sorts_after_every_tier() {
        let mut labels = vec![
            TierLabel::Unclassified,
            TierLabel::Tier(Tier::Tier3),
            TierLabel::Tier(Tier::Tier1),
        ];
        labels.sort_by_key(|label| label.priority());
        assert_eq!(labels[0], TierLabel::Tier(Tier::Tier1));
        assert_eq!(labels[2], TierLabel::Unclassified);
        assert!(TierLabel::Tier(Tier::Tier2).is(Tier::Tier2));
        assert!(!TierLabel::Unclassified.is(Tier::Tier2));
    }
}
