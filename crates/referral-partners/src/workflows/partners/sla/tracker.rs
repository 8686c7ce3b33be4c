use super::super::contacts::ContactDirectory;
use super::super::domain::{Tier, TierLabel};
use super::super::outreach::outreach_action;
use super::super::scoring::ScoredPractice;
use super::SlaPolicy;
use serde::Serialize;
use std::cmp::Reverse;
use tracing::info;

/// Tracker status, listed in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Urgent,
    Overdue,
    AtRisk,
    OnTrack,
    Monitor,
}

impl SlaStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Urgent,
            Self::Overdue,
            Self::AtRisk,
            Self::OnTrack,
            Self::Monitor,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT - SLA BREACH",
            Self::Overdue => "OVERDUE",
            Self::AtRisk => "AT RISK",
            Self::OnTrack => "ON TRACK",
            Self::Monitor => "MONITOR",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::Urgent => "[!!!]",
            Self::Overdue => "[OVR]",
            Self::AtRisk => "[ ! ]",
            Self::OnTrack => "[ OK]",
            Self::Monitor => "[ - ]",
        }
    }

    pub const fn section_label(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT - SLA BREACH  (Tier 1: not contacted within 48 hours)",
            Self::Overdue => "OVERDUE  (Tier 2: not contacted within 7 days)",
            Self::AtRisk => "AT RISK  (approaching SLA threshold)",
            Self::OnTrack => "ON TRACK",
            Self::Monitor => "MONITOR  (Tier 3: no hard SLA)",
        }
    }

    pub const fn order(self) -> u8 {
        self as u8
    }

    pub const fn is_breach(self) -> bool {
        matches!(self, Self::Urgent | Self::Overdue)
    }
}

/// 48-hour target for Tier 1, one week for Tier 2, none for Tier 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerSlaPolicy;

impl TrackerSlaPolicy {
    fn at_risk_from(tier: Tier) -> Option<u32> {
        match tier {
            Tier::Tier1 => Some(1),
            Tier::Tier2 => Some(5),
            Tier::Tier3 => None,
        }
    }
}

impl SlaPolicy for TrackerSlaPolicy {
    type Status = SlaStatus;

    fn threshold(&self, tier: TierLabel) -> Option<u32> {
        match tier {
            TierLabel::Tier(Tier::Tier1) => Some(2),
            TierLabel::Tier(Tier::Tier2) => Some(7),
            TierLabel::Tier(Tier::Tier3) | TierLabel::Unclassified => None,
        }
    }

    fn status(&self, tier: TierLabel, days_since_contact: u32) -> SlaStatus {
        let (Some(tier), Some(sla)) = (tier.tier(), self.threshold(tier)) else {
            return SlaStatus::Monitor;
        };

        if days_since_contact > sla {
            return match tier {
                Tier::Tier1 => SlaStatus::Urgent,
                _ => SlaStatus::Overdue,
            };
        }

        match Self::at_risk_from(tier) {
            Some(from) if days_since_contact >= from => SlaStatus::AtRisk,
            _ => SlaStatus::OnTrack,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlaRecord {
    pub name: String,
    pub practice_type: String,
    pub location: String,
    pub score: f64,
    pub tier: TierLabel,
    pub owner: String,
    pub days_since_contact: u32,
    /// Zero when the tier has no hard SLA.
    pub sla_days: u32,
    pub days_overdue: u32,
    pub status: SlaStatus,
    pub recommended_action: String,
}

/// Practices with no contact history count as contacted today.
pub fn build_sla_records<D>(scored: &[ScoredPractice], contacts: &D) -> Vec<SlaRecord>
where
    D: ContactDirectory + ?Sized,
{
    let policy = TrackerSlaPolicy;
    let records: Vec<SlaRecord> = scored
        .iter()
        .map(|s| {
            let name = s.practice.name.as_str();
            let days = contacts.days_since_contact(name).unwrap_or(0);

            SlaRecord {
                name: s.practice.name.clone(),
                practice_type: s.practice.practice_type.clone(),
                location: s.practice.location.clone(),
                score: s.score,
                tier: s.tier,
                owner: contacts.owner_or_unassigned(name),
                days_since_contact: days,
                sla_days: policy.threshold(s.tier).unwrap_or(0),
                days_overdue: policy.days_overdue(s.tier, days),
                status: policy.status(s.tier, days),
                recommended_action: outreach_action(&s.practice, s.tier),
            }
        })
        .collect();

    let breaches = records.iter().filter(|r| r.status.is_breach()).count();
    info!(records = records.len(), breaches, "built SLA tracker records");
    records
}

/// Status order first, then longest silence first.
pub(crate) fn sort_for_tracker(records: &mut [SlaRecord]) {
    records.sort_by_key(|r| (r.status.order(), Reverse(r.days_since_contact)));
}
