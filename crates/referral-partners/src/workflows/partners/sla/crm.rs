use super::super::contacts::ContactDirectory;
use super::super::domain::{Tier, TierLabel};
use super::super::outreach::outreach_action;
use super::super::scoring::ScoredPractice;
use super::SlaPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

const SF_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DEFAULT_CRM_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmSlaStatus {
    OnTrack,
    AtRisk,
    Overdue,
}

impl CrmSlaStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::OnTrack, Self::AtRisk, Self::Overdue]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Overdue => "Overdue",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::OnTrack => "[ OK ]",
            Self::AtRisk => "[ !! ]",
            Self::Overdue => "[LATE]",
        }
    }
}

/// Follow-up windows used on CRM accounts: 5 / 14 / 30 days with an at-risk
/// band up to one and a half times the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrmSlaPolicy;

impl CrmSlaPolicy {
    /// Last day (inclusive) that still counts as at risk.
    pub fn at_risk_until(&self, tier: TierLabel) -> u32 {
        let sla = self.window(tier);
        (f64::from(sla) * 1.5).round_ties_even() as u32
    }

    fn window(&self, tier: TierLabel) -> u32 {
        match tier {
            TierLabel::Tier(Tier::Tier1) => 5,
            TierLabel::Tier(Tier::Tier2) => 14,
            TierLabel::Tier(Tier::Tier3) | TierLabel::Unclassified => 30,
        }
    }
}

impl SlaPolicy for CrmSlaPolicy {
    type Status = CrmSlaStatus;

    fn threshold(&self, tier: TierLabel) -> Option<u32> {
        Some(self.window(tier))
    }

    fn status(&self, tier: TierLabel, days_since_contact: u32) -> CrmSlaStatus {
        if days_since_contact <= self.window(tier) {
            CrmSlaStatus::OnTrack
        } else if days_since_contact <= self.at_risk_until(tier) {
            CrmSlaStatus::AtRisk
        } else {
            CrmSlaStatus::Overdue
        }
    }
}

/// Simulated Salesforce account record.
#[derive(Debug, Clone, Serialize)]
pub struct CrmRecord {
    pub sf_id: String,
    pub account_name: String,
    pub practice_type: String,
    pub location: String,
    pub score: f64,
    pub tier: TierLabel,
    pub owner: String,
    pub days_since_contact: u32,
    pub sla_status: CrmSlaStatus,
    pub recommended_action: String,
    pub notes: String,
}

impl CrmRecord {
    pub fn sla_days(&self) -> u32 {
        CrmSlaPolicy.window(self.tier)
    }

    /// Days past the follow-up window; zero when inside it.
    pub fn days_past_sla(&self) -> u32 {
        CrmSlaPolicy.days_overdue(self.tier, self.days_since_contact)
    }
}

/// Deterministic fake account ID: `001Rula`, a zero-padded sequence, then
/// eleven characters drawn from an RNG seeded by the sequence.
pub fn make_sf_id(sequence: u32) -> String {
    let mut rng = StdRng::seed_from_u64(u64::from(sequence) + 42);
    let suffix: String = (0..11)
        .map(|_| SF_ID_ALPHABET[rng.random_range(0..SF_ID_ALPHABET.len())] as char)
        .collect();
    format!("001Rula{sequence:03}{suffix}")
}

/// Practices with no contact history are assumed to be a week stale.
pub fn build_crm_records<D>(scored: &[ScoredPractice], contacts: &D) -> Vec<CrmRecord>
where
    D: ContactDirectory + ?Sized,
{
    let policy = CrmSlaPolicy;
    let records: Vec<CrmRecord> = scored
        .iter()
        .zip(1u32..)
        .map(|(s, sequence)| {
            let name = s.practice.name.as_str();
            let days = contacts
                .days_since_contact(name)
                .unwrap_or(DEFAULT_CRM_DAYS);

            CrmRecord {
                sf_id: make_sf_id(sequence),
                account_name: s.practice.name.clone(),
                practice_type: s.practice.practice_type.clone(),
                location: s.practice.location.clone(),
                score: s.score,
                tier: s.tier,
                owner: contacts.owner_or_unassigned(name),
                days_since_contact: days,
                sla_status: policy.status(s.tier, days),
                recommended_action: outreach_action(&s.practice, s.tier),
                notes: s.practice.notes.clone(),
            }
        })
        .collect();

    info!(records = records.len(), "built CRM account records");
    records
}
