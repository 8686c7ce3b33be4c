use super::super::domain::Tier;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TierStats {
    pub tier: Tier,
    pub tier_label: &'static str,
    pub heading: &'static str,
    pub practices: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerWorkloadEntry {
    pub owner: String,
    pub accounts: usize,
    pub tier_counts: [usize; 3],
    pub average_score: f64,
    pub on_track: usize,
    pub at_risk: usize,
    pub overdue: usize,
    /// Account names, highest score first.
    pub account_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreachEntry {
    pub practice: String,
    pub tier_label: &'static str,
    pub days_since_contact: u32,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlaBreachSummary {
    pub total: usize,
    pub urgent: usize,
    pub overdue: usize,
    /// Longest silence first.
    pub breaches: Vec<BreachEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPractice {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    pub tier_label: &'static str,
    pub location: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub tiers: Vec<TierStats>,
    pub total_practices: usize,
    pub sla: SlaBreachSummary,
    pub top_practices: Vec<TopPractice>,
}
