pub mod crm;
pub(crate) mod format;
mod hooks;
mod pipeline;
mod priority;
mod sla;
pub mod views;

pub use format::{plural, score_bar, thousands, truncate, wrap};
pub use hooks::HooksReport;
pub use pipeline::{build_pipeline_summary, TOP_PRACTICE_LIMIT};
pub use priority::{tier_stats, PriorityReport, TierSummary};
pub use sla::SlaTrackerReport;
pub use views::{
    BreachEntry, OwnerWorkloadEntry, PipelineSummary, SlaBreachSummary, TierStats, TopPractice,
};

use super::domain::{BhReferralGap, TierLabel};

/// Tier tag shown next to a practice: `Tier 1`, or `Unclassified`.
pub(crate) fn short_tier(tier: TierLabel) -> &'static str {
    match tier {
        TierLabel::Tier(tier) => tier.label(),
        TierLabel::Unclassified => "Unclassified",
    }
}

pub(crate) fn gap_label(gap: &BhReferralGap) -> &str {
    match gap {
        BhReferralGap::Full => "Full BH Gap",
        BhReferralGap::Partial => "Partial BH Gap",
        BhReferralGap::None => "No BH Gap",
        BhReferralGap::Unknown(raw) => raw,
    }
}
