//! Follow-up SLA policies.
//!
//! The tracker and CRM reports use different thresholds and status sets, so each
//! gets its own policy type. They share the `SlaPolicy` shape but not their rules.

mod crm;
mod tracker;

pub use crm::{build_crm_records, make_sf_id, CrmRecord, CrmSlaPolicy, CrmSlaStatus};
pub use tracker::{build_sla_records, SlaRecord, SlaStatus, TrackerSlaPolicy};

pub(crate) use tracker::sort_for_tracker;

use super::domain::TierLabel;

pub trait SlaPolicy {
    type Status;

    /// Days allowed since last contact, if the tier has a hard target.
    fn threshold(&self, tier: TierLabel) -> Option<u32>;

    fn status(&self, tier: TierLabel, days_since_contact: u32) -> Self::Status;

    fn days_overdue(&self, tier: TierLabel, days_since_contact: u32) -> u32 {
        self.threshold(tier)
            .map(|threshold| days_since_contact.saturating_sub(threshold))
            .unwrap_or(0)
    }
}
