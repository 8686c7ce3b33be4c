//! Referral partner prioritization: scoring, tiering, outreach actions, SLA
//! tracking and the reports built on top of them.

pub mod chart;
pub mod contacts;
pub mod domain;
pub mod export;
pub mod fixtures;
pub mod import;
pub mod outreach;
pub mod report;
pub mod scoring;
pub mod sla;
pub mod tiering;

pub use chart::{render_score_chart, ChartError, ChartOutcome, SCORES_PNG};
pub use contacts::{ContactDirectory, ContactImportError, StaticContactDirectory};
pub use domain::{BhReferralGap, Practice, Tier, TierLabel};
pub use export::{ExportError, CRM_CSV, SCORES_CSV, SLA_CSV};
pub use import::{import_practices, import_practices_from_path, ImportError};
pub use outreach::{generate_hook, outreach_action, tier_one_hooks, HookSignal, OutreachHook};
pub use scoring::{ScoreBreakdown, ScoredPractice, ScoringConfig, ScoringEngine};
pub use sla::{
    build_crm_records, build_sla_records, CrmRecord, CrmSlaPolicy, CrmSlaStatus, SlaPolicy,
    SlaRecord, SlaStatus, TrackerSlaPolicy,
};
pub use tiering::classify;
