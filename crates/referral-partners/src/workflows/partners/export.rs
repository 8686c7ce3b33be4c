use super::outreach::outreach_action;
use super::scoring::{sort_by_tier, ScoredPractice};
use super::sla::{CrmRecord, SlaRecord};
use super::{report, sla};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const SCORES_CSV: &str = "rula_partner_scores.csv";
pub const SLA_CSV: &str = "rula_sla_tracker.csv";
pub const CRM_CSV: &str = "rula_crm_records.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),
}

pub const SCORE_HEADERS: [&str; 16] = [
    "Rank",
    "Tier",
    "Name",
    "Practice Type",
    "Location",
    "Provider Count",
    "BH Referral Gap",
    "Insurance Networks",
    "Monthly Patient Volume",
    "Score",
    "Providers (pts)",
    "BH Gap (pts)",
    "Networks (pts)",
    "Volume (pts)",
    "Outreach Action",
    "Notes",
];

pub const SLA_HEADERS: [&str; 11] = [
    "Status",
    "Practice Name",
    "Practice Type",
    "Location",
    "Tier",
    "Score",
    "Owner",
    "Days Since Contact",
    "SLA (days)",
    "Days Overdue",
    "Recommended Action",
];

pub const CRM_HEADERS: [&str; 11] = [
    "SF Record ID",
    "Account Name",
    "Practice Type",
    "Location",
    "Score",
    "Tier",
    "Owner",
    "Days Since Last Contact",
    "SLA Status",
    "Recommended Action",
    "Notes",
];

/// Row structs serialize positionally; field order must match the header arrays.
#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    rank: usize,
    tier: &'static str,
    name: &'a str,
    practice_type: &'a str,
    location: &'a str,
    provider_count: u32,
    bh_referral_gap: &'a str,
    insurance_networks: String,
    monthly_patient_volume: u32,
    score: f64,
    providers_pts: f64,
    bh_gap_pts: f64,
    networks_pts: f64,
    volume_pts: f64,
    outreach_action: String,
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct SlaRow<'a> {
    status: &'static str,
    name: &'a str,
    practice_type: &'a str,
    location: &'a str,
    tier: &'static str,
    score: f64,
    owner: &'a str,
    days_since_contact: u32,
    sla_days: String,
    days_overdue: String,
    recommended_action: &'a str,
}

#[derive(Debug, Serialize)]
struct CrmRow<'a> {
    sf_id: &'a str,
    account_name: &'a str,
    practice_type: &'a str,
    location: &'a str,
    score: f64,
    tier: &'static str,
    owner: &'a str,
    days_since_contact: u32,
    sla_status: &'static str,
    recommended_action: &'a str,
    notes: &'a str,
}

/// Writes the header row up front so an export with no rows still names its columns.
fn header_writer<W: Write>(writer: W, headers: &[&str]) -> Result<csv::Writer<W>, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(headers)?;
    Ok(csv_writer)
}

/// Scored practices, Tier 1 first and highest score first within a tier.
pub fn write_scores<W: Write>(writer: W, scored: &[ScoredPractice]) -> Result<(), ExportError> {
    let mut ordered = scored.to_vec();
    sort_by_tier(&mut ordered);

    let mut csv_writer = header_writer(writer, &SCORE_HEADERS)?;
    for (index, s) in ordered.iter().enumerate() {
        let p = &s.practice;
        csv_writer.serialize(ScoreRow {
            rank: index + 1,
            tier: s.tier.heading(),
            name: &p.name,
            practice_type: &p.practice_type,
            location: &p.location,
            provider_count: p.provider_count,
            bh_referral_gap: p.bh_referral_gap.as_str(),
            insurance_networks: p.insurance_networks.join("; "),
            monthly_patient_volume: p.monthly_patient_volume,
            score: s.score,
            providers_pts: s.breakdown.providers,
            bh_gap_pts: s.breakdown.bh_gap,
            networks_pts: s.breakdown.networks,
            volume_pts: s.breakdown.volume,
            outreach_action: outreach_action(p, s.tier),
            notes: &p.notes,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Tracker records in status order, longest silence first.
pub fn write_sla<W: Write>(writer: W, records: &[SlaRecord]) -> Result<(), ExportError> {
    let mut ordered = records.to_vec();
    sla::sort_for_tracker(&mut ordered);

    let mut csv_writer = header_writer(writer, &SLA_HEADERS)?;
    for r in &ordered {
        csv_writer.serialize(SlaRow {
            status: r.status.label(),
            name: &r.name,
            practice_type: &r.practice_type,
            location: &r.location,
            tier: r.tier.label(),
            score: r.score,
            owner: &r.owner,
            days_since_contact: r.days_since_contact,
            sla_days: if r.sla_days > 0 {
                r.sla_days.to_string()
            } else {
                "N/A".to_string()
            },
            days_overdue: if r.days_overdue > 0 {
                r.days_overdue.to_string()
            } else {
                String::new()
            },
            recommended_action: &r.recommended_action,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_crm<W: Write>(writer: W, records: &[CrmRecord]) -> Result<(), ExportError> {
    let ordered = report::crm::sorted_by_tier(records);

    let mut csv_writer = header_writer(writer, &CRM_HEADERS)?;
    for r in ordered {
        csv_writer.serialize(CrmRow {
            sf_id: &r.sf_id,
            account_name: &r.account_name,
            practice_type: &r.practice_type,
            location: &r.location,
            score: r.score,
            tier: r.tier.label(),
            owner: &r.owner,
            days_since_contact: r.days_since_contact,
            sla_status: r.sla_status.label(),
            recommended_action: &r.recommended_action,
            notes: &r.notes,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Create {
        path: path.display().to_string(),
        source,
    })
}

pub fn export_scores(path: &Path, scored: &[ScoredPractice]) -> Result<(), ExportError> {
    write_scores(create(path)?, scored)?;
    info!(path = %path.display(), rows = scored.len(), "wrote score export");
    Ok(())
}

pub fn export_sla(path: &Path, records: &[SlaRecord]) -> Result<(), ExportError> {
    write_sla(create(path)?, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote SLA export");
    Ok(())
}

pub fn export_crm(path: &Path, records: &[CrmRecord]) -> Result<(), ExportError> {
    write_crm(create(path)?, records)?;
    info!(path = %path.display(), rows = records.len(), "wrote CRM export");
    Ok(())
}
