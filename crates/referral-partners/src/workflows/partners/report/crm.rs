//! CRM-style printouts: the account table, per-record detail cards and the
//! owner workload summary.

use super::super::domain::{Tier, TierLabel};
use super::super::sla::{CrmRecord, CrmSlaStatus};
use super::format::{banner, divider, rule, truncate};
use super::short_tier;
use super::views::OwnerWorkloadEntry;
use std::collections::BTreeMap;
use std::fmt;

const W_ID: usize = 18;
const W_NAME: usize = 30;
const W_SCORE: usize = 5;
const W_TIER: usize = 6;
const W_OWNER: usize = 14;
const W_DAYS: usize = 4;
const W_SLA: usize = 8;
const W_ACTION: usize = 44;

const CARD_WIDTH: usize = 72;

/// Tier priority first, then highest score. Ties keep input order.
pub fn sorted_by_tier(records: &[CrmRecord]) -> Vec<&CrmRecord> {
    let mut ordered: Vec<&CrmRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        a.tier
            .priority()
            .cmp(&b.tier.priority())
            .then(b.score.total_cmp(&a.score))
    });
    ordered
}

fn group_label(tier: TierLabel) -> String {
    match tier {
        TierLabel::Tier(Tier::Tier1) => "TIER 1  -  HIGH PRIORITY   (score >= 70)".to_string(),
        TierLabel::Tier(Tier::Tier2) => "TIER 2  -  MEDIUM PRIORITY (score 50-69)".to_string(),
        TierLabel::Tier(Tier::Tier3) => "TIER 3  -  LOWER PRIORITY  (score <  50)".to_string(),
        TierLabel::Unclassified => short_tier(tier).to_uppercase(),
    }
}

fn count_status(records: &[CrmRecord], status: CrmSlaStatus) -> usize {
    records.iter().filter(|r| r.sla_status == status).count()
}

fn count_tier(records: &[CrmRecord], tier: Tier) -> usize {
    records.iter().filter(|r| r.tier.is(tier)).count()
}

/// Fixed-width account table grouped by tier.
pub struct CrmTable<'a> {
    records: &'a [CrmRecord],
}

impl<'a> CrmTable<'a> {
    pub fn new(records: &'a [CrmRecord]) -> Self {
        Self { records }
    }
}

#[allow(clippy::too_many_arguments)]
fn table_row(
    sf_id: &str,
    name: &str,
    score: &str,
    tier: &str,
    owner: &str,
    days: &str,
    sla: &str,
    action: &str,
) -> String {
    format!(
        "  {sf_id:<W_ID$}  {name:<W_NAME$}  {score:>W_SCORE$}  {tier:<W_TIER$}  \
         {owner:<W_OWNER$}  {days:>W_DAYS$}  {sla:<W_SLA$}  {action:<W_ACTION$}"
    )
}

impl fmt::Display for CrmTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = table_row(
            "SF Record ID",
            "Account Name",
            "Score",
            "Tier",
            "Owner",
            "Days",
            "SLA",
            "Recommended Action",
        );
        let width = header.chars().count();

        writeln!(f)?;
        banner(f, width, "RULA SALESFORCE CRM  -  PARTNER ACCOUNT RECORDS")?;
        writeln!(f, "{header}")?;

        let mut previous: Option<TierLabel> = None;
        for r in sorted_by_tier(self.records) {
            if previous != Some(r.tier) {
                divider(f, width)?;
                writeln!(f, "  {}", group_label(r.tier))?;
                divider(f, width)?;
                previous = Some(r.tier);
            }
            writeln!(
                f,
                "{}",
                table_row(
                    &r.sf_id,
                    &truncate(&r.account_name, W_NAME),
                    &format!("{:.1}", r.score),
                    short_tier(r.tier),
                    &truncate(&r.owner, W_OWNER),
                    &r.days_since_contact.to_string(),
                    r.sla_status.badge(),
                    &truncate(&r.recommended_action, W_ACTION),
                )
            )?;
        }
        rule(f, '=', width)?;

        writeln!(f)?;
        writeln!(f, "  Total records : {}", self.records.len())?;
        writeln!(
            f,
            "  By tier       : Tier 1 = {}  |  Tier 2 = {}  |  Tier 3 = {}",
            count_tier(self.records, Tier::Tier1),
            count_tier(self.records, Tier::Tier2),
            count_tier(self.records, Tier::Tier3)
        )?;
        let statuses: Vec<String> = CrmSlaStatus::ordered()
            .into_iter()
            .map(|status| {
                format!(
                    "{} {} = {}",
                    status.badge(),
                    status.label(),
                    count_status(self.records, status)
                )
            })
            .collect();
        writeln!(f, "  SLA status    : {}", statuses.join("  |  "))?;
        writeln!(f)
    }
}

/// One detail card per account, in table order.
pub struct CrmRecordDetail<'a> {
    records: &'a [CrmRecord],
}

impl<'a> CrmRecordDetail<'a> {
    pub fn new(records: &'a [CrmRecord]) -> Self {
        Self { records }
    }
}

impl fmt::Display for CrmRecordDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, CARD_WIDTH, "FULL RECORD DETAIL")?;

        for r in sorted_by_tier(self.records) {
            writeln!(
                f,
                "\n  {}  |  {}  |  Score: {:.1}",
                r.sf_id,
                short_tier(r.tier),
                r.score
            )?;
            writeln!(f, "  Account Name   : {}", r.account_name)?;
            writeln!(f, "  Practice Type  : {}", r.practice_type)?;
            writeln!(f, "  Location       : {}", r.location)?;
            writeln!(f, "  Owner          : {}", r.owner)?;
            writeln!(
                f,
                "  Days Since Cntct: {}  -  SLA: {} {}",
                r.days_since_contact,
                r.sla_status.badge(),
                r.sla_status.label()
            )?;
            writeln!(f, "  Action         : {}", r.recommended_action)?;
            writeln!(f, "  Notes          : {}", r.notes)?;
            divider(f, CARD_WIDTH)?;
        }

        rule(f, '=', CARD_WIDTH)
    }
}

/// Per-owner rollup, owners in alphabetical order.
pub fn owner_workload(records: &[CrmRecord]) -> Vec<OwnerWorkloadEntry> {
    let mut by_owner: BTreeMap<&str, Vec<&CrmRecord>> = BTreeMap::new();
    for r in records {
        by_owner.entry(r.owner.as_str()).or_default().push(r);
    }

    by_owner
        .into_iter()
        .map(|(owner, mut owned)| {
            owned.sort_by(|a, b| b.score.total_cmp(&a.score));
            let status_count =
                |status: CrmSlaStatus| owned.iter().filter(|r| r.sla_status == status).count();
            let tier_count = |tier: Tier| owned.iter().filter(|r| r.tier.is(tier)).count();

            OwnerWorkloadEntry {
                owner: owner.to_string(),
                accounts: owned.len(),
                tier_counts: [
                    tier_count(Tier::Tier1),
                    tier_count(Tier::Tier2),
                    tier_count(Tier::Tier3),
                ],
                average_score: owned.iter().map(|r| r.score).sum::<f64>() / owned.len() as f64,
                on_track: status_count(CrmSlaStatus::OnTrack),
                at_risk: status_count(CrmSlaStatus::AtRisk),
                overdue: status_count(CrmSlaStatus::Overdue),
                account_names: owned.iter().map(|r| r.account_name.clone()).collect(),
            }
        })
        .collect()
}

pub struct OwnerWorkload<'a> {
    records: &'a [CrmRecord],
}

impl<'a> OwnerWorkload<'a> {
    pub fn new(records: &'a [CrmRecord]) -> Self {
        Self { records }
    }
}

impl fmt::Display for OwnerWorkload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, CARD_WIDTH, "OWNER WORKLOAD SUMMARY")?;
        writeln!(
            f,
            "\n  {:<16}  {:>5}  {:>3}  {:>3}  {:>3}  {:>9}  {:>4}  {:>4}  {:>4}  Accounts",
            "Owner", "Accts", "T1", "T2", "T3", "Avg Score", "OK", "Risk", "Late"
        )?;
        divider(f, CARD_WIDTH)?;

        for entry in owner_workload(self.records) {
            let [t1, t2, t3] = entry.tier_counts;
            writeln!(
                f,
                "  {:<16}  {:>5}  {:>3}  {:>3}  {:>3}  {:>9.1}  {:>4}  {:>4}  {:>4}  {}",
                entry.owner,
                entry.accounts,
                t1,
                t2,
                t3,
                entry.average_score,
                entry.on_track,
                entry.at_risk,
                entry.overdue,
                entry.account_names.join(", ")
            )?;
        }

        let mut overdue: Vec<&CrmRecord> = self
            .records
            .iter()
            .filter(|r| r.sla_status == CrmSlaStatus::Overdue)
            .collect();
        if !overdue.is_empty() {
            overdue.sort_by(|a, b| b.days_since_contact.cmp(&a.days_since_contact));
            writeln!(f)?;
            writeln!(f, "  OVERDUE FOLLOW-UPS  (action required)")?;
            divider(f, CARD_WIDTH)?;
            for r in overdue {
                writeln!(
                    f,
                    "  {:<16}  {:<30}  {}  {} days since contact  ({}d past SLA)",
                    r.owner,
                    r.account_name,
                    short_tier(r.tier),
                    r.days_since_contact,
                    r.days_past_sla()
                )?;
            }
        }

        writeln!(f)?;
        rule(f, '=', CARD_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::partners::fixtures::{sample_contacts, sample_practices};
    use crate::workflows::partners::scoring::ScoringEngine;
    use crate::workflows::partners::sla::build_crm_records;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<CrmRecord> {
        let scored = ScoringEngine::default().evaluate_all(&sample_practices());
        build_crm_records(&scored, &sample_contacts())
    }

    #[test]
    fn table_order_is_tier_then_score() {
        let records = records();
        let names: Vec<&str> = sorted_by_tier(&records)
            .into_iter()
            .map(|r| r.account_name.as_str())
            .collect();
        assert_eq!(names[0], "Sunrise Family Medicine");
        assert_eq!(names[3], "Clearwater Pediatrics");
        assert_eq!(names[9], "South Bay Family Practice");
    }

    #[test]
    fn table_groups_by_tier_and_prints_footer() {
        let text = CrmTable::new(&records()).to_string();
        let t1 = text.find("TIER 1  -  HIGH PRIORITY").expect("tier one group");
        let t3 = text.find("TIER 3  -  LOWER PRIORITY").expect("tier three group");
        assert!(t1 < t3);
        assert!(text.contains("  Total records : 10"));
        assert!(text.contains("By tier       : Tier 1 = 3  |  Tier 2 = 6  |  Tier 3 = 1"));
        assert!(text.contains("[ OK ] On Track = 6  |  [ !! ] At Risk = 1  |  [LATE] Overdue = 3"));
    }

    #[test]
    fn table_truncates_long_actions() {
        let text = CrmTable::new(&records()).to_string();
        assert!(text.contains("Nurture list - Add to drip sequence; revi..."));
        assert!(!text.contains("revisit in 90 days"));
    }

    #[test]
    fn owner_workload_rolls_up_each_owner() {
        let records = records();
        let workload = owner_workload(&records);
        let owners: Vec<&str> = workload.iter().map(|e| e.owner.as_str()).collect();
        let mut sorted = owners.clone();
        sorted.sort();
        assert_eq!(owners, sorted);

        let total: usize = workload.iter().map(|e| e.accounts).sum();
        assert_eq!(total, records.len());
        let overdue: usize = workload.iter().map(|e| e.overdue).sum();
        assert_eq!(overdue, 3);
    }

    #[test]
    fn workload_lists_overdue_follow_ups() {
        let text = OwnerWorkload::new(&records()).to_string();
        let callout = text
            .split("OVERDUE FOLLOW-UPS")
            .nth(1)
            .expect("overdue callout");
        let south_bay = callout.find("South Bay Family Practice").expect("south bay listed");
        let lakewood = callout.find("Lakewood Medical Group").expect("lakewood listed");
        assert!(south_bay < lakewood);
        assert!(callout.contains("52 days since contact  (22d past SLA)"));
    }

    #[test]
    fn detail_cards_show_every_record() {
        let records = records();
        let text = CrmRecordDetail::new(&records).to_string();
        for r in &records {
            assert!(text.contains(&r.sf_id));
        }
        assert!(text.contains("SLA: [LATE] Overdue"));
    }
}
