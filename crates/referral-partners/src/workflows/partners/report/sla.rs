use super::super::sla::{sort_for_tracker, SlaRecord, SlaStatus};
use super::format::{banner, divider, plural, rule};
use super::short_tier;
use std::collections::BTreeMap;
use std::fmt;

const REPORT_WIDTH: usize = 80;

/// Tracker printout grouped by status, with counts and an owner callout.
pub struct SlaTrackerReport {
    ordered: Vec<SlaRecord>,
}

impl SlaTrackerReport {
    pub fn new(records: &[SlaRecord]) -> Self {
        let mut ordered = records.to_vec();
        sort_for_tracker(&mut ordered);
        Self { ordered }
    }

    pub fn records(&self) -> &[SlaRecord] {
        &self.ordered
    }

    pub fn count(&self, status: SlaStatus) -> usize {
        self.ordered.iter().filter(|r| r.status == status).count()
    }

    fn write_record(f: &mut fmt::Formatter<'_>, r: &SlaRecord) -> fmt::Result {
        let overdue_note = if r.days_overdue > 0 {
            format!("  ({}d past SLA)", r.days_overdue)
        } else {
            String::new()
        };
        let sla_label = if r.sla_days > 0 {
            format!("SLA: {}d", r.sla_days)
        } else {
            "no SLA".to_string()
        };

        writeln!(
            f,
            "  {}  {:<34}  {}  |  Score: {:4.1}  |  {}d since contact{}",
            r.status.badge(),
            r.name,
            short_tier(r.tier),
            r.score,
            r.days_since_contact,
            overdue_note
        )?;
        writeln!(
            f,
            "          Owner: {:<16}  {:<28}  {}  [{}]",
            r.owner, r.practice_type, r.location, sla_label
        )?;
        writeln!(f, "          Action: {}", r.recommended_action)
    }

    fn write_owner_callout(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut by_owner: BTreeMap<&str, Vec<&SlaRecord>> = BTreeMap::new();
        for r in self.ordered.iter().filter(|r| r.status.is_breach()) {
            by_owner.entry(r.owner.as_str()).or_default().push(r);
        }
        if by_owner.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "  OWNER ACTION REQUIRED:")?;
        divider(f, REPORT_WIDTH)?;
        for (owner, mut items) in by_owner {
            items.sort_by(|a, b| b.days_since_contact.cmp(&a.days_since_contact));
            for r in items {
                writeln!(
                    f,
                    "  {owner:<16}  [{:>2}d]  {:<34}  {}",
                    r.days_since_contact,
                    r.name,
                    r.status.label()
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SlaTrackerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, REPORT_WIDTH, "RULA PARTNER OUTREACH  -  SLA TRACKER")?;
        writeln!(
            f,
            "  SLA rules:  Tier 1 = 48 hrs (2 days)  |  Tier 2 = 7 days  |  Tier 3 = no SLA"
        )?;
        rule(f, '=', REPORT_WIDTH)?;

        let mut previous: Option<SlaStatus> = None;
        for r in &self.ordered {
            if previous != Some(r.status) {
                if previous.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "\n  {}  {}", r.status.badge(), r.status.section_label())?;
                divider(f, REPORT_WIDTH)?;
                previous = Some(r.status);
            }
            Self::write_record(f, r)?;
        }

        writeln!(f)?;
        banner(f, REPORT_WIDTH, "SUMMARY")?;
        for status in SlaStatus::ordered() {
            let count = self.count(status);
            writeln!(
                f,
                "  {}  {:<22}  {} practice{}",
                status.badge(),
                status.label(),
                count,
                plural(count)
            )?;
        }

        self.write_owner_callout(f)?;

        writeln!(f)?;
        rule(f, '=', REPORT_WIDTH)
    }
}
