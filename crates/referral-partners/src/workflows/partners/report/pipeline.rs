use super::super::contacts::ContactDirectory;
use super::super::outreach::outreach_action;
use super::super::scoring::{sort_by_tier, ScoredPractice};
use super::super::sla::{build_sla_records, SlaStatus};
use super::format::{banner, divider};
use super::priority::tier_stats;
use super::short_tier;
use super::views::{BreachEntry, PipelineSummary, SlaBreachSummary, TopPractice};
use std::fmt;

pub const TOP_PRACTICE_LIMIT: usize = 5;

const REPORT_WIDTH: usize = 72;

/// Tier rollup, tracker breaches and the top of the priority list in one view.
pub fn build_pipeline_summary<D>(scored: &[ScoredPractice], contacts: &D) -> PipelineSummary
where
    D: ContactDirectory + ?Sized,
{
    let mut breached: Vec<_> = build_sla_records(scored, contacts)
        .into_iter()
        .filter(|r| r.status.is_breach())
        .collect();
    breached.sort_by(|a, b| b.days_since_contact.cmp(&a.days_since_contact));

    let sla = SlaBreachSummary {
        total: breached.len(),
        urgent: breached
            .iter()
            .filter(|r| r.status == SlaStatus::Urgent)
            .count(),
        overdue: breached
            .iter()
            .filter(|r| r.status == SlaStatus::Overdue)
            .count(),
        breaches: breached
            .into_iter()
            .map(|r| BreachEntry {
                practice: r.name,
                tier_label: short_tier(r.tier),
                days_since_contact: r.days_since_contact,
                owner: r.owner,
            })
            .collect(),
    };

    let mut ranked = scored.to_vec();
    sort_by_tier(&mut ranked);
    let top_practices = ranked
        .iter()
        .take(TOP_PRACTICE_LIMIT)
        .enumerate()
        .map(|(index, s)| TopPractice {
            rank: index + 1,
            name: s.practice.name.clone(),
            score: s.score,
            tier_label: short_tier(s.tier),
            location: s.practice.location.clone(),
            action: outreach_action(&s.practice, s.tier),
        })
        .collect();

    PipelineSummary {
        tiers: tier_stats(scored),
        total_practices: scored.len(),
        sla,
        top_practices,
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, REPORT_WIDTH, "RULA PARTNERSHIP PIPELINE  -  SUMMARY REPORT")?;
        writeln!(f, "\n  {:<42}  {:>9}  {:>9}", "TIER", "PRACTICES", "AVG SCORE")?;
        divider(f, REPORT_WIDTH)?;
        for stats in &self.tiers {
            writeln!(
                f,
                "  {:<42}  {:>9}  {:>8.1}",
                stats.tier_label, stats.practices, stats.average_score
            )?;
        }
        writeln!(f, "\n  {:<42}  {:>9}", "Total", self.total_practices)?;

        writeln!(f)?;
        banner(f, REPORT_WIDTH, "SLA STATUS")?;
        writeln!(f, "\n  Total SLA breaches : {}", self.sla.total)?;
        writeln!(
            f,
            "  Urgent (Tier 1)    : {}  (>48 hrs since last contact)",
            self.sla.urgent
        )?;
        writeln!(
            f,
            "  Overdue (Tier 2)   : {}  (>7 days since last contact)",
            self.sla.overdue
        )?;
        if !self.sla.breaches.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "  {:<34}  {:<6}  {:>18}  Owner",
                "Practice", "Tier", "Days Since Contact"
            )?;
            divider(f, REPORT_WIDTH)?;
            for breach in &self.sla.breaches {
                writeln!(
                    f,
                    "  {:<34}  {:<6}  {:>18}  {}",
                    breach.practice, breach.tier_label, breach.days_since_contact, breach.owner
                )?;
            }
        }

        writeln!(f)?;
        banner(
            f,
            REPORT_WIDTH,
            &format!("TOP {TOP_PRACTICE_LIMIT} HIGHEST-PRIORITY PRACTICES"),
        )?;
        for top in &self.top_practices {
            writeln!(f, "\n  #{}  {}", top.rank, top.name)?;
            writeln!(
                f,
                "       Score : {:?} / 100   Tier: {}   {}",
                top.score, top.tier_label, top.location
            )?;
            writeln!(f, "       Action: {}", top.action)?;
        }

        writeln!(f)?;
        banner(f, REPORT_WIDTH, "END OF REPORT")?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::partners::contacts::StaticContactDirectory;
    use crate::workflows::partners::fixtures::{sample_contacts, sample_practices};
    use crate::workflows::partners::scoring::ScoringEngine;
    use pretty_assertions::assert_eq;

    fn summary() -> PipelineSummary {
        let scored = ScoringEngine::default().evaluate_all(&sample_practices());
        build_pipeline_summary(&scored, &sample_contacts())
    }

    #[test]
    fn counts_breaches_by_kind() {
        let summary = summary();
        assert_eq!(summary.total_practices, 10);
        assert_eq!(summary.sla.total, 6);
        assert_eq!(summary.sla.urgent, 3);
        assert_eq!(summary.sla.overdue, 3);

        let days: Vec<u32> = summary
            .sla
            .breaches
            .iter()
            .map(|b| b.days_since_contact)
            .collect();
        assert_eq!(days, vec![22, 18, 11, 9, 7, 3]);
    }

    #[test]
    fn top_practices_follow_tier_then_score() {
        let summary = summary();
        let names: Vec<&str> = summary
            .top_practices
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Sunrise Family Medicine",
                "Metro Health Associates",
                "Westside Internal Medicine",
                "Clearwater Pediatrics",
                "Northside Community Clinic",
            ]
        );
        assert_eq!(summary.top_practices[3].tier_label, "Tier 2");
    }

    #[test]
    fn renders_every_section() {
        let text = summary().to_string();
        assert!(text.contains("RULA PARTNERSHIP PIPELINE  -  SUMMARY REPORT"));
        assert!(text.contains("Total SLA breaches : 6"));
        assert!(text.contains("TOP 5 HIGHEST-PRIORITY PRACTICES"));
        assert!(text.contains("Score : 80.4 / 100   Tier: Tier 1"));
        assert!(text.contains("END OF REPORT"));
    }

    #[test]
    fn no_breaches_skips_the_breach_table() {
        let scored = ScoringEngine::default().evaluate_all(&sample_practices());
        let summary = build_pipeline_summary(&scored, &StaticContactDirectory::new());
        assert_eq!(summary.sla.total, 0);
        assert!(!summary.to_string().contains("Days Since Contact"));
    }

    #[test]
    fn serializes_to_json() {
        let value = serde_json::to_value(summary()).expect("summary serializes");
        assert_eq!(value["sla"]["urgent"], 3);
        assert_eq!(value["tiers"][0]["practices"], 3);
        assert_eq!(value["top_practices"][0]["rank"], 1);
    }
}
