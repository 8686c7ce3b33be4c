use super::super::domain::{BhReferralGap, Tier};
use super::super::outreach::outreach_action;
use super::super::scoring::{sort_by_score, ScoredPractice, ScoringConfig};
use super::format::{banner, plural, rule, score_bar, thousands};
use super::short_tier;
use super::views::TierStats;
use std::fmt;

const REPORT_WIDTH: usize = 82;
const SUMMARY_WIDTH: usize = 60;
const BAR_WIDTH: usize = 50;

/// Count and mean score for each tier, in tier order.
pub fn tier_stats(scored: &[ScoredPractice]) -> Vec<TierStats> {
    Tier::ordered()
        .into_iter()
        .map(|tier| {
            let scores: Vec<f64> = scored
                .iter()
                .filter(|s| s.tier.is(tier))
                .map(|s| s.score)
                .collect();
            let average_score = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };

            TierStats {
                tier,
                tier_label: tier.label(),
                heading: tier.heading(),
                practices: scores.len(),
                average_score,
            }
        })
        .collect()
}

fn padded_gap_label(gap: &BhReferralGap) -> &str {
    match gap {
        BhReferralGap::Full => "Full Gap  ",
        BhReferralGap::Partial => "Partial   ",
        BhReferralGap::None => "No Gap    ",
        BhReferralGap::Unknown(raw) => raw,
    }
}

/// Ranked score sheet with per-tier outreach listings.
pub struct PriorityReport<'a> {
    ranked: Vec<ScoredPractice>,
    config: &'a ScoringConfig,
}

impl<'a> PriorityReport<'a> {
    pub fn new(scored: &[ScoredPractice], config: &'a ScoringConfig) -> Self {
        let mut ranked = scored.to_vec();
        sort_by_score(&mut ranked);
        Self { ranked, config }
    }

    fn write_practice(
        &self,
        f: &mut fmt::Formatter<'_>,
        rank: usize,
        s: &ScoredPractice,
    ) -> fmt::Result {
        let p = &s.practice;
        let accepted = &self.config.accepted_networks;
        let bd = &s.breakdown;

        writeln!(
            f,
            "\n  #{rank:02}  {:<34}  Score: {:5.1} / 100   [{}]",
            p.name,
            s.score,
            short_tier(s.tier)
        )?;
        writeln!(f, "       {:<28}  {}", p.practice_type, p.location)?;
        writeln!(
            f,
            "       Providers: {:<4}  BH Status: {}  Rula Networks: {}/{}  Volume: {}/mo",
            p.provider_count,
            padded_gap_label(&p.bh_referral_gap),
            p.network_overlap(accepted),
            accepted.len(),
            thousands(p.monthly_patient_volume)
        )?;
        writeln!(f, "       [{}] {:.1}", score_bar(s.score, BAR_WIDTH), s.score)?;
        writeln!(
            f,
            "       Breakdown - Providers: {:.0}  BH Gap: {:.0}  Networks: {:.1}  Volume: {:.0}",
            bd.providers, bd.bh_gap, bd.networks, bd.volume
        )?;
        writeln!(f, "       Outreach: {}", outreach_action(p, s.tier))?;
        writeln!(f, "       Note: {}", p.notes)
    }
}

impl fmt::Display for PriorityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accepted = &self.config.accepted_networks;

        banner(f, REPORT_WIDTH, "RULA REFERRAL PARTNER PRIORITIZATION REPORT")?;
        writeln!(
            f,
            "  Scoring weights:  Providers 25 pt  |  BH Gap 35 pt  |  \
             Networks 25 pt  |  Volume 15 pt"
        )?;
        rule(f, '=', REPORT_WIDTH)?;

        for (index, s) in self.ranked.iter().enumerate() {
            self.write_practice(f, index + 1, s)?;
        }

        writeln!(f)?;
        banner(f, REPORT_WIDTH, "OUTREACH TIERS SUMMARY")?;
        for tier in Tier::ordered() {
            let matches: Vec<&ScoredPractice> =
                self.ranked.iter().filter(|s| s.tier.is(tier)).collect();
            writeln!(
                f,
                "\n  {}  ({} practice{})",
                tier.heading(),
                matches.len(),
                plural(matches.len())
            )?;
            if matches.is_empty() {
                writeln!(f, "    (none)")?;
                continue;
            }
            for s in matches {
                let p = &s.practice;
                writeln!(
                    f,
                    "    * {:<34} {:5.1}  |  {}  |  {}  |  {} shared plans  ->  {}",
                    p.name,
                    s.score,
                    p.practice_type,
                    p.location,
                    p.network_overlap(accepted),
                    outreach_action(p, s.tier)
                )?;
            }
        }

        writeln!(f)?;
        banner(f, REPORT_WIDTH, "END OF REPORT")
    }
}

/// Count and average per tier, printed after the main report.
pub struct TierSummary {
    stats: Vec<TierStats>,
}

impl TierSummary {
    pub fn new(scored: &[ScoredPractice]) -> Self {
        Self {
            stats: tier_stats(scored),
        }
    }

    pub fn stats(&self) -> &[TierStats] {
        &self.stats
    }
}

impl fmt::Display for TierSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, SUMMARY_WIDTH, "TIER SUMMARY")?;
        for stats in &self.stats {
            writeln!(f, "  {}", stats.heading)?;
            writeln!(
                f,
                "    Practices: {}   |   Average score: {:.1} / 100",
                stats.practices, stats.average_score
            )?;
            writeln!(f)?;
        }
        rule(f, '=', SUMMARY_WIDTH)
    }
}
