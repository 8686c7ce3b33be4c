use super::super::outreach::{tier_one_hooks, OutreachHook};
use super::super::scoring::ScoredPractice;
use super::format::{banner, plural, rule, wrap};
use super::gap_label;
use std::fmt;

const REPORT_WIDTH: usize = 80;
const HOOK_WIDTH: usize = 70;

/// Personalized openers for every Tier 1 practice.
pub struct HooksReport {
    hooks: Vec<(ScoredPractice, OutreachHook)>,
}

impl HooksReport {
    pub fn new(scored: &[ScoredPractice]) -> Self {
        Self {
            hooks: tier_one_hooks(scored),
        }
    }

    pub fn hooks(&self) -> impl Iterator<Item = &OutreachHook> {
        self.hooks.iter().map(|(_, hook)| hook)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let lines = wrap(text, HOOK_WIDTH);
    let last = lines.len().saturating_sub(1);
    for (index, line) in lines.iter().enumerate() {
        let open = if index == 0 { "       \"" } else { "        " };
        let close = if index == last { "\"" } else { "" };
        writeln!(f, "{open}{line}{close}")?;
    }
    Ok(())
}

impl fmt::Display for HooksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        banner(f, REPORT_WIDTH, "RULA TIER 1  -  PERSONALIZED OUTREACH HOOKS")?;
        writeln!(
            f,
            "  Hooks are tailored to each practice's BH gap, notes, and provider profile."
        )?;
        writeln!(f, "  Signal used for each hook is noted in brackets.")?;
        rule(f, '=', REPORT_WIDTH)?;

        for (index, (s, hook)) in self.hooks.iter().enumerate() {
            let p = &s.practice;
            writeln!(f, "\n  #{}  {}", index + 1, p.name)?;
            writeln!(
                f,
                "       {}  |  {}  |  {} providers  |  {}  |  Score: {:?}",
                p.practice_type,
                p.location,
                p.provider_count,
                gap_label(&p.bh_referral_gap),
                hook.score
            )?;
            writeln!(f, "       Signal: [{}]", hook.signal.label())?;
            writeln!(f, "       Notes:  {}", p.notes)?;
            writeln!(f, "\n       Hook:")?;
            write_quoted(f, &hook.hook)?;

            if index + 1 < self.hooks.len() {
                writeln!(f, "\n  {}-", "- ".repeat(38))?;
            }
        }

        writeln!(f)?;
        rule(f, '=', REPORT_WIDTH)?;
        writeln!(
            f,
            "  {} Tier 1 hook{} generated.",
            self.hooks.len(),
            plural(self.hooks.len())
        )?;
        rule(f, '=', REPORT_WIDTH)
    }
}
