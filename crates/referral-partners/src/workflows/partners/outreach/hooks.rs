use super::super::domain::{BhReferralGap, Practice, Tier};
use super::super::scoring::{sort_by_score, ScoredPractice};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

static WAITLIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)-week waitlist").expect("waitlist pattern compiles"));
static STAFF_RATIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+) \w+ for (\d+) providers").expect("ratio pattern compiles")
});

const SCREENING_KEYWORDS: [&str; 3] = ["phq", "screening", "phq-9"];
const PROVIDER_VOICE_KEYWORDS: [&str; 3] =
    ["top unmet need", "biggest unmet", "rank mental health"];
const NO_PATHWAY_KEYWORDS: [&str; 4] = [
    "no on-site",
    "no current bh",
    "no current referral",
    "no in-house",
];

/// The note signal that selected a hook, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HookSignal {
    Waitlist { weeks: String },
    Screening,
    ProviderVoice,
    NoPathway,
    Overload { staff: String, providers: String },
    FullGap,
    Generic,
}

impl HookSignal {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Waitlist { .. } => "Waitlist length mentioned in notes",
            Self::Screening => "Active BH screening detected",
            Self::ProviderVoice => "Providers named BH as top unmet need",
            Self::NoPathway => "No in-house BH pathway",
            Self::Overload { .. } => "Staff-to-provider ratio strain",
            Self::FullGap => "Full BH gap (no specific signal in notes)",
            Self::Generic => "Generic (partial gap, high provider count)",
        }
    }

    fn sentence(&self, practice: &Practice) -> String {
        let count = practice.provider_count;
        let practice_type = practice.practice_type.to_lowercase();

        match self {
            Self::Waitlist { weeks } => format!(
                "A {weeks}-week wait is a long time for a patient in crisis - wanted to reach out \
                 because Rula has helped similar practices get people into care within the \
                 same week."
            ),
            Self::Screening => "If you're already screening for behavioral health needs, the \
                 hardest part is done - Rula can help make sure those patients actually land \
                 somewhere before they leave the building."
                .to_string(),
            Self::ProviderVoice => "Heard that your providers are naming mental health as their \
                 biggest unmet need - that resonated with me, and I think Rula could be a low-lift \
                 way to start closing that gap."
                .to_string(),
            Self::NoPathway => format!(
                "With {count} providers and no in-house BH pathway, Rula could give your patients \
                 a same-week mental health option without adding any overhead to your team."
            ),
            Self::Overload { staff, providers } => format!(
                "Supporting {providers} providers with {staff} BH staff is a tough spot - Rula \
                 works alongside practices like {name} to take on overflow so your existing team \
                 isn't stretched so thin.",
                name = practice.name
            ),
            Self::FullGap => format!(
                "With a full behavioral health gap across {count} providers, a lot of your \
                 patients are probably leaving without a clear next step - happy to share how Rula \
                 has helped {practice_type} groups handle that."
            ),
            Self::Generic => format!(
                "Given the scale of what you're doing across {count} providers, I thought it was \
                 worth a note - Rula's worked with a number of similar {practice_type} groups and \
                 I think there could be a real fit here."
            ),
        }
    }
}

fn mentions(lower_notes: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lower_notes.contains(keyword))
}

/// First signal that fires for the practice's notes. Order matters: a note
/// mentioning both a waitlist and PHQ-9 is a waitlist signal.
pub fn detect_signal(practice: &Practice) -> HookSignal {
    let notes = practice.notes.as_str();
    let lower = notes.to_lowercase();

    if let Some(captures) = WAITLIST.captures(notes) {
        return HookSignal::Waitlist {
            weeks: captures[1].to_string(),
        };
    }
    if mentions(&lower, &SCREENING_KEYWORDS) {
        return HookSignal::Screening;
    }
    if mentions(&lower, &PROVIDER_VOICE_KEYWORDS) {
        return HookSignal::ProviderVoice;
    }
    if mentions(&lower, &NO_PATHWAY_KEYWORDS) {
        return HookSignal::NoPathway;
    }
    if let Some(captures) = STAFF_RATIO.captures(notes) {
        return HookSignal::Overload {
            staff: captures[1].to_string(),
            providers: captures[2].to_string(),
        };
    }
    if practice.bh_referral_gap == BhReferralGap::Full {
        return HookSignal::FullGap;
    }
    HookSignal::Generic
}

pub fn generate_hook(practice: &Practice) -> String {
    detect_signal(practice).sentence(practice)
}

/// A generated opener alongside the signal that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct OutreachHook {
    pub practice: String,
    pub score: f64,
    pub signal: HookSignal,
    pub hook: String,
}

/// Hooks for every Tier 1 practice, highest score first.
pub fn tier_one_hooks(scored: &[ScoredPractice]) -> Vec<(ScoredPractice, OutreachHook)> {
    let mut tier_one: Vec<ScoredPractice> = scored
        .iter()
        .filter(|s| s.tier.is(Tier::Tier1))
        .cloned()
        .collect();
    sort_by_score(&mut tier_one);

    tier_one
        .into_iter()
        .map(|s| {
            let signal = detect_signal(&s.practice);
            debug!(practice = %s.practice.name, signal = signal.label(), "selected outreach hook");
            let hook = OutreachHook {
                practice: s.practice.name.clone(),
                score: s.score,
                hook: signal.sentence(&s.practice),
                signal,
            };
            (s, hook)
        })
        .collect()
}
