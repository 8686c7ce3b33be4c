use super::super::domain::{distinct_overlap, BhReferralGap};
use std::collections::BTreeSet;

pub(crate) const PROVIDERS_MAX: f64 = 25.0;
pub(crate) const BH_GAP_MAX: f64 = 35.0;
pub(crate) const NETWORKS_MAX: f64 = 25.0;
pub(crate) const VOLUME_MAX: f64 = 15.0;

/// Larger panels generate more referral volume.
pub fn score_providers(count: u32) -> f64 {
    match count {
        21.. => 25.0,
        11..=20 => 20.0,
        6..=10 => 15.0,
        3..=5 => 10.0,
        _ => 5.0,
    }
}

/// A full gap means no in-house behavioral health at all.
pub fn score_bh_gap(gap: &BhReferralGap) -> f64 {
    match gap {
        BhReferralGap::Full => 35.0,
        BhReferralGap::Partial => 20.0,
        BhReferralGap::None => 5.0,
        BhReferralGap::Unknown(_) => 0.0,
    }
}

/// Proportional to overlap with the accepted panel.
pub fn score_networks(networks: &[String], accepted: &BTreeSet<String>) -> f64 {
    if networks.is_empty() || accepted.is_empty() {
        return 0.0;
    }

    let share = distinct_overlap(networks, accepted) as f64 / accepted.len() as f64;
    round_tenths((share * NETWORKS_MAX).min(NETWORKS_MAX))
}

pub fn score_volume(volume: u32) -> f64 {
    match volume {
        2001.. => 15.0,
        1001..=2000 => 11.0,
        500..=1000 => 7.0,
        _ => 3.0,
    }
}

/// One-decimal rounding of the exact binary value, ties going to the even
/// digit (6.25 -> 6.2). `0.15` is stored just below the tie, so it rounds down.
pub fn round_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    let mut rounded = scaled.round_ties_even();
    if (scaled - scaled.trunc()).abs() == 0.5 {
        // Exact product minus the rounded one; nonzero means the multiply
        // manufactured the tie.
        let residual = value.mul_add(10.0, -scaled);
        if residual > 0.0 {
            rounded = scaled.ceil();
        } else if residual < 0.0 {
            rounded = scaled.floor();
        }
    }
    rounded / 10.0
}
