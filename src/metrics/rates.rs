//! Derived-metric arithmetic.
//!
//! Both quotients are total functions: a zero denominator yields `0` instead of an error
//! or a non-finite value.

/// Crashes per active installation.
#[must_use]
pub fn crash_rate(crashes: u64, adoption: u64) -> f64 {
    quotient(crashes, adoption)
}

/// A channel's share of the total adoption.
#[must_use]
pub fn adoption_share(adoption: u64, total: u64) -> f64 {
    quotient(adoption, total)
}

/// The total adoption with the legacy cohort removed, unless it is explicitly kept.
#[must_use]
pub const fn adjusted_total(total: u64, legacy_cohort: u64, include_legacy: bool) -> u64 {
    if include_legacy { total } else { total.saturating_sub(legacy_cohort) }
}

#[expect(clippy::cast_precision_loss, reason = "adoption and crash counts are far below 2^52")]
fn quotient(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
