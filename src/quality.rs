//! Average read quality.
//!
//! Phred scores are logarithmic, so their arithmetic mean overstates the
//! quality of a read with a few bad stretches. Scores are converted to error
//! probabilities, averaged, and the mean probability is converted back.

use std::sync::OnceLock;

/// Largest score representable in a printable Phred+33 string (`'~'`).
const MAX_TABLED_SCORE: usize = 93;

static ERROR_PROBABILITIES: OnceLock<[f64; MAX_TABLED_SCORE + 1]> = OnceLock::new();

#[inline]
fn phred_to_error(q: u8) -> f64 {
    10f64.powf(-(q as f64) / 10.0)
}

#[inline]
fn error_probability(q: u8) -> f64 {
    let table = ERROR_PROBABILITIES.get_or_init(|| {
        let mut table = [0.0; MAX_TABLED_SCORE + 1];
        for (q, p) in table.iter_mut().enumerate() {
            *p = phred_to_error(q as u8);
        }
        table
    });
    match table.get(q as usize) {
        Some(&p) => p,
        None => phred_to_error(q),
    }
}

/// Mean quality of `scores` in Phred units, averaged in error-probability
/// space: `-10 * log10(mean(10^(-q/10)))`.
///
/// An empty slice has no defined average and yields `None`. Filters treat
/// `None` as a failed quality check.
pub fn average_quality(scores: &[u8]) -> Option<f64> {
    average_quality_iter(scores.iter().copied())
}

pub(crate) fn average_quality_iter<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for q in scores {
        total += error_probability(q);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(-10.0 * (total / count as f64).log10())
}
