/// Windowed event extraction.
///
/// For one duration class with window length W, slides a W-step window
/// across the record series and keeps every window whose accumulated
/// precipitation is strictly positive. Window totals come from a prefix-sum
/// array, so the scan is O(N) per class instead of re-summing each window.
/// Start offsets run over [0, N−W): a series no longer than the window
/// yields no candidates at all.

use crate::model::{CandidateEvent, RainRecord};

/// Running cumulative precipitation with a leading zero, so the total of
/// window [i, i+W) is `prefix[i+W] − prefix[i]`.
fn prefix_sums(records: &[RainRecord]) -> Vec<f64> {
    let mut prefix = Vec::with_capacity(records.len() + 1);
    let mut running = 0.0;
    prefix.push(0.0);
    for record in records {
        running += record.precip_mm;
        prefix.push(running);
    }
    prefix
}

/// Extracts candidate events for one window length, in ascending start
/// offset order.
///
/// Returns an empty list when the series is no longer than the window
/// (the InputIncomplete degradation) or when no window accumulates any
/// precipitation.
pub fn extract_candidates(records: &[RainRecord], window_steps: usize) -> Vec<CandidateEvent> {
    if window_steps == 0 || records.len() <= window_steps {
        return Vec::new();
    }

    let prefix = prefix_sums(records);
    let mut candidates = Vec::new();

    for start in 0..records.len() - window_steps {
        let total = prefix[start + window_steps] - prefix[start];
        if total > 0.0 {
            candidates.push(CandidateEvent {
                start_offset: start,
                window_steps,
                total_precip_mm: total,
            });
        }
    }

    candidates
}
