/// Event curve normalization.
///
/// Augments a candidate event with its derived curves: a normalized time
/// axis over [0, 1], the running cumulative precipitation, and the
/// cumulative curve rescaled by its final value. The final value is
/// strictly positive for every candidate that passed the extraction
/// filter; a zero value here is an upstream invariant violation and is
/// surfaced as an error, never as NaN.

use crate::model::{AnalysisError, CandidateEvent, NormalizedEvent, RainRecord};

/// Evenly spaced time axis over [0, 1] for a window of `len` steps.
///
/// A one-step window degenerates to the single point 0.0 rather than
/// dividing by zero.
pub fn normalized_time_axis(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..len).map(|k| k as f64 / (len - 1) as f64).collect(),
    }
}

/// Computes the derived curves for one candidate event.
pub fn normalize_event(
    records: &[RainRecord],
    candidate: &CandidateEvent,
) -> Result<NormalizedEvent, AnalysisError> {
    let start = candidate.start_offset;
    let end = start
        .checked_add(candidate.window_steps)
        .ok_or(AnalysisError::WindowOutOfRange {
            start_offset: start,
            window_steps: candidate.window_steps,
            series_len: records.len(),
        })?;

    let window = records
        .get(start..end)
        .filter(|w| !w.is_empty())
        .ok_or(AnalysisError::WindowOutOfRange {
            start_offset: start,
            window_steps: candidate.window_steps,
            series_len: records.len(),
        })?;

    let mut cumulative_mm = Vec::with_capacity(window.len());
    let mut running = 0.0;
    for record in window {
        running += record.precip_mm;
        cumulative_mm.push(running);
    }

    // running now holds the final accumulated value
    if !(running > 0.0) {
        return Err(AnalysisError::ZeroAccumulation {
            start_offset: start,
        });
    }

    let normalized_precip = cumulative_mm.iter().map(|c| c / running).collect();

    Ok(NormalizedEvent {
        start_offset: start,
        normalized_time: normalized_time_axis(window.len()),
        cumulative_mm,
        normalized_precip,
    })
}
