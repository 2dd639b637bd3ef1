/// Per-class pipeline orchestration and summary aggregation.
///
/// `analyze_class` runs one duration class through the full chain:
/// extract → rank → normalize the winner → resample → fit. The drivers
/// (`analyze_all`, `analyze_all_parallel`) run every configured class and
/// isolate failures per class: a class that errors is logged and omitted,
/// the others proceed. Both drivers return results in configured class
/// order and must agree exactly — the parallel driver is an optimization,
/// never a semantic change.

use std::sync::Arc;
use std::sync::mpsc::channel;

use rust_decimal::Decimal;
use threadpool::ThreadPool;

use crate::analysis::extraction::extract_candidates;
use crate::analysis::fit::fit_quadratic;
use crate::analysis::normalize::normalize_event;
use crate::analysis::ranking::{RESAMPLE_POINTS, rank_candidates, resample_curve};
use crate::logging::{self, Stage};
use crate::model::{
    AnalysisError, CandidateEvent, DurationClass, FittedCurve, RainRecord, RankedEvent, SummaryRow,
};

/// Everything the pipeline produced for one duration class with at least
/// one candidate event. Candidates are retained for the audit tables;
/// only the ranked winner carries full curves.
#[derive(Debug, Clone)]
pub struct ClassResult {
    pub class: DurationClass,
    pub window_steps: usize,
    pub candidates: Vec<CandidateEvent>,
    pub ranked: RankedEvent,
    pub fitted: FittedCurve,
}

/// Runs the full chain for one duration class.
///
/// Returns `Ok(None)` when the class yields no candidate events (series
/// too short, or no window with positive accumulation) — that class is
/// simply absent from the summary.
pub fn analyze_class(
    records: &[RainRecord],
    class: &DurationClass,
    interval_minutes: u32,
) -> Result<Option<ClassResult>, AnalysisError> {
    let window_steps = class.window_steps(interval_minutes);
    let candidates = extract_candidates(records, window_steps);

    let Some(winner) = rank_candidates(&candidates) else {
        return Ok(None);
    };
    let winner = winner.clone();

    let curve = normalize_event(records, &winner)?;

    // normalize_event validated the window bounds
    let window = &records[winner.start_offset..winner.start_offset + window_steps];
    let peak_mm = window.iter().map(|r| r.precip_mm).fold(0.0, f64::max);
    let total_precip_mm = *curve
        .cumulative_mm
        .last()
        .ok_or(AnalysisError::ZeroAccumulation {
            start_offset: winner.start_offset,
        })?;

    let (xs, ys) = resample_curve(&curve, RESAMPLE_POINTS);
    let fitted = fit_quadratic(&xs, &ys)?;

    let ranked = RankedEvent {
        start_offset: winner.start_offset,
        window_steps,
        start: window[0].timestamp,
        end: window[window.len() - 1].timestamp,
        total_precip_mm,
        peak_mm,
        curve,
    };

    Ok(Some(ClassResult {
        class: class.clone(),
        window_steps,
        candidates,
        ranked,
        fitted,
    }))
}

/// Rounds a pipeline value for reporting; NaN or infinity is surfaced
/// rather than silently zeroed.
fn report_decimal(value: f64, dp: u32, field: &'static str) -> Result<Decimal, AnalysisError> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(dp))
        .map_err(|_| AnalysisError::NonFiniteValue { field })
}

/// Builds the reporting row for one analyzed class: totals and peaks at
/// two decimal places, fitted coefficients at four.
pub fn summary_row(result: &ClassResult) -> Result<SummaryRow, AnalysisError> {
    let [a, b, c] = result.fitted.coefficients;
    Ok(SummaryRow {
        duration_name: result.class.name.clone(),
        start: result.ranked.start,
        end: result.ranked.end,
        total_precip_mm: report_decimal(result.ranked.total_precip_mm, 2, "total_precip_mm")?,
        peak_mm: report_decimal(result.ranked.peak_mm, 2, "peak_mm")?,
        coef_a: report_decimal(a, 4, "coef_a")?,
        coef_b: report_decimal(b, 4, "coef_b")?,
        coef_c: report_decimal(c, 4, "coef_c")?,
    })
}

/// Handles one class outcome in a driver: unwrap, log, and keep or drop.
fn collect_outcome(
    class: &DurationClass,
    outcome: Result<Option<ClassResult>, AnalysisError>,
    results: &mut Vec<ClassResult>,
) {
    match outcome {
        Ok(Some(result)) => {
            logging::info(
                Stage::Analysis,
                Some(&class.name),
                &format!(
                    "{} candidate events, max at offset {}",
                    result.candidates.len(),
                    result.ranked.start_offset
                ),
            );
            results.push(result);
        }
        Ok(None) => {
            logging::info(
                Stage::Analysis,
                Some(&class.name),
                "no qualifying events; class omitted from summary",
            );
        }
        Err(e) => {
            logging::error(Stage::Analysis, Some(&class.name), &e.to_string());
        }
    }
}

/// Sequential driver: analyzes every class in order, isolating per-class
/// failures.
pub fn analyze_all(
    records: &[RainRecord],
    classes: &[DurationClass],
    interval_minutes: u32,
) -> Vec<ClassResult> {
    let mut results = Vec::new();
    for class in classes {
        let outcome = analyze_class(records, class, interval_minutes);
        collect_outcome(class, outcome, &mut results);
    }
    results
}

/// Parallel driver: one worker per duration class (the classes are
/// independent and share no mutable state). Output is reassembled in
/// configured class order, so it is indistinguishable from `analyze_all`.
pub fn analyze_all_parallel(
    records: Arc<Vec<RainRecord>>,
    classes: &[DurationClass],
    interval_minutes: u32,
) -> Vec<ClassResult> {
    if classes.is_empty() {
        return Vec::new();
    }

    let pool = ThreadPool::new(classes.len());
    let (tx, rx) = channel();

    for (index, class) in classes.iter().cloned().enumerate() {
        let tx = tx.clone();
        let records = Arc::clone(&records);
        pool.execute(move || {
            let outcome = analyze_class(&records, &class, interval_minutes);
            // The receiver outlives the pool; a send failure means the
            // driver already gave up, so drop the result quietly.
            let _ = tx.send((index, class, outcome));
        });
    }
    drop(tx);

    let mut finished: Vec<(usize, DurationClass, Result<Option<ClassResult>, AnalysisError>)> =
        rx.iter().collect();
    finished.sort_by_key(|(index, _, _)| *index);

    let mut results = Vec::new();
    for (_, class, outcome) in finished {
        collect_outcome(&class, outcome, &mut results);
    }
    results
}

/// Builds the summary table from analyzed classes, preserving their
/// order. A row that cannot be rounded (non-finite value) is logged and
/// dropped rather than corrupting the table.
pub fn summarize(results: &[ClassResult]) -> Vec<SummaryRow> {
    let mut rows = Vec::with_capacity(results.len());
    for result in results {
        match summary_row(result) {
            Ok(row) => rows.push(row),
            Err(e) => {
                logging::error(Stage::Analysis, Some(&result.class.name), &e.to_string());
            }
        }
    }
    rows
}
