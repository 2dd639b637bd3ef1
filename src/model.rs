/// Core data types for the rainfall pattern analysis service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no pipeline logic — only types, their invariants,
/// and the analysis error enum.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single precipitation reading on the reconstructed time grid.
///
/// Timestamps are synthetic: the source file's own timestamp column is
/// unreliable, so `timeline::reconstruct` assigns a regular grid starting
/// at the fixed base epoch. Precipitation is in millimetres and is
/// non-negative by construction (the ingest layer substitutes 0.0 for
/// invalid readings).
#[derive(Debug, Clone, PartialEq)]
pub struct RainRecord {
    pub timestamp: DateTime<Utc>,
    pub precip_mm: f64,
}

// ---------------------------------------------------------------------------
// Duration classes
// ---------------------------------------------------------------------------

/// One accumulation window configuration: a display name and the window
/// length in minutes.
///
/// The canonical set lives in `classes::DURATION_REGISTRY`; additional or
/// alternative classes may be loaded from `durations.toml` via `config`.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationClass {
    pub name: String,
    pub minutes: u32,
}

impl DurationClass {
    /// Window length in sampling steps: minutes / interval, floor division.
    ///
    /// A class shorter than one sampling interval floors to zero steps and
    /// is rejected by configuration validation before it reaches the
    /// pipeline.
    pub fn window_steps(&self, interval_minutes: u32) -> usize {
        if interval_minutes == 0 {
            return 0;
        }
        (self.minutes / interval_minutes) as usize
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A contiguous window of records whose accumulated precipitation is
/// strictly positive.
///
/// Candidates are lightweight handles into the record series: the slice
/// itself is not copied, only the offset, length, and accumulated total.
/// Identity within a duration class is the start offset.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvent {
    /// Offset of the first record of the window in the full series.
    pub start_offset: usize,
    /// Window length in steps (equal to the class window length).
    pub window_steps: usize,
    /// Accumulated precipitation over the window, in mm.
    pub total_precip_mm: f64,
}

/// A candidate event augmented with its derived curves.
///
/// Invariants (upheld by `analysis::normalize`):
///   - `normalized_time` runs 0.0..=1.0 (a single 0.0 when the window is
///     one step long);
///   - `cumulative_mm` is non-decreasing;
///   - `normalized_precip` is non-decreasing with final value exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub start_offset: usize,
    pub normalized_time: Vec<f64>,
    pub cumulative_mm: Vec<f64>,
    pub normalized_precip: Vec<f64>,
}

/// The winning event of one duration class: the candidate with the largest
/// final accumulated precipitation (earliest start offset on ties).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEvent {
    pub start_offset: usize,
    pub window_steps: usize,
    /// Timestamp of the first record in the window.
    pub start: DateTime<Utc>,
    /// Timestamp of the last record in the window.
    pub end: DateTime<Utc>,
    /// Final accumulated precipitation over the window, in mm.
    pub total_precip_mm: f64,
    /// Largest single-step reading within the window, in mm.
    pub peak_mm: f64,
    pub curve: NormalizedEvent,
}

/// Degree-2 polynomial fitted to the winning event's normalized curve,
/// coefficients highest degree first: `a·x² + b·x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedCurve {
    pub coefficients: [f64; 3],
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// One reporting row per duration class that produced at least one
/// candidate event. Totals and peaks carry two decimal places, fitted
/// coefficients four; rounding happens here so the pipeline itself stays
/// in full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub duration_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_precip_mm: Decimal,
    pub peak_mm: Decimal,
    pub coef_a: Decimal,
    pub coef_b: Decimal,
    pub coef_c: Decimal,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can arise inside the analysis pipeline.
///
/// Per-class failures are isolated by the pipeline drivers: an error for
/// one duration class is logged and that class is omitted from the
/// summary, while the remaining classes proceed.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A candidate window accumulated exactly zero precipitation, so its
    /// curve cannot be normalized. Unreachable for candidates that passed
    /// the positive-sum filter; surfaced rather than producing NaN.
    ZeroAccumulation { start_offset: usize },
    /// A candidate's window does not lie within the record series.
    WindowOutOfRange {
        start_offset: usize,
        window_steps: usize,
        series_len: usize,
    },
    /// The least-squares fit could not be computed.
    FitFailed(String),
    /// A value bound for a report field was NaN or infinite.
    NonFiniteValue { field: &'static str },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::ZeroAccumulation { start_offset } => write!(
                f,
                "window at offset {} accumulated zero precipitation; cannot normalize",
                start_offset
            ),
            AnalysisError::WindowOutOfRange {
                start_offset,
                window_steps,
                series_len,
            } => write!(
                f,
                "window [{}, {}) exceeds series of {} records",
                start_offset,
                start_offset + window_steps,
                series_len
            ),
            AnalysisError::FitFailed(msg) => write!(f, "curve fit failed: {}", msg),
            AnalysisError::NonFiniteValue { field } => {
                write!(f, "non-finite value for report field '{}'", field)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
