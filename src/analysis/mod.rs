/// Precipitation pattern analysis pipeline.
///
/// Submodules, in dataflow order:
/// - `extraction` — sliding-window candidate event extraction.
/// - `normalize`  — normalized time and cumulative curves per event.
/// - `ranking`    — stable max-total selection and curve resampling.
/// - `fit`        — least-squares degree-2 polynomial fit.
/// - `summary`    — per-class orchestration and the summary table.

pub mod extraction;
pub mod fit;
pub mod normalize;
pub mod ranking;
pub mod summary;
