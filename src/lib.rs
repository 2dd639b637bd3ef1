/// rainpat_service: rainfall pattern analysis by normalized accumulation curves.
///
/// # Module structure
///
/// ```text
/// rainpat_service
/// ├── model       — shared data types (RainRecord, DurationClass, SummaryRow, …)
/// ├── classes     — built-in duration-class registry (1_Hora … 1_Año)
/// ├── config      — duration registry configuration loader (durations.toml)
/// ├── logging     — structured logging with stage/class tags
/// ├── timeline    — synthetic timestamp reconstruction (fixed 5-min grid)
/// ├── analysis
/// │   ├── extraction — sliding-window candidate event extraction
/// │   ├── normalize  — normalized time + cumulative precipitation curves
/// │   ├── ranking    — stable max-total selection, curve resampling
/// │   ├── fit        — least-squares degree-2 polynomial fit
/// │   └── summary    — per-class orchestration, summary aggregation
/// ├── report      — audit event tables + summary table serialization
/// └── ingest
///     ├── series   — delimited-text precipitation series adapter
///     └── fixtures (test only) — representative input payloads
/// ```

/// Public modules
pub mod analysis;
pub mod classes;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
pub mod timeline;
