/// Duration class registry for the rainfall pattern analysis service.
///
/// Defines the canonical set of accumulation windows the pipeline analyzes,
/// in reporting order. This is the single source of truth for the default
/// classes — other modules should reference them from here rather than
/// hardcoding window lengths. `config` can replace this set from
/// `durations.toml` without recompiling.

use crate::model::DurationClass;

/// Sampling interval of the reconstructed time grid, in minutes.
///
/// The source loggers report at five-minute cadence; the synthetic
/// timestamp grid and every window length are derived from this value.
pub const SAMPLING_INTERVAL_MINUTES: u32 = 5;

/// Definition of one built-in duration class.
pub struct DurationDef {
    /// Display name, also used in event identifiers and table names.
    pub name: &'static str,
    /// Window length in minutes.
    pub minutes: u32,
}

/// Built-in duration classes, shortest to longest. Reporting order
/// follows this order.
///
/// At the 5-minute sampling interval these resolve to windows of
/// 12, 2016, 8640, and 105120 steps.
pub static DURATION_REGISTRY: &[DurationDef] = &[
    DurationDef {
        name: "1_Hora",
        minutes: 60,
    },
    DurationDef {
        name: "1_Semana",
        minutes: 60 * 24 * 7,
    },
    DurationDef {
        name: "1_Mes",
        minutes: 60 * 24 * 30,
    },
    DurationDef {
        name: "1_Año",
        minutes: 60 * 24 * 365,
    },
];

/// Looks up a built-in class by name.
pub fn find_class(name: &str) -> Option<&'static DurationDef> {
    DURATION_REGISTRY.iter().find(|d| d.name == name)
}

/// The built-in registry as domain `DurationClass` values, in reporting
/// order.
pub fn default_classes() -> Vec<DurationClass> {
    DURATION_REGISTRY
        .iter()
        .map(|d| DurationClass {
            name: d.name.to_string(),
            minutes: d.minutes,
        })
        .collect()
}
