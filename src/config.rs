/// Duration registry configuration loader - parses durations.toml
///
/// Separates the analyzed window set from code, making it easy to add
/// duration classes or adjust the sampling interval without recompiling
/// the service. The built-in registry in `classes` remains available when
/// no configuration file is present.

use serde::Deserialize;
use std::fs;

use crate::model::DurationClass;

/// One duration class loaded from durations.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationClassConfig {
    pub name: String,
    pub minutes: u32,
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Deserialize)]
pub struct AnalysisSettings {
    pub sampling_interval_minutes: u32,
    pub duration: Vec<DurationClassConfig>,
}

impl AnalysisSettings {
    /// The configured classes as domain values, in file order.
    pub fn classes(&self) -> Vec<DurationClass> {
        self.duration.iter().map(DurationClass::from).collect()
    }
}

/// Converts DurationClassConfig from TOML to the domain DurationClass type.
///
/// This adapter function bridges the configuration layer and the domain
/// model, so the pipeline never sees TOML-specific structs.
impl From<&DurationClassConfig> for DurationClass {
    fn from(config: &DurationClassConfig) -> Self {
        DurationClass {
            name: config.name.clone(),
            minutes: config.minutes,
        }
    }
}

/// Loads analysis settings from a durations.toml configuration file.
///
/// # Panics
/// Panics if the configuration file is missing, malformed, or contains
/// invalid data (zero interval, empty class list, duplicate names, or a
/// class shorter than one sampling interval). This is intentional — the
/// service cannot operate against a broken window registry.
pub fn load_settings(config_path: &str) -> AnalysisSettings {
    let contents = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path, e));

    let settings: AnalysisSettings = toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", config_path, e));

    validate_settings(&settings, config_path);
    settings
}

fn validate_settings(settings: &AnalysisSettings, config_path: &str) {
    if settings.sampling_interval_minutes == 0 {
        panic!("{}: sampling_interval_minutes must be positive", config_path);
    }
    if settings.duration.is_empty() {
        panic!("{}: at least one [[duration]] entry is required", config_path);
    }
    for class in &settings.duration {
        if class.name.is_empty() {
            panic!("{}: duration class with empty name", config_path);
        }
        if class.minutes < settings.sampling_interval_minutes {
            panic!(
                "{}: class '{}' ({} min) is shorter than the sampling interval ({} min); \
                 its window would be zero steps",
                config_path, class.name, class.minutes, settings.sampling_interval_minutes
            );
        }
    }
    for (i, class) in settings.duration.iter().enumerate() {
        if settings.duration[..i].iter().any(|c| c.name == class.name) {
            panic!("{}: duplicate duration class '{}'", config_path, class.name);
        }
    }
}
