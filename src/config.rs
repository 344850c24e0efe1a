//! Pipeline configuration.
//!
//! Loads settings from config.json at startup. Provides the OCR acceptance
//! threshold, extraction strictness switches, summary limits, and the clinic
//! signature used in the final message.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<PipelineConfig> = OnceLock::new();

/// Complete pipeline configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum trimmed text length for an OCR attempt to count as successful.
    /// Set to 1 to accept any non-empty text (the looser historical behavior).
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: usize,
    /// Whether name extraction may fall back to any standalone alphabetic
    /// run of 3-20 characters. Increases recall and false-positive risk.
    #[serde(default = "default_standalone_name_fallback")]
    pub standalone_name_fallback: bool,
    /// Maximum number of per-value status sentences in the summary.
    #[serde(default = "default_max_observation_lines")]
    pub max_observation_lines: usize,
    /// Clinic name printed in the message signature block.
    #[serde(default = "default_clinic_name")]
    pub clinic_name: String,
    /// Clinic phone number printed in the message signature block.
    #[serde(default = "default_clinic_phone")]
    pub clinic_phone: String,
}

fn default_acceptance_threshold() -> usize {
    30
}

fn default_standalone_name_fallback() -> bool {
    true
}

fn default_max_observation_lines() -> usize {
    3
}

fn default_clinic_name() -> String {
    "Harish Choudhary Clinic".to_string()
}

fn default_clinic_phone() -> String {
    "8209558359".to_string()
}

impl PipelineConfig {
    /// Whether recognized text carries enough characters to be worth
    /// extracting from. The single definition of the degraded-path gate.
    pub fn is_informative(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.acceptance_threshold
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
            standalone_name_fallback: default_standalone_name_fallback(),
            max_observation_lines: default_max_observation_lines(),
            clinic_name: default_clinic_name(),
            clinic_phone: default_clinic_phone(),
        }
    }
}

/// Loads configuration from config.json or returns defaults.
/// Looks for config.json in the same directory as the executable.
fn load_config() -> PipelineConfig {
    let config_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
        .unwrap_or_else(|| Path::new("config.json").to_path_buf());

    if config_path.exists() {
        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    PipelineConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config());
}

/// Returns a reference to the global configuration.
/// Panics if called before init_config().
pub fn get_config() -> &'static PipelineConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.acceptance_threshold, 30);
        assert!(cfg.standalone_name_fallback);
        assert_eq!(cfg.max_observation_lines, 3);
        assert_eq!(cfg.clinic_phone, "8209558359");
    }

    #[test]
    fn test_is_informative_threshold() {
        let cfg = PipelineConfig::default();
        assert!(!cfg.is_informative("   short   "));
        assert!(cfg.is_informative(&"x".repeat(30)));

        let mut loose = PipelineConfig::default();
        loose.acceptance_threshold = 1;
        assert!(loose.is_informative("x"));
        assert!(!loose.is_informative("   "));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{"acceptance_threshold": 1}"#).unwrap();
        assert_eq!(cfg.acceptance_threshold, 1);
        assert_eq!(cfg.max_observation_lines, 3);
        assert_eq!(cfg.clinic_name, "Harish Choudhary Clinic");
    }
}
