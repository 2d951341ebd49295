use log::LevelFilter;
use pokerclock_core::presets::{BlindPreset, parse_blind_levels};
use pokerclock_core::{BlindLevel, Theme, ValidationError};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub blinds_json: Option<PathBuf>,
    pub preset: Option<BlindPreset>,
    pub alert_command: Option<String>,
    pub theme: Option<Theme>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `load` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            full_screen: false,
            log_level: get("POKERCLOCK_LOG_LEVEL").and_then(|v| v.trim().parse().ok()),
            blinds_json: get("POKERCLOCK_BLINDS_JSON").map(PathBuf::from),
            preset: get("POKERCLOCK_PRESET").and_then(|v| v.parse().ok()),
            alert_command: get("POKERCLOCK_ALERT_CMD"),
            theme: get("POKERCLOCK_THEME").and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "light" => Some(Theme::Light),
                "dark" => Some(Theme::Dark),
                _ => None,
            }),
        }
    }

    /// Level for the logger; set before anything else logs.
    pub fn effective_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(LevelFilter::Info)
    }

    /// The starting ladder: a JSON file wins over a named preset.
    /// `Ok(None)` means keep the built-in default.
    pub fn startup_levels(&self) -> Result<Option<Vec<BlindLevel>>, ValidationError> {
        if let Some(path) = &self.blinds_json {
            let content = std::fs::read_to_string(path).map_err(|e| {
                ValidationError::Ladder(format!("could not read {}: {e}", path.display()))
            })?;
            return parse_blind_levels(&content).map(Some);
        }
        Ok(self.preset.map(|p| p.levels()))
    }
}
