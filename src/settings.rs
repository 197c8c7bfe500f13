use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::offset::DayPolicy;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_SLOT_COUNT: usize = 5;
pub const MAX_SLOT_COUNT: usize = 12;
pub const DEFAULT_MULTIPLIER_CAP: u32 = 5;
pub const MAX_MULTIPLIER_CAP: u32 = 9;

/// App settings, optionally read from a versioned JSON file. These configure
/// the views themselves; entered durations are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub slot_count: usize,
    pub multiplier_cap: u32,
    pub include_days_in_slots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            slot_count: DEFAULT_SLOT_COUNT,
            multiplier_cap: DEFAULT_MULTIPLIER_CAP,
            include_days_in_slots: false,
        }
    }
}

impl Settings {
    pub fn slot_day_policy(&self) -> DayPolicy {
        if self.include_days_in_slots {
            DayPolicy::IncludeDays
        } else {
            DayPolicy::HoursAndBelow
        }
    }

    /// Multiplier buttons offered per slot: x1 up to the configured cap.
    pub fn multiplier_choices(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.multiplier_cap
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to read settings file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        source: serde_json::Error,
    },
    #[error("unsupported settings version {0}; expected version 1")]
    UnsupportedVersion(u32),
    #[error("tick_interval_ms must be greater than zero")]
    ZeroTickInterval,
    #[error("slot_count must be between 1 and {MAX_SLOT_COUNT}, got {0}")]
    SlotCountOutOfRange(usize),
    #[error("multiplier_cap must be between 1 and {MAX_MULTIPLIER_CAP}, got {0}")]
    MultiplierCapOutOfRange(u32),
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings_text(&content)
}

pub fn parse_settings_text(content: &str) -> Result<Settings, SettingsError> {
    let raw =
        serde_json::from_str::<SettingsFile>(content).map_err(|source| SettingsError::Json {
            line: source.line(),
            column: source.column(),
            source,
        })?;

    if raw.version != 1 {
        return Err(SettingsError::UnsupportedVersion(raw.version));
    }
    if raw.tick_interval_ms == 0 {
        return Err(SettingsError::ZeroTickInterval);
    }
    if raw.slot_count == 0 || raw.slot_count > MAX_SLOT_COUNT {
        return Err(SettingsError::SlotCountOutOfRange(raw.slot_count));
    }
    if raw.multiplier_cap == 0 || raw.multiplier_cap > MAX_MULTIPLIER_CAP {
        return Err(SettingsError::MultiplierCapOutOfRange(raw.multiplier_cap));
    }

    Ok(Settings {
        tick_interval_ms: raw.tick_interval_ms,
        slot_count: raw.slot_count,
        multiplier_cap: raw.multiplier_cap,
        include_days_in_slots: raw.include_days_in_slots,
    })
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    version: u32,
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,
    #[serde(default = "default_slot_count")]
    slot_count: usize,
    #[serde(default = "default_multiplier_cap")]
    multiplier_cap: u32,
    #[serde(default)]
    include_days_in_slots: bool,
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_slot_count() -> usize {
    DEFAULT_SLOT_COUNT
}

fn default_multiplier_cap() -> u32 {
    DEFAULT_MULTIPLIER_CAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_settings() {
        let json = r#"
{
  "version": 1,
  "tick_interval_ms": 500,
  "slot_count": 3,
  "multiplier_cap": 3,
  "include_days_in_slots": true
}
"#;
        let settings = parse_settings_text(json).expect("valid settings");
        assert_eq!(settings.tick_interval_ms, 500);
        assert_eq!(settings.slot_count, 3);
        assert_eq!(settings.multiplier_cap, 3);
        assert!(settings.include_days_in_slots);
        assert_eq!(settings.slot_day_policy(), DayPolicy::IncludeDays);
    }

    #[test]
    fn multiplier_cap_bounds_the_offered_choices() {
        let settings = parse_settings_text(r#"{ "version": 1, "multiplier_cap": 3 }"#)
            .expect("valid settings");
        let choices: Vec<u32> = settings.multiplier_choices().collect();
        assert_eq!(choices, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_out_of_range_multiplier_cap() {
        for json in [
            r#"{ "version": 1, "multiplier_cap": 0 }"#,
            r#"{ "version": 1, "multiplier_cap": 99 }"#,
        ] {
            let err = parse_settings_text(json).expect_err("should fail");
            assert!(err.to_string().contains("multiplier_cap must be between"));
        }
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = parse_settings_text(r#"{ "version": 1 }"#).expect("valid settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.slot_day_policy(), DayPolicy::HoursAndBelow);
    }

    #[test]
    fn rejects_malformed_json_with_position() {
        let err = parse_settings_text("{ not-valid-json ").expect_err("should fail");
        assert!(err.to_string().contains("invalid JSON at line"));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = parse_settings_text(r#"{ "version": 2 }"#).expect_err("should fail");
        assert!(err.to_string().contains("unsupported settings version 2"));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let err = parse_settings_text(r#"{ "version": 1, "tick_interval_ms": 0 }"#)
            .expect_err("should fail");
        assert!(matches!(err, SettingsError::ZeroTickInterval));
    }

    #[test]
    fn rejects_out_of_range_slot_count() {
        let err =
            parse_settings_text(r#"{ "version": 1, "slot_count": 40 }"#).expect_err("should fail");
        assert!(err.to_string().contains("slot_count must be between"));
    }
}
