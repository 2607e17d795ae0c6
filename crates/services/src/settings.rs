use std::path::Path;
use std::time::Duration;

use drill_core::OperatorSet;
use drill_core::model::MistakePolicy;
use serde::Deserialize;

use crate::error::SettingsError;

const DEFAULT_CELEBRATION_MS: u64 = 2_000;
const DEFAULT_TICK_MS: u64 = 1_000;

/// Validated drill configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrillSettings {
    operators: OperatorSet,
    mistake_policy: MistakePolicy,
    celebration_ms: u64,
    tick_ms: u64,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            operators: OperatorSet::default(),
            mistake_policy: MistakePolicy::default(),
            celebration_ms: DEFAULT_CELEBRATION_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl DrillSettings {
    /// Read a JSON settings file and validate it on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` if the file cannot be read,
    /// `SettingsError::Json` if it is not a valid settings document,
    /// and validation errors from `DrillSettingsDraft::validate`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        DrillSettingsDraft::from_json_file(path)?.validate()
    }

    #[must_use]
    pub fn operators(&self) -> OperatorSet {
        self.operators
    }

    #[must_use]
    pub fn mistake_policy(&self) -> MistakePolicy {
        self.mistake_policy
    }

    /// How long the celebration signal stays up after a correct answer.
    #[must_use]
    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    /// Period at which the presentation layer should call `tick`.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Partially specified settings from one configuration layer.
///
/// Drafts stack with `overlay`; unset fields fall back to the defaults on `validate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DrillSettingsDraft {
    pub operators: Option<OperatorSet>,
    pub mistake_policy: Option<MistakePolicy>,
    pub celebration_ms: Option<u64>,
    pub tick_ms: Option<u64>,
}

impl DrillSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a draft from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Json` for malformed JSON or unknown fields.
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `SettingsError::Read` or `SettingsError::Json`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn overlay(self, other: DrillSettingsDraft) -> Self {
        Self {
            operators: other.operators.or(self.operators),
            mistake_policy: other.mistake_policy.or(self.mistake_policy),
            celebration_ms: other.celebration_ms.or(self.celebration_ms),
            tick_ms: other.tick_ms.or(self.tick_ms),
        }
    }

    /// Fill defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::ZeroTickPeriod` if `tick_ms` is zero.
    pub fn validate(self) -> Result<DrillSettings, SettingsError> {
        let defaults = DrillSettings::default();
        let tick_ms = self.tick_ms.unwrap_or(defaults.tick_ms);
        if tick_ms == 0 {
            return Err(SettingsError::ZeroTickPeriod);
        }

        Ok(DrillSettings {
            operators: self.operators.unwrap_or(defaults.operators),
            mistake_policy: self.mistake_policy.unwrap_or(defaults.mistake_policy),
            celebration_ms: self.celebration_ms.unwrap_or(defaults.celebration_ms),
            tick_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_draft_validates_to_defaults() {
        let settings = DrillSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, DrillSettings::default());
        assert_eq!(settings.operators(), OperatorSet::AddSubtractMultiply);
        assert_eq!(settings.mistake_policy(), MistakePolicy::DedupeRepeats);
        assert_eq!(settings.celebration(), Duration::from_secs(2));
        assert_eq!(settings.tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn json_uses_camel_case_and_kebab_enums() {
        let draft = DrillSettingsDraft::from_json_str(
            r#"{"operators":"add-subtract","mistakePolicy":"append-always","celebrationMs":500}"#,
        )
        .unwrap();
        let settings = draft.validate().unwrap();
        assert_eq!(settings.operators(), OperatorSet::AddSubtract);
        assert_eq!(settings.mistake_policy(), MistakePolicy::AppendAlways);
        assert_eq!(settings.celebration(), Duration::from_millis(500));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DrillSettingsDraft::from_json_str(r#"{"speed": 3}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let draft = DrillSettingsDraft {
            tick_ms: Some(0),
            ..DrillSettingsDraft::default()
        };
        assert!(matches!(draft.validate(), Err(SettingsError::ZeroTickPeriod)));
    }

    #[test]
    fn overlay_prefers_later_layer() {
        let file = DrillSettingsDraft {
            operators: Some(OperatorSet::AddSubtract),
            tick_ms: Some(250),
            ..DrillSettingsDraft::default()
        };
        let flags = DrillSettingsDraft {
            operators: Some(OperatorSet::AddSubtractMultiply),
            ..DrillSettingsDraft::default()
        };
        let merged = file.overlay(flags);
        assert_eq!(merged.operators, Some(OperatorSet::AddSubtractMultiply));
        assert_eq!(merged.tick_ms, Some(250));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tickMs": 500}}"#).unwrap();
        let settings = DrillSettings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.tick_period(), Duration::from_millis(500));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DrillSettings::from_json_file("/nonexistent/drill.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/drill.json"));
    }
}
