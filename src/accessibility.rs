//! Accessibility preferences.
//!
//! A stored choice always wins. Without one, reduced motion follows the
//! operating system default and high contrast is off.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Effective preferences for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Skip the particle animation and the code trail.
    pub reduced_motion: bool,
    /// Draw without glow.
    pub high_contrast: bool,
}

impl Preferences {
    pub fn toggle_reduced_motion(&mut self) {
        self.reduced_motion = !self.reduced_motion;
    }

    pub fn toggle_high_contrast(&mut self) {
        self.high_contrast = !self.high_contrast;
    }
}

/// Preferences as persisted. `None` means the user never chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredPreferences {
    pub reduced_motion: Option<bool>,
    pub high_contrast: Option<bool>,
}

impl StoredPreferences {
    /// Load from `path`. A missing file is the same as no stored choice.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Combine with the OS reduced-motion default.
    pub fn resolve(&self, os_reduced_motion: bool) -> Preferences {
        Preferences {
            reduced_motion: self.reduced_motion.unwrap_or(os_reduced_motion),
            high_contrast: self.high_contrast.unwrap_or(false),
        }
    }

    /// Record explicit choices for every preference.
    pub fn remember(&mut self, prefs: Preferences) {
        self.reduced_motion = Some(prefs.reduced_motion);
        self.high_contrast = Some(prefs.high_contrast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_default_applies_without_stored_value() {
        let stored = StoredPreferences::default();
        assert!(stored.resolve(true).reduced_motion);
        assert!(!stored.resolve(false).reduced_motion);
        assert!(!stored.resolve(true).high_contrast);
    }

    #[test]
    fn test_stored_value_wins() {
        let stored = StoredPreferences {
            reduced_motion: Some(false),
            high_contrast: Some(true),
        };
        let prefs = stored.resolve(true);
        assert!(!prefs.reduced_motion);
        assert!(prefs.high_contrast);
    }

    #[test]
    fn test_toggle_then_remember() {
        let mut prefs = Preferences::default();
        prefs.toggle_reduced_motion();
        prefs.toggle_high_contrast();
        prefs.toggle_high_contrast();

        let mut stored = StoredPreferences::default();
        stored.remember(prefs);
        assert_eq!(stored.reduced_motion, Some(true));
        assert_eq!(stored.high_contrast, Some(false));
        assert_eq!(stored.resolve(false), prefs);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("nexus_prefs_missing_does_not_exist.json");
        let _ = fs::remove_file(&path);
        assert_eq!(StoredPreferences::load(&path).unwrap(), StoredPreferences::default());
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("nexus_prefs_{}.json", std::process::id()));
        let stored = StoredPreferences {
            reduced_motion: Some(true),
            high_contrast: None,
        };
        stored.save(&path).unwrap();
        assert_eq!(StoredPreferences::load(&path).unwrap(), stored);
        let _ = fs::remove_file(&path);
    }
}
