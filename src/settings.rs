use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::path;
use crate::transcoder::{Dialect, SAVE_COLUMNS, Transcoder};
use crate::vault::StorageAdapter;

pub const CONFIG_DIR: &str = ".vaultsheets";
pub const SETTINGS_FILE: &str = "settings.json";

/// Persisted plugin settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PluginSettings {
    pub dialect: Dialect,
    pub columns: usize,
    /// Folder preselected for new files; empty means the vault root.
    pub default_folder: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            columns: SAVE_COLUMNS,
            default_folder: String::new(),
        }
    }
}

impl PluginSettings {
    pub fn settings_path() -> String {
        path::join([CONFIG_DIR, SETTINGS_FILE])
    }

    /// Load settings from the vault, falling back to defaults when none exist
    pub fn load(storage: &dyn StorageAdapter) -> Result<Self, SettingsError> {
        let settings_path = Self::settings_path();
        if !storage.exists(&settings_path) {
            tracing::debug!("no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = storage.read(&settings_path)?;
        let mut settings: Self = serde_json::from_str(&content)?;
        settings.columns = settings.columns.max(1);
        Ok(settings)
    }

    /// Save settings into the vault's config folder
    pub fn save(&self, storage: &mut dyn StorageAdapter) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)?;
        storage.create_dir_all(CONFIG_DIR)?;
        storage.write(&Self::settings_path(), &content)?;
        tracing::info!(dialect = ?self.dialect, columns = self.columns, "saved settings");
        Ok(())
    }

    pub fn transcoder(&self) -> Transcoder {
        Transcoder::new(self.dialect, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;

    #[test]
    fn missing_file_gives_defaults() {
        let vault = MemoryVault::new();
        let settings = PluginSettings::load(&vault).unwrap();
        assert_eq!(settings, PluginSettings::default());
        assert_eq!(settings.transcoder(), Transcoder::default());
    }

    #[test]
    fn settings_round_trip_through_the_vault() {
        let mut vault = MemoryVault::new();
        let settings = PluginSettings {
            dialect: Dialect::Rfc4180,
            columns: 12,
            default_folder: "finance".to_string(),
        };
        settings.save(&mut vault).unwrap();

        assert!(vault.file(".vaultsheets/settings.json").unwrap().contains("\"rfc4180\""));
        assert_eq!(PluginSettings::load(&vault).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps_columns() {
        let mut vault = MemoryVault::with_folders([CONFIG_DIR]);
        vault
            .write(&PluginSettings::settings_path(), r#"{"columns": 0}"#)
            .unwrap();

        let settings = PluginSettings::load(&vault).unwrap();
        assert_eq!(settings.columns, 1);
        assert_eq!(settings.dialect, Dialect::Legacy);
        assert_eq!(settings.default_folder, "");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut vault = MemoryVault::with_folders([CONFIG_DIR]);
        vault.write(&PluginSettings::settings_path(), "{not json").unwrap();
        assert!(matches!(PluginSettings::load(&vault), Err(SettingsError::Json(_))));
    }
}
