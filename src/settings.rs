//! Player preferences
//!
//! Persisted separately from the best score. Gameplay tuning is compile-time
//! only (`crate::consts`); nothing here changes how a run plays.

use std::fs;
use std::path::Path;
use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};

use crate::leaderboard::{
    LeaderboardService, PeriodKind, ReportStatus, ScoreReporter, sanitize_name,
};
use crate::persistence::StoreError;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Nickname used for leaderboard submissions
    pub player_name: String,
    /// Leaderboard period shown and submitted to
    pub period: PeriodKind,
    /// Submit automatically when a run ends
    pub auto_submit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            period: PeriodKind::All,
            auto_submit: true,
        }
    }
}

impl Settings {
    /// Store a cleaned-up nickname
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = sanitize_name(name);
    }

    /// Score reporter for these preferences, or None when auto-submit is off
    /// or there is no nickname to submit under
    pub fn reporter<S: LeaderboardService>(
        &self,
        service: S,
    ) -> Option<(ScoreReporter<S>, Receiver<ReportStatus>)> {
        if !self.auto_submit || self.player_name.is_empty() {
            return None;
        }
        Some(ScoreReporter::new(service, &self.player_name, self.period))
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring settings file {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dinoish_settings_v1";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
