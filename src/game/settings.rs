use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::storage::{load_record, save_record, KeyValueStore, SETTINGS_KEY};

/// Seed used for generated puzzles when set.
pub const SEED_ENV: &str = "PICROSSA_SEED";

const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellSize {
    S,
    #[default]
    M,
    L,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    #[serde(default = "default_true")]
    pub haptics_enabled: bool,

    #[serde(default = "default_true")]
    pub show_errors: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub cell_size: CellSize,

    #[serde(default)]
    pub tutorial_completed: bool,
}

/// Partial update; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    pub sound_enabled: Option<bool>,
    pub haptics_enabled: Option<bool>,
    pub show_errors: Option<bool>,
    pub theme: Option<Theme>,
    pub cell_size: Option<CellSize>,
    pub tutorial_completed: Option<bool>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: CURRENT_VERSION,
            sound_enabled: true,
            haptics_enabled: true,
            show_errors: true,
            theme: Theme::default(),
            cell_size: CellSize::default(),
            tutorial_completed: false,
        }
    }
}

impl Settings {
    /// Loads saved settings, falling back to (and saving) the defaults.
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Self {
        if let Some(mut settings) = load_record::<_, Settings>(store, SETTINGS_KEY) {
            if settings.migrate() {
                settings.save(store);
            }
            return settings;
        }
        let default = Settings::default();
        default.save(store);
        default
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> bool {
        save_record(store, SETTINGS_KEY, self)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn update(&mut self, change: SettingsChange) {
        if let Some(sound_enabled) = change.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(haptics_enabled) = change.haptics_enabled {
            self.haptics_enabled = haptics_enabled;
        }
        if let Some(show_errors) = change.show_errors {
            self.show_errors = show_errors;
        }
        if let Some(theme) = change.theme {
            self.theme = theme;
        }
        if let Some(cell_size) = change.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(tutorial_completed) = change.tutorial_completed {
            self.tutorial_completed = tutorial_completed;
        }
    }

    /// Returns true when the record changed and should be re-saved.
    fn migrate(&mut self) -> bool {
        match self.version {
            CURRENT_VERSION => false,
            1 => {
                // v1 had no error highlighting toggle and serde filled it in
                info!(target: "settings", "Migrating settings v1 -> v{}", CURRENT_VERSION);
                self.version = CURRENT_VERSION;
                true
            }
            other => {
                warn!(target: "settings", "Unknown settings version {}; keeping values", other);
                false
            }
        }
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var(SEED_ENV).ok().and_then(|v| match v.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(target: "settings", "Ignoring non-numeric {}={:?}", SEED_ENV, v);
                None
            }
        })
    }
}
