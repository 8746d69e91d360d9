use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CLUESOLVER_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Width the card names are padded to in the "BY CARD" listing.
    #[serde(default = "default_column_width")]
    pub column_width: usize,

    #[serde(default = "default_true")]
    pub show_participants: bool,

    #[serde(default = "default_true")]
    pub show_solved_constraints: bool,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_column_width() -> usize {
    20
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            column_width: 20,
            show_participants: true,
            show_solved_constraints: true,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to `$CLUESOLVER_CONFIG`, then to
    /// defaults when neither names a readable settings file.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::path_from_env) else {
            return Settings::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    trace!(target: "settings", "Loaded {:?}: {:?}", path, settings);
                    settings
                }
                Err(err) => {
                    warn!("Ignoring malformed settings in {:?}: {}", path, err);
                    Settings::default()
                }
            },
            Err(err) => {
                warn!("Could not read settings from {:?}: {}", path, err);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    fn path_from_env() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV).map(PathBuf::from)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"column_width": 12}"#).unwrap();
        assert_eq!(settings.column_width, 12);
        assert!(settings.show_participants);
        assert!(settings.show_solved_constraints);
        assert_eq!(settings.version, 1);
    }

    #[test]
    fn test_migrates_version_zero() {
        let mut settings: Settings = serde_json::from_str(r#"{"version": 0}"#).unwrap();
        settings.migrate();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("cluesolver-settings-{}", std::process::id()))
            .join("settings.json");
        let settings = Settings {
            column_width: 30,
            show_participants: false,
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(Some(&path)), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unreadable_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("cluesolver-no-such-dir/settings.json");
        assert_eq!(Settings::load(Some(&path)), Settings::default());
    }
}
