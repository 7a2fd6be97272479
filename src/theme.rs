//! The light/dark theme flag.
//!
//! Persisted as a JSON bool (`true` = dark) under the `dark_mode` storage
//! key; a missing or malformed value falls back to a terminal-environment
//! guess.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::Storage;

const STORAGE_KEY: &str = "dark_mode";

/// The two color schemes the interface can render with.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "bool", into = "bool")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The persisted flag, or the environment preference when unset.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.load(STORAGE_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(%err, "discarding malformed theme flag");
                Self::system_preference()
            }),
            None => Self::system_preference(),
        }
    }

    /// Persist the flag. Failures are logged, not propagated.
    pub fn save(self, storage: &mut dyn Storage) {
        match serde_json::to_string(&self) {
            Ok(raw) => {
                if let Err(err) = storage.save(STORAGE_KEY, &raw) {
                    warn!(%err, "failed to persist theme flag");
                }
            }
            Err(err) => warn!(%err, "failed to encode theme flag"),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Best guess at the terminal's color scheme.
    ///
    /// `COLORFGBG` is the only hint terminals commonly export; anything
    /// without it is assumed dark.
    pub fn system_preference() -> Self {
        match std::env::var("COLORFGBG") {
            Ok(hint) => Self::from_colorfgbg(&hint),
            Err(_) => Self::Dark,
        }
    }

    /// The variable looks like `"15;0"`: foreground;background, with a
    /// light background reported as 7 or 15.
    fn from_colorfgbg(hint: &str) -> Self {
        let background = hint.rsplit(';').next().unwrap_or("");
        match background.trim().parse::<u8>() {
            Ok(7) | Ok(15) => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl From<bool> for Theme {
    fn from(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

impl From<Theme> for bool {
    fn from(theme: Theme) -> bool {
        theme.is_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_persisted_as_bool() {
        let mut storage = MemoryStorage::new();
        Theme::Dark.save(&mut storage);
        assert_eq!(storage.load("dark_mode").as_deref(), Some("true"));
        Theme::Light.save(&mut storage);
        assert_eq!(storage.load("dark_mode").as_deref(), Some("false"));
    }

    #[test]
    fn test_load_round_trip() {
        let mut storage = MemoryStorage::new();
        Theme::Light.save(&mut storage);
        assert_eq!(Theme::load(&storage), Theme::Light);
        Theme::Dark.save(&mut storage);
        assert_eq!(Theme::load(&storage), Theme::Dark);
    }

    #[test]
    fn test_malformed_flag_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.save("dark_mode", "maybe").unwrap();
        // Whatever the environment says, loading must not fail.
        let theme = Theme::load(&storage);
        assert!(matches!(theme, Theme::Light | Theme::Dark));
    }

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_colorfgbg_backgrounds() {
        assert_eq!(Theme::from_colorfgbg("0;15"), Theme::Light);
        assert_eq!(Theme::from_colorfgbg("15;0"), Theme::Dark);
        assert_eq!(Theme::from_colorfgbg("default;7"), Theme::Light);
        assert_eq!(Theme::from_colorfgbg(""), Theme::Dark);
        assert_eq!(Theme::from_colorfgbg("garbage"), Theme::Dark);
    }
}
