//! Engine configuration loaded from environment variables.

use std::path::PathBuf;

use crate::engine::DEFAULT_COLLAPSED_STRIP;

/// Where preferences live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreferenceLocation {
    /// Platform data directory (`ninebox/preferences.db`).
    Default,
    File(PathBuf),
    /// Nothing survives the process. Used by tests.
    Memory,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// From `NINEBOX_PREFERENCES_PATH`.
    pub preferences: PreferenceLocation,
    /// Collapsed strip size in px, from `NINEBOX_COLLAPSED_STRIP`.
    pub collapsed_strip: u16,
    /// Roster file loaded at startup, from `NINEBOX_ROSTER`.
    pub roster: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let preferences = std::env::var("NINEBOX_PREFERENCES_PATH")
            .ok()
            .map(|p| PreferenceLocation::File(PathBuf::from(p)))
            .unwrap_or(PreferenceLocation::Default);

        let collapsed_strip = std::env::var("NINEBOX_COLLAPSED_STRIP")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_COLLAPSED_STRIP);

        let roster = std::env::var("NINEBOX_ROSTER").ok().map(PathBuf::from);

        Self {
            preferences,
            collapsed_strip,
            roster,
        }
    }

    /// No persistence and default sizing.
    pub fn in_memory() -> Self {
        Self {
            preferences: PreferenceLocation::Memory,
            collapsed_strip: DEFAULT_COLLAPSED_STRIP,
            roster: None,
        }
    }

    pub fn with_collapsed_strip(mut self, px: u16) -> Self {
        self.collapsed_strip = px;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_uses_default_sizing() {
        let config = EngineConfig::in_memory();
        assert_eq!(config.preferences, PreferenceLocation::Memory);
        assert_eq!(config.collapsed_strip, DEFAULT_COLLAPSED_STRIP);
        assert!(config.roster.is_none());
    }

    #[test]
    fn collapsed_strip_can_be_overridden() {
        let config = EngineConfig::in_memory().with_collapsed_strip(48);
        assert_eq!(config.collapsed_strip, 48);
    }
}
