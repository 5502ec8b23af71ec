//! Session manager settings.

use serde::{Deserialize, Serialize};

/// Policy knobs for every session a manager creates.
///
/// Deserializes from a `[session]` table; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether one participant may hold both colors, either by joining
    /// their own game or by moving before anyone joined. Defaults to true.
    pub allow_self_play: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            allow_self_play: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_self_play() {
        assert!(SessionConfig::default().allow_self_play);
        let parsed: SessionConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, SessionConfig::default());
    }

    #[test]
    fn parses_from_toml() {
        let parsed: SessionConfig = toml::from_str("allow_self_play = false").unwrap();
        assert!(!parsed.allow_self_play);
        assert!(toml::from_str::<SessionConfig>("allow_self_play = \"no\"").is_err());
    }
}
