// Imprint Config Parser - TOML with Serde
// Parses configuration from TOML files

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::{Config, ConfigError};
use crate::input::ComboDef;
use crate::Key;

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    #[serde(default)]
    pub caps_word: Option<CapsWordConfig>,

    #[serde(default)]
    pub sentence_case: Option<SentenceCaseConfig>,

    /// Two-key chords
    #[serde(default)]
    pub combo: Vec<ComboTomlEntry>,
}

/// Timing settings (milliseconds)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    pub tapping_term_ms: Option<u64>,
    pub combo_term_ms: Option<u64>,
    pub send_string_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapsWordConfig {
    pub both_shifts_toggle: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceCaseConfig {
    pub enabled: Option<bool>,
}

/// `[[combo]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComboTomlEntry {
    pub keys: Vec<String>,
    pub output: String,
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        toml_config.to_config()
    }

    /// `<config dir>/imprint/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("imprint").join("config.toml"))
    }

    /// Load the default file, or the built-in defaults when there is none
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("loading config from {}", path.display());
                Self::from_toml_path(path)
            }
            _ => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

impl ConfigToml {
    /// Convert parsed TOML to a validated Config
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(general) = &self.general {
            if let Some(term) = general.tapping_term_ms {
                config.tapping_term_ms = term;
            }
            if let Some(term) = general.combo_term_ms {
                config.combo_term_ms = term;
            }
            if let Some(delay) = general.send_string_delay_ms {
                config.send_string_delay_ms = delay;
            }
        }

        if let Some(toggle) = self.caps_word.as_ref().and_then(|c| c.both_shifts_toggle) {
            config.both_shifts_toggle = toggle;
        }
        if let Some(enabled) = self.sentence_case.as_ref().and_then(|s| s.enabled) {
            config.sentence_case = enabled;
        }

        for entry in &self.combo {
            let [first, second] = entry.keys.as_slice() else {
                return Err(ConfigError::InvalidCombo(format!(
                    "a combo needs exactly two keys, got {}",
                    entry.keys.len()
                )));
            };
            config.combos.push(ComboDef::new(
                parse_key(first)?,
                parse_key(second)?,
                parse_key(&entry.output)?,
            ));
        }
        log::debug!("config has {} combos", config.combos.len());

        config.validate()?;
        Ok(config)
    }
}

/// Parse a key name into a Key
fn parse_key(name: &str) -> Result<Key, ConfigError> {
    let trimmed = name.trim();
    Key::from_str(trimmed).map_err(|_| ConfigError::InvalidKey(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("a").unwrap(), Key::A);
        assert_eq!(parse_key(" tab ").unwrap(), Key::Tab);
        assert!(parse_key("notakey").is_err());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [general]
            tapping_term_ms = 180
            send_string_delay_ms = 5

            [caps_word]
            both_shifts_toggle = false

            [sentence_case]
            enabled = false

            [[combo]]
            keys = ["L", "M"]
            output = "TAB"

            [[combo]]
            keys = ["h", "a"]
            output = "SENTENCE_CASE_ON"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.tapping_term_ms, 180);
        assert_eq!(config.combo_term_ms, 50);
        assert_eq!(config.send_string_delay_ms, 5);
        assert!(!config.both_shifts_toggle);
        assert!(!config.sentence_case);
        assert_eq!(
            config.combos,
            vec![
                ComboDef::new(Key::L, Key::M, Key::Tab),
                ComboDef::new(Key::H, Key::A, Key::SentenceCaseOn),
            ]
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = Config::from_toml("[general]\nmultipurpose = 100\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_bad_combo_entries() {
        let three = r#"
            [[combo]]
            keys = ["A", "B", "C"]
            output = "TAB"
        "#;
        assert!(matches!(
            Config::from_toml(three),
            Err(ConfigError::InvalidCombo(_))
        ));

        let unknown = r#"
            [[combo]]
            keys = ["A", "SHIFTLOCK"]
            output = "TAB"
        "#;
        assert!(matches!(
            Config::from_toml(unknown),
            Err(ConfigError::InvalidKey(k)) if k == "SHIFTLOCK"
        ));
    }

    #[test]
    fn test_out_of_range_term() {
        let toml = "[general]\ncombo_term_ms = 900\n";
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::TimeoutOutOfRange(_))
        ));
    }
}
