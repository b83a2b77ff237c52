// Imprint Config
// Validated runtime settings and their TOML front end

#[cfg(feature = "config-file")]
mod parser;

#[cfg(feature = "config-file")]
pub use parser::{
    CapsWordConfig, ComboTomlEntry, ConfigToml, GeneralConfig, SentenceCaseConfig,
};

use crate::input::ComboDef;
use crate::transform::EngineConfig;
use crate::Key;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid combo: {0}")]
    InvalidCombo(String),

    #[error("Timeout value out of range: {0}")]
    TimeoutOutOfRange(String),
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tapping_term_ms: u64,
    pub combo_term_ms: u64,
    /// Pause between typed characters of a text output
    pub send_string_delay_ms: u64,
    pub both_shifts_toggle: bool,
    pub sentence_case: bool,
    pub combos: Vec<ComboDef>,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            tapping_term_ms: engine.tapping_term_ms,
            combo_term_ms: engine.combo_term_ms,
            send_string_delay_ms: 0,
            both_shifts_toggle: engine.both_shifts_toggle,
            sentence_case: engine.sentence_case,
            combos: engine.combos,
        }
    }
}

impl Config {
    /// Check ranges and combo definitions
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("tapping_term_ms", self.tapping_term_ms, 1, 2000)?;
        check_range("combo_term_ms", self.combo_term_ms, 1, 500)?;
        check_range("send_string_delay_ms", self.send_string_delay_ms, 0, 100)?;

        for (i, combo) in self.combos.iter().enumerate() {
            let [first, second] = combo.keys;
            if first == second {
                return Err(ConfigError::InvalidCombo(format!(
                    "combo {} uses {} twice",
                    i, first
                )));
            }
            if first.is_modifier() || second.is_modifier() {
                return Err(ConfigError::InvalidCombo(format!(
                    "combo {} uses a modifier key",
                    i
                )));
            }
            if combo.output == Key::None {
                return Err(ConfigError::InvalidCombo(format!("combo {} has no output", i)));
            }
            let duplicate = self.combos[..i]
                .iter()
                .any(|earlier| earlier.contains(first) && earlier.contains(second));
            if duplicate {
                return Err(ConfigError::InvalidCombo(format!(
                    "{}+{} is defined twice",
                    first, second
                )));
            }
        }
        Ok(())
    }

    /// Settings for the transform engine
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tapping_term_ms: self.tapping_term_ms,
            combo_term_ms: self.combo_term_ms,
            combos: self.combos.clone(),
            both_shifts_toggle: self.both_shifts_toggle,
            sentence_case: self.sentence_case,
        }
    }
}

fn check_range(name: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::TimeoutOutOfRange(format!(
            "{} must be {}-{}ms, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tapping_term_ms, 200);
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_ranges() {
        let config = Config {
            tapping_term_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeoutOutOfRange(_))
        ));

        let config = Config {
            send_string_delay_ms: 101,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_combo_checks() {
        let same_key = Config {
            combos: vec![ComboDef::new(Key::L, Key::L, Key::Tab)],
            ..Config::default()
        };
        assert!(matches!(
            same_key.validate(),
            Err(ConfigError::InvalidCombo(_))
        ));

        let duplicate = Config {
            combos: vec![
                ComboDef::new(Key::L, Key::M, Key::Tab),
                ComboDef::new(Key::M, Key::L, Key::Escape),
            ],
            ..Config::default()
        };
        assert!(duplicate.validate().is_err());

        let modifier = Config {
            combos: vec![ComboDef::new(Key::LeftShift, Key::A, Key::Tab)],
            ..Config::default()
        };
        assert!(modifier.validate().is_err());
    }
}
