use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INITIAL_FAMILIES: i64 = 10;
pub const DEFAULT_MAX_CHILDREN: i64 = 7;
pub const DEFAULT_PRISTINE_GENERATIONS: i64 = 4;
pub const DEFAULT_MIXED_FAMILIES: i64 = 10_000;
pub const DEFAULT_SEED: u64 = 2025;
pub const DEFAULT_MAX_PAIR_ATTEMPTS: i64 = 1_000;

/// Invalid generation configuration, reported before any generation work.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be >= {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },
    #[error("{field} is too large, got {value}")]
    TooLarge { field: &'static str, value: i64 },
}

/// Raw configuration as read from a config file or command line flags.
///
/// Counts are signed so that negative input is observed and rejected by
/// [`ConfigInput::validate`] instead of failing somewhere in a parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigInput {
    pub initial_families: i64,
    pub max_children: i64,
    pub pristine_generations: i64,
    pub mixed_families: i64,
    pub seed: u64,
    /// Sampling attempts allowed per mixed family before giving up.
    pub max_pair_attempts: i64,
}

impl Default for ConfigInput {
    fn default() -> Self {
        Self {
            initial_families: DEFAULT_INITIAL_FAMILIES,
            max_children: DEFAULT_MAX_CHILDREN,
            pristine_generations: DEFAULT_PRISTINE_GENERATIONS,
            mixed_families: DEFAULT_MIXED_FAMILIES,
            seed: DEFAULT_SEED,
            max_pair_attempts: DEFAULT_MAX_PAIR_ATTEMPTS,
        }
    }
}

impl ConfigInput {
    pub fn validate(&self) -> Result<GenerationConfig, ConfigError> {
        Ok(GenerationConfig {
            initial_families: bounded_u32("initial_families", self.initial_families, 1)?,
            max_children: bounded_u32("max_children", self.max_children, 0)?,
            pristine_generations: bounded_u32(
                "pristine_generations",
                self.pristine_generations,
                0,
            )?,
            mixed_families: bounded_u64("mixed_families", self.mixed_families, 0)?,
            seed: self.seed,
            max_pair_attempts: bounded_u32("max_pair_attempts", self.max_pair_attempts, 1)?,
        })
    }
}

/// Validated, immutable generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationConfig {
    initial_families: u32,
    max_children: u32,
    pristine_generations: u32,
    mixed_families: u64,
    seed: u64,
    max_pair_attempts: u32,
}

impl GenerationConfig {
    pub fn initial_families(&self) -> u32 {
        self.initial_families
    }

    pub fn max_children(&self) -> u32 {
        self.max_children
    }

    pub fn pristine_generations(&self) -> u32 {
        self.pristine_generations
    }

    pub fn mixed_families(&self) -> u64 {
        self.mixed_families
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_pair_attempts(&self) -> u32 {
        self.max_pair_attempts
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            initial_families: DEFAULT_INITIAL_FAMILIES as u32,
            max_children: DEFAULT_MAX_CHILDREN as u32,
            pristine_generations: DEFAULT_PRISTINE_GENERATIONS as u32,
            mixed_families: DEFAULT_MIXED_FAMILIES as u64,
            seed: DEFAULT_SEED,
            max_pair_attempts: DEFAULT_MAX_PAIR_ATTEMPTS as u32,
        }
    }
}

fn bounded_u32(field: &'static str, value: i64, min: i64) -> Result<u32, ConfigError> {
    if value < min {
        return Err(ConfigError::BelowMinimum { field, min, value });
    }
    u32::try_from(value).map_err(|_| ConfigError::TooLarge { field, value })
}

fn bounded_u64(field: &'static str, value: i64, min: i64) -> Result<u64, ConfigError> {
    if value < min {
        return Err(ConfigError::BelowMinimum { field, min, value });
    }
    u64::try_from(value).map_err(|_| ConfigError::TooLarge { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ConfigInput::default().validate().expect("defaults are valid");
        assert_eq!(config, GenerationConfig::default());
        assert_eq!(config.initial_families(), 10);
        assert_eq!(config.mixed_families(), 10_000);
        assert_eq!(config.seed(), 2025);
    }

    #[test]
    fn rejects_zero_initial_families() {
        let input = ConfigInput {
            initial_families: 0,
            ..ConfigInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(ConfigError::BelowMinimum {
                field: "initial_families",
                min: 1,
                value: 0
            })
        );
    }

    #[test]
    fn rejects_negative_counts() {
        for input in [
            ConfigInput {
                max_children: -1,
                ..ConfigInput::default()
            },
            ConfigInput {
                pristine_generations: -3,
                ..ConfigInput::default()
            },
            ConfigInput {
                mixed_families: -10,
                ..ConfigInput::default()
            },
        ] {
            assert!(matches!(
                input.validate(),
                Err(ConfigError::BelowMinimum { min: 0, .. })
            ));
        }
    }

    #[test]
    fn rejects_counts_beyond_u32() {
        let input = ConfigInput {
            max_children: i64::from(u32::MAX) + 1,
            ..ConfigInput::default()
        };
        assert!(matches!(
            input.validate(),
            Err(ConfigError::TooLarge {
                field: "max_children",
                ..
            })
        ));
    }
}
