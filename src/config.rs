//! Retention rules for each rarity tier.
//!
//! The rules are fixed: they ship inside the binary as TOML and are parsed and
//! validated once per run. Each rarity is a named field of [`RarityTable`], so a
//! table that omits a tier or names an unknown one fails to load.
//!
//! # Rule File Format
//!
//! ```toml
//! [rarities.Rare]
//! capacity = 4
//! preferred = ["13_BBTap_Rare.png", "4_BBTap_Rare.png"]
//!
//! [rarities.Epic]
//! capacity = 2
//!
//! [rarities.Legendary]
//! capacity = 1
//!
//! [rarities.Common]
//! capacity = 20
//! ```

use crate::rarity::Rarity;
use crate::sprite_file::SpriteFile;
use serde::{Deserialize, Serialize};

const BUILTIN_RULES: &str = include_str!("rarity_rules.toml");

/// Errors that can occur while loading a rule table.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// A preferred name is not a sprite file name of the rarity listing it.
    InvalidPreferredName {
        /// The rarity whose rule lists the name.
        rarity: Rarity,
        /// The offending name.
        name: String,
    },
    /// More preferred names than the rarity can retain.
    PreferredOverCapacity {
        /// The rarity whose rule is inconsistent.
        rarity: Rarity,
        /// Number of preferred names.
        preferred: usize,
        /// Capacity of the rarity.
        capacity: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid rarity rules: {}", msg),
            ConfigError::InvalidPreferredName { rarity, name } => write!(
                f,
                "Preferred file '{}' is not a {} sprite name",
                name, rarity
            ),
            ConfigError::PreferredOverCapacity {
                rarity,
                preferred,
                capacity,
            } => write!(
                f,
                "{} lists {} preferred files but keeps at most {}",
                rarity, preferred, capacity
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Retention rule for one rarity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RarityRule {
    /// Maximum number of files kept.
    pub capacity: usize,

    /// Exact file names kept before any other file of the rarity.
    #[serde(default)]
    pub preferred: Vec<String>,
}

impl RarityRule {
    /// Returns true if `name` is one of the preferred file names.
    pub fn is_preferred(&self, name: &str) -> bool {
        self.preferred.iter().any(|preferred| preferred == name)
    }
}

/// One rule per rarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RarityTable {
    #[serde(rename = "Rare")]
    pub rare: RarityRule,
    #[serde(rename = "Epic")]
    pub epic: RarityRule,
    #[serde(rename = "Legendary")]
    pub legendary: RarityRule,
    #[serde(rename = "Common")]
    pub common: RarityRule,
}

/// The complete rule set used by a curation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationRules {
    pub rarities: RarityTable,
}

impl CurationRules {
    /// Loads the rule table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded table itself is broken.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Parses and validates a rule table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails, and a
    /// validation error if a preferred name does not belong to its rarity or a
    /// rarity prefers more files than it can keep.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let rules: Self =
            toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Returns the rule for `rarity`.
    pub fn rule(&self, rarity: Rarity) -> &RarityRule {
        match rarity {
            Rarity::Rare => &self.rarities.rare,
            Rarity::Epic => &self.rarities.epic,
            Rarity::Legendary => &self.rarities.legendary,
            Rarity::Common => &self.rarities.common,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for rarity in Rarity::ALL {
            let rule = self.rule(rarity);

            if rule.preferred.len() > rule.capacity {
                return Err(ConfigError::PreferredOverCapacity {
                    rarity,
                    preferred: rule.preferred.len(),
                    capacity: rule.capacity,
                });
            }

            for name in &rule.preferred {
                let belongs = SpriteFile::parse(name).is_some_and(|sprite| sprite.rarity == rarity);
                if !belongs {
                    return Err(ConfigError::InvalidPreferredName {
                        rarity,
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
