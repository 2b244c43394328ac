//! Rules tables: die floors, level-up advancements, classes

use super::ConfigError;
use crate::ability::DIE_LADDER;
use crate::advancement::AdvancementKind;
use crate::types::CreatureKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Highest level a character can reach
pub const MAX_LEVEL: u8 = 10;

/// Immutable rules configuration passed to every component that needs it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub dice: DiceConstants,
    #[serde(default)]
    pub resources: ResourceConstants,
    #[serde(default)]
    pub remote: RemoteConstants,
    /// Advancement tags required at each level
    #[serde(default)]
    pub levels: Vec<LevelAdvancements>,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            dice: DiceConstants::default(),
            resources: ResourceConstants::default(),
            remote: RemoteConstants::default(),
            levels: Vec::new(),
            classes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceConstants {
    /// Smallest die a character's ability can drop to
    #[serde(default = "default_character_floor")]
    pub character_floor: u32,
    /// Smallest die a monster's ability can drop to
    #[serde(default = "default_monster_floor")]
    pub monster_floor: u32,
}

impl Default for DiceConstants {
    fn default() -> Self {
        DiceConstants {
            character_floor: 4,
            monster_floor: 2,
        }
    }
}

fn default_character_floor() -> u32 {
    4
}
fn default_monster_floor() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConstants {
    /// Points split between stamina and mental by a resource increase
    #[serde(default = "default_increase_points")]
    pub increase_points: u32,
}

impl Default for ResourceConstants {
    fn default() -> Self {
        ResourceConstants { increase_points: 3 }
    }
}

fn default_increase_points() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConstants {
    /// How long a cross-session roll request may wait for an answer
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConstants {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConstants {
    fn default() -> Self {
        RemoteConstants { timeout_secs: 10 }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Advancements granted when reaching a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelAdvancements {
    pub level: u8,
    pub advancements: Vec<String>,
}

/// A character class and the skills it can teach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    /// Number of skills picked when taking the class
    #[serde(default = "default_skill_choices")]
    pub skill_choices: u32,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_skill_choices() -> u32 {
    1
}

impl RulesConfig {
    /// Bundled rules tables
    ///
    /// A bundled file that fails to load is logged and replaced by the
    /// built-in defaults, which carry no level table.
    pub fn default_rules() -> Self {
        let toml = include_str!("../../config/rules.toml");
        Self::parse(toml).unwrap_or_else(|err| {
            tracing::error!(error = %err, "bundled rules failed to load, using defaults");
            RulesConfig::default()
        })
    }

    /// Load and validate rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: RulesConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables the rest of the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for floor in [self.dice.character_floor, self.dice.monster_floor] {
            if !DIE_LADDER.contains(&floor) {
                return Err(ConfigError::ValidationError(format!(
                    "die floor {floor} is not a die size"
                )));
            }
        }

        for entry in &self.levels {
            if entry.level == 0 || entry.level > MAX_LEVEL {
                return Err(ConfigError::ValidationError(format!(
                    "level {} outside 1-{MAX_LEVEL}",
                    entry.level
                )));
            }
            for tag in &entry.advancements {
                if AdvancementKind::from_tag(tag).is_none() {
                    return Err(ConfigError::ValidationError(format!(
                        "unknown advancement '{tag}' at level {}",
                        entry.level
                    )));
                }
            }
        }

        for class in &self.classes {
            if class.skill_choices as usize > class.skills.len() {
                return Err(ConfigError::ValidationError(format!(
                    "class '{}' grants more skill choices than it has skills",
                    class.id
                )));
            }
        }

        Ok(())
    }

    /// Die floor for an owner kind
    pub fn die_floor(&self, kind: CreatureKind) -> u32 {
        match kind {
            CreatureKind::Character => self.dice.character_floor,
            CreatureKind::Monster => self.dice.monster_floor,
        }
    }

    /// Advancement tags required at a level, empty when the table has none
    pub fn advancements_for_level(&self, level: u8) -> &[String] {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.advancements.as_slice())
            .unwrap_or(&[])
    }

    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }
}
