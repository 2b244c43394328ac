//! Individual advancement rules and their choice payloads

use crate::ability::{step_value, StatusKind};
use crate::actor::{paths, ActorUpdate, Character};
use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};
use crate::journey::Habitat;
use crate::types::{Ability, ResourceKind, WeaponCategory};
use serde::{Deserialize, Serialize};

/// Raise one ability a die size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatIncrease {
    pub level: u8,
    #[serde(default)]
    pub choice: Option<Ability>,
}

impl StatIncrease {
    pub fn new(level: u8) -> Self {
        StatIncrease {
            level,
            choice: None,
        }
    }

    pub fn update(&self, character: &Character) -> RulesResult<ActorUpdate> {
        let ability = self
            .choice
            .ok_or_else(|| RulesError::invalid("stat increase without a chosen ability"))?;
        let current = character.abilities.get(ability).value;
        let raised = step_value(current, 1, character.floor());

        let mut update = ActorUpdate::new();
        update.set(paths::ability(ability), raised);
        Ok(update)
    }
}

/// Split the level's points between stamina and mental
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIncrease {
    pub level: u8,
    #[serde(default)]
    pub stamina: u32,
    #[serde(default)]
    pub mental: u32,
}

impl ResourceIncrease {
    pub fn new(level: u8) -> Self {
        ResourceIncrease {
            level,
            ..Default::default()
        }
    }

    pub fn is_configured(&self, rules: &RulesConfig) -> bool {
        self.stamina + self.mental == rules.resources.increase_points
    }

    pub fn update(&self, character: &Character) -> ActorUpdate {
        let mut update = ActorUpdate::new();
        for (kind, points) in [
            (ResourceKind::Stamina, self.stamina),
            (ResourceKind::Mental, self.mental),
        ] {
            if points == 0 {
                continue;
            }
            let current = character
                .resources
                .get(kind)
                .and_then(|r| r.data.bonuses.flat)
                .unwrap_or(0);
            update.set(paths::bonus_flat(kind), current + points as i64);
        }
        update
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponMastery {
    pub level: u8,
    #[serde(default)]
    pub choice: Option<WeaponCategory>,
}

impl WeaponMastery {
    pub fn new(level: u8) -> Self {
        WeaponMastery {
            level,
            choice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusImmunity {
    pub level: u8,
    #[serde(default)]
    pub choice: Option<StatusKind>,
}

impl StatusImmunity {
    pub fn new(level: u8) -> Self {
        StatusImmunity {
            level,
            choice: None,
        }
    }
}

/// Terrain or weather specialty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitatSpecialty {
    pub level: u8,
    #[serde(default)]
    pub choice: Option<Habitat>,
}

impl HabitatSpecialty {
    pub fn new(level: u8) -> Self {
        HabitatSpecialty {
            level,
            choice: None,
        }
    }
}

/// Take a class; spawns one skill choice per granted skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassChoice {
    pub level: u8,
    #[serde(default)]
    pub choice: Option<String>,
}

impl ClassChoice {
    pub fn new(level: u8) -> Self {
        ClassChoice {
            level,
            choice: None,
        }
    }

    pub fn is_configured(&self, rules: &RulesConfig) -> bool {
        self.choice
            .as_deref()
            .is_some_and(|id| rules.class(id).is_some())
    }

    pub fn children(&self, rules: &RulesConfig) -> Vec<SkillChoice> {
        let Some(class) = self.choice.as_deref().and_then(|id| rules.class(id)) else {
            return Vec::new();
        };
        (0..class.skill_choices)
            .map(|_| SkillChoice::new(self.level, class.skills.clone()))
            .collect()
    }
}

/// Pick one skill from a list of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillChoice {
    pub level: u8,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub choice: Option<String>,
}

impl SkillChoice {
    pub fn new(level: u8, options: Vec<String>) -> Self {
        SkillChoice {
            level,
            options,
            choice: None,
        }
    }

    /// A choice is needed; with options it must be one of them
    pub fn is_configured(&self) -> bool {
        match self.choice.as_deref() {
            None | Some("") => false,
            Some(skill) => self.options.is_empty() || self.options.iter().any(|o| o == skill),
        }
    }
}
