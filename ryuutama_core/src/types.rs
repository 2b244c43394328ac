//! Core types shared by every rules module

use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four die-based stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Intelligence,
    Spirit,
}

impl Ability {
    /// Get all abilities in sheet order
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Intelligence,
            Ability::Spirit,
        ]
    }

    /// Key used in roll data references (`@stats.<key>`) and update paths
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Intelligence => "intelligence",
            Ability::Spirit => "spirit",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Ability {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::all()
            .iter()
            .copied()
            .find(|a| a.key() == s)
            .ok_or_else(|| RulesError::invalid(format!("unknown ability '{s}'")))
    }
}

/// Owner kind, which decides the smallest die an ability can shrink to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    #[default]
    Character,
    Monster,
}

/// Monster category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureCategory {
    Beast,
    Humanoid,
    Undead,
    Magical,
    Phantom,
    Demonstone,
    Dragon,
}

/// Depletable pools a check may need to pay from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Stamina,
    Mental,
    FumblePoints,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Stamina => f.write_str("stamina"),
            ResourceKind::Mental => f.write_str("mental points"),
            ResourceKind::FumblePoints => f.write_str("fumble points"),
        }
    }
}

/// Weapon categories a character can master
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    LightBlade,
    Blade,
    Polearm,
    Axe,
    Bow,
    Unarmed,
}

/// A weapon as far as attack checks are concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub name: String,
    pub category: WeaponCategory,
    /// Abilities rolled for the accuracy check
    pub accuracy: [Ability; 2],
    #[serde(default)]
    pub accuracy_modifier: i64,
    /// Ability rolled for damage
    pub damage: Ability,
    #[serde(default)]
    pub damage_modifier: i64,
    #[serde(default)]
    pub mythril: bool,
    #[serde(default)]
    pub orichalcum: bool,
}

impl Weapon {
    /// Plain fists: [STR, DEX] to hit, STR - 1 damage
    pub fn unarmed() -> Self {
        Weapon {
            name: "Unarmed".to_string(),
            category: WeaponCategory::Unarmed,
            accuracy: [Ability::Strength, Ability::Dexterity],
            accuracy_modifier: 0,
            damage: Ability::Strength,
            damage_modifier: -1,
            mythril: false,
            orichalcum: false,
        }
    }
}
