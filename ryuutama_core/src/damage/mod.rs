//! Damage and healing - defense mitigation and resource deltas

mod resolver;

pub use resolver::{apply_damage, apply_healing, calculate_damage, calculate_healing};

use serde::{Deserialize, Serialize};

/// Flags carried by one damage entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageOptions {
    #[serde(default)]
    pub magical: bool,
    #[serde(default)]
    pub ignore_armor: bool,
    /// Dealt by a mythril weapon
    #[serde(default)]
    pub mythril: bool,
    /// Dealt by an orichalcum weapon
    #[serde(default)]
    pub orichalcum: bool,
    /// Also drains mental points
    #[serde(default)]
    pub damage_mental: bool,
}

impl DamageOptions {
    pub fn magical() -> Self {
        DamageOptions {
            magical: true,
            ..Default::default()
        }
    }
}

/// One incoming damage (or healing) entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageConfiguration {
    pub value: i64,
    #[serde(default)]
    pub options: DamageOptions,
}

impl DamageConfiguration {
    pub fn new(value: i64) -> Self {
        DamageConfiguration {
            value,
            options: DamageOptions::default(),
        }
    }

    pub fn with_options(value: i64, options: DamageOptions) -> Self {
        DamageConfiguration { value, options }
    }

    /// Whether armor does not apply to this entry against `category`
    pub fn bypasses_armor(&self, category: Option<crate::types::CreatureCategory>) -> bool {
        self.options.ignore_armor
            || (category == Some(crate::types::CreatureCategory::Undead)
                && (self.options.mythril || self.options.orichalcum))
    }
}

/// Per-type adjustments to incoming damage; absent values count as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseModifiers {
    #[serde(default)]
    pub physical: Option<i64>,
    #[serde(default)]
    pub magical: Option<i64>,
}

/// A creature's defense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense {
    /// Armor points subtracted from physical damage
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub modifiers: DefenseModifiers,
}

/// Resource change produced by damage resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDelta {
    pub hp: i64,
    pub mp: i64,
}
