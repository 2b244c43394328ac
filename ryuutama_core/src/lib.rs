//! ryuutama_core - Rules core for Ryuutama characters
//!
//! This library provides:
//! - Ability dice: the die ladder, status effects and their shifts
//! - Checks: config building, formula assembly, roll classification and the
//!   check/attack/spell/initiative entry points
//! - Resources: stamina and mental ledgers
//! - Damage: mitigation against defense and application to an actor
//! - Advancement: the level-up choice chain and granted advancement records
//! - Journey: terrain and weather target numbers, the shared settings store

pub mod ability;
pub mod actor;
pub mod advancement;
pub mod check;
pub mod config;
pub mod damage;
pub mod dice;
pub mod error;
pub mod host;
pub mod journey;
pub mod prelude;
pub mod remote;
pub mod resource;
pub mod types;

// Re-export core types for convenience
pub use ability::{resolve_die_size, Abilities, AbilityScore, StatusEffect, StatusKind};
pub use actor::{ActorDocument, ActorUpdate, Character};
pub use advancement::{
    Advancement, AdvancementChain, AdvancementCollection, AdvancementKind, AdvancementRecord,
    AdvancementResult,
};
pub use check::{
    cast_spell, roll_attack, roll_check, roll_initiative, CheckConfigBuilder, CheckContext,
    CheckDialogConfig, CheckMessage, CheckMessageConfig, CheckRollConfig,
};
pub use config::{ConfigError, RulesConfig};
pub use damage::{calculate_damage, calculate_healing, DamageConfiguration, Defense};
pub use dice::{DiceEvaluator, RandomEvaluator, Roll};
pub use error::{RulesError, RulesResult};
pub use resource::ResourceLedger;
pub use types::{Ability, CreatureCategory, CreatureKind, ResourceKind, Weapon, WeaponCategory};
