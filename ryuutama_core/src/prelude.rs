//! Prelude module for convenient imports
//!
//! ```rust
//! use ryuutama_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Ability, CreatureCategory, CreatureKind, ResourceKind, Weapon, WeaponCategory};
pub use crate::error::{RulesError, RulesResult};
pub use crate::config::RulesConfig;

// Actor
pub use crate::actor::{paths, ActorDocument, ActorUpdate, Character};
pub use crate::ability::{Abilities, StatusEffect, StatusKind};

// Checks
pub use crate::check::{
    cast_spell, roll_attack, roll_check, roll_initiative, CheckContext, CheckDialogConfig,
    CheckMessage, CheckMessageConfig, CheckRollConfig,
};
pub use crate::dice::{DiceEvaluator, RandomEvaluator};
pub use crate::host::{CheckHost, Recorder};

// Damage
pub use crate::damage::{apply_damage, apply_healing, DamageConfiguration, DamageOptions, Defense};

// Advancement
pub use crate::advancement::{apply_results, AdvancementChain, AdvancementResult};

// Journey
pub use crate::journey::{JourneySettings, SettingStore, Terrain, User, UserRole, Weather};
