//! Checks - config building, formula assembly and resolution

mod config;
mod formula;
mod message;
mod resolve;

pub use config::{
    AccuracyConfig, CheckConfigBuilder, CheckConfigs, CheckDefaults, CheckDialogConfig,
    CheckMessageConfig, CheckRollConfig, CheckType, ConcentrationConfig, ConditionConfig,
    ConfigHook, CriticalConfig, InitiativeConfig, JourneyKind, MagicConfig, RollOptions,
    SpellDamage,
};
pub use formula::{assemble, RollData, RollFormula, RollValue};
pub use message::CheckMessage;
pub use resolve::{
    cast_spell, roll_attack, roll_check, roll_initiative, AttackOutcome, CheckContext, CheckCost,
    SpellOutcome,
};
