//! Ability scores - die-based stats that shift along the die ladder

mod effects;
mod ladder;
mod score;

pub use effects::{apply_effects, AbilityShift, StatusEffect, StatusKind};
pub use ladder::{resolve_die_size, step_value, DIE_LADDER};
pub use score::{Abilities, AbilityScore};
