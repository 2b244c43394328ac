//! ActorUpdate - `path -> value` changes applied to a character

use super::Character;
use crate::error::{RulesError, RulesResult};
use crate::types::{Ability, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Update paths understood by [`Character`]
pub mod paths {
    use crate::types::{Ability, ResourceKind};

    pub const LEVEL: &str = "system.level";
    pub const FUMBLE: &str = "system.fumble";
    pub const CONDITION: &str = "system.condition";
    pub const RATIONS_MISSED: &str = "system.rationsMissed";

    fn resource_key(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Stamina => "stamina",
            ResourceKind::Mental => "mental",
            ResourceKind::FumblePoints => "fumble",
        }
    }

    pub fn spent(kind: ResourceKind) -> String {
        match kind {
            ResourceKind::FumblePoints => FUMBLE.to_string(),
            _ => format!("system.resources.{}.spent", resource_key(kind)),
        }
    }

    pub fn bonus_flat(kind: ResourceKind) -> String {
        format!("system.resources.{}.bonuses.flat", resource_key(kind))
    }

    pub fn bonus_level(kind: ResourceKind) -> String {
        format!("system.resources.{}.bonuses.level", resource_key(kind))
    }

    pub fn ability(ability: Ability) -> String {
        format!("system.abilities.{}.value", ability.key())
    }
}

/// A set of changes keyed by document path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorUpdate {
    changes: BTreeMap<String, Value>,
}

impl ActorUpdate {
    pub fn new() -> Self {
        ActorUpdate::default()
    }

    pub fn set(&mut self, path: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.changes.insert(path.into(), value.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.changes.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.changes.iter()
    }

    /// Fold another update in; later values win
    pub fn merge(&mut self, other: ActorUpdate) {
        self.changes.extend(other.changes);
    }

    /// Write every change into `character`; stops at the first bad path
    pub fn apply_to(&self, character: &mut Character) -> RulesResult<()> {
        for (path, value) in &self.changes {
            apply_change(character, path, value)?;
        }
        Ok(())
    }
}

fn int(path: &str, value: &Value) -> RulesResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| RulesError::invalid(format!("'{path}' expects an integer, got {value}")))
}

fn optional_int(path: &str, value: &Value) -> RulesResult<Option<i64>> {
    if value.is_null() {
        Ok(None)
    } else {
        int(path, value).map(Some)
    }
}

fn unsigned(path: &str, value: &Value) -> RulesResult<u32> {
    let n = int(path, value)?;
    u32::try_from(n).map_err(|_| RulesError::invalid(format!("'{path}' must not be negative")))
}

fn apply_change(character: &mut Character, path: &str, value: &Value) -> RulesResult<()> {
    match path {
        paths::LEVEL => {
            let level = unsigned(path, value)?;
            if !(1..=crate::config::MAX_LEVEL as u32).contains(&level) {
                return Err(RulesError::invalid(format!("level {level} out of range")));
            }
            character.level = level as u8;
        }
        paths::FUMBLE => character.fumble = int(path, value)?,
        paths::CONDITION => character.condition = unsigned(path, value)?,
        paths::RATIONS_MISSED => character.rations_missed = int(path, value)?,
        _ => {
            for kind in [ResourceKind::Stamina, ResourceKind::Mental] {
                let Some(ledger) = character.resources.get_mut(kind) else {
                    continue;
                };
                if path == paths::spent(kind) {
                    ledger.data.spent = int(path, value)?;
                    return Ok(());
                }
                if path == paths::bonus_flat(kind) {
                    ledger.data.bonuses.flat = optional_int(path, value)?;
                    return Ok(());
                }
                if path == paths::bonus_level(kind) {
                    ledger.data.bonuses.level = optional_int(path, value)?;
                    return Ok(());
                }
            }
            for ability in Ability::all() {
                if path == paths::ability(*ability) {
                    character.abilities.get_mut(*ability).value = unsigned(path, value)?;
                    return Ok(());
                }
            }
            return Err(RulesError::invalid(format!("unknown update path '{path}'")));
        }
    }
    Ok(())
}
