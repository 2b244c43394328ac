//! AdvancementCollection - granted advancements embedded on a character

use super::Advancement;
use crate::ability::StatusKind;
use crate::error::{RulesError, RulesResult};
use crate::journey::Habitat;
use crate::types::WeaponCategory;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of generated document ids
const ID_LENGTH: usize = 16;

/// Random alphanumeric document id
pub fn random_id(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// A granted advancement with its document id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementRecord {
    pub id: String,
    pub advancement: Advancement,
}

impl AdvancementRecord {
    pub fn new(id: impl Into<String>, advancement: Advancement) -> Self {
        AdvancementRecord {
            id: id.into(),
            advancement,
        }
    }

    /// Record with a fresh random id
    pub fn generate(advancement: Advancement) -> Self {
        AdvancementRecord::new(random_id(&mut rand::thread_rng()), advancement)
    }
}

/// Id-keyed records in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvancementCollection {
    records: Vec<AdvancementRecord>,
}

impl AdvancementCollection {
    pub fn new() -> Self {
        AdvancementCollection::default()
    }

    /// Add a record; an id already in use is rejected
    pub fn insert(&mut self, record: AdvancementRecord) -> RulesResult<()> {
        if self.get(&record.id).is_some() {
            return Err(RulesError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&AdvancementRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<AdvancementRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdvancementRecord> {
        self.records.iter()
    }

    pub fn status_immunities(&self) -> Vec<StatusKind> {
        self.iter()
            .filter_map(|r| match &r.advancement {
                Advancement::StatusImmunity(a) => a.choice,
                _ => None,
            })
            .collect()
    }

    pub fn habitats(&self) -> Vec<Habitat> {
        self.iter()
            .filter_map(|r| match &r.advancement {
                Advancement::Habitat(a) => a.choice,
                _ => None,
            })
            .collect()
    }

    pub fn weapon_masteries(&self) -> Vec<WeaponCategory> {
        self.iter()
            .filter_map(|r| match &r.advancement {
                Advancement::WeaponMastery(a) => a.choice,
                _ => None,
            })
            .collect()
    }

    pub fn classes(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|r| match &r.advancement {
                Advancement::Class(a) => a.choice.as_deref(),
                _ => None,
            })
            .collect()
    }
}
