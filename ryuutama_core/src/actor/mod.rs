//! Character document - stored data, derived data and roll data

mod update;

pub use update::{paths, ActorUpdate};

use crate::ability::{apply_effects, Abilities, AbilityShift, StatusEffect, StatusKind};
use crate::advancement::{AdvancementCollection, AdvancementRecord};
use crate::check::{RollData, RollValue};
use crate::config::RulesConfig;
use crate::damage::Defense;
use crate::error::RulesResult;
use crate::resource::{Overflow, ResourceLedger};
use crate::types::{Ability, CreatureCategory, CreatureKind, ResourceKind};
use serde::{Deserialize, Serialize};

/// Host persistence boundary for one actor
pub trait ActorDocument {
    fn character(&self) -> &Character;

    /// Apply a `path -> value` update; all or nothing
    fn update(&mut self, update: ActorUpdate) -> RulesResult<()>;

    /// Embed granted advancement records
    fn create_advancements(&mut self, records: Vec<AdvancementRecord>) -> RulesResult<()>;
}

/// Stamina and mental pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub stamina: ResourceLedger,
    pub mental: ResourceLedger,
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceLedger> {
        match kind {
            ResourceKind::Stamina => Some(&self.stamina),
            ResourceKind::Mental => Some(&self.mental),
            ResourceKind::FumblePoints => None,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceLedger> {
        match kind {
            ResourceKind::Stamina => Some(&mut self.stamina),
            ResourceKind::Mental => Some(&mut self.mental),
            ResourceKind::FumblePoints => None,
        }
    }
}

/// A character or monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub kind: CreatureKind,
    #[serde(default)]
    pub category: Option<CreatureCategory>,
    pub level: u8,
    pub abilities: Abilities,
    #[serde(default)]
    pub resources: Resources,
    /// Fumble points
    #[serde(default)]
    pub fumble: i64,
    /// Current condition score
    #[serde(default)]
    pub condition: u32,
    /// Rations missed, each a -1 on checks
    #[serde(default)]
    pub rations_missed: i64,
    #[serde(default)]
    pub defense: Defense,
    #[serde(default)]
    pub statuses: Vec<StatusEffect>,
    #[serde(default)]
    pub shifts: Vec<AbilityShift>,
    #[serde(default)]
    pub advancements: AdvancementCollection,
    /// Die floor override from the rules config
    #[serde(default)]
    pub die_floor: Option<u32>,

    // === Derived ===
    #[serde(skip)]
    pub active_statuses: Vec<StatusKind>,
}

impl Character {
    /// Level 1 creature with d4 abilities
    pub fn new(name: impl Into<String>, kind: CreatureKind) -> Self {
        let mut character = Character {
            name: name.into(),
            kind,
            category: None,
            level: 1,
            abilities: Abilities::new(4, 4, 4, 4),
            resources: Resources::default(),
            fumble: 0,
            condition: 0,
            rations_missed: 0,
            defense: Defense::default(),
            statuses: Vec::new(),
            shifts: Vec::new(),
            advancements: AdvancementCollection::new(),
            die_floor: None,
            active_statuses: Vec::new(),
        };
        character.prepare();
        character
    }

    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self.prepare();
        self
    }

    pub fn with_rules(mut self, rules: &RulesConfig) -> Self {
        self.die_floor = Some(rules.die_floor(self.kind));
        self.prepare();
        self
    }

    /// Smallest die an ability can reach
    pub fn floor(&self) -> u32 {
        self.die_floor.unwrap_or(match self.kind {
            CreatureKind::Character => 4,
            CreatureKind::Monster => 2,
        })
    }

    /// Recompute everything derived from stored data
    pub fn prepare(&mut self) {
        let immunities = self.advancements.status_immunities();
        self.active_statuses = apply_effects(
            &mut self.abilities,
            &self.statuses,
            self.condition,
            &immunities,
            &self.shifts,
        );

        let level = self.level as i64;
        let stamina_source = self.abilities.strength.value as i64 * 2;
        let mental_source = self.abilities.spirit.value as i64 * 2;
        let scale = self.condition as i64;
        self.resources
            .stamina
            .recompute(stamina_source, level, Overflow::Negative { scale });
        self.resources
            .mental
            .recompute(mental_source, level, Overflow::Clamped);
    }

    /// Effective die for an ability
    pub fn die(&self, ability: Ability) -> u32 {
        self.abilities.get(ability).die(self.floor())
    }

    /// Spendable amount of a resource
    pub fn available(&self, kind: ResourceKind) -> i64 {
        match self.resources.get(kind) {
            Some(ledger) => ledger.value(),
            None => self.fumble,
        }
    }

    /// Context for `@` references in roll formulas
    pub fn roll_data(&self) -> RollData {
        self.roll_data_floored(self.floor())
    }

    /// Roll data whose die floor comes from `rules` unless one is stored
    pub fn roll_data_for(&self, rules: &RulesConfig) -> RollData {
        let floor = self.die_floor.unwrap_or_else(|| rules.die_floor(self.kind));
        self.roll_data_floored(floor)
    }

    fn roll_data_floored(&self, floor: u32) -> RollData {
        let mut data = RollData::new();
        for ability in Ability::all() {
            let die = self.abilities.get(*ability).die(floor);
            data.insert(format!("stats.{}", ability.key()), RollValue::Die(die));
        }
        data.insert("level", RollValue::Number(self.level as i64));
        data.insert("condition", RollValue::Number(self.condition as i64));
        data.insert("fumble", RollValue::Number(self.fumble));
        data.insert("rationPenalty", RollValue::Number(-self.rations_missed));
        data
    }
}

impl ActorDocument for Character {
    fn character(&self) -> &Character {
        self
    }

    fn update(&mut self, update: ActorUpdate) -> RulesResult<()> {
        let mut next = self.clone();
        update.apply_to(&mut next)?;
        next.prepare();
        *self = next;
        Ok(())
    }

    fn create_advancements(&mut self, records: Vec<AdvancementRecord>) -> RulesResult<()> {
        let mut collection = self.advancements.clone();
        for record in records {
            collection.insert(record)?;
        }
        self.advancements = collection;
        self.prepare();
        Ok(())
    }
}
