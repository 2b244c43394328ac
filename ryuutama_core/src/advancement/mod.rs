//! Advancement - level-up rules and the chain of choices they form

mod chain;
mod collection;
mod kinds;

pub use chain::{apply_results, AdvancementChain, AdvancementNode, ChainState, NodeId};
pub use collection::{random_id, AdvancementCollection, AdvancementRecord};
pub use kinds::{
    ClassChoice, HabitatSpecialty, ResourceIncrease, SkillChoice, StatIncrease, StatusImmunity,
    WeaponMastery,
};

use crate::actor::{ActorUpdate, Character};
use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advancement type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvancementKind {
    StatIncrease,
    ResourceIncrease,
    WeaponMastery,
    StatusImmunity,
    Habitat,
    Class,
    Skill,
}

type Constructor = fn(u8) -> Advancement;

fn stat_increase(level: u8) -> Advancement {
    Advancement::StatIncrease(StatIncrease::new(level))
}

fn resource_increase(level: u8) -> Advancement {
    Advancement::ResourceIncrease(ResourceIncrease::new(level))
}

fn weapon_mastery(level: u8) -> Advancement {
    Advancement::WeaponMastery(WeaponMastery::new(level))
}

fn status_immunity(level: u8) -> Advancement {
    Advancement::StatusImmunity(StatusImmunity::new(level))
}

fn habitat(level: u8) -> Advancement {
    Advancement::Habitat(HabitatSpecialty::new(level))
}

fn class(level: u8) -> Advancement {
    Advancement::Class(ClassChoice::new(level))
}

fn skill(level: u8) -> Advancement {
    Advancement::Skill(SkillChoice::new(level, Vec::new()))
}

/// Tag -> kind -> constructor
const REGISTRY: &[(&str, AdvancementKind, Constructor)] = &[
    ("statIncrease", AdvancementKind::StatIncrease, stat_increase),
    ("resourceIncrease", AdvancementKind::ResourceIncrease, resource_increase),
    ("weaponMastery", AdvancementKind::WeaponMastery, weapon_mastery),
    ("statusImmunity", AdvancementKind::StatusImmunity, status_immunity),
    ("habitat", AdvancementKind::Habitat, habitat),
    ("class", AdvancementKind::Class, class),
    ("skill", AdvancementKind::Skill, skill),
];

impl AdvancementKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        REGISTRY.iter().find(|(t, _, _)| *t == tag).map(|(_, kind, _)| *kind)
    }

    pub fn tag(&self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, kind, _)| kind == self)
            .map(|(tag, _, _)| *tag)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for AdvancementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Create an advancement from its type tag
pub fn create_advancement(tag: &str, level: u8) -> RulesResult<Advancement> {
    REGISTRY
        .iter()
        .find(|(t, _, _)| *t == tag)
        .map(|(_, _, construct)| construct(level))
        .ok_or_else(|| RulesError::invalid(format!("unknown advancement type '{tag}'")))
}

/// One level-up rule and the choice made for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Advancement {
    StatIncrease(StatIncrease),
    ResourceIncrease(ResourceIncrease),
    WeaponMastery(WeaponMastery),
    StatusImmunity(StatusImmunity),
    Habitat(HabitatSpecialty),
    Class(ClassChoice),
    Skill(SkillChoice),
}

impl Advancement {
    pub fn kind(&self) -> AdvancementKind {
        match self {
            Advancement::StatIncrease(_) => AdvancementKind::StatIncrease,
            Advancement::ResourceIncrease(_) => AdvancementKind::ResourceIncrease,
            Advancement::WeaponMastery(_) => AdvancementKind::WeaponMastery,
            Advancement::StatusImmunity(_) => AdvancementKind::StatusImmunity,
            Advancement::Habitat(_) => AdvancementKind::Habitat,
            Advancement::Class(_) => AdvancementKind::Class,
            Advancement::Skill(_) => AdvancementKind::Skill,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Advancement::StatIncrease(a) => a.level,
            Advancement::ResourceIncrease(a) => a.level,
            Advancement::WeaponMastery(a) => a.level,
            Advancement::StatusImmunity(a) => a.level,
            Advancement::Habitat(a) => a.level,
            Advancement::Class(a) => a.level,
            Advancement::Skill(a) => a.level,
        }
    }

    /// Whether the choice payload is complete
    pub fn is_configured(&self, rules: &RulesConfig) -> bool {
        match self {
            Advancement::StatIncrease(a) => a.choice.is_some(),
            Advancement::ResourceIncrease(a) => a.is_configured(rules),
            Advancement::WeaponMastery(a) => a.choice.is_some(),
            Advancement::StatusImmunity(a) => a.choice.is_some(),
            Advancement::Habitat(a) => a.choice.is_some(),
            Advancement::Class(a) => a.is_configured(rules),
            Advancement::Skill(a) => a.is_configured(),
        }
    }

    /// Further advancements the current choice requires
    pub fn children(&self, rules: &RulesConfig) -> Vec<Advancement> {
        match self {
            Advancement::Class(a) => a
                .children(rules)
                .into_iter()
                .map(Advancement::Skill)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// What confirming this advancement does to `character`
    pub fn result(&self, character: &Character) -> RulesResult<AdvancementResult> {
        match self {
            Advancement::StatIncrease(a) => Ok(AdvancementResult::Actor(a.update(character)?)),
            Advancement::ResourceIncrease(a) => Ok(AdvancementResult::Actor(a.update(character))),
            granted => Ok(AdvancementResult::Advancement(granted.clone())),
        }
    }
}

/// Output of confirming one advancement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "camelCase")]
pub enum AdvancementResult {
    /// Changes to apply to the actor
    Actor(ActorUpdate),
    /// A record to embed on the actor
    Advancement(Advancement),
}
