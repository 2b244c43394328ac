//! Status effects and buffs that shift ability dice

use super::score::Abilities;
use crate::types::Ability;
use serde::{Deserialize, Serialize};

/// The six status conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Injury,
    Poison,
    Sickness,
    Exhaustion,
    Muddled,
    Shock,
}

impl StatusKind {
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Injury,
            StatusKind::Poison,
            StatusKind::Sickness,
            StatusKind::Exhaustion,
            StatusKind::Muddled,
            StatusKind::Shock,
        ]
    }

    /// Abilities that drop one die size while the status is active
    pub fn affected_abilities(&self) -> &'static [Ability] {
        match self {
            StatusKind::Injury => &[Ability::Dexterity],
            StatusKind::Poison => &[Ability::Strength],
            StatusKind::Exhaustion => &[Ability::Spirit],
            StatusKind::Muddled => &[Ability::Intelligence],
            StatusKind::Sickness | StatusKind::Shock => Ability::all(),
        }
    }
}

/// A status condition with its strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub strength: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, strength: u32) -> Self {
        StatusEffect { kind, strength }
    }

    /// Active while its strength is at least the current condition score
    pub fn is_active(&self, condition: u32, immunities: &[StatusKind]) -> bool {
        self.strength >= condition && !immunities.contains(&self.kind)
    }
}

/// A transient shift along the die ladder from an item or spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityShift {
    pub ability: Ability,
    /// Positive steps raise the die, negative lower it
    pub steps: i32,
}

/// Rebuild ability increases/decreases from statuses and shifts
///
/// Returns the statuses that ended up active.
pub fn apply_effects(
    abilities: &mut Abilities,
    statuses: &[StatusEffect],
    condition: u32,
    immunities: &[StatusKind],
    shifts: &[AbilityShift],
) -> Vec<StatusKind> {
    abilities.reset_shifts();

    let mut active = Vec::new();
    for status in statuses {
        if !status.is_active(condition, immunities) || active.contains(&status.kind) {
            continue;
        }
        active.push(status.kind);
        for ability in status.kind.affected_abilities() {
            abilities.get_mut(*ability).decreases += 1;
        }
    }

    for shift in shifts {
        let score = abilities.get_mut(shift.ability);
        if shift.steps >= 0 {
            score.increases += shift.steps as u32;
        } else {
            score.decreases += shift.steps.unsigned_abs();
        }
    }

    active
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_below_condition_inactive() {
        let status = StatusEffect::new(StatusKind::Injury, 3);
        assert!(!status.is_active(5, &[]));
        assert!(status.is_active(3, &[]));
    }

    #[test]
    fn test_immunity_suppresses_status() {
        let status = StatusEffect::new(StatusKind::Poison, 9);
        assert!(!status.is_active(2, &[StatusKind::Poison]));
    }

    #[test]
    fn test_injury_lowers_dexterity() {
        let mut abilities = Abilities::new(6, 6, 6, 6);
        let active = apply_effects(
            &mut abilities,
            &[StatusEffect::new(StatusKind::Injury, 6)],
            4,
            &[],
            &[],
        );
        assert_eq!(active, vec![StatusKind::Injury]);
        assert_eq!(abilities.dexterity.die(4), 4);
        assert_eq!(abilities.strength.die(4), 6);
    }

    #[test]
    fn test_sickness_lowers_everything() {
        let mut abilities = Abilities::new(8, 8, 8, 8);
        apply_effects(
            &mut abilities,
            &[StatusEffect::new(StatusKind::Sickness, 10)],
            4,
            &[],
            &[],
        );
        for ability in Ability::all() {
            assert_eq!(abilities.get(*ability).die(4), 6);
        }
    }

    #[test]
    fn test_duplicate_status_counts_once() {
        let mut abilities = Abilities::new(8, 8, 8, 8);
        apply_effects(
            &mut abilities,
            &[
                StatusEffect::new(StatusKind::Poison, 6),
                StatusEffect::new(StatusKind::Poison, 8),
            ],
            4,
            &[],
            &[],
        );
        assert_eq!(abilities.strength.decreases, 1);
    }

    #[test]
    fn test_shifts_rebuilt_each_pass() {
        let mut abilities = Abilities::new(6, 6, 6, 6);
        let shifts = [AbilityShift {
            ability: Ability::Spirit,
            steps: 1,
        }];
        apply_effects(&mut abilities, &[], 4, &[], &shifts);
        apply_effects(&mut abilities, &[], 4, &[], &shifts);
        assert_eq!(abilities.spirit.increases, 1);
        assert_eq!(abilities.spirit.die(4), 8);
    }
}
