//! Damage resolution against a defender's defense

use super::{DamageConfiguration, DamageDelta, Defense};
use crate::actor::{paths, ActorDocument, ActorUpdate};
use crate::error::RulesResult;
use crate::types::{CreatureCategory, ResourceKind};

/// Total stamina/mental loss from a list of damage entries
///
/// Magical damage only receives the magical modifier. Physical damage
/// receives the physical modifier and then loses the defense total, unless
/// the entry bypasses armor. Each entry bottoms out at zero.
pub fn calculate_damage(
    entries: &[DamageConfiguration],
    defense: &Defense,
    category: Option<CreatureCategory>,
) -> DamageDelta {
    let mut delta = DamageDelta::default();

    for entry in entries {
        let mut value = entry.value;
        if entry.options.magical {
            value += defense.modifiers.magical.unwrap_or(0);
        } else {
            value += defense.modifiers.physical.unwrap_or(0);
            if !entry.bypasses_armor(category) {
                value -= defense.total;
            }
        }

        let value = value.max(0);
        delta.hp += value;
        if entry.options.damage_mental {
            delta.mp += value;
        }
    }

    delta
}

/// Total healing from a list of entries; negative entries count as zero
pub fn calculate_healing(entries: &[DamageConfiguration]) -> i64 {
    entries.iter().map(|e| e.value.max(0)).sum()
}

/// Resolve damage against the document's character and persist the spend
pub fn apply_damage(
    document: &mut dyn ActorDocument,
    entries: &[DamageConfiguration],
) -> RulesResult<DamageDelta> {
    let character = document.character();
    let delta = calculate_damage(entries, &character.defense, character.category);
    if delta.hp == 0 && delta.mp == 0 {
        return Ok(delta);
    }

    let stamina = character.resources.stamina.state.spent + delta.hp;
    let mental = character.resources.mental.state.spent + delta.mp;
    tracing::debug!(actor = %character.name, hp = delta.hp, mp = delta.mp, "applying damage");

    let mut update = ActorUpdate::new();
    update.set(paths::spent(ResourceKind::Stamina), stamina);
    if delta.mp > 0 {
        update.set(paths::spent(ResourceKind::Mental), mental);
    }
    document.update(update)?;
    Ok(delta)
}

/// Reduce stamina spent by the healing total
///
/// Spent is not clamped here; the ledger clamps it on the next preparation.
pub fn apply_healing(
    document: &mut dyn ActorDocument,
    entries: &[DamageConfiguration],
) -> RulesResult<i64> {
    let healing = calculate_healing(entries);
    if healing == 0 {
        return Ok(0);
    }

    let spent = document.character().resources.stamina.state.spent - healing;
    let mut update = ActorUpdate::new();
    update.set(paths::spent(ResourceKind::Stamina), spent);
    document.update(update)?;
    Ok(healing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Character;
    use crate::damage::{DamageOptions, DefenseModifiers};
    use crate::types::CreatureKind;
    use proptest::prelude::*;

    fn defense(total: i64, physical: Option<i64>, magical: Option<i64>) -> Defense {
        Defense {
            total,
            modifiers: DefenseModifiers { physical, magical },
        }
    }

    #[test]
    fn test_physical_damage_minus_armor() {
        let delta = calculate_damage(&[DamageConfiguration::new(10)], &defense(3, None, None), None);
        assert_eq!(delta, DamageDelta { hp: 7, mp: 0 });
    }

    #[test]
    fn test_physical_modifier_applies_before_armor() {
        let delta = calculate_damage(&[DamageConfiguration::new(10)], &defense(3, Some(2), None), None);
        assert_eq!(delta.hp, 9);
    }

    #[test]
    fn test_magical_ignores_armor_total() {
        // Undead defender, plain magical damage
        let delta = calculate_damage(
            &[DamageConfiguration::with_options(10, DamageOptions::magical())],
            &defense(5, Some(4), Some(-3)),
            Some(CreatureCategory::Undead),
        );
        assert_eq!(delta.hp, 7);
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        let delta = calculate_damage(
            &[
                DamageConfiguration::new(2),
                DamageConfiguration::with_options(1, DamageOptions::magical()),
            ],
            &defense(5, None, Some(-4)),
            None,
        );
        assert_eq!(delta.hp, 0);
    }

    #[test]
    fn test_mythril_bypasses_undead_armor() {
        let entry = DamageConfiguration::with_options(
            6,
            DamageOptions {
                mythril: true,
                ..Default::default()
            },
        );
        let undead = calculate_damage(&[entry], &defense(4, None, None), Some(CreatureCategory::Undead));
        assert_eq!(undead.hp, 6);
        let beast = calculate_damage(&[entry], &defense(4, None, None), Some(CreatureCategory::Beast));
        assert_eq!(beast.hp, 2);
    }

    #[test]
    fn test_damage_mental() {
        let entry = DamageConfiguration::with_options(
            5,
            DamageOptions {
                damage_mental: true,
                ..Default::default()
            },
        );
        let delta = calculate_damage(&[entry, DamageConfiguration::new(3)], &defense(1, None, None), None);
        assert_eq!(delta, DamageDelta { hp: 6, mp: 4 });
    }

    #[test]
    fn test_healing_ignores_negative_entries() {
        let total = calculate_healing(&[
            DamageConfiguration::new(4),
            DamageConfiguration::new(-2),
            DamageConfiguration::new(3),
        ]);
        assert_eq!(total, 7);
    }

    #[test]
    fn test_apply_damage_and_healing() {
        let mut character = Character::new("Tess", CreatureKind::Character);
        character.defense.total = 1;

        let delta = apply_damage(&mut character, &[DamageConfiguration::new(5)]).unwrap();
        assert_eq!(delta.hp, 4);
        assert_eq!(character.resources.stamina.data.spent, 4);

        let healed = apply_healing(&mut character, &[DamageConfiguration::new(10)]).unwrap();
        assert_eq!(healed, 10);
        // Stored spent goes negative, the ledger clamps it
        assert_eq!(character.resources.stamina.data.spent, -6);
        assert_eq!(character.resources.stamina.state.spent, 0);
    }

    #[test]
    fn test_overhealing_does_not_absorb_later_damage() {
        let mut character = Character::new("Tess", CreatureKind::Character);
        assert_eq!(character.resources.stamina.max(), 8);

        apply_healing(&mut character, &[DamageConfiguration::new(10)]).unwrap();
        assert_eq!(character.resources.stamina.value(), 8);

        apply_damage(&mut character, &[DamageConfiguration::new(3)]).unwrap();
        assert_eq!(character.resources.stamina.data.spent, 3);
        assert_eq!(character.resources.stamina.value(), 5);
    }

    #[test]
    fn test_mental_overspend_is_not_banked() {
        let mut character = Character::new("Tess", CreatureKind::Character);
        assert_eq!(character.resources.mental.max(), 8);

        let drain = |value| {
            DamageConfiguration::with_options(value, DamageOptions { damage_mental: true, ..Default::default() })
        };
        apply_damage(&mut character, &[drain(20)]).unwrap();
        assert_eq!(character.resources.mental.value(), 0);

        // The next hit builds on the clamped spend, not the excess
        apply_damage(&mut character, &[drain(2)]).unwrap();
        assert_eq!(character.resources.mental.data.spent, 10);
    }

    proptest! {
        #[test]
        fn prop_calculate_damage_is_pure(
            values in prop::collection::vec(-20i64..40, 0..6),
            total in 0i64..10,
            magical_mod in -5i64..5,
        ) {
            let entries: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| DamageConfiguration::with_options(*v, DamageOptions { magical: i % 2 == 0, ..Default::default() }))
                .collect();
            let def = defense(total, None, Some(magical_mod));
            let first = calculate_damage(&entries, &def, None);
            let second = calculate_damage(&entries, &def, None);
            prop_assert_eq!(first, second);
            prop_assert!(first.hp >= 0);
        }
    }
}
