//! Integration test: Build character -> Roll checks -> Take damage -> Rest
//!
//! Drives the public entry points the way a host would.

use ryuutama_core::{
    ability::{Abilities, StatusEffect, StatusKind},
    actor::{ActorDocument, Character},
    check::{roll_attack, roll_check, CheckContext, CheckDialogConfig, CheckMessageConfig, CheckRollConfig},
    config::RulesConfig,
    damage::{apply_damage, apply_healing, DamageConfiguration, DamageOptions, DefenseModifiers},
    dice::{DiceEvaluator, DieResults, EvaluatedRoll, RandomEvaluator, Roll, Term},
    host::Recorder,
    types::{CreatureCategory, CreatureKind, Weapon},
    RulesError,
};
use rand::SeedableRng;

/// Every die shows the same face, or its highest face when `None`
struct Loaded(Option<u32>);

impl DiceEvaluator for Loaded {
    fn evaluate(&mut self, terms: &[Term]) -> EvaluatedRoll {
        let mut dice = Vec::new();
        let mut total = 0;
        for term in terms {
            match *term {
                Term::Dice { count, faces } => {
                    let face = self.0.unwrap_or(faces).min(faces);
                    total += (face * count) as i64;
                    dice.push(DieResults {
                        faces,
                        results: vec![face; count as usize],
                    });
                }
                Term::Constant { value } => total += value,
            }
        }
        EvaluatedRoll { dice, total }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn traveller(rules: &RulesConfig) -> Character {
    Character::new("Mirei", CreatureKind::Character)
        .with_rules(rules)
        .with_abilities(Abilities::new(8, 6, 6, 4))
}

fn quiet() -> (CheckDialogConfig, CheckMessageConfig) {
    let dialog = CheckDialogConfig {
        configure: false,
        title: None,
    };
    (dialog, CheckMessageConfig::default())
}

#[test]
fn test_default_check_formula() {
    init_tracing();
    let rules = RulesConfig::default_rules();
    let mut dice = Loaded(Some(2));
    let mut host = Recorder::new();
    let mut ctx = CheckContext::new(&rules, &mut dice, &mut host);
    let mut actor = traveller(&rules);
    let (dialog, message) = quiet();

    let result = roll_check(&mut ctx, &mut actor, &CheckRollConfig::new("check"), &dialog, &message)
        .unwrap()
        .unwrap();

    assert_eq!(result.formula, "@stats.strength + @stats.strength");
    assert_eq!(result.resolved, "1d8 + 1d8");
    assert_eq!(result.total, 4);
    assert_eq!(host.messages, vec![result]);
}

#[test]
fn test_critical_damage_doubles_dice_only() {
    init_tracing();
    let rules = RulesConfig::default_rules();
    let mut dice = Loaded(None);
    let mut host = Recorder::new();
    let mut ctx = CheckContext::new(&rules, &mut dice, &mut host);
    let mut actor = traveller(&rules);
    let (dialog, message) = quiet();

    let weapon = Weapon {
        damage_modifier: 1,
        ..Weapon::unarmed()
    };
    let outcome = roll_attack(&mut ctx, &mut actor, &weapon, None, &dialog, &message)
        .unwrap()
        .unwrap();

    assert!(outcome.accuracy.is_critical);
    let damage = outcome.damage.unwrap();
    assert_eq!(damage.formula, "@stats.strength + @modifier");
    assert_eq!(damage.resolved, "2d8 + 1");
    assert_eq!(damage.total, 17);
}

#[test]
fn test_all_ones_is_a_fumble_for_every_type() {
    let mut dice = Loaded(Some(1));
    for terms in [
        vec![Term::dice(1, 6), Term::dice(1, 8)],
        vec![Term::dice(2, 12), Term::constant(3)],
        vec![Term::dice(1, 4)],
    ] {
        let mut roll = Roll::new(terms);
        roll.evaluate(&mut dice);
        assert!(roll.is_fumble().unwrap());
        assert!(!roll.is_critical().unwrap());
    }
}

#[test]
fn test_classification_needs_evaluation() {
    let roll = Roll::new(vec![Term::dice(1, 6)]);
    assert_eq!(roll.is_fumble(), Err(RulesError::NotEvaluated));
    assert_eq!(roll.is_critical(), Err(RulesError::NotEvaluated));
}

#[test]
fn test_undead_magical_damage_skips_defense_total() {
    let rules = RulesConfig::default_rules();
    let mut monster = Character::new("Restless Knight", CreatureKind::Monster).with_rules(&rules);
    monster.category = Some(CreatureCategory::Undead);
    monster.defense.total = 4;
    monster.defense.modifiers = DefenseModifiers {
        physical: None,
        magical: Some(-3),
    };
    monster.resources.stamina.data.max = Some(30);
    monster.prepare();

    let delta = apply_damage(
        &mut monster,
        &[DamageConfiguration::with_options(10, DamageOptions::magical())],
    )
    .unwrap();

    assert_eq!(delta.hp, 7);
    assert_eq!(monster.resources.stamina.value(), 23);
}

#[test]
fn test_heal_past_full_then_damage() {
    let rules = RulesConfig::default_rules();
    let mut actor = traveller(&rules);

    apply_healing(&mut actor, &[DamageConfiguration::new(10)]).unwrap();
    assert_eq!(actor.resources.stamina.value(), 16);
    assert_eq!(actor.resources.stamina.state.pct, 100);

    // Excess healing is not banked against the next hit
    apply_damage(&mut actor, &[DamageConfiguration::new(5)]).unwrap();
    assert_eq!(actor.resources.stamina.value(), 11);

    actor.defense.total = 1;
    apply_damage(&mut actor, &[DamageConfiguration::new(6), DamageConfiguration::new(1)]).unwrap();
    assert_eq!(actor.resources.stamina.value(), 11 - 5);

    apply_healing(&mut actor, &[DamageConfiguration::new(20)]).unwrap();
    assert_eq!(actor.resources.stamina.value(), 16);
}

#[test]
fn test_status_effects_shrink_dice_in_checks() {
    let rules = RulesConfig::default_rules();
    let mut dice = Loaded(None);
    let mut host = Recorder::new();
    let mut ctx = CheckContext::new(&rules, &mut dice, &mut host);
    let mut actor = traveller(&rules);
    actor.statuses.push(StatusEffect::new(StatusKind::Poison, 6));
    actor.condition = 5;
    actor.prepare();
    let (dialog, message) = quiet();

    let result = roll_check(&mut ctx, &mut actor, &CheckRollConfig::new("check"), &dialog, &message)
        .unwrap()
        .unwrap();
    assert_eq!(result.resolved, "1d6 + 1d6");
}

#[test]
fn test_seeded_checks_stay_in_range() {
    let rules = RulesConfig::default_rules();
    let mut dice = RandomEvaluator::new(rand::rngs::StdRng::seed_from_u64(12345));
    let mut host = Recorder::new();
    let mut ctx = CheckContext::new(&rules, &mut dice, &mut host);
    let mut actor = traveller(&rules);
    let (dialog, message) = quiet();

    for _ in 0..50 {
        let result = roll_check(&mut ctx, &mut actor, &CheckRollConfig::new("check"), &dialog, &message)
            .unwrap()
            .unwrap();
        assert!((2..=16).contains(&result.total));
    }
    assert_eq!(actor.character().fumble, host.messages.iter().filter(|m| m.is_fumble).count() as i64);
}
