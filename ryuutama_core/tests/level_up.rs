//! Integration test: Open chain -> Make choices -> Submit -> Apply to actor

use ryuutama_core::{
    ability::Abilities,
    actor::Character,
    advancement::{
        apply_results, Advancement, AdvancementChain, AdvancementKind, AdvancementResult,
        ChainState,
    },
    config::RulesConfig,
    types::{Ability, CreatureKind, WeaponCategory},
    RulesError,
};

fn adventurer(rules: &RulesConfig) -> Character {
    Character::new("Kanta", CreatureKind::Character)
        .with_rules(rules)
        .with_abilities(Abilities::new(4, 6, 6, 8))
}

#[test]
fn test_level_six_stat_increase() {
    let rules = RulesConfig::default_rules();
    let mut actor = adventurer(&rules);
    let mut chain = AdvancementChain::new(&rules, 6).unwrap();
    chain.initialize_roots().unwrap();

    assert_eq!(chain.len(), 1);
    assert!(!chain.is_fully_configured());

    let root = chain.roots()[0];
    chain
        .configure(root, |advancement| {
            if let Advancement::StatIncrease(stat) = advancement {
                stat.choice = Some(Ability::Strength);
            }
        })
        .unwrap();

    assert!(chain.is_fully_configured());
    assert!(chain.children(root).is_empty());

    let results = chain.submit(&actor).unwrap().unwrap();
    assert_eq!(results.len(), 1);
    let AdvancementResult::Actor(update) = &results[0] else {
        panic!("stat increase should update the actor");
    };
    assert_eq!(update.len(), 1);
    assert_eq!(
        update.get("system.abilities.strength.value"),
        Some(&serde_json::Value::from(6))
    );

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["type"], "actor");

    apply_results(&mut actor, 6, results).unwrap();
    assert_eq!(actor.abilities.strength.value, 6);
    assert_eq!(actor.level, 6);
    assert_eq!(actor.resources.stamina.max(), 12);
}

#[test]
fn test_first_level_class_and_mastery() {
    let rules = RulesConfig::default_rules();
    let mut actor = adventurer(&rules);
    let mut chain = AdvancementChain::new(&rules, 1).unwrap();
    chain.initialize_roots().unwrap();

    let class = chain.nodes_of(AdvancementKind::Class)[0].id;
    let mastery = chain.nodes_of(AdvancementKind::WeaponMastery)[0].id;
    chain
        .configure(class, |a| {
            if let Advancement::Class(c) = a {
                c.choice = Some("noble".to_string());
            }
        })
        .unwrap();
    chain
        .configure(mastery, |a| {
            if let Advancement::WeaponMastery(m) = a {
                m.choice = Some(WeaponCategory::LightBlade);
            }
        })
        .unwrap();

    let skills = chain.children(class);
    assert_eq!(skills.len(), 2);
    assert_eq!(chain.submit(&actor).unwrap(), None);

    for (skill, pick) in skills.into_iter().zip(["etiquette", "education"]) {
        chain
            .configure(skill, |a| {
                if let Advancement::Skill(s) = a {
                    s.choice = Some(pick.to_string());
                }
            })
            .unwrap();
    }
    assert!(chain.is_fully_configured());

    let results = chain.submit(&actor).unwrap().unwrap();
    assert_eq!(results.len(), 4);
    assert!(results
        .iter()
        .all(|r| matches!(r, AdvancementResult::Advancement(_))));
    assert_eq!(chain.state(), ChainState::Confirmed);

    apply_results(&mut actor, 1, results).unwrap();
    assert_eq!(actor.advancements.len(), 4);
    assert_eq!(actor.advancements.classes(), vec!["noble"]);
    assert_eq!(actor.advancements.weapon_masteries(), vec![WeaponCategory::LightBlade]);
}

#[test]
fn test_cancelled_level_up_leaves_actor_alone() {
    let rules = RulesConfig::default_rules();
    let actor = adventurer(&rules);
    let before = actor.clone();

    let mut chain = AdvancementChain::new(&rules, 4).unwrap();
    chain.initialize_roots().unwrap();
    chain.discard();

    assert_eq!(chain.state(), ChainState::Discarded);
    assert_eq!(chain.submit(&actor).unwrap(), None);
    assert_eq!(actor, before);
}

#[test]
fn test_chain_cannot_initialize_twice() {
    let rules = RulesConfig::default_rules();
    let mut chain = AdvancementChain::new(&rules, 2).unwrap();
    chain.initialize_roots().unwrap();
    assert_eq!(chain.initialize_roots(), Err(RulesError::AlreadyInitialized));
}
