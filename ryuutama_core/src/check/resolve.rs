//! Check resolution - build configs, pay costs, roll, record the outcome

use super::config::{
    AccuracyConfig, CheckConfigBuilder, CheckConfigs, CheckDialogConfig, CheckMessageConfig,
    CheckRollConfig, CheckType, ConfigHook, CriticalConfig, InitiativeConfig, MagicConfig,
    RollOptions,
};
use super::formula::assemble;
use super::message::CheckMessage;
use crate::actor::{paths, ActorDocument, ActorUpdate, Character};
use crate::config::RulesConfig;
use crate::damage::{DamageConfiguration, DamageOptions};
use crate::dice::DiceEvaluator;
use crate::error::{RulesError, RulesResult};
use crate::host::CheckHost;
use crate::journey::JourneySettings;
use crate::types::{Ability, ResourceKind, Weapon};

/// Everything a check talks to besides the rolling actor
pub struct CheckContext<'a> {
    /// Supplies the die floor for actors that carry none
    pub rules: &'a RulesConfig,
    pub evaluator: &'a mut dyn DiceEvaluator,
    pub host: &'a mut dyn CheckHost,
    pub hook: Option<&'a dyn ConfigHook>,
    /// Current journey settings, for journey target numbers
    pub journey: Option<JourneySettings>,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        rules: &'a RulesConfig,
        evaluator: &'a mut dyn DiceEvaluator,
        host: &'a mut dyn CheckHost,
    ) -> Self {
        CheckContext {
            rules,
            evaluator,
            host,
            hook: None,
            journey: None,
        }
    }

    pub fn with_hook(mut self, hook: &'a dyn ConfigHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn with_journey(mut self, journey: JourneySettings) -> Self {
        self.journey = Some(journey);
        self
    }

    fn builder(&self) -> CheckConfigBuilder<'a> {
        match self.hook {
            Some(hook) => CheckConfigBuilder::with_hook(hook),
            None => CheckConfigBuilder::new(),
        }
    }
}

/// Resources a check spends before it is rolled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCost {
    pub mental: i64,
    pub fumble_points: i64,
}

impl CheckCost {
    /// Concentration and spell costs for `roll` as paid by `character`
    pub fn of(roll: &CheckRollConfig, character: &Character) -> Self {
        let mut cost = CheckCost::default();

        if let Some(concentration) = &roll.concentration {
            if concentration.allowed == Some(true) {
                if concentration.consume_mental {
                    // Half the current points, rounded up, never free
                    let current = character.available(ResourceKind::Mental).max(0);
                    cost.mental += ((current + 1) / 2).max(1);
                }
                if concentration.consume_fumble_point {
                    cost.fumble_points += 1;
                }
            }
        }

        if let Some(magic) = &roll.magic {
            if magic.consume_mental == Some(true) {
                cost.mental += magic.cost.max(0);
            }
        }

        cost
    }

    /// Fails with the first resource that falls short
    pub fn ensure_affordable(&self, character: &Character) -> RulesResult<()> {
        for (resource, required) in [
            (ResourceKind::Mental, self.mental),
            (ResourceKind::FumblePoints, self.fumble_points),
        ] {
            let available = character.available(resource);
            if required > 0 && available < required {
                return Err(RulesError::ResourceUnavailable {
                    resource,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    pub fn is_free(&self) -> bool {
        self.mental == 0 && self.fumble_points == 0
    }
}

/// Accuracy roll and, when it landed, the damage roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub accuracy: CheckMessage,
    pub damage: Option<CheckMessage>,
}

/// Magic check and, when it succeeded, the spell's damage roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellOutcome {
    pub check: CheckMessage,
    pub damage: Option<CheckMessage>,
}

/// Roll any check from caller-supplied configs
///
/// Returns `Ok(None)` when the dialog was cancelled or a cost could not be
/// paid; nothing is written to the actor in either case.
pub fn roll_check(
    ctx: &mut CheckContext<'_>,
    document: &mut dyn ActorDocument,
    roll: &CheckRollConfig,
    dialog: &CheckDialogConfig,
    message: &CheckMessageConfig,
) -> RulesResult<Option<CheckMessage>> {
    let configs = ctx.builder().build(roll, dialog, message)?;
    resolve(ctx, document, configs)
}

/// Accuracy check with `weapon`, then damage unless the accuracy roll
/// fumbled or missed `target_number`
///
/// A critical hit doubles the damage dice. Only the accuracy roll shows the
/// dialog.
pub fn roll_attack(
    ctx: &mut CheckContext<'_>,
    document: &mut dyn ActorDocument,
    weapon: &Weapon,
    target_number: Option<i64>,
    dialog: &CheckDialogConfig,
    message: &CheckMessageConfig,
) -> RulesResult<Option<AttackOutcome>> {
    let mut accuracy = CheckRollConfig::new("accuracy").with_abilities(&weapon.accuracy);
    accuracy.modifier = non_zero(weapon.accuracy_modifier);
    accuracy.accuracy = Some(AccuracyConfig {
        weapon: Some(weapon.name.clone()),
    });
    accuracy.roll_options = target_number.map(|tn| RollOptions {
        target_number: Some(tn),
    });

    let Some(hit) = roll_check(ctx, document, &accuracy, dialog, message)? else {
        return Ok(None);
    };
    if hit.is_fumble || hit.success == Some(false) {
        tracing::debug!(weapon = %weapon.name, total = hit.total, "attack missed");
        return Ok(Some(AttackOutcome {
            accuracy: hit,
            damage: None,
        }));
    }

    let mut damage = CheckRollConfig::new("damage").with_abilities(&[weapon.damage]);
    damage.modifier = non_zero(weapon.damage_modifier);
    damage.critical = Some(CriticalConfig {
        allowed: None,
        is_critical: hit.is_critical,
    });
    damage.damage = Some(DamageOptions {
        mythril: weapon.mythril,
        orichalcum: weapon.orichalcum,
        ..Default::default()
    });

    let damage = roll_check(ctx, document, &damage, &without_dialog(dialog), message)?;
    Ok(Some(AttackOutcome {
        accuracy: hit,
        damage,
    }))
}

/// Pay the spell's mental cost and roll the magic check; damaging spells
/// roll their damage formula as magical damage on success
pub fn cast_spell(
    ctx: &mut CheckContext<'_>,
    document: &mut dyn ActorDocument,
    spell: &MagicConfig,
    target_number: Option<i64>,
    dialog: &CheckDialogConfig,
    message: &CheckMessageConfig,
) -> RulesResult<Option<SpellOutcome>> {
    let mut magic = CheckRollConfig::new("magic");
    magic.magic = Some(spell.clone());
    magic.roll_options = target_number.map(|tn| RollOptions {
        target_number: Some(tn),
    });

    let Some(check) = roll_check(ctx, document, &magic, dialog, message)? else {
        return Ok(None);
    };
    let landed = !check.is_fumble && check.success != Some(false);

    let damage = match &spell.damage {
        Some(spell_damage) if landed => {
            let mut damage = CheckRollConfig::new("damage").with_formula(&spell_damage.formula);
            damage.critical = Some(CriticalConfig {
                allowed: None,
                is_critical: check.is_critical,
            });
            damage.damage = Some(DamageOptions::magical());
            roll_check(ctx, document, &damage, &without_dialog(dialog), message)?
        }
        _ => None,
    };

    Ok(Some(SpellOutcome { check, damage }))
}

/// Initiative is dexterity plus intelligence
pub fn roll_initiative(
    ctx: &mut CheckContext<'_>,
    document: &mut dyn ActorDocument,
    combatant_id: Option<String>,
    dialog: &CheckDialogConfig,
    message: &CheckMessageConfig,
) -> RulesResult<Option<CheckMessage>> {
    let mut roll = CheckRollConfig::new("initiative")
        .with_abilities(&[Ability::Dexterity, Ability::Intelligence]);
    roll.initiative = Some(InitiativeConfig { combatant_id });
    roll_check(ctx, document, &roll, dialog, message)
}

/// Resolve built configs
///
/// 1. Shows the dialog (cancel ends the check)
/// 2. Validates every cost before anything is rolled
/// 3. Assembles, evaluates and classifies the roll
/// 4. Works out the target number, success and damage
/// 5. Writes spent resources, fumble points and condition in one update
/// 6. Hands the message to the host
fn resolve(
    ctx: &mut CheckContext<'_>,
    document: &mut dyn ActorDocument,
    mut configs: CheckConfigs,
) -> RulesResult<Option<CheckMessage>> {
    // Step 1: Dialog
    if configs.dialog.configure && !ctx.host.configure(&mut configs) {
        tracing::debug!(check = %configs.roll.check_type, "check dialog cancelled");
        return Ok(None);
    }
    let check_type = configs.roll.parsed_type()?;
    let character = document.character();

    // Step 2: Costs
    let cost = CheckCost::of(&configs.roll, character);
    if let Err(err) = cost.ensure_affordable(character) {
        tracing::warn!(check = %check_type, actor = %character.name, error = %err, "check aborted");
        ctx.host.warn(&err.to_string());
        return Ok(None);
    }

    // Step 3: Roll
    let formula = assemble(&configs.roll, &character.roll_data_for(ctx.rules))?;
    let mut roll = formula.to_roll()?;
    let evaluated = roll.evaluate(&mut *ctx.evaluator).clone();
    let is_critical = roll.is_critical()?;
    let is_fumble = roll.is_fumble()?;
    let total = evaluated.total;

    // Step 4: Outcome
    let target_number = configs
        .roll
        .roll_options
        .as_ref()
        .and_then(|o| o.target_number)
        .or_else(|| match (check_type, &ctx.journey) {
            (CheckType::Journey(_), Some(journey)) => {
                Some(journey.target_number_for(&character.advancements.habitats()))
            }
            _ => None,
        });
    let success = target_number.map(|tn| CheckMessage::judge(total, tn, is_critical, is_fumble));
    let damage = (check_type == CheckType::Damage).then(|| {
        DamageConfiguration::with_options(total.max(0), configs.roll.damage.unwrap_or_default())
    });

    // Step 5: Actor changes
    let mut update = ActorUpdate::new();
    if cost.mental > 0 {
        update.set(
            paths::spent(ResourceKind::Mental),
            character.resources.mental.state.spent + cost.mental,
        );
    }
    if cost.fumble_points > 0 || is_fumble {
        update.set(
            paths::FUMBLE,
            character.fumble - cost.fumble_points + is_fumble as i64,
        );
    }
    let updates_condition = configs
        .roll
        .condition
        .as_ref()
        .is_some_and(|c| c.update_condition);
    if check_type == CheckType::Condition && updates_condition {
        update.set(paths::CONDITION, total.max(0));
    }

    let message = CheckMessage {
        check_type,
        formula: formula.formula.clone(),
        resolved: roll.formula(),
        roll: evaluated,
        total,
        is_critical,
        is_fumble,
        target_number,
        success,
        damage,
        speaker: configs
            .message
            .speaker
            .clone()
            .or_else(|| Some(character.name.clone())),
        flavor: configs.message.flavor.clone(),
    };

    tracing::debug!(
        check = %check_type,
        formula = %message.resolved,
        total,
        critical = is_critical,
        fumble = is_fumble,
        "check rolled"
    );

    if !update.is_empty() {
        document.update(update)?;
    }

    // Step 6: Message
    if configs.message.create {
        ctx.host.create_message(&message)?;
    }
    Ok(Some(message))
}

fn non_zero(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}

fn without_dialog(dialog: &CheckDialogConfig) -> CheckDialogConfig {
    CheckDialogConfig {
        configure: false,
        ..dialog.clone()
    }
}
