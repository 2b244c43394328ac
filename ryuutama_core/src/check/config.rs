//! Check configuration records and the builder that fills in per-type defaults

use crate::damage::DamageOptions;
use crate::error::{RulesError, RulesResult};
use crate::types::Ability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Journey checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyKind {
    Camping,
    Direction,
    Travel,
}

impl JourneyKind {
    pub fn parse(id: &str) -> RulesResult<Self> {
        match id {
            "camping" => Ok(JourneyKind::Camping),
            "direction" => Ok(JourneyKind::Direction),
            "travel" => Ok(JourneyKind::Travel),
            other => Err(RulesError::invalid(format!("unknown journey check '{other}'"))),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            JourneyKind::Camping => "camping",
            JourneyKind::Direction => "direction",
            JourneyKind::Travel => "travel",
        }
    }
}

/// Parsed check type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Accuracy,
    Check,
    Condition,
    Damage,
    Initiative,
    Journey(JourneyKind),
    Magic,
}

impl CheckType {
    /// Parse the `type` tag of a roll config; journeys also need their id
    pub fn parse(tag: &str, journey_id: Option<&str>) -> RulesResult<Self> {
        match tag {
            "accuracy" => Ok(CheckType::Accuracy),
            "check" => Ok(CheckType::Check),
            "condition" => Ok(CheckType::Condition),
            "damage" => Ok(CheckType::Damage),
            "initiative" => Ok(CheckType::Initiative),
            "magic" => Ok(CheckType::Magic),
            "journey" => {
                let id = journey_id
                    .ok_or_else(|| RulesError::invalid("journey check without a journeyId"))?;
                Ok(CheckType::Journey(JourneyKind::parse(id)?))
            }
            other => Err(RulesError::invalid(format!("unknown check type '{other}'"))),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            CheckType::Accuracy => "accuracy",
            CheckType::Check => "check",
            CheckType::Condition => "condition",
            CheckType::Damage => "damage",
            CheckType::Initiative => "initiative",
            CheckType::Journey(_) => "journey",
            CheckType::Magic => "magic",
        }
    }

    /// Per-type defaults
    pub fn defaults(&self) -> CheckDefaults {
        use Ability::*;
        let (abilities, concentration, critical) = match self {
            CheckType::Accuracy => (None, true, false),
            CheckType::Check => (Some([Strength, Strength]), true, false),
            CheckType::Condition => (Some([Strength, Spirit]), false, false),
            CheckType::Damage => (None, false, true),
            CheckType::Initiative => (None, false, false),
            CheckType::Journey(JourneyKind::Camping) => (Some([Dexterity, Intelligence]), true, false),
            CheckType::Journey(JourneyKind::Direction) => {
                (Some([Intelligence, Intelligence]), true, false)
            }
            CheckType::Journey(JourneyKind::Travel) => (Some([Strength, Dexterity]), true, false),
            CheckType::Magic => (Some([Intelligence, Spirit]), true, false),
        };
        CheckDefaults {
            abilities,
            concentration_allowed: concentration,
            critical_allowed: critical,
            consume_mental: matches!(self, CheckType::Magic),
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckType::Journey(kind) => write!(f, "journey/{}", kind.id()),
            other => f.write_str(other.tag()),
        }
    }
}

/// Defaults a check type contributes before caller overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckDefaults {
    pub abilities: Option<[Ability; 2]>,
    pub concentration_allowed: bool,
    pub critical_allowed: bool,
    pub consume_mental: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationConfig {
    #[serde(default)]
    pub allowed: Option<bool>,
    /// Spend half the current mental points (rounded up) for +1
    #[serde(default)]
    pub consume_mental: bool,
    /// Spend one fumble point for +1
    #[serde(default)]
    pub consume_fumble_point: bool,
}

impl ConcentrationConfig {
    /// Bonus granted if concentration is allowed
    pub fn bonus(&self) -> i64 {
        if self.allowed != Some(true) {
            return 0;
        }
        self.consume_mental as i64 + self.consume_fumble_point as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalConfig {
    #[serde(default)]
    pub allowed: Option<bool>,
    /// Set when the triggering roll (e.g. accuracy) was a critical
    #[serde(default)]
    pub is_critical: bool,
}

impl CriticalConfig {
    pub fn doubles_dice(&self) -> bool {
        self.allowed == Some(true) && self.is_critical
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyConfig {
    /// Name of the weapon used
    #[serde(default)]
    pub weapon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    /// Store the result as the character's condition score
    #[serde(default = "default_true")]
    pub update_condition: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicConfig {
    #[serde(default)]
    pub spell: String,
    /// Mental point cost of the spell
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub consume_mental: Option<bool>,
    /// Damage the spell deals on success, rolled as a separate damage check
    #[serde(default)]
    pub damage: Option<SpellDamage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellDamage {
    pub formula: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeConfig {
    #[serde(default)]
    pub combatant_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOptions {
    /// Number to meet or beat, when the check has one
    #[serde(default)]
    pub target_number: Option<i64>,
}

/// Transient description of one check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRollConfig {
    #[serde(rename = "type")]
    pub check_type: String,
    #[serde(default)]
    pub abilities: Option<Vec<Ability>>,
    #[serde(default)]
    pub journey_id: Option<String>,
    #[serde(default)]
    pub situational_bonus: Option<i64>,
    #[serde(default)]
    pub modifier: Option<i64>,
    #[serde(default)]
    pub concentration: Option<ConcentrationConfig>,
    #[serde(default)]
    pub critical: Option<CriticalConfig>,
    #[serde(default)]
    pub accuracy: Option<AccuracyConfig>,
    #[serde(default)]
    pub condition: Option<ConditionConfig>,
    #[serde(default)]
    pub magic: Option<MagicConfig>,
    #[serde(default)]
    pub initiative: Option<InitiativeConfig>,
    /// Options forwarded into the damage configuration of a damage check
    #[serde(default)]
    pub damage: Option<DamageOptions>,
    /// Explicit formula; replaces the ability terms
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub roll_options: Option<RollOptions>,
}

impl CheckRollConfig {
    pub fn new(check_type: impl Into<String>) -> Self {
        CheckRollConfig {
            check_type: check_type.into(),
            ..Default::default()
        }
    }

    pub fn journey(kind: JourneyKind) -> Self {
        CheckRollConfig {
            journey_id: Some(kind.id().to_string()),
            ..CheckRollConfig::new("journey")
        }
    }

    pub fn with_abilities(mut self, abilities: &[Ability]) -> Self {
        self.abilities = Some(abilities.to_vec());
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn parsed_type(&self) -> RulesResult<CheckType> {
        CheckType::parse(&self.check_type, self.journey_id.as_deref())
    }

    pub fn critical_doubles_dice(&self) -> bool {
        self.critical.as_ref().is_some_and(|c| c.doubles_dice())
    }

    pub fn concentration_bonus(&self) -> i64 {
        self.concentration.as_ref().map_or(0, |c| c.bonus())
    }
}

/// Settings for the pre-roll dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDialogConfig {
    /// Show the dialog before rolling
    #[serde(default = "default_true")]
    pub configure: bool,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for CheckDialogConfig {
    fn default() -> Self {
        CheckDialogConfig {
            configure: true,
            title: None,
        }
    }
}

/// Settings for the chat message produced by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMessageConfig {
    #[serde(default = "default_true")]
    pub create: bool,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
}

impl Default for CheckMessageConfig {
    fn default() -> Self {
        CheckMessageConfig {
            create: true,
            speaker: None,
            flavor: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The three records built for one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfigs {
    pub roll: CheckRollConfig,
    pub dialog: CheckDialogConfig,
    pub message: CheckMessageConfig,
}

/// Adjusts built configs for a more specific rule set
pub trait ConfigHook {
    fn adjust(&self, configs: &mut CheckConfigs);
}

/// Builds check configs from caller input plus per-type defaults
#[derive(Default)]
pub struct CheckConfigBuilder<'a> {
    hook: Option<&'a dyn ConfigHook>,
}

impl<'a> CheckConfigBuilder<'a> {
    pub fn new() -> Self {
        CheckConfigBuilder { hook: None }
    }

    pub fn with_hook(hook: &'a dyn ConfigHook) -> Self {
        CheckConfigBuilder { hook: Some(hook) }
    }

    /// Clone the caller's records and fill in defaults; caller values win
    pub fn build(
        &self,
        roll: &CheckRollConfig,
        dialog: &CheckDialogConfig,
        message: &CheckMessageConfig,
    ) -> RulesResult<CheckConfigs> {
        let mut roll = roll.clone();
        let check_type = roll.parsed_type()?;
        let defaults = check_type.defaults();

        if roll.abilities.is_none() {
            roll.abilities = defaults.abilities.map(|pair| pair.to_vec());
        }

        let concentration = roll.concentration.get_or_insert_with(Default::default);
        concentration.allowed.get_or_insert(defaults.concentration_allowed);

        let critical = roll.critical.get_or_insert_with(Default::default);
        critical.allowed.get_or_insert(defaults.critical_allowed);

        if check_type == CheckType::Magic {
            let magic = roll.magic.get_or_insert_with(Default::default);
            magic.consume_mental.get_or_insert(defaults.consume_mental);
        }
        if check_type == CheckType::Condition && roll.condition.is_none() {
            roll.condition = Some(ConditionConfig {
                update_condition: true,
            });
        }

        if roll.formula.is_some() {
            roll.abilities = None;
        }

        match roll.abilities.as_deref() {
            Some(abilities) if abilities.is_empty() || abilities.len() > 2 => {
                return Err(RulesError::invalid(format!(
                    "{check_type} check needs one or two abilities, got {}",
                    abilities.len()
                )));
            }
            None if roll.formula.is_none() => {
                return Err(RulesError::invalid(format!(
                    "{check_type} check needs abilities or a formula"
                )));
            }
            _ => {}
        }

        let mut configs = CheckConfigs {
            roll,
            dialog: dialog.clone(),
            message: message.clone(),
        };

        if let Some(hook) = self.hook {
            hook.adjust(&mut configs);
        }

        tracing::debug!(check = %check_type, abilities = ?configs.roll.abilities, "built check config");
        Ok(configs)
    }
}
