//! Roll formula assembly - turn a check config into an `@`-reference formula
//! and resolve that formula into dice terms

use super::config::CheckRollConfig;
use crate::dice::{Roll, Term, MAX_DICE};
use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value an `@` reference can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollValue {
    /// One die of this many faces
    Die(u32),
    Number(i64),
}

/// Reference context for a formula (`stats.strength`, `modifier`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollData {
    values: BTreeMap<String, RollValue>,
}

impl RollData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RollValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RollValue> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RollValue)> {
        self.values.iter()
    }
}

/// An assembled formula with the data its references point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollFormula {
    pub formula: String,
    pub roll_data: RollData,
    /// Dice counts are doubled when resolved
    pub critical: bool,
}

/// Build the formula for a check
///
/// Ability terms come first unless an explicit formula replaces them, then
/// `@modifier`, `@situationalBonus` and `@rationPenalty`, each only when
/// non-zero. Concentration bonuses fold into `@modifier`.
pub fn assemble(config: &CheckRollConfig, actor_data: &RollData) -> RulesResult<RollFormula> {
    let mut roll_data = actor_data.clone();
    let mut terms: Vec<String> = Vec::new();

    match (&config.formula, &config.abilities) {
        (Some(formula), _) => terms.push(formula.trim().to_string()),
        (None, Some(abilities)) => {
            terms.extend(abilities.iter().map(|a| format!("@stats.{}", a.key())))
        }
        (None, None) => {
            return Err(RulesError::invalid(format!(
                "{} check has neither abilities nor a formula",
                config.check_type
            )))
        }
    }

    let modifier = config.modifier.unwrap_or(0) + config.concentration_bonus();
    if modifier != 0 {
        roll_data.insert("modifier", RollValue::Number(modifier));
        terms.push("@modifier".to_string());
    }

    let situational = config.situational_bonus.unwrap_or(0);
    if situational != 0 {
        roll_data.insert("situationalBonus", RollValue::Number(situational));
        terms.push("@situationalBonus".to_string());
    }

    if let Some(RollValue::Number(penalty)) = actor_data.get("rationPenalty") {
        if *penalty != 0 {
            terms.push("@rationPenalty".to_string());
        }
    }

    let formula = terms
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" + ");

    Ok(RollFormula {
        formula,
        roll_data,
        critical: config.critical_doubles_dice(),
    })
}

impl RollFormula {
    /// Resolve references and parse into terms, applying the critical factor
    pub fn terms(&self) -> RulesResult<Vec<Term>> {
        let factor = if self.critical { 2 } else { 1 };
        split_signed(&self.formula)?
            .into_iter()
            .map(|(negative, token)| self.resolve_token(negative, token))
            .map(|term| term.and_then(|t| t.alter(factor)))
            .collect()
    }

    /// An unevaluated roll of this formula
    pub fn to_roll(&self) -> RulesResult<Roll> {
        Ok(Roll::new(self.terms()?))
    }

    fn resolve_token(&self, negative: bool, token: &str) -> RulesResult<Term> {
        let term = match token.strip_prefix('@') {
            Some(key) => match self.roll_data.get(key) {
                Some(RollValue::Die(faces)) => Term::dice(1, *faces),
                Some(RollValue::Number(n)) => Term::constant(*n),
                None => {
                    return Err(RulesError::invalid(format!("unknown roll reference '@{key}'")))
                }
            },
            None => parse_literal(token)?,
        };

        match term {
            Term::Constant { value } if negative => Ok(Term::constant(-value)),
            Term::Dice { .. } if negative => Err(RulesError::invalid(format!(
                "cannot subtract dice '{token}' in '{}'",
                self.formula
            ))),
            term => Ok(term),
        }
    }
}

/// Split `a + b - c` into signed tokens
fn split_signed(formula: &str) -> RulesResult<Vec<(bool, &str)>> {
    let mut tokens = Vec::new();
    let mut negative = false;
    let mut start = 0;

    for (i, c) in formula.char_indices() {
        if c == '+' || c == '-' {
            let token = formula[start..i].trim();
            if !token.is_empty() {
                tokens.push((negative, token));
                negative = c == '-';
            } else if c == '-' {
                negative = !negative;
            }
            start = i + 1;
        }
    }
    let last = formula[start..].trim();
    if last.is_empty() {
        return Err(RulesError::invalid(format!("incomplete formula '{formula}'")));
    }
    tokens.push((negative, last));
    Ok(tokens)
}

/// `NdM`, `dM` or an integer
fn parse_literal(token: &str) -> RulesResult<Term> {
    let bad = || RulesError::invalid(format!("cannot parse formula term '{token}'"));

    if let Some((count, faces)) = token.split_once(['d', 'D']) {
        let count = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| bad())?
        };
        let faces = faces.parse().map_err(|_| bad())?;
        if count > MAX_DICE || faces == 0 {
            return Err(bad());
        }
        return Ok(Term::dice(count, faces));
    }
    token.parse().map(Term::constant).map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::config::{CheckConfigBuilder, CheckDialogConfig, CheckMessageConfig, CriticalConfig};
    use crate::types::Ability;

    fn actor_data() -> RollData {
        let mut data = RollData::new();
        data.insert("stats.strength", RollValue::Die(6));
        data.insert("stats.dexterity", RollValue::Die(8));
        data.insert("rationPenalty", RollValue::Number(0));
        data
    }

    fn built(roll: CheckRollConfig) -> CheckRollConfig {
        CheckConfigBuilder::new()
            .build(&roll, &CheckDialogConfig::default(), &CheckMessageConfig::default())
            .unwrap()
            .roll
    }

    #[test]
    fn test_plain_check_has_only_ability_terms() {
        let roll = built(CheckRollConfig::new("check"));
        let formula = assemble(&roll, &actor_data()).unwrap();
        assert_eq!(formula.formula, "@stats.strength + @stats.strength");
        assert!(!formula.critical);
        assert_eq!(formula.terms().unwrap(), vec![Term::dice(1, 6), Term::dice(1, 6)]);
    }

    #[test]
    fn test_modifier_terms_in_order() {
        let mut roll = CheckRollConfig::new("check").with_abilities(&[Ability::Dexterity]);
        roll.situational_bonus = Some(2);
        roll.modifier = Some(-1);
        let mut data = actor_data();
        data.insert("rationPenalty", RollValue::Number(-2));

        let formula = assemble(&built(roll), &data).unwrap();
        assert_eq!(
            formula.formula,
            "@stats.dexterity + @modifier + @situationalBonus + @rationPenalty"
        );
        assert_eq!(
            formula.terms().unwrap(),
            vec![Term::dice(1, 8), Term::constant(-1), Term::constant(2), Term::constant(-2)]
        );
    }

    #[test]
    fn test_concentration_folds_into_modifier() {
        let mut roll = CheckRollConfig::new("check");
        roll.concentration = Some(crate::check::config::ConcentrationConfig {
            allowed: None,
            consume_mental: true,
            consume_fumble_point: true,
        });
        let formula = assemble(&built(roll), &actor_data()).unwrap();
        assert_eq!(formula.roll_data.get("modifier"), Some(&RollValue::Number(2)));
    }

    #[test]
    fn test_explicit_formula_first() {
        let mut roll = CheckRollConfig::new("damage").with_formula("2d6 + 1");
        roll.modifier = Some(3);
        let formula = assemble(&built(roll), &actor_data()).unwrap();
        assert_eq!(formula.formula, "2d6 + 1 + @modifier");
        let total: i64 = formula
            .terms()
            .unwrap()
            .iter()
            .map(|t| match t {
                Term::Constant { value } => *value,
                Term::Dice { .. } => 0,
            })
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_critical_doubles_dice_not_bonuses() {
        let mut roll = CheckRollConfig::new("damage").with_abilities(&[Ability::Strength]);
        roll.modifier = Some(2);
        roll.critical = Some(CriticalConfig {
            allowed: None,
            is_critical: true,
        });
        let formula = assemble(&built(roll), &actor_data()).unwrap();
        assert!(formula.critical);
        assert_eq!(formula.terms().unwrap(), vec![Term::dice(2, 6), Term::constant(2)]);
    }

    #[test]
    fn test_critical_ignored_when_not_allowed() {
        let mut roll = CheckRollConfig::new("check");
        roll.critical = Some(CriticalConfig {
            allowed: None,
            is_critical: true,
        });
        let formula = assemble(&built(roll), &actor_data()).unwrap();
        assert!(!formula.critical);
    }

    #[test]
    fn test_bad_formulas() {
        let data = actor_data();
        let resolve = |f: &str| {
            RollFormula {
                formula: f.to_string(),
                roll_data: data.clone(),
                critical: false,
            }
            .terms()
        };
        assert!(resolve("@stats.spirit").is_err());
        assert!(resolve("1d6 - 1d4").is_err());
        assert!(resolve("1d6 +").is_err());
        assert!(resolve("fireball").is_err());
        assert_eq!(resolve("d8 - -2").unwrap(), vec![Term::dice(1, 8), Term::constant(2)]);
        assert_eq!(resolve("-3").unwrap(), vec![Term::constant(-3)]);
        assert!(resolve("1d0").is_err());
        assert!(resolve("1001d6").is_err());
        assert_eq!(resolve("1000d6").unwrap(), vec![Term::dice(1000, 6)]);
    }

    #[test]
    fn test_critical_huge_dice_count_is_rejected() {
        let formula = RollFormula {
            formula: "3000000000d6".to_string(),
            roll_data: RollData::new(),
            critical: true,
        };
        assert!(matches!(formula.terms(), Err(RulesError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_to_roll() {
        let roll = built(CheckRollConfig::new("check"));
        let formula = assemble(&roll, &actor_data()).unwrap();
        let roll = formula.to_roll().unwrap();
        assert!(!roll.is_evaluated());
        assert_eq!(roll.formula(), "1d6 + 1d6");
    }
}
