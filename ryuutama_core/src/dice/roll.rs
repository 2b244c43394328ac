//! Roll - a resolved formula and, once rolled, its results

use super::evaluator::DiceEvaluator;
use super::{format_terms, Term};
use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};

/// Results of one dice term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResults {
    pub faces: u32,
    pub results: Vec<u32>,
}

/// Output of the host dice primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedRoll {
    pub dice: Vec<DieResults>,
    pub total: i64,
}

impl EvaluatedRoll {
    fn all_results(&self, pred: impl Fn(&DieResults, u32) -> bool) -> bool {
        let mut any = false;
        for die in &self.dice {
            for &result in &die.results {
                if !pred(die, result) {
                    return false;
                }
                any = true;
            }
        }
        any
    }

    /// Every die shows 1
    pub fn is_fumble(&self) -> bool {
        self.all_results(|_, r| r == 1)
    }

    /// Every die shows 6, or every die shows its highest face
    pub fn is_critical(&self) -> bool {
        self.all_results(|_, r| r == 6)
            || self.all_results(|die, r| die.faces > 0 && r == die.faces)
    }
}

/// A roll before and after evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub terms: Vec<Term>,
    #[serde(default)]
    pub evaluated: Option<EvaluatedRoll>,
}

impl Roll {
    pub fn new(terms: Vec<Term>) -> Self {
        Roll {
            terms,
            evaluated: None,
        }
    }

    pub fn formula(&self) -> String {
        format_terms(&self.terms)
    }

    /// Roll the dice; evaluating twice keeps the first result
    pub fn evaluate(&mut self, evaluator: &mut dyn DiceEvaluator) -> &EvaluatedRoll {
        let terms = &self.terms;
        self.evaluated.get_or_insert_with(|| evaluator.evaluate(terms))
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated.is_some()
    }

    fn results(&self) -> RulesResult<&EvaluatedRoll> {
        self.evaluated.as_ref().ok_or(RulesError::NotEvaluated)
    }

    pub fn total(&self) -> RulesResult<i64> {
        Ok(self.results()?.total)
    }

    pub fn is_fumble(&self) -> RulesResult<bool> {
        Ok(self.results()?.is_fumble())
    }

    pub fn is_critical(&self) -> RulesResult<bool> {
        Ok(self.results()?.is_critical())
    }
}
