//! Dice terms, evaluation and outcome classification

mod evaluator;
mod roll;

pub use evaluator::{DiceEvaluator, RandomEvaluator};
pub use roll::{DieResults, EvaluatedRoll, Roll};

use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest dice count a single term may carry
pub const MAX_DICE: u32 = 1000;

/// One additive term of a resolved formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Dice { count: u32, faces: u32 },
    Constant { value: i64 },
}

impl Term {
    pub fn dice(count: u32, faces: u32) -> Self {
        Term::Dice { count, faces }
    }

    pub fn constant(value: i64) -> Self {
        Term::Constant { value }
    }

    /// Multiply the dice count, leaving constants alone
    pub fn alter(self, factor: u32) -> RulesResult<Self> {
        match self {
            Term::Dice { count, faces } => count
                .checked_mul(factor)
                .map(|count| Term::Dice { count, faces })
                .ok_or_else(|| RulesError::invalid(format!("cannot multiply {count}d{faces} by {factor}"))),
            constant => Ok(constant),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Dice { count, faces } => write!(f, "{count}d{faces}"),
            Term::Constant { value } => write!(f, "{value}"),
        }
    }
}

/// Render terms as a formula, folding negative constants into subtraction
pub fn format_terms(terms: &[Term]) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        match term {
            Term::Constant { value } if *value < 0 && i > 0 => {
                out.push_str(&format!(" - {}", value.unsigned_abs()));
            }
            _ if i > 0 => out.push_str(&format!(" + {term}")),
            _ => out.push_str(&term.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_doubles_dice_only() {
        assert_eq!(Term::dice(1, 8).alter(2).unwrap(), Term::dice(2, 8));
        assert_eq!(Term::constant(3).alter(2).unwrap(), Term::constant(3));
    }

    #[test]
    fn test_alter_overflow_is_an_error() {
        let err = Term::dice(3_000_000_000, 6).alter(2).unwrap_err();
        assert!(matches!(err, RulesError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_format_terms() {
        let terms = [Term::dice(1, 6), Term::dice(2, 8), Term::constant(-2), Term::constant(1)];
        assert_eq!(format_terms(&terms), "1d6 + 2d8 - 2 + 1");
    }
}
