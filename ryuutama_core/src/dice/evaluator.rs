//! DiceEvaluator - rolls resolved terms

use super::roll::{DieResults, EvaluatedRoll};
use super::Term;
use rand::Rng;

/// Host dice primitive: turns resolved terms into per-die results
pub trait DiceEvaluator {
    fn evaluate(&mut self, terms: &[Term]) -> EvaluatedRoll;
}

/// Evaluator backed by an RNG
pub struct RandomEvaluator<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomEvaluator<R> {
    pub fn new(rng: R) -> Self {
        RandomEvaluator { rng }
    }
}

impl RandomEvaluator<rand::rngs::ThreadRng> {
    /// Evaluator using the thread-local RNG
    pub fn thread() -> Self {
        RandomEvaluator::new(rand::thread_rng())
    }
}

impl<R: Rng> DiceEvaluator for RandomEvaluator<R> {
    fn evaluate(&mut self, terms: &[Term]) -> EvaluatedRoll {
        let mut dice = Vec::new();
        let mut total = 0;

        for term in terms {
            match *term {
                Term::Dice { count, faces } => {
                    let results: Vec<u32> = (0..count)
                        .map(|_| {
                            if faces == 0 {
                                0
                            } else {
                                self.rng.gen_range(1..=faces)
                            }
                        })
                        .collect();
                    total += results.iter().map(|&r| r as i64).sum::<i64>();
                    dice.push(DieResults { faces, results });
                }
                Term::Constant { value } => total += value,
            }
        }

        EvaluatedRoll { dice, total }
    }
}
