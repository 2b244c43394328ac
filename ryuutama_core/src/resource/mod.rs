//! Resource ledgers - stamina and mental pools with spent tracking

use serde::{Deserialize, Serialize};

/// Bonus to a resource maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBonuses {
    /// Flat bonus
    #[serde(default)]
    pub flat: Option<i64>,
    /// Bonus per character level
    #[serde(default)]
    pub level: Option<i64>,
}

impl ResourceBonuses {
    /// Combined bonus at a character level
    pub fn total(&self, level: i64) -> i64 {
        self.flat.unwrap_or(0) + self.level.unwrap_or(0) * level
    }
}

/// How a ledger treats spending past its maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Spent is capped at max
    Clamped,
    /// Value may go below zero; the percentage then measures how far,
    /// relative to `scale`
    Negative { scale: i64 },
}

/// Stored part of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub bonuses: ResourceBonuses,
    /// Fixed maximum replacing the ability-derived one (monsters)
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub spent: i64,
}

/// Derived part of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub max: i64,
    pub value: i64,
    pub spent: i64,
    /// Remaining percentage, or overflow severity when `negative`
    pub pct: u32,
    pub negative: bool,
}

/// Recompute a resource's derived values
pub fn recompute(
    source_max: i64,
    bonuses: &ResourceBonuses,
    level: i64,
    spent: i64,
    overflow: Overflow,
) -> ResourceState {
    let max = source_max + bonuses.total(level);
    let spent = match overflow {
        Overflow::Clamped => spent.min(max).max(0),
        Overflow::Negative { .. } => spent.max(0),
    };
    let value = max - spent;

    match overflow {
        Overflow::Negative { scale } if value < 0 => ResourceState {
            max,
            value,
            spent,
            pct: percent(value.abs(), scale),
            negative: true,
        },
        _ => ResourceState {
            max,
            value,
            spent,
            pct: percent(value, max),
            negative: false,
        },
    }
}

fn percent(part: i64, whole: i64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round().clamp(0.0, 100.0) as u32
}

/// A resource with its stored and derived halves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    #[serde(flatten)]
    pub data: ResourceData,
    #[serde(skip)]
    pub state: ResourceState,
}

impl ResourceLedger {
    pub fn new(data: ResourceData) -> Self {
        ResourceLedger {
            data,
            state: ResourceState::default(),
        }
    }

    /// Rebuild derived values; a stored `max` replaces `source_max`
    pub fn recompute(&mut self, source_max: i64, level: i64, overflow: Overflow) -> ResourceState {
        let source = self.data.max.unwrap_or(source_max);
        self.state = recompute(source, &self.data.bonuses, level, self.data.spent, overflow);
        self.state
    }

    /// Current value
    pub fn value(&self) -> i64 {
        self.state.value
    }

    pub fn max(&self) -> i64 {
        self.state.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonuses(flat: i64, level: i64) -> ResourceBonuses {
        ResourceBonuses {
            flat: Some(flat),
            level: Some(level),
        }
    }

    #[test]
    fn test_max_with_bonuses() {
        let state = recompute(8, &bonuses(2, 1), 3, 0, Overflow::Clamped);
        assert_eq!(state.max, 13);
        assert_eq!(state.value, 13);
        assert_eq!(state.pct, 100);
    }

    #[test]
    fn test_missing_bonuses_count_as_zero() {
        let state = recompute(8, &ResourceBonuses::default(), 5, 2, Overflow::Clamped);
        assert_eq!(state.max, 8);
        assert_eq!(state.value, 6);
        assert_eq!(state.pct, 75);
    }

    #[test]
    fn test_clamped_spent_never_exceeds_max() {
        let state = recompute(8, &ResourceBonuses::default(), 1, 20, Overflow::Clamped);
        assert_eq!(state.spent, 8);
        assert_eq!(state.value, 0);
        assert!(!state.negative);
    }

    #[test]
    fn test_negative_overflow() {
        let state = recompute(8, &ResourceBonuses::default(), 1, 11, Overflow::Negative { scale: 6 });
        assert_eq!(state.value, -3);
        assert!(state.negative);
        // 3 / 6 of the condition scale
        assert_eq!(state.pct, 50);
    }

    #[test]
    fn test_negative_overflow_caps_at_hundred() {
        let state = recompute(4, &ResourceBonuses::default(), 1, 20, Overflow::Negative { scale: 4 });
        assert_eq!(state.pct, 100);
    }

    #[test]
    fn test_zero_max_is_zero_percent() {
        let state = recompute(0, &ResourceBonuses::default(), 1, 0, Overflow::Clamped);
        assert_eq!(state.pct, 0);
        let state = recompute(0, &ResourceBonuses::default(), 1, 3, Overflow::Negative { scale: 0 });
        assert!(state.negative);
        assert_eq!(state.pct, 0);
    }

    #[test]
    fn test_healing_below_zero_spent_clamps() {
        let state = recompute(8, &ResourceBonuses::default(), 1, -4, Overflow::Clamped);
        assert_eq!(state.spent, 0);
        assert_eq!(state.value, 8);
    }

    #[test]
    fn test_ledger_stored_max_overrides_source() {
        let mut ledger = ResourceLedger::new(ResourceData {
            max: Some(30),
            spent: 5,
            ..Default::default()
        });
        ledger.recompute(8, 1, Overflow::Clamped);
        assert_eq!(ledger.max(), 30);
        assert_eq!(ledger.value(), 25);
    }
}
