//! CheckMessage - Outcome record of one resolved check

use super::config::CheckType;
use crate::damage::DamageConfiguration;
use crate::dice::EvaluatedRoll;
use serde::{Deserialize, Serialize};

/// Everything a host needs to show the result of a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMessage {
    // === Roll ===
    pub check_type: CheckType,
    /// Assembled `@`-reference formula
    pub formula: String,
    /// Resolved dice formula, e.g. `2d6 + 1`
    pub resolved: String,
    pub roll: EvaluatedRoll,
    pub total: i64,

    // === Outcome ===
    pub is_critical: bool,
    pub is_fumble: bool,
    #[serde(default)]
    pub target_number: Option<i64>,
    /// Set only when the check had a target number
    #[serde(default)]
    pub success: Option<bool>,
    /// Damage dealt, for damage checks
    #[serde(default)]
    pub damage: Option<DamageConfiguration>,

    // === Presentation ===
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
}

impl CheckMessage {
    /// A critical always succeeds and a fumble always fails
    pub fn judge(total: i64, target_number: i64, is_critical: bool, is_fumble: bool) -> bool {
        if is_fumble {
            false
        } else {
            is_critical || total >= target_number
        }
    }
}
