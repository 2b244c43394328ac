//! AbilityScore - stored die value plus transient shifts

use super::ladder::resolve_die_size;
use crate::types::Ability;
use serde::{Deserialize, Serialize};

/// One die-based stat
///
/// `value` is the stored base die. `increases` and `decreases` are rebuilt on
/// every data preparation pass from effects and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub value: u32,
    #[serde(skip)]
    pub increases: u32,
    #[serde(skip)]
    pub decreases: u32,
}

impl Default for AbilityScore {
    fn default() -> Self {
        AbilityScore::new(4)
    }
}

impl AbilityScore {
    pub fn new(value: u32) -> Self {
        AbilityScore {
            value,
            increases: 0,
            decreases: 0,
        }
    }

    /// Net ladder steps from increases and decreases
    pub fn net_shift(&self) -> i32 {
        self.increases as i32 - self.decreases as i32
    }

    /// Effective die size for an owner with the given floor
    pub fn die(&self, floor: u32) -> u32 {
        resolve_die_size(self.value, self.net_shift(), floor)
    }

    /// Drop transient shifts before a new preparation pass
    pub fn reset_shifts(&mut self) {
        self.increases = 0;
        self.decreases = 0;
    }
}

/// The four ability scores of a creature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub strength: AbilityScore,
    pub dexterity: AbilityScore,
    pub intelligence: AbilityScore,
    pub spirit: AbilityScore,
}

impl Abilities {
    pub fn new(strength: u32, dexterity: u32, intelligence: u32, spirit: u32) -> Self {
        Abilities {
            strength: AbilityScore::new(strength),
            dexterity: AbilityScore::new(dexterity),
            intelligence: AbilityScore::new(intelligence),
            spirit: AbilityScore::new(spirit),
        }
    }

    pub fn get(&self, ability: Ability) -> &AbilityScore {
        match ability {
            Ability::Strength => &self.strength,
            Ability::Dexterity => &self.dexterity,
            Ability::Intelligence => &self.intelligence,
            Ability::Spirit => &self.spirit,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Spirit => &mut self.spirit,
        }
    }

    pub fn reset_shifts(&mut self) {
        for ability in Ability::all() {
            self.get_mut(*ability).reset_shifts();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_die_with_shifts() {
        let mut score = AbilityScore::new(6);
        score.increases = 2;
        score.decreases = 1;
        assert_eq!(score.net_shift(), 1);
        assert_eq!(score.die(4), 8);
    }

    #[test]
    fn test_character_floor() {
        let mut score = AbilityScore::new(4);
        score.decreases = 3;
        assert_eq!(score.die(4), 4);
        assert_eq!(score.die(2), 2);
    }

    #[test]
    fn test_shifts_not_serialized() {
        let mut score = AbilityScore::new(8);
        score.decreases = 2;
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, r#"{"value":8}"#);
    }

    #[test]
    fn test_reset_shifts() {
        let mut abilities = Abilities::new(4, 6, 8, 10);
        abilities.get_mut(Ability::Spirit).increases = 1;
        abilities.reset_shifts();
        assert_eq!(abilities.spirit.net_shift(), 0);
        assert_eq!(abilities.get(Ability::Intelligence).value, 8);
    }
}
