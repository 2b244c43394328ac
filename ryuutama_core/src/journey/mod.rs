//! Journey settings - terrain, weather and the target numbers they set

mod settings;

pub use settings::{SettingPersister, SettingStore, User, UserRole};

use serde::{Deserialize, Serialize};

/// Terrain being travelled through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Grassland,
    Wasteland,
    Woods,
    Highlands,
    RockyTerrain,
    DeepForest,
    Swamp,
    Mountain,
    Desert,
    Jungle,
    AlpineRange,
}

impl Terrain {
    /// Terrain level, 1 (easy) to 5 (harsh)
    pub fn level(&self) -> u32 {
        match self {
            Terrain::Grassland | Terrain::Wasteland => 1,
            Terrain::Woods | Terrain::Highlands | Terrain::RockyTerrain => 2,
            Terrain::DeepForest | Terrain::Swamp | Terrain::Mountain => 3,
            Terrain::Desert | Terrain::Jungle => 4,
            Terrain::AlpineRange => 5,
        }
    }

    /// Base target number for journey checks
    pub fn target_number(&self) -> i64 {
        4 + 2 * self.level() as i64
    }
}

/// Weather during the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Rain,
    StrongWind,
    Fog,
    Hot,
    Cold,
    HardRain,
    Snow,
    DeepFog,
    Darkness,
    Hurricane,
    Blizzard,
}

impl Weather {
    /// Added to the terrain target number
    pub fn modifier(&self) -> i64 {
        match self {
            Weather::Rain | Weather::StrongWind | Weather::Fog | Weather::Hot | Weather::Cold => 1,
            Weather::HardRain | Weather::Snow | Weather::DeepFog | Weather::Darkness => 3,
            Weather::Hurricane | Weather::Blizzard => 5,
        }
    }
}

/// A terrain or weather a traveller is at home in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Habitat {
    Terrain(Terrain),
    Weather(Weather),
}

/// Shared journey state for the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySettings {
    pub terrain: Terrain,
    #[serde(default)]
    pub weather: Option<Weather>,
}

impl JourneySettings {
    /// Target number for travel and direction checks
    pub fn target_number(&self) -> i64 {
        self.terrain.target_number() + self.weather.map_or(0, |w| w.modifier())
    }

    /// Target number for a traveller; a habitat specialty knocks 2 off
    pub fn target_number_for(&self, specialties: &[Habitat]) -> i64 {
        let at_home = specialties.iter().any(|h| match h {
            Habitat::Terrain(t) => *t == self.terrain,
            Habitat::Weather(w) => Some(*w) == self.weather,
        });
        if at_home {
            self.target_number() - 2
        } else {
            self.target_number()
        }
    }
}
