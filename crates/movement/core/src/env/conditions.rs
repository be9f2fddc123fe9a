//! Weather, visibility and gravity of the current match.

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Fog {
    #[default]
    None,
    Light,
    Heavy,
}

impl Fog {
    pub const fn movement_penalty(self) -> u32 {
        match self {
            Fog::Heavy => 1,
            Fog::None | Fog::Light => 0,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Light {
    #[default]
    Day,
    Dusk,
    FullMoon,
    Glare,
    Moonless,
    SolarFlare,
    PitchBlack,
}

impl Light {
    pub const fn movement_penalty(self) -> u32 {
        match self {
            Light::Moonless => 1,
            Light::PitchBlack => 2,
            Light::Day | Light::Dusk | Light::FullMoon | Light::Glare | Light::SolarFlare => 0,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Weather {
    #[default]
    Clear,
    LightRain,
    HeavyRain,
    LightSnow,
    HeavySnow,
    Sleet,
    IceStorm,
    Blizzard,
}

impl Weather {
    pub const fn movement_penalty(self) -> u32 {
        match self {
            Weather::HeavySnow | Weather::IceStorm | Weather::Blizzard => 1,
            Weather::Clear
            | Weather::LightRain
            | Weather::HeavyRain
            | Weather::LightSnow
            | Weather::Sleet => 0,
        }
    }
}

/// Planetary conditions shared by every unit on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Conditions {
    pub fog: Fog,
    pub light: Light,
    pub weather: Weather,
    /// Gravity in hundredths of standard (100 = 1g).
    pub gravity_centi: u32,
    /// Paved surfaces are covered in black ice.
    pub black_ice: bool,
}

impl Conditions {
    pub const STANDARD_GRAVITY: u32 = 100;

    pub fn new() -> Self {
        Self {
            fog: Fog::None,
            light: Light::Day,
            weather: Weather::Clear,
            gravity_centi: Self::STANDARD_GRAVITY,
            black_ice: false,
        }
    }

    pub fn is_low_gravity(&self) -> bool {
        self.gravity_centi < Self::STANDARD_GRAVITY
    }

    /// Scales a nominal budget by gravity, rounding down.
    pub fn scale_by_gravity(&self, points: u32) -> u32 {
        if self.gravity_centi == 0 || self.gravity_centi == Self::STANDARD_GRAVITY {
            return points;
        }
        points * Self::STANDARD_GRAVITY / self.gravity_centi
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_scales_budgets_down_in_heavy_gravity() {
        let heavy = Conditions {
            gravity_centi: 150,
            ..Conditions::new()
        };
        assert_eq!(heavy.scale_by_gravity(5), 3);

        let light = Conditions {
            gravity_centi: 50,
            ..Conditions::new()
        };
        assert_eq!(light.scale_by_gravity(5), 10);
        assert!(light.is_low_gravity());
    }
}
