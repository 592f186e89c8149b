use crate::errors::SizingError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The trailing edge flap styles the sizing method has coefficients for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlapType {
    /// A simple hinged flap without a slot.
    Plain,

    /// A single slotted flap rotating about a hinge below the wing.
    Slotted,

    /// A sliding flap which moves aft and down as it deflects, opening a slot and adding area.
    Fowler,
}

impl FlapType {
    pub fn name(&self) -> &'static str {
        match self {
            FlapType::Plain => "Plain",
            FlapType::Slotted => "Slotted",
            FlapType::Fowler => "Fowler",
        }
    }

    /// The intercept and slope of the linear fit of the three dimensional flap effectiveness
    /// factor against the flap chord fraction.
    pub fn efficiency_coefficients(&self) -> (f64, f64) {
        match self {
            FlapType::Plain => (0.95, 0.25),
            FlapType::Slotted => (1.0, 0.2),
            FlapType::Fowler => (1.0, 0.15),
        }
    }
}

impl Display for FlapType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FlapType {
    type Err = SizingError;

    /// Parse a flap type name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(FlapType::Plain),
            "slotted" => Ok(FlapType::Slotted),
            "fowler" => Ok(FlapType::Fowler),
            _ => Err(SizingError::UnknownFlapType(s.to_string())),
        }
    }
}
