//! Compass direction derived from the stick offset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight compass points, or `C` when the stick rests inside both
/// threshold bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardinalDirection {
    #[default]
    C,
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalDirection {
    /// All directions, center first then clockwise from north.
    pub const ALL: [CardinalDirection; 9] = [
        Self::C,
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Short code as reported to consumers ("C", "N", "NE", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }

    /// Classify an offset from the surface center.
    ///
    /// `horizontal` and `vertical` are `stick - center` in surface
    /// coordinates (y grows downward). The vertical band is resolved first,
    /// then the horizontal band either replaces a centered result or is
    /// appended to the vertical letter.
    pub fn classify(horizontal: f64, vertical: f64, horizontal_limit: f64, vertical_limit: f64) -> Self {
        let vertical_part = if vertical < -vertical_limit {
            Self::N
        } else if vertical > vertical_limit {
            Self::S
        } else {
            Self::C
        };

        if horizontal < -horizontal_limit {
            match vertical_part {
                Self::N => Self::NW,
                Self::S => Self::SW,
                _ => Self::W,
            }
        } else if horizontal > horizontal_limit {
            match vertical_part {
                Self::N => Self::NE,
                Self::S => Self::SE,
                _ => Self::E,
            }
        } else {
            vertical_part
        }
    }

    /// Whether the stick is outside both dead bands.
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cardinal direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for CardinalDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
