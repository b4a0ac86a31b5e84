//! Growth-stage classification of a measured stem

use crate::constants::{BIG_TREE_MIN_DIAMETER_CM, BREAST_HEIGHT_M};
use crate::core_types::units::{Centimeters, Meters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Growth stage derived from diameter and height
///
/// Serialized with the tokens used by the survey spreadsheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    /// Below breast height and under the big-tree diameter (seedling)
    #[serde(rename = "Baby_tree")]
    Baby,
    /// At or above breast height but under the big-tree diameter (sapling)
    #[serde(rename = "Young_tree")]
    Young,
    /// Diameter at or above 4.5 cm
    #[serde(rename = "Big_tree")]
    Big,
    /// Not classifiable (NaN diameter)
    #[serde(rename = "-")]
    None,
}

impl SizeClass {
    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Baby => "Baby_tree",
            SizeClass::Young => "Young_tree",
            SizeClass::Big => "Big_tree",
            SizeClass::None => "-",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a stem. Diameter decides `Big` before height is consulted.
pub fn classify(diameter: Centimeters, height: Meters) -> SizeClass {
    let d = *diameter;
    let h = *height;
    if d >= BIG_TREE_MIN_DIAMETER_CM {
        SizeClass::Big
    } else if d < BIG_TREE_MIN_DIAMETER_CM && h < BREAST_HEIGHT_M {
        SizeClass::Baby
    } else if d < BIG_TREE_MIN_DIAMETER_CM {
        SizeClass::Young
    } else {
        SizeClass::None
    }
}
