//! Fixed conversion factors and thresholds shared by every equation family.

/// Fraction of dry biomass that is carbon (IPCC default for wood).
pub const CARBON_FRACTION: f64 = 0.47;

/// Molecular weight ratio of CO2 to carbon (44/12, as tabulated in field guides).
pub const CO2_PER_CARBON: f64 = 3.66;

/// Stems at or above this diameter are classed as big trees (cm).
pub const BIG_TREE_MIN_DIAMETER_CM: f64 = 4.5;

/// Breast height; shorter small stems are seedlings (m).
pub const BREAST_HEIGHT_M: f64 = 1.30;

/// Stand-structure ratios are reported as percentages.
pub(crate) const PERCENT_SCALE: f64 = 100.0;
