//! Biomass to carbon conversion

use crate::constants::CARBON_FRACTION;
use crate::core_types::units::Kilograms;

/// Carbon mass `C_n` held in a stem of the given dry biomass
///
/// The same fraction applies to every taxon.
#[inline]
pub fn to_carbon(biomass: Kilograms) -> Kilograms {
    biomass * CARBON_FRACTION
}
