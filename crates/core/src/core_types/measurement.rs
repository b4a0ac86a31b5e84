//! Field measurements and stand-structure inputs

use super::taxonomy::TaxonSelection;
use super::units::{Centimeters, Meters, Percent};
use crate::constants::PERCENT_SCALE;
use serde::{Deserialize, Serialize};

/// One measured stem as submitted by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Stem diameter (circumference on the Thai field sheet) at 1.30 m
    #[serde(rename = "diameter_cm")]
    pub diameter: Centimeters,
    /// Total stem height
    #[serde(rename = "height_m")]
    pub height: Meters,
    #[serde(flatten)]
    pub taxon: TaxonSelection,
}

impl Measurement {
    pub fn new(diameter: Centimeters, height: Meters, taxon: TaxonSelection) -> Self {
        Self {
            diameter,
            height,
            taxon,
        }
    }
}

/// Plot tallies used for the relative frequency, dominance and plant-density
/// ratios.
///
/// Field names follow the survey form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicesInput {
    /// Plots in which the species occurs
    pub plot_tree_species: f64,
    /// Plots surveyed
    pub plots: f64,
    /// Basal (cross-sectional) area of the species
    pub cross_tree_specie: f64,
    /// Basal area of all stems
    pub cross: f64,
    /// Plants of the species counted
    pub plant_species: f64,
    /// Area surveyed
    pub area: f64,
}

/// Stand-structure ratios derived from [`IndicesInput`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StandIndices {
    /// Relative frequency
    pub rf: Percent,
    /// Relative dominance
    pub rdo: Percent,
    /// Plant density ratio
    pub rp: Percent,
}

impl StandIndices {
    /// Derive the three ratios. A zero denominator yields a zero ratio.
    pub fn from_input(input: &IndicesInput) -> Self {
        Self {
            rf: ratio_percent(input.plot_tree_species, input.plots),
            rdo: ratio_percent(input.cross_tree_specie, input.cross),
            rp: ratio_percent(input.plant_species, input.area),
        }
    }
}

impl From<&IndicesInput> for StandIndices {
    fn from(input: &IndicesInput) -> Self {
        Self::from_input(input)
    }
}

/// `numerator / denominator * 100`, or 0 when the denominator is not positive
fn ratio_percent(numerator: f64, denominator: f64) -> Percent {
    if denominator > 0.0 {
        Percent::new(numerator / denominator * PERCENT_SCALE)
    } else {
        Percent::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::taxonomy::{BambooType, Category};
    use approx::assert_relative_eq;

    #[test]
    fn test_ratios_scale_to_percent() {
        let input = IndicesInput {
            plot_tree_species: 3.0,
            plots: 12.0,
            cross_tree_specie: 0.8,
            cross: 3.2,
            plant_species: 15.0,
            area: 400.0,
        };
        let indices = StandIndices::from_input(&input);
        assert_relative_eq!(*indices.rf, 25.0, epsilon = 1e-12);
        assert_relative_eq!(*indices.rdo, 25.0, epsilon = 1e-12);
        assert_relative_eq!(*indices.rp, 3.75, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_denominator_gives_zero_ratio() {
        let input = IndicesInput {
            plot_tree_species: 7.0,
            plots: 0.0,
            cross_tree_specie: 1.0e6,
            cross: 0.0,
            plant_species: 42.0,
            area: 0.0,
        };
        let indices = StandIndices::from(&input);
        assert_eq!(indices, StandIndices::default());
    }

    #[test]
    fn test_zero_denominator_is_independent_of_others() {
        let input = IndicesInput {
            plot_tree_species: 2.0,
            plots: 4.0,
            cross_tree_specie: 9.0,
            cross: 0.0,
            plant_species: 1.0,
            area: 10.0,
        };
        let indices = StandIndices::from_input(&input);
        assert_eq!(*indices.rf, 50.0);
        assert_eq!(*indices.rdo, 0.0);
        assert_eq!(*indices.rp, 10.0);
    }

    #[test]
    fn test_measurement_json_shape() {
        let json =
            r#"{"diameter_cm":3.0,"height_m":2.0,"category":"Bamboo","bamboo_type":"BongPa"}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(*m.diameter, 3.0);
        assert_eq!(m.taxon.category, Category::Bamboo);
        assert_eq!(m.taxon.bamboo_type, Some(BambooType::BongPa));
        assert_eq!(m.taxon.forest_type, None);

        let indices: IndicesInput = serde_json::from_str(
            r#"{"plotTreeSpecies":1,"plots":2,"crossTreeSpecie":3,"cross":4,"plantSpecies":5,"area":6}"#,
        )
        .unwrap();
        assert_eq!(indices.cross, 4.0);
    }
}
