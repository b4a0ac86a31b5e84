//! Allometric biomass estimation
//!
//! Resolution and evaluation are split so callers can inspect which equation
//! a selection maps to before (or without) evaluating it:
//!
//! - [`resolve`] maps a [`TaxonSelection`] to an [`EquationVariant`], or `None`
//!   when the selection lacks the selector its category needs
//! - [`evaluate`] / [`evaluate_components`] apply the variant's equation to a
//!   stem diameter and height
//! - [`size_class::classify`] assigns the growth stage
//!
//! An unresolved selection contributes zero biomass rather than an error.
//!
//! # Example
//! ```
//! use carbon_stock_core::allometry::{evaluate, resolve, EquationVariant};
//! use carbon_stock_core::core_types::{Centimeters, Meters, TaxonSelection};
//!
//! let variant = resolve(&TaxonSelection::vine());
//! assert_eq!(variant, Some(EquationVariant::Vine));
//!
//! let biomass = evaluate(variant, Centimeters::new(10.0), Meters::new(3.0));
//! assert!((*biomass - 0.8622 * 10f64.powf(2.021)).abs() < 1e-9);
//! ```

pub mod equations;
pub mod size_class;

use crate::core_types::taxonomy::{
    BambooType, Category, ForestType, MangroveSpecies, TaxonSelection,
};
use crate::core_types::units::{Centimeters, Kilograms, Meters};
use equations::Equation;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use size_class::{classify, SizeClass};

/// Identifier of one fitted equation in the coefficient table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationVariant {
    Vine,
    Bamboo(BambooType),
    Rainforest,
    Deciduous,
    Pine,
    Mangrove(MangroveSpecies),
}

impl EquationVariant {
    /// Coefficients for this variant
    pub const fn equation(self) -> Equation {
        match self {
            EquationVariant::Vine => Equation::Direct(equations::VINE),
            EquationVariant::Bamboo(bamboo_type) => {
                Equation::Direct(equations::bamboo(bamboo_type))
            }
            EquationVariant::Rainforest => Equation::ForestTree(equations::RAINFOREST),
            EquationVariant::Deciduous => Equation::ForestTree(equations::DECIDUOUS),
            EquationVariant::Pine => Equation::ForestTree(equations::PINE),
            EquationVariant::Mangrove(species) => Equation::Mangrove(equations::mangrove(species)),
        }
    }

    /// Whether the equation reads stem height
    pub fn uses_height(self) -> bool {
        !matches!(self.equation(), Equation::Direct(_))
    }

    pub fn evaluate(self, diameter: Centimeters, height: Meters) -> Kilograms {
        self.evaluate_components(diameter, height).total()
    }

    pub fn evaluate_components(self, diameter: Centimeters, height: Meters) -> BiomassComponents {
        let d = *diameter;
        match self.equation() {
            Equation::Direct(law) => BiomassComponents {
                stem: Kilograms::new(law.apply(d)),
                ..BiomassComponents::default()
            },
            Equation::ForestTree(coeffs) => {
                let x = stem_volume_index(diameter, height);
                let stem = coeffs.stem.apply(x);
                let branch = coeffs.branch.apply(x);
                let leaf = coeffs.leaf.apply(x, stem + branch);
                BiomassComponents {
                    stem: Kilograms::new(stem),
                    branch: Kilograms::new(branch),
                    leaf: Kilograms::new(leaf),
                    prop_root: Kilograms::ZERO,
                }
            }
            Equation::Mangrove(coeffs) => {
                let log_x = stem_volume_index(diameter, height).log10();
                BiomassComponents {
                    stem: Kilograms::new(coeffs.stem.apply(log_x)),
                    branch: Kilograms::new(coeffs.branch.apply(log_x)),
                    leaf: Kilograms::new(coeffs.leaf.apply(log_x)),
                    prop_root: coeffs
                        .prop_root
                        .map_or(Kilograms::ZERO, |eq| Kilograms::new(eq.apply(log_x))),
                }
            }
        }
    }
}

impl fmt::Display for EquationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationVariant::Vine => f.write_str("Vine"),
            EquationVariant::Bamboo(b) => write!(f, "Bamboo/{b}"),
            EquationVariant::Rainforest => f.write_str("Tree/Rainforest"),
            EquationVariant::Deciduous => f.write_str("Tree/Deciduous"),
            EquationVariant::Pine => f.write_str("Tree/Pine"),
            EquationVariant::Mangrove(m) => write!(f, "Tree/Mangrove/{m}"),
        }
    }
}

/// Biomass split by plant part (kg)
///
/// Direct power-law equations report their whole mass as `stem`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BiomassComponents {
    pub stem: Kilograms,
    pub branch: Kilograms,
    pub leaf: Kilograms,
    /// Stilt roots, non-zero only for the two *Rhizophora* mangroves
    pub prop_root: Kilograms,
}

impl BiomassComponents {
    /// Total above-ground biomass `W_t`
    pub fn total(&self) -> Kilograms {
        self.stem + self.branch + self.leaf + self.prop_root
    }
}

/// `X = D² · H`
#[inline]
fn stem_volume_index(diameter: Centimeters, height: Meters) -> f64 {
    let d = *diameter;
    d * d * *height
}

/// Resolve a selection to its equation variant
///
/// Only the selector relevant to the category is read. Returns `None` when
/// that selector is missing.
pub fn resolve(selection: &TaxonSelection) -> Option<EquationVariant> {
    match selection.category {
        Category::Vine => Some(EquationVariant::Vine),
        Category::Bamboo => selection.bamboo_type.map(EquationVariant::Bamboo),
        Category::Tree => match selection.forest_type? {
            ForestType::Rainforest => Some(EquationVariant::Rainforest),
            ForestType::Deciduous => Some(EquationVariant::Deciduous),
            ForestType::Pine => Some(EquationVariant::Pine),
            ForestType::Mangrove => selection.mangrove_species.map(EquationVariant::Mangrove),
        },
    }
}

/// Biomass for a (possibly unresolved) variant; `None` yields zero
pub fn evaluate(
    variant: Option<EquationVariant>,
    diameter: Centimeters,
    height: Meters,
) -> Kilograms {
    variant.map_or(Kilograms::ZERO, |v| v.evaluate(diameter, height))
}

/// Component breakdown for a (possibly unresolved) variant; `None` yields zeros
pub fn evaluate_components(
    variant: Option<EquationVariant>,
    diameter: Centimeters,
    height: Meters,
) -> BiomassComponents {
    variant.map_or_else(BiomassComponents::default, |v| {
        v.evaluate_components(diameter, height)
    })
}
