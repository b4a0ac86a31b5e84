//! Carbon Stock Core Library
//!
//! Estimates above-ground biomass and carbon of surveyed stems from diameter
//! and height using Thai allometric equations (forest trees by forest type,
//! bamboo by clump type, mangroves by species, vines), then aggregates the
//! per-stem carbon into a forest-level carbon stock and net CO2 absorption.
//!
//! ## Pipeline
//!
//! 1. [`allometry::resolve`] picks the equation for a taxonomic selection
//! 2. [`allometry::evaluate`] computes biomass; [`allometry::classify`] the growth stage
//! 3. [`carbon::to_carbon`] converts biomass to carbon
//! 4. [`CalculationRecord::compile`] bundles the above into an immutable record
//! 5. [`aggregate::summarize`] averages carbon per class, then across classes
//!
//! Every step is a pure function of its inputs. Storage of the record
//! collection is left to the caller.
//!
//! ```
//! use carbon_stock_core::{
//!     summarize, BambooType, CalculationRecord, Centimeters, Measurement, Meters,
//!     TaxonSelection,
//! };
//!
//! let records = vec![
//!     CalculationRecord::compile(
//!         Measurement::new(Centimeters::new(10.0), Meters::new(4.0), TaxonSelection::vine()),
//!         None,
//!     ),
//!     CalculationRecord::compile(
//!         Measurement::new(
//!             Centimeters::new(3.0),
//!             Meters::new(6.0),
//!             TaxonSelection::bamboo(BambooType::BongPa),
//!         ),
//!         None,
//!     ),
//! ];
//!
//! let summary = summarize(&records, 1.0);
//! assert_eq!(summary.group_count, 2);
//! assert!(*summary.net_co2 > 0.0);
//! ```

pub mod aggregate;
pub mod allometry;
pub mod carbon;
pub mod constants;
pub mod core_types;
pub mod record;

// Re-export core types
pub use core_types::{
    BambooType, Category, Centimeters, ForestType, IndicesInput, Kilograms, MangroveSpecies,
    Measurement, Meters, Percent, StandIndices, TaxonSelection, TaxonomyError,
};

// Re-export the pipeline
pub use aggregate::{summarize, CarbonSample, GroupSummary, Summary};
pub use allometry::{BiomassComponents, EquationVariant, SizeClass};
pub use carbon::to_carbon;
pub use record::{CalculationRecord, RecordId};
