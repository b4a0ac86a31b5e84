//! C ABI over the carbon stock engine.
//!
//! Every function that can fail returns a `CarbonStockErrorCode` and writes
//! its result through an out-pointer. On failure a diagnostic message is kept
//! per thread and can be read with `carbon_stock_get_last_error()`.
//!
//! Typical flow from C:
//! ```c
//! CarbonRecord records[2];
//! carbon_stock_compile_record(&vine, NULL, &records[0]);
//! carbon_stock_compile_record(&pine, NULL, &records[1]);
//!
//! CarbonSummary summary;
//! carbon_stock_summarize(records, 2, forest_area, &summary);
//! ```
//!
//! The caller owns the record array; nothing here allocates on its behalf.

mod error;
mod helpers;
mod record;
mod summary;
mod taxonomy;

pub use error::{
    carbon_stock_get_last_error, carbon_stock_get_last_error_code, CarbonStockErrorCode,
};
pub use record::{
    carbon_stock_classify_size, carbon_stock_compile_record, carbon_stock_evaluate_biomass,
    carbon_stock_resolve_variant, carbon_stock_to_carbon, CarbonEquationKind, CarbonRecord,
    CarbonSizeClass, CarbonVariant,
};
pub use summary::{carbon_stock_summarize, CarbonSummary};
pub use taxonomy::{
    CarbonBambooType, CarbonCategory, CarbonForestType, CarbonIndicesInput, CarbonMangroveSpecies,
    CarbonMeasurement,
};
