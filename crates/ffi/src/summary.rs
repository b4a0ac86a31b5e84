use carbon_stock_core::{summarize, Kilograms};
use std::slice;

use crate::error::{CarbonStockErrorCode, DefaultCarbonStockError};
use crate::helpers::{clear_last_error, track_error, track_result};
use crate::record::CarbonRecord;
use crate::taxonomy::taxon_from_raw;

/// Forest-level totals.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonSummary {
    /// Number of distinct taxonomic classes.
    pub group_count: usize,
    /// Mean of class mean carbon, scaled by forest area (kg).
    pub total_carbon_kg: f64,
    /// Net CO2 absorption, `total_carbon_kg * 3.66` (kg).
    pub net_co2_kg: f64,
}

/// Grouping key and carbon of one record, with its selectors validated.
fn sample(record: &CarbonRecord) -> Result<(String, Kilograms), DefaultCarbonStockError> {
    let taxon = taxon_from_raw(
        record.category,
        record.bamboo_type,
        record.forest_type,
        record.mangrove_species,
    )?;
    Ok((taxon.grouping_key(), Kilograms::new(record.carbon_kg)))
}

/// Summarize a collection of records over `forest_area`.
///
/// Carbon is averaged within each taxonomic class, then the class means are
/// averaged with equal weight and scaled by `forest_area`. An empty
/// collection (`len == 0`, `records` may be null) yields all zeros.
///
/// Returns
/// - `Ok` (0): `out_summary` holds the totals
/// - `NullPointer`: `out_summary` is null, or `records` is null with `len > 0`
/// - `InvalidSelector`: a record carries an out-of-range selector discriminant
/// - `InvalidParameter`: `forest_area` is `NaN` or infinite
///
/// On error `out_summary` is left untouched.
///
/// # Safety
///
/// - `records` must point to `len` consecutive `CarbonRecord`s (or be null
///   when `len == 0`). Selector fields are validated here, but `size_class`,
///   `variant`, `has_indices` and `resolved` must hold values written by
///   `carbon_stock_compile_record`.
/// - `out_summary` must be null or point to writable memory for one `CarbonSummary`.
#[no_mangle]
pub unsafe extern "C" fn carbon_stock_summarize(
    records: *const CarbonRecord,
    len: usize,
    forest_area: f64,
    out_summary: *mut CarbonSummary,
) -> CarbonStockErrorCode {
    if out_summary.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("out_summary"));
    }
    if records.is_null() && len > 0 {
        return track_error(&DefaultCarbonStockError::null_pointer("records"));
    }
    if !forest_area.is_finite() {
        return track_error(&DefaultCarbonStockError::non_finite("forest_area", forest_area));
    }

    let records: &[CarbonRecord] = if len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(records, len) }
    };

    let samples: Result<Vec<_>, _> = records.iter().map(sample).collect();
    let samples = match track_result(samples) {
        Ok(samples) => samples,
        Err(code) => return code,
    };

    let summary = summarize(&samples, forest_area);
    unsafe {
        *out_summary = CarbonSummary {
            group_count: summary.group_count,
            total_carbon_kg: *summary.total_carbon,
            net_co2_kg: *summary.net_co2,
        };
    }

    clear_last_error();
    CarbonStockErrorCode::Ok
}
