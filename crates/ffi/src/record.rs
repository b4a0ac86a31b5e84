use carbon_stock_core::{
    allometry, to_carbon, CalculationRecord, Centimeters, EquationVariant, IndicesInput,
    Kilograms, Meters, SizeClass,
};

use crate::error::{CarbonStockErrorCode, DefaultCarbonStockError};
use crate::helpers::{track_error, track_result};
use crate::taxonomy::{
    CarbonBambooType, CarbonCategory, CarbonForestType, CarbonIndicesInput, CarbonMangroveSpecies,
    CarbonMeasurement,
};

/// Growth stage of a stem.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonSizeClass {
    Baby = 0,
    Young = 1,
    Big = 2,
    None = 3,
}

impl From<SizeClass> for CarbonSizeClass {
    fn from(value: SizeClass) -> Self {
        match value {
            SizeClass::Baby => CarbonSizeClass::Baby,
            SizeClass::Young => CarbonSizeClass::Young,
            SizeClass::Big => CarbonSizeClass::Big,
            SizeClass::None => CarbonSizeClass::None,
        }
    }
}

/// Equation family picked for a selection; `Unresolved` means zero biomass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonEquationKind {
    Unresolved = 0,
    Vine = 1,
    Bamboo = 2,
    Rainforest = 3,
    Deciduous = 4,
    Pine = 5,
    Mangrove = 6,
}

/// Resolved equation. `bamboo_type` / `mangrove_species` are set only for
/// the `Bamboo` and `Mangrove` kinds respectively.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarbonVariant {
    pub kind: CarbonEquationKind,
    pub bamboo_type: CarbonBambooType,
    pub mangrove_species: CarbonMangroveSpecies,
}

impl From<Option<EquationVariant>> for CarbonVariant {
    fn from(value: Option<EquationVariant>) -> Self {
        let mut variant = CarbonVariant {
            kind: CarbonEquationKind::Unresolved,
            bamboo_type: CarbonBambooType::None,
            mangrove_species: CarbonMangroveSpecies::None,
        };
        match value {
            None => {}
            Some(EquationVariant::Vine) => variant.kind = CarbonEquationKind::Vine,
            Some(EquationVariant::Bamboo(bamboo_type)) => {
                variant.kind = CarbonEquationKind::Bamboo;
                variant.bamboo_type = Some(bamboo_type).into();
            }
            Some(EquationVariant::Rainforest) => variant.kind = CarbonEquationKind::Rainforest,
            Some(EquationVariant::Deciduous) => variant.kind = CarbonEquationKind::Deciduous,
            Some(EquationVariant::Pine) => variant.kind = CarbonEquationKind::Pine,
            Some(EquationVariant::Mangrove(species)) => {
                variant.kind = CarbonEquationKind::Mangrove;
                variant.mangrove_species = Some(species).into();
            }
        }
        variant
    }
}

/// Flat, C-compatible copy of a compiled calculation record.
/// Keep this layout stable for C/C++/C# consumers.
///
/// The taxonomic selectors are raw discriminants, like `CarbonMeasurement`,
/// because `carbon_stock_summarize` reads them back from caller memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonRecord {
    /// Opaque record identity.
    pub id: u64,
    /// Creation time, Unix milliseconds (UTC).
    pub created_at_ms: i64,

    pub diameter_cm: f64,
    pub height_m: f64,
    /// A `CarbonCategory` discriminant.
    pub category: i32,
    /// A `CarbonBambooType` discriminant, 0 for none.
    pub bamboo_type: i32,
    /// A `CarbonForestType` discriminant, 0 for none.
    pub forest_type: i32,
    /// A `CarbonMangroveSpecies` discriminant, 0 for none.
    pub mangrove_species: i32,

    pub size_class: CarbonSizeClass,
    /// Total above-ground biomass (kg).
    pub biomass_kg: f64,
    /// Carbon mass (kg).
    pub carbon_kg: f64,

    /// Whether `rf`, `rdo` and `rp` were computed.
    pub has_indices: bool,
    /// Relative frequency (%).
    pub rf: f64,
    /// Relative dominance (%).
    pub rdo: f64,
    /// Relative density (%).
    pub rp: f64,

    /// `false` when no equation matched the selection and biomass is zero.
    pub resolved: bool,
    pub variant: CarbonVariant,
}

impl From<&CalculationRecord> for CarbonRecord {
    fn from(record: &CalculationRecord) -> Self {
        let measurement = record.measurement();
        let taxon = measurement.taxon;
        let (has_indices, rf, rdo, rp) = match record.indices() {
            Some(indices) => (true, *indices.rf, *indices.rdo, *indices.rp),
            None => (false, 0.0, 0.0, 0.0),
        };

        Self {
            id: record.id().raw(),
            created_at_ms: record.created_at().timestamp_millis(),
            diameter_cm: *measurement.diameter,
            height_m: *measurement.height,
            category: CarbonCategory::from(taxon.category) as i32,
            bamboo_type: CarbonBambooType::from(taxon.bamboo_type) as i32,
            forest_type: CarbonForestType::from(taxon.forest_type) as i32,
            mangrove_species: CarbonMangroveSpecies::from(taxon.mangrove_species) as i32,
            size_class: record.size_class().into(),
            biomass_kg: *record.biomass(),
            carbon_kg: *record.carbon(),
            has_indices,
            rf,
            rdo,
            rp,
            resolved: record.is_resolved(),
            variant: record.variant().into(),
        }
    }
}

/// Resolve which allometric equation applies to a measurement's selectors.
///
/// Returns
/// - `Ok` (0): `out_variant` holds the equation, `kind == Unresolved` if none applies
/// - `NullPointer`: `input` or `out_variant` is null
/// - `InvalidSelector`: a discriminant in `input` is out of range
///
/// # Safety
///
/// - `input` must be null or point to a readable `CarbonMeasurement`.
/// - `out_variant` must be null or point to writable memory for one `CarbonVariant`.
#[no_mangle]
pub unsafe extern "C" fn carbon_stock_resolve_variant(
    input: *const CarbonMeasurement,
    out_variant: *mut CarbonVariant,
) -> CarbonStockErrorCode {
    if out_variant.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("out_variant"));
    }
    if input.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("input"));
    }

    let input = unsafe { &*input };
    match track_result(input.to_measurement()) {
        Ok(measurement) => {
            unsafe {
                *out_variant = allometry::resolve(&measurement.taxon).into();
            }
            CarbonStockErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Compute total above-ground biomass (kg) for one measurement.
///
/// An unresolved selection yields `Ok` with a biomass of 0.
///
/// Returns
/// - `Ok` (0): `out_biomass` holds the biomass
/// - `NullPointer`: `input` or `out_biomass` is null
/// - `InvalidSelector` / `InvalidParameter`: `input` failed validation
///
/// # Safety
///
/// - `input` must be null or point to a readable `CarbonMeasurement`.
/// - `out_biomass` must be null or point to a writable `double`.
#[no_mangle]
pub unsafe extern "C" fn carbon_stock_evaluate_biomass(
    input: *const CarbonMeasurement,
    out_biomass: *mut f64,
) -> CarbonStockErrorCode {
    if out_biomass.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("out_biomass"));
    }
    if input.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("input"));
    }

    let input = unsafe { &*input };
    match track_result(input.to_measurement()) {
        Ok(m) => {
            let variant = allometry::resolve(&m.taxon);
            unsafe {
                *out_biomass = *allometry::evaluate(variant, m.diameter, m.height);
            }
            CarbonStockErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Classify a stem's growth stage from diameter (cm) and height (m).
#[no_mangle]
pub extern "C" fn carbon_stock_classify_size(diameter_cm: f64, height_m: f64) -> CarbonSizeClass {
    allometry::classify(Centimeters::new(diameter_cm), Meters::new(height_m)).into()
}

/// Convert biomass (kg) to carbon mass (kg).
#[no_mangle]
pub extern "C" fn carbon_stock_to_carbon(biomass_kg: f64) -> f64 {
    *to_carbon(Kilograms::new(biomass_kg))
}

/// Compile one measurement into a calculation record.
///
/// `indices` is optional; pass null to skip the stand-structure ratios.
/// Each call produces a record with a fresh identity and the current time.
///
/// Returns
/// - `Ok` (0): `out_record` holds the record
/// - `NullPointer`: `input` or `out_record` is null
/// - `InvalidSelector` / `InvalidParameter`: `input` failed validation
///
/// # Safety
///
/// - `input` must be null or point to a readable `CarbonMeasurement`.
/// - `indices` must be null or point to a readable `CarbonIndicesInput`.
/// - `out_record` must be null or point to writable memory for one `CarbonRecord`.
///
/// Example (C)
/// ```c
/// CarbonMeasurement m = { 20.0, 15.0, Tree, 0, Pine, 0 };
/// CarbonRecord record;
/// if (carbon_stock_compile_record(&m, NULL, &record) != Ok) {
///     fprintf(stderr, "%s\n", carbon_stock_get_last_error());
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn carbon_stock_compile_record(
    input: *const CarbonMeasurement,
    indices: *const CarbonIndicesInput,
    out_record: *mut CarbonRecord,
) -> CarbonStockErrorCode {
    if out_record.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("out_record"));
    }
    if input.is_null() {
        return track_error(&DefaultCarbonStockError::null_pointer("input"));
    }

    let input = unsafe { &*input };
    let indices: Option<IndicesInput> = unsafe { indices.as_ref() }.map(IndicesInput::from);

    match track_result(input.to_measurement()) {
        Ok(measurement) => {
            let record = CalculationRecord::compile(measurement, indices.as_ref());
            unsafe {
                *out_record = CarbonRecord::from(&record);
            }
            CarbonStockErrorCode::Ok
        }
        Err(code) => code,
    }
}
