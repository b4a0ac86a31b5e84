//! Calculation records
//!
//! A [`CalculationRecord`] is the immutable result of running one
//! [`Measurement`] through the pipeline: resolve the equation, evaluate
//! biomass, classify size, convert to carbon and, when plot tallies are
//! supplied, derive the stand-structure ratios. The caller owns the record
//! collection; compiling a record has no side effect beyond returning it.

use crate::allometry::{self, EquationVariant, SizeClass};
use crate::carbon::to_carbon;
use crate::core_types::measurement::{IndicesInput, Measurement, StandIndices};
use crate::core_types::units::Kilograms;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use tracing::{debug, warn};

/// Opaque record identity, rendered as 16 hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(u64);

impl RecordId {
    /// Draw a fresh random identity
    pub fn generate() -> Self {
        RecordId(rand::random::<u64>())
    }

    pub const fn from_raw(raw: u64) -> Self {
        RecordId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(RecordId)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = ParseIntError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One compiled measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    id: RecordId,
    created_at: DateTime<Utc>,
    measurement: Measurement,
    /// `None` when the selection did not resolve to an equation
    variant: Option<EquationVariant>,
    size_class: SizeClass,
    biomass: Kilograms,
    carbon: Kilograms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indices: Option<StandIndices>,
}

impl CalculationRecord {
    /// Compile a measurement with a fresh identity stamped now
    pub fn compile(measurement: Measurement, indices: Option<&IndicesInput>) -> Self {
        Self::compile_with(measurement, indices, RecordId::generate(), Utc::now())
    }

    /// Compile a measurement with a caller-chosen identity and timestamp
    pub fn compile_with(
        measurement: Measurement,
        indices: Option<&IndicesInput>,
        id: RecordId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let variant = allometry::resolve(&measurement.taxon);
        let biomass = allometry::evaluate(variant, measurement.diameter, measurement.height);
        let size_class = allometry::classify(measurement.diameter, measurement.height);
        let carbon = to_carbon(biomass);
        let indices = indices.map(StandIndices::from_input);

        if variant.is_none() {
            warn!(
                record = %id,
                taxon = %measurement.taxon,
                "No allometric equation for selection, biomass recorded as zero"
            );
        }
        debug!(
            record = %id,
            taxon = %measurement.taxon,
            biomass_kg = *biomass,
            carbon_kg = *carbon,
            size_class = %size_class,
            "Compiled calculation record"
        );

        Self {
            id,
            created_at,
            measurement,
            variant,
            size_class,
            biomass,
            carbon,
            indices,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    /// Resolved equation, `None` for an unresolved selection
    pub fn variant(&self) -> Option<EquationVariant> {
        self.variant
    }

    /// Whether biomass came from an equation rather than the zero fallback
    pub fn is_resolved(&self) -> bool {
        self.variant.is_some()
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// Total above-ground biomass `W_t`
    pub fn biomass(&self) -> Kilograms {
        self.biomass
    }

    /// Carbon mass `C_n`
    pub fn carbon(&self) -> Kilograms {
        self.carbon
    }

    pub fn indices(&self) -> Option<&StandIndices> {
        self.indices.as_ref()
    }

    /// Taxonomic class used for aggregation
    pub fn grouping_key(&self) -> String {
        self.measurement.taxon.grouping_key()
    }
}
