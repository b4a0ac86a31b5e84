//! Forest-level carbon aggregation
//!
//! Records are partitioned by taxonomic class (grouping key). Each class gets
//! its mean per-stem carbon `C_m`; the class means are then averaged with
//! equal weight, so a heavily sampled species does not swamp a rare one.
//!
//! ```text
//! C_all  = (Σ C_m / classes) × forest_area
//! net CO2 = C_all × 3.66
//! ```
//!
//! This is not the same as a single weighted mean over all records whenever
//! class sizes differ.

use crate::constants::CO2_PER_CARBON;
use crate::core_types::units::Kilograms;
use crate::record::CalculationRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Anything that contributes one carbon value to a taxonomic class
pub trait CarbonSample {
    /// Key identifying the class; equal strings group together
    fn grouping_key(&self) -> String;

    /// Carbon mass `C_n` of this sample
    fn carbon(&self) -> Kilograms;
}

impl CarbonSample for CalculationRecord {
    fn grouping_key(&self) -> String {
        CalculationRecord::grouping_key(self)
    }

    fn carbon(&self) -> Kilograms {
        CalculationRecord::carbon(self)
    }
}

impl<S: AsRef<str>> CarbonSample for (S, Kilograms) {
    fn grouping_key(&self) -> String {
        self.0.as_ref().to_string()
    }

    fn carbon(&self) -> Kilograms {
        self.1
    }
}

/// Per-class statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    /// Stems measured in this class
    pub count: usize,
    /// Mean per-stem carbon `C_m`
    pub mean_carbon: Kilograms,
}

/// Forest-level totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Number of distinct taxonomic classes
    pub group_count: usize,
    /// `C_all`: mean of class means scaled by forest area
    pub total_carbon: Kilograms,
    /// Net CO2 absorption, `C_all × 3.66`
    pub net_co2: Kilograms,
    /// Class breakdown, sorted by key
    pub groups: Vec<GroupSummary>,
}

/// Summarize a record collection over `forest_area`
///
/// An empty collection yields all zeros.
pub fn summarize<'a, T, I>(samples: I, forest_area: f64) -> Summary
where
    T: CarbonSample + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut tallies: FxHashMap<String, (Kilograms, usize)> = FxHashMap::default();
    let mut sample_count = 0usize;
    for sample in samples {
        let entry = tallies
            .entry(sample.grouping_key())
            .or_insert((Kilograms::ZERO, 0));
        entry.0 += sample.carbon();
        entry.1 += 1;
        sample_count += 1;
    }

    if tallies.is_empty() {
        return Summary::default();
    }

    let mut groups: Vec<GroupSummary> = tallies
        .into_iter()
        .map(|(key, (sum, count))| GroupSummary {
            key,
            count,
            mean_carbon: sum / count as f64,
        })
        .collect();
    groups.sort_by(|a, b| a.key.cmp(&b.key));

    let group_count = groups.len();
    let mean_of_means: Kilograms =
        groups.iter().map(|g| g.mean_carbon).sum::<Kilograms>() / group_count as f64;
    let total_carbon = mean_of_means * forest_area;
    let net_co2 = total_carbon * CO2_PER_CARBON;

    info!(
        samples = sample_count,
        groups = group_count,
        forest_area,
        total_carbon_kg = *total_carbon,
        net_co2_kg = *net_co2,
        "Summarized carbon stock"
    );

    Summary {
        group_count,
        total_carbon,
        net_co2,
        groups,
    }
}
