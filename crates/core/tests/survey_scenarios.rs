//! End-to-end survey scenarios
//!
//! Each test runs measurements through the full pipeline (resolve, evaluate,
//! classify, convert, compile, summarize) and checks the published equation
//! values by hand.
//!
//! Run with log output:
//! `RUST_LOG=carbon_stock_core=debug cargo test --test survey_scenarios -- --nocapture`

use approx::assert_relative_eq;
use carbon_stock_core::{
    allometry, summarize, to_carbon, BambooType, CalculationRecord, Category, Centimeters,
    ForestType, IndicesInput, Kilograms, MangroveSpecies, Measurement, Meters, RecordId,
    SizeClass, TaxonSelection,
};
use chrono::{TimeZone, Utc};
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install a test subscriber once; output only shows with `--nocapture`.
fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn measure(d: f64, h: f64, taxon: TaxonSelection) -> Measurement {
    Measurement::new(Centimeters::new(d), Meters::new(h), taxon)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO A: Vine, direct power law
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_vine_direct_power_law() {
    init_logging();
    let expected_biomass = 0.8622 * 10f64.powf(2.021);

    for height in [0.3, 1.3, 40.0] {
        let record =
            CalculationRecord::compile(measure(10.0, height, TaxonSelection::vine()), None);
        assert_relative_eq!(*record.biomass(), expected_biomass, max_relative = 1e-12);
        assert_relative_eq!(*record.carbon(), expected_biomass * 0.47, max_relative = 1e-12);
        assert_eq!(record.size_class(), SizeClass::Big);
        assert_eq!(record.grouping_key(), "Vine");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO B: Bamboo BongPa, size class follows height
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_bamboo_bong_pa() {
    init_logging();
    let expected_biomass = 0.1466 * 3f64.powf(0.7187);
    let taxon = TaxonSelection::bamboo(BambooType::BongPa);

    let tall = CalculationRecord::compile(measure(3.0, 1.30, taxon), None);
    let short = CalculationRecord::compile(measure(3.0, 1.29, taxon), None);

    assert_relative_eq!(*tall.biomass(), expected_biomass, max_relative = 1e-12);
    assert_eq!(tall.biomass(), short.biomass());
    assert_eq!(tall.size_class(), SizeClass::Young);
    assert_eq!(short.size_class(), SizeClass::Baby);
}

#[test]
fn test_all_bamboo_coefficients() {
    let cases = [
        (BambooType::BongPa, 0.1466, 0.7187),
        (BambooType::BongDam, 0.49522, 0.8726),
        (BambooType::KhaoLam, 0.17466, 1.0437),
        (BambooType::RaiPhak, 0.2425, 1.0751),
    ];
    for (bamboo_type, a, b) in cases {
        let biomass = allometry::evaluate(
            allometry::resolve(&TaxonSelection::bamboo(bamboo_type)),
            Centimeters::new(6.0),
            Meters::new(9.0),
        );
        assert_relative_eq!(*biomass, a * 6f64.powf(b), max_relative = 1e-12);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIO C: Pine, three-component power law
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_pine_three_components() {
    init_logging();
    let x: f64 = 6000.0;
    let stem = 0.02141 * x.powf(0.9814);
    let branch = 0.00002 * x.powf(1.4561);
    let leaf = 0.00030 * x.powf(1.0138);

    let record = CalculationRecord::compile(
        measure(20.0, 15.0, TaxonSelection::tree(ForestType::Pine)),
        None,
    );
    assert_relative_eq!(*record.biomass(), stem + branch + leaf, max_relative = 1e-12);
    assert_relative_eq!(*record.carbon(), (stem + branch + leaf) * 0.47, max_relative = 1e-12);

    let parts = allometry::evaluate_components(
        record.variant(),
        Centimeters::new(20.0),
        Meters::new(15.0),
    );
    assert_relative_eq!(*parts.stem, stem, max_relative = 1e-12);
    assert_relative_eq!(*parts.branch, branch, max_relative = 1e-12);
    assert_relative_eq!(*parts.leaf, leaf, max_relative = 1e-12);
    assert_relative_eq!(*parts.total(), *record.biomass(), max_relative = 1e-12);
}

#[test]
fn test_every_mangrove_species_resolves_and_grows() {
    for species in MangroveSpecies::ALL {
        let taxon = TaxonSelection::mangrove(species);
        let small = CalculationRecord::compile(measure(5.0, 4.0, taxon), None);
        let large = CalculationRecord::compile(measure(25.0, 14.0, taxon), None);
        assert!(small.is_resolved(), "{species}");
        assert!(*small.biomass() > 0.0, "{species}");
        assert!(large.biomass() > small.biomass(), "{species}");
    }
}

/// Published log-linear pairs `(a, b)`: stem, branch, leaf, prop root.
type MangroveRow = (MangroveSpecies, [(f64, f64); 3], Option<(f64, f64)>);

const MANGROVE_TABLE: [MangroveRow; 11] = [
    (MangroveSpecies::SamaeKhao, [(0.5063, 0.0442), (0.2619, 0.0315), (0.0940, 0.0310)], None),
    (MangroveSpecies::SamaeDam, [(0.3389, 0.0570), (0.0775, 0.0403), (0.1119, 0.0392)], None),
    (MangroveSpecies::TuaKhao, [(0.4754, 0.0413), (0.4325, 0.0382), (0.1984, 0.0349)], None),
    (MangroveSpecies::TuaDam, [(0.3470, 0.458), (0.6811, 0.0659), (0.2965, 0.0393)], None),
    (MangroveSpecies::Phangka, [(0.4703, 0.0437), (0.0443, 0.0551), (0.1266, 0.0283)], None),
    (
        MangroveSpecies::ProngDaeng,
        [(0.2432, 0.0587), (-0.4632, 0.0625), (-0.4187, 0.0529)],
        None,
    ),
    (
        MangroveSpecies::KongKangLek,
        [(0.8074, 0.0289), (-0.2344, 0.0424), (-0.682, 0.0277)],
        Some((-0.7566, 0.0311)),
    ),
    (
        MangroveSpecies::KongKangYai,
        [(0.6171, 0.0357), (-0.3606, 0.0467), (-0.3778, 0.0360)],
        Some((-0.6908, 0.0496)),
    ),
    (MangroveSpecies::Lamphu, [(0.2520, 0.0507), (-0.3567, 0.0449), (-0.4976, 0.0418)], None),
    (
        MangroveSpecies::TaboonKhao,
        [(0.2374, 0.0589), (-0.5046, 0.0637), (-0.5179, 0.0558)],
        None,
    ),
    (
        MangroveSpecies::TaboonDam,
        [(0.2572, 0.0566), (-0.7659, 0.0562), (-0.7823, 0.0511)],
        None,
    ),
];

#[test]
fn test_mangrove_table_matches_published_coefficients() {
    let (d, h): (f64, f64) = (13.0, 7.0);
    let log_x = (d * d * h).log10();
    let term = |(a, b): (f64, f64)| 10f64.powf(a + b * log_x);

    assert_eq!(MANGROVE_TABLE.len(), MangroveSpecies::ALL.len());
    for (species, [stem, branch, leaf], prop_root) in MANGROVE_TABLE {
        let parts = allometry::evaluate_components(
            Some(allometry::EquationVariant::Mangrove(species)),
            Centimeters::new(d),
            Meters::new(h),
        );
        assert_relative_eq!(*parts.stem, term(stem), max_relative = 1e-12);
        assert_relative_eq!(*parts.branch, term(branch), max_relative = 1e-12);
        assert_relative_eq!(*parts.leaf, term(leaf), max_relative = 1e-12);
        assert_relative_eq!(*parts.prop_root, prop_root.map_or(0.0, term), max_relative = 1e-12);

        let expected = term(stem) + term(branch) + term(leaf) + prop_root.map_or(0.0, term);
        let taxon = TaxonSelection::mangrove(species);
        let record = CalculationRecord::compile(measure(d, h, taxon), None);
        assert_relative_eq!(*record.biomass(), expected, max_relative = 1e-12);
    }
}

#[test]
fn test_tua_dam_uses_published_stem_slope() {
    let log_x = (10.0f64 * 10.0 * 8.0).log10();
    let expected = 10f64.powf(0.3470 + 0.458 * log_x)
        + 10f64.powf(0.6811 + 0.0659 * log_x)
        + 10f64.powf(0.2965 + 0.0393 * log_x);
    let record = CalculationRecord::compile(
        measure(10.0, 8.0, TaxonSelection::mangrove(MangroveSpecies::TuaDam)),
        None,
    );
    assert_relative_eq!(*record.biomass(), expected, max_relative = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIOS D & E: Aggregation
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_single_class_aggregation() {
    let samples = [("Tree - Pine", Kilograms::new(10.0)), ("Tree - Pine", Kilograms::new(20.0))];
    let summary = summarize(&samples, 5.0);
    assert_eq!(summary.group_count, 1);
    assert_relative_eq!(*summary.total_carbon, 75.0);
    assert_relative_eq!(*summary.net_co2, 274.5, max_relative = 1e-12);
}

#[test]
fn test_mean_of_means_across_classes() {
    // Class means 10 and 30 with unequal membership
    let samples = [
        ("Vine", Kilograms::new(10.0)),
        ("Bamboo - KhaoLam", Kilograms::new(20.0)),
        ("Bamboo - KhaoLam", Kilograms::new(40.0)),
        ("Bamboo - KhaoLam", Kilograms::new(30.0)),
    ];
    let summary = summarize(&samples, 2.0);
    assert_eq!(summary.group_count, 2);
    assert_relative_eq!(*summary.total_carbon, 40.0);
    assert_relative_eq!(*summary.net_co2, 146.4, max_relative = 1e-12);
}

#[test]
fn test_summarize_compiled_records() {
    init_logging();
    let records = vec![
        CalculationRecord::compile(measure(10.0, 5.0, TaxonSelection::vine()), None),
        CalculationRecord::compile(measure(12.0, 6.0, TaxonSelection::vine()), None),
        CalculationRecord::compile(
            measure(30.0, 20.0, TaxonSelection::tree(ForestType::Rainforest)),
            None,
        ),
    ];

    let vine_mean = (*records[0].carbon() + *records[1].carbon()) / 2.0;
    let expected_mean = (vine_mean + *records[2].carbon()) / 2.0;

    let summary = summarize(&records, 3.5);
    assert_eq!(summary.group_count, 2);
    assert_relative_eq!(*summary.total_carbon, expected_mean * 3.5, max_relative = 1e-12);
    assert_relative_eq!(
        *summary.net_co2,
        expected_mean * 3.5 * 3.66,
        max_relative = 1e-12
    );
}

#[test]
fn test_unresolved_records_still_form_a_class() {
    // Tree without a forest type contributes a zero-carbon class of its own
    let records = vec![
        CalculationRecord::compile(measure(10.0, 5.0, TaxonSelection::vine()), None),
        CalculationRecord::compile(measure(10.0, 5.0, TaxonSelection::new(Category::Tree)), None),
    ];
    assert!(!records[1].is_resolved());

    let summary = summarize(&records, 1.0);
    assert_eq!(summary.group_count, 2);
    assert_relative_eq!(*summary.total_carbon, *records[0].carbon() / 2.0, max_relative = 1e-12);
}

#[test]
fn test_empty_collection() {
    let records: Vec<CalculationRecord> = Vec::new();
    let summary = summarize(&records, 250.0);
    assert_eq!(summary.group_count, 0);
    assert_eq!(*summary.total_carbon, 0.0);
    assert_eq!(*summary.net_co2, 0.0);
    assert!(summary.groups.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERSISTENCE: collection reconstructed by the caller
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_persisted_collection_summarizes_identically() {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
    let indices = IndicesInput {
        plot_tree_species: 3.0,
        plots: 10.0,
        cross_tree_specie: 1.2,
        cross: 4.8,
        plant_species: 30.0,
        area: 1600.0,
    };
    let records: Vec<CalculationRecord> = [
        measure(18.0, 11.0, TaxonSelection::tree(ForestType::Deciduous)),
        measure(14.0, 9.0, TaxonSelection::mangrove(MangroveSpecies::KongKangLek)),
        measure(2.5, 3.0, TaxonSelection::bamboo(BambooType::RaiPhak)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, m)| {
        CalculationRecord::compile_with(m, Some(&indices), RecordId::from_raw(i as u64 + 1), stamp)
    })
    .collect();

    let json = serde_json::to_string_pretty(&records).unwrap();
    let restored: Vec<CalculationRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, records);

    let before = summarize(&records, 12.0);
    let after = summarize(&restored, 12.0);
    assert_eq!(before, after);
}

#[test]
fn test_carbon_conversion_is_exact() {
    for biomass in [0.0, 0.5, 123.456, 98765.4321] {
        assert_eq!(*to_carbon(Kilograms::new(biomass)), biomass * 0.47);
    }
}
