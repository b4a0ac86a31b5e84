//! Selector parsing, equation resolution and grouping
//!
//! Survey sheets arrive with English names or Thai labels; these tests pin
//! down how they map to equations and aggregation classes.

use carbon_stock_core::{
    allometry, summarize, BambooType, CalculationRecord, Category, Centimeters, EquationVariant,
    ForestType, Kilograms, MangroveSpecies, Measurement, Meters, TaxonSelection, TaxonomyError,
};

// ═══════════════════════════════════════════════════════════════════════════════
// LABEL PARSING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_thai_and_english_labels_agree() {
    for category in Category::ALL {
        assert_eq!(category.thai_label().parse::<Category>().unwrap(), category);
        assert_eq!(category.name().to_lowercase().parse::<Category>().unwrap(), category);
    }
    for bamboo_type in BambooType::ALL {
        assert_eq!(bamboo_type.thai_label().parse::<BambooType>().unwrap(), bamboo_type);
    }
    for forest_type in ForestType::ALL {
        assert_eq!(forest_type.thai_label().parse::<ForestType>().unwrap(), forest_type);
    }
    for species in MangroveSpecies::ALL {
        assert_eq!(species.thai_label().parse::<MangroveSpecies>().unwrap(), species);
        assert_eq!(species.name().parse::<MangroveSpecies>().unwrap(), species);
    }
}

#[test]
fn test_legacy_bamboo_spelling() {
    assert_eq!("Bambu".parse::<Category>().unwrap(), Category::Bamboo);
}

#[test]
fn test_unknown_label_reports_kind() {
    let err = "Oak".parse::<ForestType>().unwrap_err();
    assert!(matches!(err, TaxonomyError::UnknownLabel { .. }));
    let message = err.to_string();
    assert!(message.contains("forest type"), "{message}");
    assert!(message.contains("Oak"), "{message}");
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_resolution_reads_only_the_relevant_selector() {
    // A stray forest type on a vine does not change its equation
    let vine = TaxonSelection {
        forest_type: Some(ForestType::Pine),
        ..TaxonSelection::vine()
    };
    assert_eq!(allometry::resolve(&vine), Some(EquationVariant::Vine));

    // Bamboo ignores a stray mangrove species
    let bamboo = TaxonSelection {
        mangrove_species: Some(MangroveSpecies::Lamphu),
        ..TaxonSelection::bamboo(BambooType::RaiPhak)
    };
    assert_eq!(
        allometry::resolve(&bamboo),
        Some(EquationVariant::Bamboo(BambooType::RaiPhak))
    );
}

#[test]
fn test_missing_selectors_leave_selection_unresolved() {
    let cases = [
        TaxonSelection::new(Category::Bamboo),
        TaxonSelection::new(Category::Tree),
        TaxonSelection::tree(ForestType::Mangrove),
        // Species without the mangrove forest type
        TaxonSelection {
            mangrove_species: Some(MangroveSpecies::TuaKhao),
            ..TaxonSelection::new(Category::Tree)
        },
    ];
    for taxon in cases {
        let variant = allometry::resolve(&taxon);
        assert_eq!(variant, None, "{taxon}");
        let biomass = allometry::evaluate(variant, Centimeters::new(15.0), Meters::new(10.0));
        assert_eq!(biomass, Kilograms::ZERO);
    }
}

#[test]
fn test_height_dependence_by_family() {
    assert!(!EquationVariant::Vine.uses_height());
    assert!(!EquationVariant::Bamboo(BambooType::BongDam).uses_height());
    assert!(EquationVariant::Rainforest.uses_height());
    assert!(EquationVariant::Mangrove(MangroveSpecies::Phangka).uses_height());

    let d = Centimeters::new(12.0);
    let short = EquationVariant::Deciduous.evaluate(d, Meters::new(5.0));
    let tall = EquationVariant::Deciduous.evaluate(d, Meters::new(20.0));
    assert!(tall > short);
}

#[test]
fn test_prop_roots_only_for_species_that_have_them() {
    let d = Centimeters::new(15.0);
    let h = Meters::new(10.0);
    let pine = EquationVariant::Pine.evaluate_components(d, h);
    assert_eq!(pine.prop_root, Kilograms::ZERO);

    let with_roots = MangroveSpecies::ALL
        .into_iter()
        .filter(|&s| {
            EquationVariant::Mangrove(s).evaluate_components(d, h).prop_root > Kilograms::ZERO
        })
        .count();
    assert!(with_roots > 0);
    assert!(with_roots < MangroveSpecies::ALL.len());
}

// ═══════════════════════════════════════════════════════════════════════════════
// GROUPING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_grouping_keys() {
    assert_eq!(TaxonSelection::vine().grouping_key(), "Vine");
    assert_eq!(TaxonSelection::bamboo(BambooType::KhaoLam).grouping_key(), "Bamboo - KhaoLam");
    assert_eq!(TaxonSelection::tree(ForestType::Deciduous).grouping_key(), "Tree - Deciduous");
    assert_eq!(
        TaxonSelection::mangrove(MangroveSpecies::KongKangYai).grouping_key(),
        "Tree - Mangrove - KongKangYai"
    );
}

#[test]
fn test_species_are_separate_classes() {
    let measure = |species| {
        CalculationRecord::compile(
            Measurement::new(
                Centimeters::new(10.0),
                Meters::new(7.0),
                TaxonSelection::mangrove(species),
            ),
            None,
        )
    };
    let records = vec![
        measure(MangroveSpecies::SamaeKhao),
        measure(MangroveSpecies::SamaeKhao),
        measure(MangroveSpecies::SamaeDam),
    ];
    let summary = summarize(&records, 1.0);
    assert_eq!(summary.group_count, 2);
    assert_eq!(summary.groups[0].key, "Tree - Mangrove - SamaeDam");
    assert_eq!(summary.groups[0].count, 1);
    assert_eq!(summary.groups[1].key, "Tree - Mangrove - SamaeKhao");
    assert_eq!(summary.groups[1].count, 2);
}
