//! Taxonomic selectors recorded on the field form
//!
//! A measured stem is identified by a top-level [`Category`] plus whichever
//! subtype selector that category uses: bamboo clump type, forest type and,
//! inside mangrove forest, the species. The selectors carry both a stable
//! English name (used for grouping keys and serialization) and the Thai label
//! printed on the survey sheet, and parse from either.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the parts of a grouping key.
const KEY_SEPARATOR: &str = " - ";

/// Error raised when a selector label cannot be recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("Unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },
}

/// Top-level plant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Tree,
    #[serde(alias = "Bambu")]
    Bamboo,
    Vine,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tree, Category::Bamboo, Category::Vine];

    /// Stable English name
    pub fn name(self) -> &'static str {
        match self {
            Category::Tree => "Tree",
            Category::Bamboo => "Bamboo",
            Category::Vine => "Vine",
        }
    }

    /// Label used on the Thai survey form
    pub fn thai_label(self) -> &'static str {
        match self {
            Category::Tree => "ไม้ยืนต้น",
            Category::Bamboo => "ไผ่",
            Category::Vine => "เถาวัลย์",
        }
    }
}

impl FromStr for Category {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("bambu") {
            return Ok(Category::Bamboo);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s) || c.thai_label() == s)
            .ok_or_else(|| TaxonomyError::UnknownLabel {
                kind: "category",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bamboo clump type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BambooType {
    BongPa,
    BongDam,
    /// *Cephalostachyum pergracile*
    KhaoLam,
    /// Rai and phak share one equation
    RaiPhak,
}

impl BambooType {
    pub const ALL: [BambooType; 4] = [
        BambooType::BongPa,
        BambooType::BongDam,
        BambooType::KhaoLam,
        BambooType::RaiPhak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BambooType::BongPa => "BongPa",
            BambooType::BongDam => "BongDam",
            BambooType::KhaoLam => "KhaoLam",
            BambooType::RaiPhak => "RaiPhak",
        }
    }

    pub fn thai_label(self) -> &'static str {
        match self {
            BambooType::BongPa => "ไผ่บงป่า",
            BambooType::BongDam => "ไผ่บงดำ",
            BambooType::KhaoLam => "ไผ่ข้าวหลาม",
            BambooType::RaiPhak => "ไผ่ไร่และไผ่ผาก",
        }
    }
}

impl FromStr for BambooType {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BambooType::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s) || b.thai_label() == s)
            .ok_or_else(|| TaxonomyError::UnknownLabel {
                kind: "bamboo type",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for BambooType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Forest type used to pick a general tree equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ForestType {
    /// Tropical rain forest, dry evergreen and hill evergreen forest
    Rainforest,
    /// Dry dipterocarp and mixed deciduous forest
    Deciduous,
    /// Hill pine forest
    Pine,
    /// Mangrove forest (species-specific equations)
    Mangrove,
}

impl ForestType {
    pub const ALL: [ForestType; 4] = [
        ForestType::Rainforest,
        ForestType::Deciduous,
        ForestType::Pine,
        ForestType::Mangrove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ForestType::Rainforest => "Rainforest",
            ForestType::Deciduous => "Deciduous",
            ForestType::Pine => "Pine",
            ForestType::Mangrove => "Mangrove",
        }
    }

    pub fn thai_label(self) -> &'static str {
        match self {
            ForestType::Rainforest => "ป่าดิบชื้น/ป่าดิบแล้ง/ป่าดิบเขา",
            ForestType::Deciduous => "ป่าเต็งรัง/ป่าเบญจพรรณ",
            ForestType::Pine => "ป่าสนเขา",
            ForestType::Mangrove => "ป่าชายเลน",
        }
    }
}

impl FromStr for ForestType {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ForestType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s) || t.thai_label() == s)
            .ok_or_else(|| TaxonomyError::UnknownLabel {
                kind: "forest type",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for ForestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mangrove species with their own log-linear biomass equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MangroveSpecies {
    /// *Avicennia alba*
    SamaeKhao,
    /// *Avicennia officinalis*
    SamaeDam,
    /// *Bruguiera cylindrica*
    TuaKhao,
    /// *Bruguiera parviflora*
    TuaDam,
    /// *Bruguiera gymnorrhiza*
    Phangka,
    /// *Ceriops tagal*
    ProngDaeng,
    /// *Rhizophora apiculata*
    KongKangLek,
    /// *Rhizophora mucronata*
    KongKangYai,
    /// *Sonneratia alba*
    Lamphu,
    /// *Xylocarpus granatum*
    TaboonKhao,
    /// *Xylocarpus moluccensis*
    TaboonDam,
}

impl MangroveSpecies {
    pub const ALL: [MangroveSpecies; 11] = [
        MangroveSpecies::SamaeKhao,
        MangroveSpecies::SamaeDam,
        MangroveSpecies::TuaKhao,
        MangroveSpecies::TuaDam,
        MangroveSpecies::Phangka,
        MangroveSpecies::ProngDaeng,
        MangroveSpecies::KongKangLek,
        MangroveSpecies::KongKangYai,
        MangroveSpecies::Lamphu,
        MangroveSpecies::TaboonKhao,
        MangroveSpecies::TaboonDam,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MangroveSpecies::SamaeKhao => "SamaeKhao",
            MangroveSpecies::SamaeDam => "SamaeDam",
            MangroveSpecies::TuaKhao => "TuaKhao",
            MangroveSpecies::TuaDam => "TuaDam",
            MangroveSpecies::Phangka => "Phangka",
            MangroveSpecies::ProngDaeng => "ProngDaeng",
            MangroveSpecies::KongKangLek => "KongKangLek",
            MangroveSpecies::KongKangYai => "KongKangYai",
            MangroveSpecies::Lamphu => "Lamphu",
            MangroveSpecies::TaboonKhao => "TaboonKhao",
            MangroveSpecies::TaboonDam => "TaboonDam",
        }
    }

    pub fn thai_label(self) -> &'static str {
        match self {
            MangroveSpecies::SamaeKhao => "แสมขาว",
            MangroveSpecies::SamaeDam => "แสมดำ",
            MangroveSpecies::TuaKhao => "ถั่วขาว",
            MangroveSpecies::TuaDam => "ถั่วดำ",
            MangroveSpecies::Phangka => "พังกาหัวสุมดอกแดง",
            MangroveSpecies::ProngDaeng => "โปรงแดง",
            MangroveSpecies::KongKangLek => "โกงกางใบเล็ก",
            MangroveSpecies::KongKangYai => "โกงกางใบใหญ่",
            MangroveSpecies::Lamphu => "ลำพูทะเล",
            MangroveSpecies::TaboonKhao => "ตะบูนขาว",
            MangroveSpecies::TaboonDam => "ตะบูนดำ",
        }
    }
}

impl FromStr for MangroveSpecies {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MangroveSpecies::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s) || m.thai_label() == s)
            .ok_or_else(|| TaxonomyError::UnknownLabel {
                kind: "mangrove species",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for MangroveSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus whichever subtype selectors the caller supplied
///
/// Selectors that do not apply to the category are allowed and kept as
/// given; equation resolution only reads the selector relevant to the
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonSelection {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bamboo_type: Option<BambooType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forest_type: Option<ForestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mangrove_species: Option<MangroveSpecies>,
}

impl TaxonSelection {
    /// Category with no subtype selectors
    pub fn new(category: Category) -> Self {
        Self {
            category,
            bamboo_type: None,
            forest_type: None,
            mangrove_species: None,
        }
    }

    pub fn vine() -> Self {
        Self::new(Category::Vine)
    }

    pub fn bamboo(bamboo_type: BambooType) -> Self {
        Self {
            bamboo_type: Some(bamboo_type),
            ..Self::new(Category::Bamboo)
        }
    }

    /// General forest tree. For mangrove forest use [`TaxonSelection::mangrove`].
    pub fn tree(forest_type: ForestType) -> Self {
        Self {
            forest_type: Some(forest_type),
            ..Self::new(Category::Tree)
        }
    }

    pub fn mangrove(species: MangroveSpecies) -> Self {
        Self {
            forest_type: Some(ForestType::Mangrove),
            mangrove_species: Some(species),
            ..Self::new(Category::Tree)
        }
    }

    /// Key identifying the taxonomic class this selection belongs to
    ///
    /// Present fields are joined in the fixed order category, bamboo type,
    /// forest type, mangrove species; absent fields are skipped.
    pub fn grouping_key(&self) -> String {
        let parts = [
            Some(self.category.name()),
            self.bamboo_type.map(BambooType::name),
            self.forest_type.map(ForestType::name),
            self.mangrove_species.map(MangroveSpecies::name),
        ];
        parts
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }
}

impl fmt::Display for TaxonSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grouping_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_key_skips_absent_selectors() {
        assert_eq!(TaxonSelection::vine().grouping_key(), "Vine");
        assert_eq!(
            TaxonSelection::bamboo(BambooType::KhaoLam).grouping_key(),
            "Bamboo - KhaoLam"
        );
        assert_eq!(
            TaxonSelection::tree(ForestType::Pine).grouping_key(),
            "Tree - Pine"
        );
        assert_eq!(
            TaxonSelection::mangrove(MangroveSpecies::TaboonDam).grouping_key(),
            "Tree - Mangrove - TaboonDam"
        );
    }

    #[test]
    fn test_grouping_key_keeps_inconsistent_selectors() {
        // The key reflects what was recorded, even selectors the equation ignores
        let selection = TaxonSelection {
            mangrove_species: Some(MangroveSpecies::Lamphu),
            ..TaxonSelection::bamboo(BambooType::BongPa)
        };
        assert_eq!(selection.grouping_key(), "Bamboo - BongPa - Lamphu");
        assert_ne!(
            selection.grouping_key(),
            TaxonSelection::bamboo(BambooType::BongPa).grouping_key()
        );
    }

    #[test]
    fn test_parse_english_and_thai_labels() {
        assert_eq!("tree".parse::<Category>().unwrap(), Category::Tree);
        assert_eq!("Bambu".parse::<Category>().unwrap(), Category::Bamboo);
        assert_eq!(
            "ไผ่ไร่และไผ่ผาก".parse::<BambooType>().unwrap(),
            BambooType::RaiPhak
        );
        assert_eq!(
            "ป่าเต็งรัง/ป่าเบญจพรรณ".parse::<ForestType>().unwrap(),
            ForestType::Deciduous
        );
        assert_eq!(
            " KongKangYai ".parse::<MangroveSpecies>().unwrap(),
            MangroveSpecies::KongKangYai
        );
    }

    #[test]
    fn test_parse_unknown_label_is_error() {
        let err = "Cactus".parse::<Category>().unwrap_err();
        assert_eq!(
            err,
            TaxonomyError::UnknownLabel {
                kind: "category",
                label: "Cactus".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown category label 'Cactus'");
        assert!("โกงกาง".parse::<MangroveSpecies>().is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for species in MangroveSpecies::ALL {
            assert_eq!(species.thai_label().parse::<MangroveSpecies>(), Ok(species));
            assert_eq!(species.to_string().parse::<MangroveSpecies>(), Ok(species));
        }
        for forest in ForestType::ALL {
            assert_eq!(forest.thai_label().parse::<ForestType>(), Ok(forest));
        }
    }

    #[test]
    fn test_deserialize_legacy_category_spelling() {
        let selection: TaxonSelection =
            serde_json::from_str(r#"{"category":"Bambu","bamboo_type":"BongDam"}"#).unwrap();
        assert_eq!(selection, TaxonSelection::bamboo(BambooType::BongDam));
    }
}
