//! C-compatible selectors and measurement input.
//!
//! Input and record structs carry selectors as raw `int32_t` discriminants
//! so that a C caller can never hand Rust an invalid enum value; they are
//! validated here and reported as `InvalidSelector`. Output-only structs use
//! the typed enums.

use carbon_stock_core::{
    BambooType, Category, Centimeters, ForestType, IndicesInput, MangroveSpecies, Measurement,
    Meters, TaxonSelection,
};

use crate::error::DefaultCarbonStockError;

/// Plant category. Always present.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonCategory {
    Tree = 0,
    Bamboo = 1,
    Vine = 2,
}

/// Bamboo clump type, `None` when not selected.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonBambooType {
    None = 0,
    BongPa = 1,
    BongDam = 2,
    KhaoLam = 3,
    RaiPhak = 4,
}

/// Forest type for trees, `None` when not selected.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonForestType {
    None = 0,
    Rainforest = 1,
    Deciduous = 2,
    Pine = 3,
    Mangrove = 4,
}

/// Mangrove species, `None` when not selected.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonMangroveSpecies {
    None = 0,
    SamaeKhao = 1,
    SamaeDam = 2,
    TuaKhao = 3,
    TuaDam = 4,
    Phangka = 5,
    ProngDaeng = 6,
    KongKangLek = 7,
    KongKangYai = 8,
    Lamphu = 9,
    TaboonKhao = 10,
    TaboonDam = 11,
}

impl CarbonCategory {
    /// Validate a raw discriminant received from C.
    pub(crate) fn from_raw(raw: i32) -> Result<Self, DefaultCarbonStockError> {
        match raw {
            0 => Ok(Self::Tree),
            1 => Ok(Self::Bamboo),
            2 => Ok(Self::Vine),
            _ => Err(DefaultCarbonStockError::invalid_selector("CarbonCategory", raw)),
        }
    }
}

impl CarbonBambooType {
    /// Validate a raw discriminant received from C.
    pub(crate) fn from_raw(raw: i32) -> Result<Self, DefaultCarbonStockError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::BongPa),
            2 => Ok(Self::BongDam),
            3 => Ok(Self::KhaoLam),
            4 => Ok(Self::RaiPhak),
            _ => Err(DefaultCarbonStockError::invalid_selector("CarbonBambooType", raw)),
        }
    }
}

impl CarbonForestType {
    /// Validate a raw discriminant received from C.
    pub(crate) fn from_raw(raw: i32) -> Result<Self, DefaultCarbonStockError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Rainforest),
            2 => Ok(Self::Deciduous),
            3 => Ok(Self::Pine),
            4 => Ok(Self::Mangrove),
            _ => Err(DefaultCarbonStockError::invalid_selector("CarbonForestType", raw)),
        }
    }
}

impl CarbonMangroveSpecies {
    /// Validate a raw discriminant received from C.
    pub(crate) fn from_raw(raw: i32) -> Result<Self, DefaultCarbonStockError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::SamaeKhao),
            2 => Ok(Self::SamaeDam),
            3 => Ok(Self::TuaKhao),
            4 => Ok(Self::TuaDam),
            5 => Ok(Self::Phangka),
            6 => Ok(Self::ProngDaeng),
            7 => Ok(Self::KongKangLek),
            8 => Ok(Self::KongKangYai),
            9 => Ok(Self::Lamphu),
            10 => Ok(Self::TaboonKhao),
            11 => Ok(Self::TaboonDam),
            _ => Err(DefaultCarbonStockError::invalid_selector("CarbonMangroveSpecies", raw)),
        }
    }
}

impl From<CarbonCategory> for Category {
    fn from(value: CarbonCategory) -> Self {
        match value {
            CarbonCategory::Tree => Category::Tree,
            CarbonCategory::Bamboo => Category::Bamboo,
            CarbonCategory::Vine => Category::Vine,
        }
    }
}

impl From<Category> for CarbonCategory {
    fn from(value: Category) -> Self {
        match value {
            Category::Tree => CarbonCategory::Tree,
            Category::Bamboo => CarbonCategory::Bamboo,
            Category::Vine => CarbonCategory::Vine,
        }
    }
}

impl From<CarbonBambooType> for Option<BambooType> {
    fn from(value: CarbonBambooType) -> Self {
        match value {
            CarbonBambooType::None => None,
            CarbonBambooType::BongPa => Some(BambooType::BongPa),
            CarbonBambooType::BongDam => Some(BambooType::BongDam),
            CarbonBambooType::KhaoLam => Some(BambooType::KhaoLam),
            CarbonBambooType::RaiPhak => Some(BambooType::RaiPhak),
        }
    }
}

impl From<Option<BambooType>> for CarbonBambooType {
    fn from(value: Option<BambooType>) -> Self {
        match value {
            None => CarbonBambooType::None,
            Some(BambooType::BongPa) => CarbonBambooType::BongPa,
            Some(BambooType::BongDam) => CarbonBambooType::BongDam,
            Some(BambooType::KhaoLam) => CarbonBambooType::KhaoLam,
            Some(BambooType::RaiPhak) => CarbonBambooType::RaiPhak,
        }
    }
}

impl From<CarbonForestType> for Option<ForestType> {
    fn from(value: CarbonForestType) -> Self {
        match value {
            CarbonForestType::None => None,
            CarbonForestType::Rainforest => Some(ForestType::Rainforest),
            CarbonForestType::Deciduous => Some(ForestType::Deciduous),
            CarbonForestType::Pine => Some(ForestType::Pine),
            CarbonForestType::Mangrove => Some(ForestType::Mangrove),
        }
    }
}

impl From<Option<ForestType>> for CarbonForestType {
    fn from(value: Option<ForestType>) -> Self {
        match value {
            None => CarbonForestType::None,
            Some(ForestType::Rainforest) => CarbonForestType::Rainforest,
            Some(ForestType::Deciduous) => CarbonForestType::Deciduous,
            Some(ForestType::Pine) => CarbonForestType::Pine,
            Some(ForestType::Mangrove) => CarbonForestType::Mangrove,
        }
    }
}

impl From<CarbonMangroveSpecies> for Option<MangroveSpecies> {
    fn from(value: CarbonMangroveSpecies) -> Self {
        match value {
            CarbonMangroveSpecies::None => None,
            CarbonMangroveSpecies::SamaeKhao => Some(MangroveSpecies::SamaeKhao),
            CarbonMangroveSpecies::SamaeDam => Some(MangroveSpecies::SamaeDam),
            CarbonMangroveSpecies::TuaKhao => Some(MangroveSpecies::TuaKhao),
            CarbonMangroveSpecies::TuaDam => Some(MangroveSpecies::TuaDam),
            CarbonMangroveSpecies::Phangka => Some(MangroveSpecies::Phangka),
            CarbonMangroveSpecies::ProngDaeng => Some(MangroveSpecies::ProngDaeng),
            CarbonMangroveSpecies::KongKangLek => Some(MangroveSpecies::KongKangLek),
            CarbonMangroveSpecies::KongKangYai => Some(MangroveSpecies::KongKangYai),
            CarbonMangroveSpecies::Lamphu => Some(MangroveSpecies::Lamphu),
            CarbonMangroveSpecies::TaboonKhao => Some(MangroveSpecies::TaboonKhao),
            CarbonMangroveSpecies::TaboonDam => Some(MangroveSpecies::TaboonDam),
        }
    }
}

impl From<Option<MangroveSpecies>> for CarbonMangroveSpecies {
    fn from(value: Option<MangroveSpecies>) -> Self {
        match value {
            None => CarbonMangroveSpecies::None,
            Some(MangroveSpecies::SamaeKhao) => CarbonMangroveSpecies::SamaeKhao,
            Some(MangroveSpecies::SamaeDam) => CarbonMangroveSpecies::SamaeDam,
            Some(MangroveSpecies::TuaKhao) => CarbonMangroveSpecies::TuaKhao,
            Some(MangroveSpecies::TuaDam) => CarbonMangroveSpecies::TuaDam,
            Some(MangroveSpecies::Phangka) => CarbonMangroveSpecies::Phangka,
            Some(MangroveSpecies::ProngDaeng) => CarbonMangroveSpecies::ProngDaeng,
            Some(MangroveSpecies::KongKangLek) => CarbonMangroveSpecies::KongKangLek,
            Some(MangroveSpecies::KongKangYai) => CarbonMangroveSpecies::KongKangYai,
            Some(MangroveSpecies::Lamphu) => CarbonMangroveSpecies::Lamphu,
            Some(MangroveSpecies::TaboonKhao) => CarbonMangroveSpecies::TaboonKhao,
            Some(MangroveSpecies::TaboonDam) => CarbonMangroveSpecies::TaboonDam,
        }
    }
}

/// Validate raw C selectors and rebuild the core selection.
///
/// Category comes first, then bamboo, forest and mangrove, so the reported
/// selector is the first bad one in that order.
pub(crate) fn taxon_from_raw(
    category: i32,
    bamboo_type: i32,
    forest_type: i32,
    mangrove_species: i32,
) -> Result<TaxonSelection, DefaultCarbonStockError> {
    Ok(TaxonSelection {
        category: CarbonCategory::from_raw(category)?.into(),
        bamboo_type: CarbonBambooType::from_raw(bamboo_type)?.into(),
        forest_type: CarbonForestType::from_raw(forest_type)?.into(),
        mangrove_species: CarbonMangroveSpecies::from_raw(mangrove_species)?.into(),
    })
}

/// One stem measurement as supplied by the caller.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonMeasurement {
    /// Stem diameter in centimeters.
    pub diameter_cm: f64,
    /// Stem height in meters.
    pub height_m: f64,
    /// A `CarbonCategory` discriminant.
    pub category: i32,
    /// A `CarbonBambooType` discriminant, 0 for none.
    pub bamboo_type: i32,
    /// A `CarbonForestType` discriminant, 0 for none.
    pub forest_type: i32,
    /// A `CarbonMangroveSpecies` discriminant, 0 for none.
    pub mangrove_species: i32,
}

impl CarbonMeasurement {
    /// Validate discriminants and finiteness, then build the core measurement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelector` for an out-of-range discriminant and
    /// `InvalidParameter` for a `NaN` or infinite dimension.
    pub(crate) fn to_measurement(self) -> Result<Measurement, DefaultCarbonStockError> {
        if !self.diameter_cm.is_finite() {
            return Err(DefaultCarbonStockError::non_finite("diameter_cm", self.diameter_cm));
        }
        if !self.height_m.is_finite() {
            return Err(DefaultCarbonStockError::non_finite("height_m", self.height_m));
        }

        let taxon = taxon_from_raw(
            self.category,
            self.bamboo_type,
            self.forest_type,
            self.mangrove_species,
        )?;

        Ok(Measurement::new(
            Centimeters::new(self.diameter_cm),
            Meters::new(self.height_m),
            taxon,
        ))
    }
}

/// Plot tallies for the stand-structure ratios.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonIndicesInput {
    pub plot_tree_species: f64,
    pub plots: f64,
    pub cross_tree_specie: f64,
    pub cross: f64,
    pub plant_species: f64,
    pub area: f64,
}

impl From<&CarbonIndicesInput> for IndicesInput {
    fn from(value: &CarbonIndicesInput) -> Self {
        IndicesInput {
            plot_tree_species: value.plot_tree_species,
            plots: value.plots,
            cross_tree_specie: value.cross_tree_specie,
            cross: value.cross,
            plant_species: value.plant_species,
            area: value.area,
        }
    }
}
