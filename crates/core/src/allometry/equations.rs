//! Allometric coefficient table
//!
//! Every supported equation is a compile-time constant. Three shapes occur:
//!
//! 1. **Direct power law** (vines, bamboo): `W = a · D^b`
//! 2. **Three-component power law** (general forest trees): with `X = D²H`,
//!    stem, branch and leaf each follow `W = a · X^b`, except in deciduous
//!    forest where leaf mass is `1 / (28 / (Ws + Wb) + 0.025)`
//! 3. **Log-linear** (mangroves): with `X = D²H`, each component follows
//!    `log10 W = a + b · log10 X`; the two *Rhizophora* species add a
//!    prop-root component

use crate::core_types::taxonomy::{BambooType, MangroveSpecies};

/// `W = a · x^b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub a: f64,
    pub b: f64,
}

impl PowerLaw {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        self.a * x.powf(self.b)
    }
}

/// `log10 W = intercept + slope · log10 X`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLinear {
    pub intercept: f64,
    pub slope: f64,
}

impl LogLinear {
    pub const fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Component mass for an already log-transformed `X`
    #[inline]
    pub fn apply(self, log_x: f64) -> f64 {
        10f64.powf(self.intercept + self.slope * log_x)
    }
}

/// Leaf mass model of a general forest-tree equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafModel {
    PowerLaw(PowerLaw),
    /// `Wl = 1 / (28 / (Ws + Wb) + 0.025)`
    DeciduousCorrection,
}

/// Numerator of the deciduous leaf correction (kg)
const DECIDUOUS_LEAF_NUMERATOR: f64 = 28.0;
/// Offset of the deciduous leaf correction (1/kg)
const DECIDUOUS_LEAF_OFFSET: f64 = 0.025;

impl LeafModel {
    /// Leaf mass given `X = D²H` and the woody (stem + branch) mass
    pub fn apply(self, x: f64, woody: f64) -> f64 {
        match self {
            LeafModel::PowerLaw(law) => law.apply(x),
            LeafModel::DeciduousCorrection => {
                1.0 / (DECIDUOUS_LEAF_NUMERATOR / woody + DECIDUOUS_LEAF_OFFSET)
            }
        }
    }
}

/// Stem, branch and leaf equations for one forest type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestTreeCoefficients {
    pub stem: PowerLaw,
    pub branch: PowerLaw,
    pub leaf: LeafModel,
}

/// Per-component log-linear equations for one mangrove species
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MangroveCoefficients {
    pub stem: LogLinear,
    pub branch: LogLinear,
    pub leaf: LogLinear,
    pub prop_root: Option<LogLinear>,
}

/// A resolved equation with its coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equation {
    /// `W = a · D^b`, height not used
    Direct(PowerLaw),
    /// Stem + branch + leaf over `X = D²H`
    ForestTree(ForestTreeCoefficients),
    /// Log-linear components over `log10(D²H)`
    Mangrove(MangroveCoefficients),
}

// ============================================================================
// DIRECT POWER LAW: VINES AND BAMBOO
// ============================================================================

pub const VINE: PowerLaw = PowerLaw::new(0.8622, 2.0210);

pub const fn bamboo(bamboo_type: BambooType) -> PowerLaw {
    match bamboo_type {
        BambooType::BongPa => PowerLaw::new(0.1466, 0.7187),
        BambooType::BongDam => PowerLaw::new(0.49522, 0.8726),
        BambooType::KhaoLam => PowerLaw::new(0.17466, 1.0437),
        BambooType::RaiPhak => PowerLaw::new(0.2425, 1.0751),
    }
}

// ============================================================================
// THREE-COMPONENT POWER LAW: GENERAL FOREST TREES
// ============================================================================

/// Tropical rain, dry evergreen and hill evergreen forest (Tsutsumi et al. 1983)
pub const RAINFOREST: ForestTreeCoefficients = ForestTreeCoefficients {
    stem: PowerLaw::new(0.0509, 0.919),
    branch: PowerLaw::new(0.00893, 0.977),
    leaf: LeafModel::PowerLaw(PowerLaw::new(0.0140, 0.669)),
};

/// Dry dipterocarp and mixed deciduous forest (Ogawa et al. 1965)
pub const DECIDUOUS: ForestTreeCoefficients = ForestTreeCoefficients {
    stem: PowerLaw::new(0.0396, 0.9326),
    branch: PowerLaw::new(0.003487, 1.027),
    leaf: LeafModel::DeciduousCorrection,
};

/// Hill pine forest
pub const PINE: ForestTreeCoefficients = ForestTreeCoefficients {
    stem: PowerLaw::new(0.02141, 0.9814),
    branch: PowerLaw::new(0.00002, 1.4561),
    leaf: LeafModel::PowerLaw(PowerLaw::new(0.00030, 1.0138)),
};

// ============================================================================
// LOG-LINEAR: MANGROVE SPECIES
// ============================================================================

const fn mangrove3(stem: (f64, f64), branch: (f64, f64), leaf: (f64, f64)) -> MangroveCoefficients {
    MangroveCoefficients {
        stem: LogLinear::new(stem.0, stem.1),
        branch: LogLinear::new(branch.0, branch.1),
        leaf: LogLinear::new(leaf.0, leaf.1),
        prop_root: None,
    }
}

const fn mangrove4(
    stem: (f64, f64),
    branch: (f64, f64),
    leaf: (f64, f64),
    prop_root: (f64, f64),
) -> MangroveCoefficients {
    MangroveCoefficients {
        prop_root: Some(LogLinear::new(prop_root.0, prop_root.1)),
        ..mangrove3(stem, branch, leaf)
    }
}

pub const fn mangrove(species: MangroveSpecies) -> MangroveCoefficients {
    match species {
        MangroveSpecies::SamaeKhao => {
            mangrove3((0.5063, 0.0442), (0.2619, 0.0315), (0.0940, 0.0310))
        }
        MangroveSpecies::SamaeDam => {
            mangrove3((0.3389, 0.0570), (0.0775, 0.0403), (0.1119, 0.0392))
        }
        MangroveSpecies::TuaKhao => mangrove3((0.4754, 0.0413), (0.4325, 0.0382), (0.1984, 0.0349)),
        // Stem slope is 0.458 in the published table, an order above its neighbours
        MangroveSpecies::TuaDam => mangrove3((0.3470, 0.458), (0.6811, 0.0659), (0.2965, 0.0393)),
        MangroveSpecies::Phangka => mangrove3((0.4703, 0.0437), (0.0443, 0.0551), (0.1266, 0.0283)),
        MangroveSpecies::ProngDaeng => {
            mangrove3((0.2432, 0.0587), (-0.4632, 0.0625), (-0.4187, 0.0529))
        }
        MangroveSpecies::KongKangLek => mangrove4(
            (0.8074, 0.0289),
            (-0.2344, 0.0424),
            (-0.682, 0.0277),
            (-0.7566, 0.0311),
        ),
        MangroveSpecies::KongKangYai => mangrove4(
            (0.6171, 0.0357),
            (-0.3606, 0.0467),
            (-0.3778, 0.0360),
            (-0.6908, 0.0496),
        ),
        MangroveSpecies::Lamphu => {
            mangrove3((0.2520, 0.0507), (-0.3567, 0.0449), (-0.4976, 0.0418))
        }
        MangroveSpecies::TaboonKhao => {
            mangrove3((0.2374, 0.0589), (-0.5046, 0.0637), (-0.5179, 0.0558))
        }
        MangroveSpecies::TaboonDam => {
            mangrove3((0.2572, 0.0566), (-0.7659, 0.0562), (-0.7823, 0.0511))
        }
    }
}
