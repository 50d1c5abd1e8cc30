#![no_std]

//! Row types for the XrayDB reference tables.
//!
//! Array-valued columns are kept in the store's textual encoding (a JSON
//! array such as `"[1.0, 2.5, 3.75]"`). Decoding them is the engine's job.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Every table of the store, as persisted in a blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    pub version: Vec<VersionRow>,
    pub elements: Vec<ElementRow>,
    pub xray_levels: Vec<XrayLevelRow>,
    pub xray_transitions: Vec<XrayTransitionRow>,
    pub coster_kronig: Vec<CosterKronigRow>,
    pub corelevel_widths: Vec<CoreWidthRow>,
    pub photoabsorption: Vec<PhotoabsorptionRow>,
    pub scattering: Vec<ScatteringRow>,
    pub chantler: Vec<ChantlerRow>,
    pub waasmaier: Vec<WaasmaierRow>,
    pub label_aliases: Vec<LabelAliasRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRow {
    pub tag: String,
    pub date: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRow {
    pub atomic_number: u16,
    pub symbol: String,
    pub name: String,
    pub molar_mass: f64,
    pub density: f64,
}

/// One absorption edge (X-ray level) of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrayLevelRow {
    pub element: String,
    pub iupac_symbol: String,
    pub absorption_edge: f64,
    pub fluorescence_yield: f64,
    /// Missing for many light elements and outer shells.
    pub jump_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrayTransitionRow {
    pub element: String,
    pub iupac_symbol: String,
    pub siegbahn_symbol: String,
    pub initial_level: String,
    pub final_level: String,
    pub emission_energy: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosterKronigRow {
    pub element: String,
    pub initial_level: String,
    pub final_level: String,
    pub transition_probability: f64,
    pub total_transition_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWidthRow {
    pub atomic_number: u16,
    pub element: String,
    pub edge: String,
    pub width: f64,
}

/// Elam photoabsorption: ln(E), ln(sigma) and spline second derivatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoabsorptionRow {
    pub element: String,
    pub log_energy: String,
    pub log_photoabsorption: String,
    pub log_photoabsorption_spline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringRow {
    pub element: String,
    pub log_energy: String,
    pub log_coherent_scatter: String,
    pub log_coherent_scatter_spline: String,
    pub log_incoherent_scatter: String,
    pub log_incoherent_scatter_spline: String,
}

/// Chantler tabulation. `f1` holds the anomalous part f' (Z already removed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChantlerRow {
    pub element: String,
    pub energy: String,
    pub f1: String,
    pub f2: String,
    pub mu_incoh: Option<String>,
}

/// Waasmaier-Kirfel f0 coefficients for one atom or ion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaasmaierRow {
    pub atomic_number: u16,
    pub element: String,
    pub ion: String,
    pub offset: f64,
    pub scale: String,
    pub exponents: String,
}

/// Alternate spelling of an edge or line label, e.g. `LIII` for `L3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAliasRow {
    pub alias: String,
    pub canonical: String,
}
