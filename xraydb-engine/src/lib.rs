//! Query and interpolation engine over X-ray reference tables.
//!
//! An [`XrayDb`] is built over any [`TableStore`]. Element constants are
//! indexed up front; edge catalogs and Elam, Chantler and Waasmaier-Kirfel
//! coefficient sets are decoded on first use and cached per instance.

pub(crate) mod cache;
pub mod chantler;
pub mod config;
pub mod constants;
pub mod core_widths;
pub mod coster_kronig;
pub mod db;
pub mod decode;
pub mod elam;
pub mod element;
pub mod error;
pub mod interp;
pub(crate) mod labels;
pub mod spline;
pub mod store;
pub mod transitions;
pub mod waasmaier;

pub use chantler::{ChantlerKind, ChantlerValue};
pub use config::{Config, OutOfRange};
pub use core_widths::CoreWidth;
pub use coster_kronig::CosterKronig;
pub use db::XrayDb;
pub use elam::CrossSectionKind;
pub use element::{Element, ElementId};
pub use error::{Result, XrayDbError};
pub use store::{MemoryStore, TableStore, encode_blob};
pub use transitions::{AbsorptionEdge, EmissionLine};
pub use waasmaier::F0Coefficients;
pub use xraydb_tables;
