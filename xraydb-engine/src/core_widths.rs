use std::collections::HashMap;

use crate::db::XrayDb;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};
use crate::labels::find_edge_label;

/// Core-hole width of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreWidth {
    pub edge: String,
    /// eV
    pub width: f64,
}

impl XrayDb {
    /// Returns the core-hole width (eV) of one edge.
    ///
    /// Many high-Z edges were never measured; those fail with `UnknownEdge`.
    pub fn core_width<'a>(&self, element: impl Into<ElementId<'a>>, edge: &str) -> Result<f64> {
        let catalog = self.catalog_of(element)?;
        let labels: Vec<&str> = catalog.core_widths.iter().map(|w| w.edge.as_str()).collect();
        find_edge_label(edge, &labels, &self.label_aliases)
            .and_then(|label| catalog.core_widths.iter().find(|w| w.edge == label))
            .map(|w| w.width)
            .ok_or_else(|| XrayDbError::UnknownEdge {
                element: catalog.symbol.clone(),
                edge: edge.to_string(),
            })
    }

    /// Returns all recorded core-hole widths (eV) of an element, keyed by edge.
    pub fn core_widths<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<HashMap<String, f64>> {
        let catalog = self.catalog_of(element)?;
        Ok(catalog
            .core_widths
            .iter()
            .map(|w| (w.edge.clone(), w.width))
            .collect())
    }
}
