use crate::db::XrayDb;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};
use crate::labels::find_edge_label;

/// One Coster-Kronig transition between subshells of the same shell.
#[derive(Debug, Clone, PartialEq)]
pub struct CosterKronig {
    pub initial_level: String,
    pub final_level: String,
    pub probability: f64,
    /// Includes transitions through intermediate subshells.
    pub total_probability: f64,
}

impl XrayDb {
    /// Returns Coster-Kronig transition probability.
    ///
    /// If `total` is true, returns the total transition probability
    /// (including via intermediate states). Otherwise returns the
    /// direct transition probability.
    pub fn ck_probability<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        initial: &str,
        final_level: &str,
        total: bool,
    ) -> Result<f64> {
        let catalog = self.catalog_of(element)?;
        let initials: Vec<&str> = catalog
            .coster_kronig
            .iter()
            .map(|ck| ck.initial_level.as_str())
            .collect();
        let finals: Vec<&str> = catalog
            .coster_kronig
            .iter()
            .map(|ck| ck.final_level.as_str())
            .collect();

        let record = find_edge_label(initial, &initials, &self.label_aliases)
            .zip(find_edge_label(final_level, &finals, &self.label_aliases))
            .and_then(|(i, f)| {
                catalog
                    .coster_kronig
                    .iter()
                    .find(|ck| ck.initial_level == i && ck.final_level == f)
            })
            .ok_or_else(|| XrayDbError::UnknownEdge {
                element: catalog.symbol.clone(),
                edge: format!("{initial}->{final_level}"),
            })?;

        if total {
            Ok(record.total_probability)
        } else {
            Ok(record.probability)
        }
    }
}
