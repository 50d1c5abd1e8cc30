use std::collections::HashMap;
use std::sync::Arc;

use crate::core_widths::CoreWidth;
use crate::coster_kronig::CosterKronig;
use crate::db::XrayDb;
use crate::elam::CrossSectionKind;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};
use crate::labels::{find_edge_label, find_label, squash};

/// X-ray absorption edge data.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionEdge {
    pub label: String,
    /// eV
    pub energy: f64,
    pub fluorescence_yield: f64,
    /// Absent when the store has no positive value for this edge.
    pub jump_ratio: Option<f64>,
}

/// X-ray emission line data.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionLine {
    /// Siegbahn notation (Ka1, Lb2, ...).
    pub label: String,
    /// IUPAC notation (K-L3, L3-N5, ...).
    pub iupac: String,
    /// eV
    pub energy: f64,
    pub intensity: f64,
    pub initial_level: String,
    pub final_level: String,
}

impl EmissionLine {
    /// The absorption edge this line is emitted from.
    ///
    /// Compound initial levels such as `L1,M1` belong to their first level.
    pub fn edge(&self) -> &str {
        self.initial_level
            .split(',')
            .next()
            .unwrap_or(&self.initial_level)
            .trim()
    }
}

/// Edge, line and relaxation records of one element, decoded once.
pub(crate) struct Catalog {
    pub(crate) symbol: String,
    pub(crate) edges: Vec<AbsorptionEdge>,
    pub(crate) lines: Vec<EmissionLine>,
    pub(crate) coster_kronig: Vec<CosterKronig>,
    pub(crate) core_widths: Vec<CoreWidth>,
}

impl Catalog {
    pub(crate) fn edge_labels(&self) -> Vec<&str> {
        self.edges.iter().map(|e| e.label.as_str()).collect()
    }

    fn find_edge(&self, label: &str, aliases: &HashMap<String, String>) -> Option<&AbsorptionEdge> {
        let labels = self.edge_labels();
        let canonical = find_edge_label(label, &labels, aliases)?;
        self.edges.iter().find(|e| e.label == canonical)
    }

    fn find_line(&self, label: &str, aliases: &HashMap<String, String>) -> Option<&EmissionLine> {
        let labels: Vec<&str> = self.lines.iter().map(|l| l.label.as_str()).collect();
        if let Some(canonical) = find_label(label, &labels, aliases) {
            return self.lines.iter().find(|l| l.label == canonical);
        }
        let iupac: Vec<&str> = self.lines.iter().map(|l| l.iupac.as_str()).collect();
        if let Some(canonical) = find_label(label, &iupac, aliases) {
            return self.lines.iter().find(|l| l.iupac == canonical);
        }
        let wanted = squash(label);
        self.lines.iter().find(|l| squash(&l.iupac) == wanted)
    }
}

impl XrayDb {
    pub(crate) fn catalog(&self, z: u16) -> Result<Arc<Catalog>> {
        self.catalogs.get_or_try_insert_with(&z, || {
            let symbol = self.symbol(z)?.to_string();
            let store = self.store();

            let edges = store
                .xray_levels(&symbol)
                .into_iter()
                .map(|r| AbsorptionEdge {
                    label: r.iupac_symbol,
                    energy: r.absorption_edge,
                    fluorescence_yield: r.fluorescence_yield,
                    jump_ratio: r.jump_ratio.filter(|j| *j > 0.0),
                })
                .collect::<Vec<_>>();

            let lines = store
                .xray_transitions(&symbol)
                .into_iter()
                .map(|r| EmissionLine {
                    label: r.siegbahn_symbol,
                    iupac: r.iupac_symbol,
                    energy: r.emission_energy,
                    intensity: r.intensity,
                    initial_level: r.initial_level,
                    final_level: r.final_level,
                })
                .collect::<Vec<_>>();

            let coster_kronig = store
                .coster_kronig(&symbol)
                .into_iter()
                .map(|r| CosterKronig {
                    initial_level: r.initial_level,
                    final_level: r.final_level,
                    probability: r.transition_probability,
                    total_probability: r.total_transition_probability,
                })
                .collect();

            let core_widths = store
                .corelevel_widths(&symbol)
                .into_iter()
                .map(|r| CoreWidth {
                    edge: r.edge,
                    width: r.width,
                })
                .collect();

            log::debug!(
                "cached catalog for {symbol}: {} edges, {} lines",
                edges.len(),
                lines.len()
            );

            Ok(Catalog {
                symbol,
                edges,
                lines,
                coster_kronig,
                core_widths,
            })
        })
    }

    pub(crate) fn catalog_of<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<Arc<Catalog>> {
        let z = self.resolve(element)?;
        self.catalog(z)
    }

    /// Returns a map of all X-ray absorption edges for an element.
    ///
    /// Keys are IUPAC edge labels (K, L1, L2, L3, M1, ...). An element
    /// without recorded edges gives an empty map.
    pub fn edges<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
    ) -> Result<HashMap<String, AbsorptionEdge>> {
        let catalog = self.catalog_of(element)?;
        Ok(catalog
            .edges
            .iter()
            .map(|e| (e.label.clone(), e.clone()))
            .collect())
    }

    /// Returns data for a specific X-ray edge.
    pub fn edge<'a>(&self, element: impl Into<ElementId<'a>>, label: &str) -> Result<AbsorptionEdge> {
        let catalog = self.catalog_of(element)?;
        catalog
            .find_edge(label, &self.label_aliases)
            .cloned()
            .ok_or_else(|| XrayDbError::UnknownEdge {
                element: catalog.symbol.clone(),
                edge: label.to_string(),
            })
    }

    /// Returns a map of all X-ray emission lines for an element.
    ///
    /// Keys are Siegbahn labels (Ka1, Ka2, Kb1, La1, ...).
    pub fn lines<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
    ) -> Result<HashMap<String, EmissionLine>> {
        self.xray_lines(element, None, None)
    }

    /// Returns one emission line, by Siegbahn or IUPAC label.
    pub fn line<'a>(&self, element: impl Into<ElementId<'a>>, label: &str) -> Result<EmissionLine> {
        let catalog = self.catalog_of(element)?;
        catalog
            .find_line(label, &self.label_aliases)
            .cloned()
            .ok_or_else(|| XrayDbError::UnknownLine {
                element: catalog.symbol.clone(),
                line: label.to_string(),
            })
    }

    /// Returns emission lines, optionally restricted.
    ///
    /// If `initial_level` is provided, returns only lines emitted from that
    /// edge. If `excitation_energy` is provided, returns only lines whose
    /// edge lies below that energy (eV).
    pub fn xray_lines<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        initial_level: Option<&str>,
        excitation_energy: Option<f64>,
    ) -> Result<HashMap<String, EmissionLine>> {
        let catalog = self.catalog_of(element)?;

        let level = match initial_level {
            Some(requested) => {
                let mut known = catalog.edge_labels();
                known.extend(catalog.lines.iter().map(EmissionLine::edge));
                let canonical = find_edge_label(requested, &known, &self.label_aliases)
                    .ok_or_else(|| XrayDbError::UnknownEdge {
                        element: catalog.symbol.clone(),
                        edge: requested.to_string(),
                    })?;
                Some(canonical.to_string())
            }
            None => None,
        };

        let mut lines = HashMap::new();
        for line in &catalog.lines {
            if level.as_deref().is_some_and(|l| line.edge() != l) {
                continue;
            }
            if let Some(max_energy) = excitation_energy {
                let excited = catalog
                    .edges
                    .iter()
                    .any(|e| e.label == line.edge() && e.energy < max_energy);
                if !excited {
                    continue;
                }
            }
            lines.insert(line.label.clone(), line.clone());
        }
        Ok(lines)
    }

    /// Returns `(fluorescence_yield, weighted_energy)` for an edge.
    ///
    /// The energy is the intensity-weighted mean of all lines emitted from
    /// the edge. Fails with `UnknownEdge` when the edge is missing or has no
    /// lines, and with `ZeroLineIntensity` when its lines carry no intensity.
    pub fn fluorescence_yield<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        edge: &str,
    ) -> Result<(f64, f64)> {
        let catalog = self.catalog_of(element)?;
        let unknown = || XrayDbError::UnknownEdge {
            element: catalog.symbol.clone(),
            edge: edge.to_string(),
        };
        let record = catalog.find_edge(edge, &self.label_aliases).ok_or_else(unknown)?;

        let (mut weight, mut weighted) = (0.0, 0.0);
        let mut count = 0;
        for line in catalog.lines.iter().filter(|l| l.edge() == record.label) {
            weight += line.intensity;
            weighted += line.intensity * line.energy;
            count += 1;
        }

        if count == 0 {
            return Err(unknown());
        }
        if weight == 0.0 {
            return Err(XrayDbError::ZeroLineIntensity {
                element: catalog.symbol.clone(),
                edge: record.label.clone(),
            });
        }
        Ok((record.fluorescence_yield, weighted / weight))
    }

    /// Returns the absolute fluorescence strength (cm²/g) of each line.
    ///
    /// Strength is the Elam photo-absorption jump across the line's edge
    /// times the line's relative intensity times the edge's fluorescence
    /// yield. Lines whose edge is not recorded are left out.
    pub fn xray_line_strengths<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        excitation_energy: Option<f64>,
    ) -> Result<HashMap<String, f64>> {
        let z = self.resolve(element)?;
        let catalog = self.catalog(z)?;
        let lines = self.xray_lines(z, None, excitation_energy)?;

        let mut strengths = HashMap::new();
        for (label, line) in lines {
            let Some(edge) = catalog.edges.iter().find(|e| e.label == line.edge()) else {
                continue;
            };
            let below = self.cross_section(z, CrossSectionKind::Photo, edge.energy * 0.999)?;
            let above = self.cross_section(z, CrossSectionKind::Photo, edge.energy * 1.001)?;
            strengths.insert(
                label,
                (above - below) * line.intensity * edge.fluorescence_yield,
            );
        }
        Ok(strengths)
    }
}
