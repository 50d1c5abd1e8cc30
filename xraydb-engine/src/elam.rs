use std::sync::Arc;

use crate::config::OutOfRange;
use crate::db::XrayDb;
use crate::decode::decode_floats;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};
use crate::spline::elam_spline_one;

/// Kind of cross-section for Elam calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossSectionKind {
    Photo,
    Coherent,
    Incoherent,
    /// Sum of the three above.
    Total,
}

impl CrossSectionKind {
    fn table_name(self) -> &'static str {
        match self {
            Self::Photo => "photoabsorption",
            Self::Coherent => "coherent scattering",
            Self::Incoherent => "incoherent scattering",
            Self::Total => "total attenuation",
        }
    }
}

const PARTS: [CrossSectionKind; 3] = [
    CrossSectionKind::Photo,
    CrossSectionKind::Coherent,
    CrossSectionKind::Incoherent,
];

/// One decoded Elam table: ln(E) knots, ln(sigma) values and spline terms.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElamTable {
    log_energy: Vec<f64>,
    log_value: Vec<f64>,
    spline: Vec<f64>,
}

impl ElamTable {
    pub(crate) fn decode(
        table: &'static str,
        element: &str,
        log_energy: &str,
        log_value: &str,
        spline: &str,
    ) -> Result<Self> {
        let log_energy = decode_floats(log_energy, table, element)?;
        let log_value = decode_floats(log_value, table, element)?;
        let spline = decode_floats(spline, table, element)?;

        let n = log_energy.len();
        if log_value.len() != n || spline.len() != n {
            return Err(XrayDbError::malformed(
                table,
                element,
                format!(
                    "column lengths differ: {n} energies, {} values, {} spline terms",
                    log_value.len(),
                    spline.len()
                ),
            ));
        }
        if n < 2 {
            return Err(XrayDbError::malformed(table, element, "fewer than two knots"));
        }
        if let Some(i) = log_energy.windows(2).position(|w| w[1] < w[0]) {
            return Err(XrayDbError::malformed(
                table,
                element,
                format!("energies decrease at index {}", i + 1),
            ));
        }
        // an edge is exactly two equal knots, never three, and never at either end
        if log_energy.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
            || log_energy[0] == log_energy[1]
            || log_energy[n - 2] == log_energy[n - 1]
        {
            return Err(XrayDbError::malformed(
                table,
                element,
                "repeated energy outside an edge pair",
            ));
        }

        Ok(ElamTable {
            log_energy,
            log_value,
            spline,
        })
    }

    /// Tabulated energy range in eV.
    pub(crate) fn domain(&self) -> (f64, f64) {
        let n = self.log_energy.len();
        (self.log_energy[0].exp(), self.log_energy[n - 1].exp())
    }

    pub(crate) fn eval(&self, energy: f64, policy: OutOfRange) -> Result<f64> {
        let (emin, emax) = self.domain();
        if !(energy > 0.0 && energy.is_finite()) {
            return Err(XrayDbError::OutOfDomain {
                value: energy,
                min: emin,
                max: emax,
            });
        }

        let energy = if energy < emin || energy > emax {
            match policy {
                OutOfRange::Extrapolate => energy,
                OutOfRange::Clamp => energy.clamp(emin, emax),
                OutOfRange::Reject => {
                    return Err(XrayDbError::OutOfDomain {
                        value: energy,
                        min: emin,
                        max: emax,
                    });
                }
            }
        } else {
            energy
        };

        Ok(elam_spline_one(&self.log_energy, &self.log_value, &self.spline, energy.ln()).exp())
    }
}

impl XrayDb {
    fn elam_table(&self, z: u16, kind: CrossSectionKind) -> Result<Arc<ElamTable>> {
        self.elam_tables.get_or_try_insert_with(&(z, kind), || {
            let symbol = self.symbol(z)?;
            let unsupported = || XrayDbError::UnsupportedQuantity {
                element: symbol.to_string(),
                quantity: kind.table_name(),
            };

            let table = match kind {
                CrossSectionKind::Photo => {
                    let row = self.store().photoabsorption(symbol).ok_or_else(unsupported)?;
                    ElamTable::decode(
                        "photoabsorption",
                        symbol,
                        &row.log_energy,
                        &row.log_photoabsorption,
                        &row.log_photoabsorption_spline,
                    )
                }
                CrossSectionKind::Coherent => {
                    let row = self.store().scattering(symbol).ok_or_else(unsupported)?;
                    ElamTable::decode(
                        "coherent scattering",
                        symbol,
                        &row.log_energy,
                        &row.log_coherent_scatter,
                        &row.log_coherent_scatter_spline,
                    )
                }
                CrossSectionKind::Incoherent => {
                    let row = self.store().scattering(symbol).ok_or_else(unsupported)?;
                    ElamTable::decode(
                        "incoherent scattering",
                        symbol,
                        &row.log_energy,
                        &row.log_incoherent_scatter,
                        &row.log_incoherent_scatter_spline,
                    )
                }
                CrossSectionKind::Total => return Err(unsupported()),
            };

            match &table {
                Ok(t) => log::debug!(
                    "cached Elam {} table for {symbol} ({} knots)",
                    kind.table_name(),
                    t.log_energy.len()
                ),
                Err(e) => log::warn!("{e}"),
            }
            table
        })
    }

    /// Returns the Elam cross-section in cm²/g at one energy (eV).
    ///
    /// Energies outside the tabulated range follow
    /// [`Config::elam_out_of_range`](crate::Config); by default the end
    /// segment is extended. Use [`XrayDb::elam_domain`] to see the range.
    pub fn cross_section<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        kind: CrossSectionKind,
        energy: f64,
    ) -> Result<f64> {
        let z = self.resolve(element)?;
        let policy = self.config().elam_out_of_range;
        match kind {
            CrossSectionKind::Total => PARTS
                .iter()
                .map(|&part| self.elam_table(z, part)?.eval(energy, policy))
                .sum(),
            part => self.elam_table(z, part)?.eval(energy, policy),
        }
    }

    /// Returns mass attenuation cross-section in cm²/g using Elam tables,
    /// one value per energy (eV).
    pub fn mu_elam<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energies: &[f64],
        kind: CrossSectionKind,
    ) -> Result<Vec<f64>> {
        let z = self.resolve(element)?;
        energies
            .iter()
            .map(|&e| self.cross_section(z, kind, e))
            .collect()
    }

    pub fn coherent_cross_section_elam<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energies: &[f64],
    ) -> Result<Vec<f64>> {
        self.mu_elam(element, energies, CrossSectionKind::Coherent)
    }

    pub fn incoherent_cross_section_elam<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energies: &[f64],
    ) -> Result<Vec<f64>> {
        self.mu_elam(element, energies, CrossSectionKind::Incoherent)
    }

    /// Tabulated energy range (eV) of an Elam table. For `Total`, the range
    /// covered by all three parts.
    pub fn elam_domain<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        kind: CrossSectionKind,
    ) -> Result<(f64, f64)> {
        let z = self.resolve(element)?;
        match kind {
            CrossSectionKind::Total => PARTS.iter().try_fold(
                (f64::NEG_INFINITY, f64::INFINITY),
                |(lo, hi), &part| {
                    let (a, b) = self.elam_table(z, part)?.domain();
                    Ok::<_, XrayDbError>((lo.max(a), hi.min(b)))
                },
            ),
            part => Ok(self.elam_table(z, part)?.domain()),
        }
    }

    /// `Ok(())` when `energy` lies inside the tabulated range, otherwise
    /// `OutOfDomain`. Does not evaluate anything.
    pub fn check_elam_energy<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        kind: CrossSectionKind,
        energy: f64,
    ) -> Result<()> {
        let (min, max) = self.elam_domain(element, kind)?;
        if energy >= min && energy <= max {
            Ok(())
        } else {
            Err(XrayDbError::OutOfDomain {
                value: energy,
                min,
                max,
            })
        }
    }
}
