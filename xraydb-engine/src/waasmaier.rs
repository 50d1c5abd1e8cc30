use std::sync::Arc;

use crate::db::XrayDb;
use crate::decode::decode_floats;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};

const TABLE: &str = "waasmaier";

/// Waasmaier-Kirfel coefficients of one atom or ion.
///
/// f0(q) = offset + sum_i(scale_i * exp(-exponents_i * q^2))
#[derive(Debug, Clone, PartialEq)]
pub struct F0Coefficients {
    pub ion: String,
    pub offset: f64,
    pub scale: Vec<f64>,
    pub exponents: Vec<f64>,
}

impl F0Coefficients {
    /// f0 at q = sin(theta) / lambda, in Å⁻¹.
    pub fn eval(&self, q: f64) -> f64 {
        let q2 = q * q;
        self.offset
            + self
                .scale
                .iter()
                .zip(&self.exponents)
                .map(|(a, b)| a * (-b * q2).exp())
                .sum::<f64>()
    }

    /// The forward value f0(0) = offset + sum(scale).
    pub fn forward(&self) -> f64 {
        self.offset + self.scale.iter().sum::<f64>()
    }
}

/// Element symbol part of an ion label: `Fe3+` -> `Fe`, `O2-.` -> `O`,
/// `Cval` -> `C`.
fn ion_element(ion: &str) -> &str {
    let ion = ion.trim();
    let end = ion
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(ion.len());
    let letters = &ion[..end];
    let lower = letters.to_ascii_lowercase();
    for suffix in ["val", "va"] {
        if lower.len() > suffix.len() && lower.ends_with(suffix) {
            return &letters[..letters.len() - suffix.len()];
        }
    }
    letters
}

impl XrayDb {
    fn f0_table(&self, z: u16) -> Result<Arc<Vec<F0Coefficients>>> {
        self.f0_tables.get_or_try_insert_with(&z, || {
            let symbol = self.symbol(z)?;
            let rows = self.store().waasmaier(symbol);
            if rows.is_empty() {
                return Err(XrayDbError::UnsupportedQuantity {
                    element: symbol.to_string(),
                    quantity: "f0",
                });
            }

            let mut ions = Vec::with_capacity(rows.len());
            for row in rows {
                let scale = decode_floats(&row.scale, TABLE, &row.ion)?;
                let exponents = decode_floats(&row.exponents, TABLE, &row.ion)?;
                if scale.len() != exponents.len() {
                    let err = XrayDbError::malformed(
                        TABLE,
                        &row.ion,
                        format!(
                            "{} amplitudes but {} exponents",
                            scale.len(),
                            exponents.len()
                        ),
                    );
                    log::warn!("{err}");
                    return Err(err);
                }
                ions.push(F0Coefficients {
                    ion: row.ion,
                    offset: row.offset,
                    scale,
                    exponents,
                });
            }
            log::debug!("cached f0 coefficients for {symbol} ({} ions)", ions.len());
            Ok(ions)
        })
    }

    /// Returns the ion labels usable with [`XrayDb::f0`] for an element,
    /// neutral atom first.
    pub fn f0_ions<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<Vec<String>> {
        let z = self.resolve(element)?;
        Ok(self.f0_table(z)?.iter().map(|c| c.ion.clone()).collect())
    }

    /// Returns the coefficient set for an ion label (`Fe`, `fe2+`, ...),
    /// element symbol, name or atomic number. Elements select their neutral
    /// entry.
    pub fn f0_coefficients<'a>(&self, ion: impl Into<ElementId<'a>>) -> Result<F0Coefficients> {
        let id = ion.into();
        let label = match id {
            ElementId::Symbol(label) => label,
            ElementId::Number(_) => {
                let z = self.resolve(id)?;
                let first = self.f0_table(z)?.first().cloned();
                return first.ok_or_else(|| XrayDbError::UnknownIon(id.to_string()));
            }
        };

        let z = self
            .resolve(ion_element(label))
            .or_else(|_| self.resolve(label))
            .map_err(|_| XrayDbError::UnknownIon(label.to_string()))?;
        let table = self.f0_table(z)?;

        if let Some(hit) = table
            .iter()
            .find(|c| c.ion.eq_ignore_ascii_case(label.trim()))
        {
            return Ok(hit.clone());
        }
        // a bare symbol or name selects the neutral atom
        if self.resolve(label).is_ok_and(|found| found == z) {
            if let Some(first) = table.first() {
                return Ok(first.clone());
            }
        }
        Err(XrayDbError::UnknownIon(label.to_string()))
    }

    /// Returns f0 elastic X-ray scattering factor for an ion at one q.
    ///
    /// q = sin(theta) / lambda in Angstroms^-1.
    pub fn f0<'a>(&self, ion: impl Into<ElementId<'a>>, q: f64) -> Result<f64> {
        Ok(self.f0_coefficients(ion)?.eval(q))
    }

    /// Returns f0 at each of `q`.
    pub fn f0_values<'a>(&self, ion: impl Into<ElementId<'a>>, q: &[f64]) -> Result<Vec<f64>> {
        let coefficients = self.f0_coefficients(ion)?;
        Ok(q.iter().map(|&qi| coefficients.eval(qi)).collect())
    }
}
