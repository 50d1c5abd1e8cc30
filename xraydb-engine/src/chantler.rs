use std::sync::Arc;

use xraydb_tables::ChantlerRow;

use crate::config::OutOfRange;
use crate::constants::f2_to_mu;
use crate::db::XrayDb;
use crate::decode::decode_floats;
use crate::element::ElementId;
use crate::error::{Result, XrayDbError};
use crate::interp::{interp_loglog_one, interp_offset_loglog_one, outside};

/// Kind of Chantler cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChantlerKind {
    Total,
    /// Derived from f″; no tabulated column is read.
    Photo,
    Incoherent,
}

/// A value interpolated from the Chantler grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChantlerValue {
    pub value: f64,
    /// The requested energy lay outside the tabulated grid, so the value was
    /// extrapolated (or clamped, depending on configuration).
    pub extrapolated: bool,
}

const TABLE: &str = "chantler";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChantlerTable {
    atomic_number: f64,
    molar_mass: f64,
    energy: Vec<f64>,
    f1: Vec<f64>,
    f2: Vec<f64>,
    mu_incoh: Option<Vec<f64>>,
}

impl ChantlerTable {
    pub(crate) fn decode(
        row: &ChantlerRow,
        atomic_number: u16,
        molar_mass: f64,
        log_floor: f64,
    ) -> Result<Self> {
        let element = row.element.as_str();
        let energy = decode_floats(&row.energy, TABLE, element)?;
        let f1 = decode_floats(&row.f1, TABLE, element)?;
        let f2 = decode_floats(&row.f2, TABLE, element)?;
        let mu_incoh = row
            .mu_incoh
            .as_deref()
            .map(|text| decode_floats(text, TABLE, element))
            .transpose()?;

        let n = energy.len();
        if n < 2 {
            return Err(XrayDbError::malformed(TABLE, element, "fewer than two energies"));
        }
        if energy[0] <= 0.0 {
            return Err(XrayDbError::malformed(TABLE, element, "non-positive energy"));
        }
        if let Some(i) = energy.windows(2).position(|w| w[1] <= w[0]) {
            return Err(XrayDbError::malformed(
                TABLE,
                element,
                format!("energies not strictly increasing at index {}", i + 1),
            ));
        }
        let lengths_match = f1.len() == n
            && f2.len() == n
            && mu_incoh.as_ref().is_none_or(|m| m.len() == n);
        if !lengths_match {
            return Err(XrayDbError::malformed(
                TABLE,
                element,
                format!("column lengths differ from the {n} energies"),
            ));
        }

        let floor = |v: Vec<f64>| -> Vec<f64> { v.into_iter().map(|x| x.max(log_floor)).collect() };
        Ok(ChantlerTable {
            atomic_number: f64::from(atomic_number),
            molar_mass,
            energy,
            f1,
            f2: floor(f2),
            mu_incoh: mu_incoh.map(floor),
        })
    }

    pub(crate) fn domain(&self) -> (f64, f64) {
        (self.energy[0], self.energy[self.energy.len() - 1])
    }

    /// Energy to evaluate at, and whether the request was off-grid.
    fn locate(&self, energy: f64, policy: OutOfRange) -> Result<(f64, bool)> {
        let (min, max) = self.domain();
        if !(energy > 0.0 && energy.is_finite()) {
            return Err(XrayDbError::OutOfDomain {
                value: energy,
                min,
                max,
            });
        }
        if !outside(&self.energy, energy) {
            return Ok((energy, false));
        }
        match policy {
            OutOfRange::Extrapolate => Ok((energy, true)),
            OutOfRange::Clamp => Ok((energy.clamp(min, max), true)),
            OutOfRange::Reject => Err(XrayDbError::OutOfDomain {
                value: energy,
                min,
                max,
            }),
        }
    }

    /// f′ is interpolated as f′ + Z, which stays positive where f′ itself
    /// crosses zero near an edge.
    fn f1(&self, energy: f64) -> f64 {
        interp_offset_loglog_one(energy, &self.energy, &self.f1, self.atomic_number)
    }

    fn f2(&self, energy: f64) -> f64 {
        interp_loglog_one(energy, &self.energy, &self.f2)
    }

    fn mu_photo(&self, energy: f64) -> f64 {
        f2_to_mu(self.f2(energy), energy, self.molar_mass)
    }

    fn mu_incoh(&self, energy: f64) -> Option<f64> {
        self.mu_incoh
            .as_ref()
            .map(|mu| interp_loglog_one(energy, &self.energy, mu))
    }
}

impl XrayDb {
    fn chantler_table(&self, z: u16) -> Result<Arc<ChantlerTable>> {
        self.chantler_tables.get_or_try_insert_with(&z, || {
            let element = self.element(z)?;
            let row = self.store().chantler(&element.symbol).ok_or_else(|| {
                XrayDbError::UnsupportedQuantity {
                    element: element.symbol.clone(),
                    quantity: "Chantler",
                }
            })?;
            let table =
                ChantlerTable::decode(&row, z, element.molar_mass, self.config().log_floor);
            match &table {
                Ok(t) => log::debug!(
                    "cached Chantler table for {} ({} energies)",
                    element.symbol,
                    t.energy.len()
                ),
                Err(e) => log::warn!("{e}"),
            }
            table
        })
    }

    fn chantler_value<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energy: f64,
        eval: impl FnOnce(&ChantlerTable, f64) -> Result<f64>,
    ) -> Result<ChantlerValue> {
        let z = self.resolve(element)?;
        let table = self.chantler_table(z)?;
        let (at, extrapolated) = table.locate(energy, self.config().chantler_out_of_range)?;
        Ok(ChantlerValue {
            value: eval(&*table, at)?,
            extrapolated,
        })
    }

    /// Returns tabulated energy points for Chantler data for an element.
    ///
    /// Optionally filtered to a range [emin, emax] in eV.
    pub fn chantler_energies<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        emin: Option<f64>,
        emax: Option<f64>,
    ) -> Result<Vec<f64>> {
        let table = self.chantler_table(self.resolve(element)?)?;
        let emin = emin.unwrap_or(0.0);
        let emax = emax.unwrap_or(f64::INFINITY);
        Ok(table
            .energy
            .iter()
            .copied()
            .filter(|&e| e >= emin && e <= emax)
            .collect())
    }

    /// First and last tabulated Chantler energies (eV).
    pub fn chantler_domain<'a>(&self, element: impl Into<ElementId<'a>>) -> Result<(f64, f64)> {
        Ok(self.chantler_table(self.resolve(element)?)?.domain())
    }

    /// `Ok(())` when `energy` lies on or inside the Chantler grid, otherwise
    /// `OutOfDomain`.
    pub fn check_chantler_energy<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energy: f64,
    ) -> Result<()> {
        let (min, max) = self.chantler_domain(element)?;
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

    /// Returns f′, the real anomalous part of the X-ray scattering factor (Chantler).
    pub fn f1_chantler<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energy: f64,
    ) -> Result<ChantlerValue> {
        self.chantler_value(element, energy, |t, e| Ok(t.f1(e)))
    }

    /// Returns f″, the imaginary anomalous part of the X-ray scattering
    /// factor (Chantler), interpolated log-log.
    pub fn f2_chantler<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energy: f64,
    ) -> Result<ChantlerValue> {
        self.chantler_value(element, energy, |t, e| Ok(t.f2(e)))
    }

    /// Returns X-ray mass attenuation coefficient (mu/rho) in cm²/g (Chantler).
    ///
    /// The photo-electric part is computed from f″; the incoherent part is
    /// interpolated log-log from its tabulated column.
    pub fn mu_chantler<'a>(
        &self,
        element: impl Into<ElementId<'a>>,
        energy: f64,
        kind: ChantlerKind,
    ) -> Result<ChantlerValue> {
        let z = self.resolve(element)?;
        let symbol = self.symbol(z)?;
        let no_incoh = || XrayDbError::UnsupportedQuantity {
            element: symbol.to_string(),
            quantity: "Chantler incoherent attenuation",
        };
        self.chantler_value(z, energy, |t, e| match kind {
            ChantlerKind::Photo => Ok(t.mu_photo(e)),
            ChantlerKind::Incoherent => t.mu_incoh(e).ok_or_else(no_incoh),
            ChantlerKind::Total => Ok(t.mu_photo(e) + t.mu_incoh(e).ok_or_else(no_incoh)?),
        })
    }
}
