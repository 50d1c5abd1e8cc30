//! A small table set shared by the integration tests.
//!
//! Ag and Fe carry edge catalogs and Elam tables; Fe and H carry Chantler
//! grids; Fe, Ag and O carry f0 coefficients; Og is an element row only.
//! Elam photo-absorption follows a piecewise power law with zero spline
//! terms, so expected values can be computed in closed form.

#![allow(dead_code)]

use xraydb_engine::XrayDb;
use xraydb_engine::xraydb_tables::{
    ChantlerRow, CoreWidthRow, CosterKronigRow, ElementRow, LabelAliasRow, PhotoabsorptionRow,
    ScatteringRow, TableSet, VersionRow, WaasmaierRow, XrayLevelRow, XrayTransitionRow,
};

pub const AG_EDGES: [(&str, f64); 4] = [("L3", 3351.0), ("L2", 3524.0), ("L1", 3806.0), ("K", 25514.0)];
pub const AG_K_JUMP: f64 = 6.334;
pub const FE_K: f64 = 7112.0;

pub const FE_F0_OFFSET: f64 = -0.304931;
pub const FE_F0_SCALE: [f64; 5] = [12.311098, 1.876623, 3.066177, 2.070451, 6.975185];
pub const FE_F0_EXPONENTS: [f64; 5] = [5.009415, 0.014461, 18.743041, 82.767874, 0.346506];

pub const FE_CHANTLER_ENERGY: [f64; 8] =
    [1000.0, 2000.0, 5000.0, 7000.0, 7200.0, 10000.0, 20000.0, 50000.0];
pub const FE_CHANTLER_F1: [f64; 8] = [-1.0, -0.6, -1.1, -4.5, -6.0, -0.9, 0.2, 0.15];
pub const FE_CHANTLER_F2: [f64; 8] = [8.0, 4.9, 0.95, 0.5, 3.9, 2.28, 0.62, 0.12];
pub const FE_CHANTLER_INCOH: [f64; 8] = [0.02, 0.04, 0.07, 0.08, 0.08, 0.09, 0.12, 0.13];

pub fn json(values: &[f64]) -> String {
    serde_json::to_string(values).unwrap()
}

fn ln_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.ln()).collect()
}

/// Closed-form Ag photo-absorption (cm²/g): a power law times a step that
/// grows at each edge. At an edge energy the above-edge value applies.
pub fn ag_photo(energy: f64) -> f64 {
    let steps = [2.5, 1.4, 1.15, AG_K_JUMP];
    let mut factor = 1.0;
    for ((_, edge), step) in AG_EDGES.iter().zip(steps) {
        if energy >= *edge {
            factor *= step;
        }
    }
    30.0 * (energy / 10_000.0).powf(-2.7) * factor
}

/// Just below an edge: the step of that edge not yet applied.
pub fn ag_photo_below(edge: f64) -> f64 {
    ag_photo(edge * (1.0 - 1e-12)).min(ag_photo(edge))
}

pub fn fe_photo(energy: f64) -> f64 {
    let factor = if energy >= FE_K { 8.0 } else { 1.0 };
    20.0 * (energy / 10_000.0).powf(-2.7) * factor
}

pub fn coherent(energy: f64) -> f64 {
    5.0 * (energy / 10_000.0).powf(-1.5)
}

pub fn incoherent(energy: f64) -> f64 {
    0.1 * (energy / 10_000.0).powf(0.3)
}

const SMOOTH_GRID: [f64; 7] = [1000.0, 2000.0, 5000.0, 10_000.0, 20_000.0, 50_000.0, 100_000.0];

/// Elam photo row over `grid`, doubling every knot listed in `edges`.
fn photo_row(element: &str, grid: &[f64], edges: &[f64], model: fn(f64) -> f64) -> PhotoabsorptionRow {
    let mut energies = Vec::new();
    let mut values = Vec::new();
    let mut points: Vec<f64> = grid.iter().chain(edges).copied().collect();
    points.sort_by(f64::total_cmp);
    for e in points {
        if edges.contains(&e) {
            energies.push(e);
            values.push(model(e * (1.0 - 1e-12)).min(model(e)));
        }
        energies.push(e);
        values.push(model(e));
    }
    PhotoabsorptionRow {
        element: element.into(),
        log_energy: json(&ln_all(&energies)),
        log_photoabsorption: json(&ln_all(&values)),
        log_photoabsorption_spline: json(&vec![0.0; energies.len()]),
    }
}

fn scattering_row(element: &str) -> ScatteringRow {
    let coh: Vec<f64> = SMOOTH_GRID.iter().map(|&e| coherent(e)).collect();
    let incoh: Vec<f64> = SMOOTH_GRID.iter().map(|&e| incoherent(e)).collect();
    let zeros = json(&[0.0; SMOOTH_GRID.len()]);
    ScatteringRow {
        element: element.into(),
        log_energy: json(&ln_all(&SMOOTH_GRID)),
        log_coherent_scatter: json(&ln_all(&coh)),
        log_coherent_scatter_spline: zeros.clone(),
        log_incoherent_scatter: json(&ln_all(&incoh)),
        log_incoherent_scatter_spline: zeros,
    }
}

fn element(z: u16, symbol: &str, name: &str, molar_mass: f64, density: f64) -> ElementRow {
    ElementRow {
        atomic_number: z,
        symbol: symbol.into(),
        name: name.into(),
        molar_mass,
        density,
    }
}

fn level(element: &str, label: &str, energy: f64, yield_: f64, jump: Option<f64>) -> XrayLevelRow {
    XrayLevelRow {
        element: element.into(),
        iupac_symbol: label.into(),
        absorption_edge: energy,
        fluorescence_yield: yield_,
        jump_ratio: jump,
    }
}

fn line(element: &str, siegbahn: &str, iupac: &str, energy: f64, intensity: f64) -> XrayTransitionRow {
    let (initial, final_) = iupac.split_once('-').unwrap();
    XrayTransitionRow {
        element: element.into(),
        iupac_symbol: iupac.into(),
        siegbahn_symbol: siegbahn.into(),
        initial_level: initial.into(),
        final_level: final_.into(),
        emission_energy: energy,
        intensity,
    }
}

fn ck(element: &str, initial: &str, final_: &str, p: f64, total: f64) -> CosterKronigRow {
    CosterKronigRow {
        element: element.into(),
        initial_level: initial.into(),
        final_level: final_.into(),
        transition_probability: p,
        total_transition_probability: total,
    }
}

fn width(z: u16, element: &str, edge: &str, w: f64) -> CoreWidthRow {
    CoreWidthRow {
        atomic_number: z,
        element: element.into(),
        edge: edge.into(),
        width: w,
    }
}

fn f0_row(z: u16, element: &str, ion: &str, offset: f64, scale: &[f64]) -> WaasmaierRow {
    WaasmaierRow {
        atomic_number: z,
        element: element.into(),
        ion: ion.into(),
        offset,
        scale: json(scale),
        exponents: json(&FE_F0_EXPONENTS),
    }
}

fn alias(alias: &str, canonical: &str) -> LabelAliasRow {
    LabelAliasRow {
        alias: alias.into(),
        canonical: canonical.into(),
    }
}

pub fn tables() -> TableSet {
    let ag_edge_energies: Vec<f64> = AG_EDGES.iter().map(|(_, e)| *e).collect();

    TableSet {
        version: vec![VersionRow {
            tag: "fixture".into(),
            date: "2026-01-01".into(),
            notes: "integration test tables".into(),
        }],
        elements: vec![
            element(1, "H", "hydrogen", 1.008, 0.0000899),
            element(8, "O", "oxygen", 15.999, 0.001429),
            element(26, "Fe", "iron", 55.845, 7.874),
            element(47, "Ag", "silver", 107.868, 10.48),
            element(118, "Og", "oganesson", 294.0, 0.0),
        ],
        xray_levels: vec![
            level("Ag", "K", 25514.0, 0.821892, Some(AG_K_JUMP)),
            level("Ag", "L1", 3806.0, 0.016, Some(0.0)),
            level("Ag", "L2", 3524.0, 0.051, None),
            level("Ag", "L3", 3351.0, 0.052, Some(2.5)),
            level("Fe", "K", FE_K, 0.350, Some(8.0)),
            level("Fe", "L2", 719.9, 0.0036, None),
            level("Fe", "L3", 706.8, 0.0063, Some(3.6)),
        ],
        xray_transitions: vec![
            line("Ag", "Ka1", "K-L3", 22162.9, 0.5),
            line("Ag", "Ka2", "K-L2", 21990.3, 0.265),
            line("Ag", "Kb1", "K-M3", 24942.4, 0.09),
            line("Ag", "Kb3", "K-M2", 24911.5, 0.045),
            line("Ag", "La1", "L3-M5", 2984.3, 0.78),
            line("Ag", "Lb1", "L2-M4", 3150.9, 0.9),
            line("Ag", "Lb3", "L1-M3", 3234.8, 0.4),
            line("Ag", "Mz", "M5-N3", 311.7, 0.02),
            line("Fe", "Ka1", "K-L3", 6403.8, 0.58),
            line("Fe", "Ka2", "K-L2", 6390.8, 0.29),
            line("Fe", "Kb1", "K-M3", 7058.0, 0.13),
            line("Fe", "La1", "L3-M5", 705.0, 0.0),
        ],
        coster_kronig: vec![
            ck("Ag", "L1", "L2", 0.048, 0.048),
            ck("Ag", "L1", "L3", 0.59, 0.61),
            ck("Ag", "L2", "L3", 0.14, 0.14),
        ],
        corelevel_widths: vec![
            width(47, "Ag", "K", 5.75),
            width(47, "Ag", "L1", 3.6),
            width(47, "Ag", "L3", 2.2),
            width(26, "Fe", "K", 1.19),
        ],
        photoabsorption: vec![
            photo_row(
                "Ag",
                &[1000.0, 2000.0, 3000.0, 5000.0, 10_000.0, 20_000.0, 30_000.0, 50_000.0, 100_000.0],
                &ag_edge_energies,
                ag_photo,
            ),
            photo_row("Fe", &SMOOTH_GRID, &[FE_K], fe_photo),
        ],
        scattering: vec![scattering_row("Ag"), scattering_row("Fe")],
        chantler: vec![
            ChantlerRow {
                element: "Fe".into(),
                energy: json(&FE_CHANTLER_ENERGY),
                f1: json(&FE_CHANTLER_F1),
                f2: json(&FE_CHANTLER_F2),
                mu_incoh: Some(json(&FE_CHANTLER_INCOH)),
            },
            ChantlerRow {
                element: "H".into(),
                energy: "10 20 50 100".into(),
                f1: "-1.5 -0.8 -0.2 -0.05".into(),
                f2: "1.0 0.5 0.2 0.05".into(),
                mu_incoh: None,
            },
        ],
        waasmaier: vec![
            f0_row(26, "Fe", "Fe", FE_F0_OFFSET, &FE_F0_SCALE),
            f0_row(26, "Fe", "Fe2+", -0.2, &[11.0, 7.0, 3.5, 1.8, 0.9]),
            f0_row(26, "Fe", "Fe3+", -0.2, &[10.5, 7.0, 3.4, 1.4, 0.9]),
            f0_row(47, "Ag", "Ag", 1.0, &[19.0, 15.0, 6.0, 3.0, 3.0]),
            f0_row(47, "Ag", "Agval", 1.0, &[19.0, 15.0, 6.0, 2.5, 3.5]),
            f0_row(8, "O", "O", 0.1, &[3.1, 2.0, 1.5, 1.0, 0.3]),
            f0_row(8, "O", "O1-", 0.1, &[3.5, 2.2, 1.7, 1.1, 0.4]),
            f0_row(8, "O", "O2-.", 0.1, &[3.9, 2.5, 1.9, 1.2, 0.4]),
        ],
        label_aliases: vec![
            alias("K-edge", "K"),
            alias("Kalpha1", "Ka1"),
            alias("Kbeta1", "Kb1"),
        ],
    }
}

pub fn db() -> XrayDb {
    XrayDb::from_tables(tables()).unwrap()
}
