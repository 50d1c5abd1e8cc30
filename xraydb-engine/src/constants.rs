/// Avogadro's number (mol^-1)
pub const AVOGADRO: f64 = 6.02214076e23;

/// Planck's constant times speed of light (eV·Å)
pub const PLANCK_HC_ANGSTROM: f64 = 12398.4193;

/// Classical electron radius (cm)
pub const R_ELECTRON_CM: f64 = 2.8179403262e-13;

/// Photo-absorption mass attenuation (cm²/g) from f″ at `energy` eV.
///
/// mu = 2 r_e λ f″ N_A / M, with λ = hc/E converted to cm.
pub fn f2_to_mu(f2: f64, energy: f64, molar_mass: f64) -> f64 {
    let lambda_cm = PLANCK_HC_ANGSTROM * 1.0e-8 / energy;
    2.0 * R_ELECTRON_CM * lambda_cm * f2 * AVOGADRO / molar_mass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f2_to_mu_iron_10kev() {
        // Fe, f'' ~ 2.28 e/atom at 10 keV gives ~172 cm²/g
        let mu = f2_to_mu(2.28, 10_000.0, 55.845);
        assert!(mu > 165.0 && mu < 180.0, "mu = {mu}");
    }

    #[test]
    fn test_f2_to_mu_scales_inverse_energy() {
        let a = f2_to_mu(1.0, 5_000.0, 50.0);
        let b = f2_to_mu(1.0, 10_000.0, 50.0);
        assert!((a / b - 2.0).abs() < 1e-12);
    }
}
