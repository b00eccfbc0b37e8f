// Equatorial ISCO radius and radiative efficiency

use serde::Serialize;

use crate::error::{DomainError, KerrError};
use crate::roots::{self, SolverConfig};
use crate::types::BlackHole;

// Upper end of the ISCO bracket: the retrograde ISCO tends to 9 as a → -1,
// so [r₊, 9] contains the root for every sub-extremal spin.
const ISCO_BRACKET_MAX: f64 = 9.0;

// ============================================================================
// MARGINAL STABILITY
// ============================================================================

// Marginal-stability function for circular equatorial orbits
//
// Physics: circular orbits exist down to the radius where the effective
// potential stops having a minimum. The stability condition
//
//   f(r, a) = r² - 6r + 8a√r - 3a² ≥ 0
//
// holds outside the ISCO and fails inside it, so the ISCO is the unique
// root of f above the horizon. The spin is signed: a > 0 selects the
// prograde branch (closer orbits), a < 0 retrograde (farther out).
//
// Bracketing: f(r₊) < 0 for every |a| < 1 (the ISCO sits strictly outside
// the horizon) and f(9) = 27 + 24a - 3a² > 0, so [r₊, 9] always straddles
// the root.
#[inline]
pub fn marginal_stability(r: f64, a: f64) -> f64 {
    r * r - 6.0 * r + 8.0 * a * r.sqrt() - 3.0 * a * a
}

// Z₁ auxiliary quantity of the Bardeen-Press-Teukolsky closed form
// (even in a; ≤ 3 with equality at a = 0)
#[inline]
pub fn z1(a: f64) -> f64 {
    let a2 = a * a;
    1.0 + (1.0 - a2).powf(1.0 / 3.0) * ((1.0 + a).powf(1.0 / 3.0) + (1.0 - a).powf(1.0 / 3.0))
}

// Z₂ auxiliary quantity of the Bardeen-Press-Teukolsky closed form
// (even in a)
#[inline]
pub fn z2(a: f64) -> f64 {
    let z = z1(a);
    (3.0 * a * a + z * z).sqrt()
}

// ============================================================================
// ORBITAL ENERGY
// ============================================================================

// Specific energy E of a circular equatorial orbit at radius r
//
// Math: E = (r^(3/2) - 2r^(1/2) + a) / (r^(3/4) √(r^(3/2) - 3r^(1/2) + 2a))
//
// The radicand vanishes at the circular photon orbit; below it no timelike
// circular orbit exists, which surfaces as a DomainError rather than a NaN.
pub fn specific_energy(r: f64, a: f64) -> Result<f64, DomainError> {
    if r <= 0.0 {
        return Err(DomainError::NoCircularOrbit { r, a });
    }
    let sqrt_r = r.sqrt();
    let r32 = r * sqrt_r;
    let radicand = r32 - 3.0 * sqrt_r + 2.0 * a;
    if radicand <= 0.0 {
        return Err(DomainError::NoCircularOrbit { r, a });
    }
    Ok((r32 - 2.0 * sqrt_r + a) / (r.powf(0.75) * radicand.sqrt()))
}

// ============================================================================
// ISCO RESULT
// ============================================================================

// ISCO radius and radiative efficiency for one spin value
//
// Physics: matter spiralling in through a thin disc has radiated the
// binding energy it shed by the time it reaches the ISCO, a fraction
// η = 1 - E(r_isco) of its rest mass. Spin dependence (prograde): ~5.7%
// at a = 0 up to ~32% at a = 0.998, far beyond nuclear fusion's ~0.7%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IscoResult {
    // Spin the result was computed for (signed, prograde positive)
    pub spin: f64,

    // ISCO radius in units of GM/c²
    pub radius: f64,

    // Radiative efficiency η = 1 - E(r_isco) ∈ [0, 1)
    pub efficiency: f64,
}

// ============================================================================
// SOLVER
// ============================================================================

// Compute the ISCO radius and radiative efficiency for a spin value.
//
// This is the main entry point: validates the spin, root-solves the
// marginal-stability condition over [r₊, 9], then evaluates the orbital
// energy at the root.
//
// Examples (signed-spin convention):
// - compute_isco(0.0):  r = 6.0,   η ≈ 0.0572
// - compute_isco(0.9):  r ≈ 2.321, η ≈ 0.156
// - compute_isco(-0.9): r ≈ 8.717, η ≈ 0.039
pub fn compute_isco(a: f64) -> Result<IscoResult, KerrError> {
    compute_isco_with(a, &SolverConfig::default())
}

// Same as compute_isco with explicit solver tolerances
pub fn compute_isco_with(a: f64, cfg: &SolverConfig) -> Result<IscoResult, KerrError> {
    let bh = BlackHole::new(a)?;
    let r_isco = roots::find_root(
        |r| marginal_stability(r, a),
        bh.horizon_radius(),
        ISCO_BRACKET_MAX,
        cfg,
    )?;
    let energy = specific_energy(r_isco, a)?;
    Ok(IscoResult {
        spin: a,
        radius: r_isco,
        efficiency: 1.0 - energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schwarzschild_isco() {
        let isco = compute_isco(0.0).unwrap();
        assert!(
            (isco.radius - 6.0).abs() < 1e-6,
            "r_isco(0) should be 6, got {}",
            isco.radius
        );
        assert!((isco.efficiency - 0.057191).abs() < 1e-5);

        // Exact form: η = 1 - √(8/9); the energy is stationary at the ISCO,
        // so the root tolerance enters only at second order
        let eta_exact = 1.0 - (8.0_f64 / 9.0).sqrt();
        assert!((isco.efficiency - eta_exact).abs() < 1e-12);
    }

    #[test]
    fn test_prograde_and_retrograde_examples() {
        let pro = compute_isco(0.9).unwrap();
        assert!((pro.radius - 2.3209).abs() < 1e-3);
        assert!((pro.efficiency - 0.1558).abs() < 1e-3);

        let ret = compute_isco(-0.9).unwrap();
        assert!((ret.radius - 8.7174).abs() < 1e-3);
        assert!((ret.efficiency - 0.0390).abs() < 1e-3);
    }

    #[test]
    fn test_near_extremal_prograde() {
        // Thorne's canonical spin limit: r ≈ 1.237, η ≈ 0.321
        let isco = compute_isco(0.998).unwrap();
        assert!(isco.radius > 1.0);
        assert!(isco.radius < compute_isco(0.9).unwrap().radius);
        assert!((isco.radius - 1.237).abs() < 1e-3);
        assert!((isco.efficiency - 0.321).abs() < 1e-3);
    }

    #[test]
    fn test_monotonic_in_spin() {
        // r_isco decreases monotonically from ~9 (a → -1) to ~1 (a → +1)
        let n = 241;
        let mut prev = f64::INFINITY;
        for i in 0..n {
            let a = -0.99 + 1.98 * i as f64 / (n - 1) as f64;
            let isco = compute_isco(a).unwrap();
            assert!(
                isco.radius < prev,
                "r_isco should decrease: a = {}, r = {}",
                a,
                isco.radius
            );
            prev = isco.radius;
        }
    }

    #[test]
    fn test_agrees_with_closed_form() {
        for i in 0..199 {
            let a = -0.99 + 1.98 * i as f64 / 198.0;
            let solved = compute_isco(a).unwrap().radius;
            let closed = BlackHole::new(a).unwrap().isco_radius_closed_form();
            assert!(
                (solved - closed).abs() < 1e-9,
                "mismatch at a = {}: solved {} vs closed form {}",
                a,
                solved,
                closed
            );
        }
    }

    #[test]
    fn test_efficiency_increases_with_prograde_spin() {
        let mut prev = 0.0;
        for i in 0..100 {
            let a = i as f64 / 100.0;
            let eta = compute_isco(a).unwrap().efficiency;
            assert!(eta > prev, "efficiency should grow with spin at a = {}", a);
            prev = eta;
        }
    }

    #[test]
    fn test_rejects_out_of_range_spin() {
        assert!(matches!(
            compute_isco(1.0),
            Err(KerrError::Domain(DomainError::SpinOutOfRange(_)))
        ));
        assert!(matches!(compute_isco(-1.0), Err(KerrError::Domain(_))));
        assert!(matches!(compute_isco(1.5), Err(KerrError::Domain(_))));
        assert!(matches!(compute_isco(f64::NAN), Err(KerrError::Domain(_))));
    }

    #[test]
    fn test_energy_rejects_radius_inside_photon_orbit() {
        // r = 2 at a = 0 lies inside the photon sphere at r = 3
        assert!(specific_energy(2.0, 0.0).is_err());
        assert!(specific_energy(-1.0, 0.0).is_err());
        // ... and succeeds at the ISCO
        assert!(specific_energy(6.0, 0.0).is_ok());
    }
}
