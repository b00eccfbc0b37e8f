// Core value types for the Kerr observables kernel

use crate::error::{DomainError, KerrError};
use crate::isco::{self, IscoResult};
use crate::metric;
use crate::roots::SolverConfig;
use crate::shadow::{self, ShadowCurve};

// Spins below this magnitude are treated as exactly zero. The spherical
// photon orbit relations divide by a, and below this scale the shadow is
// numerically indistinguishable from the Schwarzschild circle, so the a = 0
// closed form takes over.
pub const SPIN_EPSILON: f64 = 1e-8;

// ============================================================================
// BLACK HOLE DEFINITION
// ============================================================================

// A Kerr black hole in geometric units (G = c = M = 1)
//
// Physics: the only free parameter is the spin a = J/M, the angular
// momentum per unit mass. The sign carries the orbit sense used throughout
// this crate:
// - a > 0: prograde family (orbits share the hole's rotation sense)
// - a < 0: retrograde family
// - a = 0: Schwarzschild (no frame-dragging, sense is irrelevant)
//
// Valid range is |a| < 1. At |a| = 1 (extremal) the horizon degenerates
// and the root brackets below lose their sign-change guarantees, so
// extremal spin is rejected outright rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHole {
    spin: f64,
}

impl BlackHole {
    // Validate and wrap a spin value
    pub fn new(spin: f64) -> Result<Self, DomainError> {
        if !spin.is_finite() || spin.abs() >= 1.0 {
            return Err(DomainError::SpinOutOfRange(spin));
        }
        Ok(Self { spin })
    }

    #[inline]
    pub fn spin(&self) -> f64 {
        self.spin
    }

    // Check for the non-rotating case (the shadow generator branches on it)
    #[inline]
    pub fn is_schwarzschild(&self) -> bool {
        self.spin.abs() < SPIN_EPSILON
    }

    // Event horizon radius r₊ = 1 + √(1 - a²)
    #[inline]
    pub fn horizon_radius(&self) -> f64 {
        metric::horizon_radius(self.spin)
    }

    // ISCO radius from the Bardeen, Press & Teukolsky (1972) closed form
    //
    // Math:
    // - Z₁ = 1 + (1-a²)^(1/3) [(1+a)^(1/3) + (1-a)^(1/3)]
    // - Z₂ = √(3a² + Z₁²)
    // - r_isco = 3 + Z₂ ∓ √[(3-Z₁)(3+Z₁+2Z₂)]
    //   minus for the prograde branch (a ≥ 0), plus for retrograde (a < 0)
    //
    // Examples:
    // - a = 0:    r_isco = 6
    // - a = 0.9:  r_isco ≈ 2.32 (very close!)
    // - a = -0.9: r_isco ≈ 8.72 (much farther)
    //
    // The root-solved radius in isco.rs must agree with this everywhere;
    // the closed form is kept as an independent cross-check and for callers
    // that want the radius without running the solver.
    pub fn isco_radius_closed_form(&self) -> f64 {
        let a = self.spin;
        let z = isco::z1(a);
        let z2 = isco::z2(a);

        // Rounding can push the radicand a few ulp below zero at tiny spin
        // (Z₁ → 3 there), so clamp before the square root
        let radicand = ((3.0 - z) * (3.0 + z + 2.0 * z2)).max(0.0);

        // Signed spin already encodes the orbit sense, so a ≥ 0 takes the
        // inner (prograde) root
        let sign = if a >= 0.0 { -1.0 } else { 1.0 };
        3.0 + z2 + sign * radicand.sqrt()
    }

    // Root-solved ISCO radius and radiative efficiency (default tolerances)
    pub fn isco(&self) -> Result<IscoResult, KerrError> {
        self.isco_with(&SolverConfig::default())
    }

    // Root-solved ISCO with explicit solver tolerances
    pub fn isco_with(&self, cfg: &SolverConfig) -> Result<IscoResult, KerrError> {
        isco::compute_isco_with(self.spin, cfg)
    }

    // Shadow boundary curve (default tolerances)
    pub fn shadow(&self, inclination: f64, n_samples: usize) -> Result<ShadowCurve, KerrError> {
        self.shadow_with(inclination, n_samples, &SolverConfig::default())
    }

    // Shadow boundary curve with explicit solver tolerances
    pub fn shadow_with(
        &self,
        inclination: f64,
        n_samples: usize,
        cfg: &SolverConfig,
    ) -> Result<ShadowCurve, KerrError> {
        shadow::compute_shadow_with(self.spin, inclination, n_samples, cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_extremal_and_bad_spin() {
        assert!(BlackHole::new(1.0).is_err());
        assert!(BlackHole::new(-1.0).is_err());
        assert!(BlackHole::new(1.5).is_err());
        assert!(BlackHole::new(f64::NAN).is_err());
        assert!(BlackHole::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_accepts_near_extremal_spin() {
        assert!(BlackHole::new(0.998).is_ok());
        assert!(BlackHole::new(-0.998).is_ok());
    }

    #[test]
    fn test_horizon_radius_examples() {
        let schwarzschild = BlackHole::new(0.0).unwrap();
        assert!((schwarzschild.horizon_radius() - 2.0).abs() < 1e-15);

        let fast = BlackHole::new(0.9).unwrap();
        assert!((fast.horizon_radius() - 1.4358898943540674).abs() < 1e-12);
    }

    #[test]
    fn test_closed_form_isco_literature_values() {
        // Bardeen, Press & Teukolsky (1972) table values
        let cases = [(0.0, 6.0), (0.5, 4.2331), (0.9, 2.3209), (-0.9, 8.7174)];
        for &(a, expected) in &cases {
            let bh = BlackHole::new(a).unwrap();
            let r = bh.isco_radius_closed_form();
            assert!(
                (r - expected).abs() < 1e-3,
                "r_isco({}) = {}, expected {}",
                a,
                r,
                expected
            );
        }
    }

    #[test]
    fn test_closed_form_isco_near_zero_spin() {
        // Exercises the radicand clamp: Z₁ rounds to a few ulp above 3 here
        let bh = BlackHole::new(1e-8).unwrap();
        let r = bh.isco_radius_closed_form();
        assert!(r.is_finite());
        assert!((r - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_retrograde_isco_farther_than_prograde() {
        for &a in &[0.1, 0.5, 0.9, 0.998] {
            let pro = BlackHole::new(a).unwrap().isco_radius_closed_form();
            let ret = BlackHole::new(-a).unwrap().isco_radius_closed_form();
            assert!(ret > pro, "retrograde ISCO should sit farther out at |a| = {}", a);
        }
    }
}
