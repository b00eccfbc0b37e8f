// Kerr metric quantities shared by the ISCO and shadow solvers

// ============================================================================
// GEOMETRIC UNITS
// ============================================================================

// Everything in this crate uses geometric units G = c = M = 1: radii are in
// units of the gravitational radius GM/c², and the spin a = J/M² is the
// dimensionless angular momentum, signed and sub-extremal (|a| < 1).

// Schwarzschild circular photon orbit radius (a = 0)
pub const PHOTON_SPHERE_RADIUS: f64 = 3.0;

// Schwarzschild shadow radius √27 = 3√3
//
// Physics: for a = 0 every photon with impact parameter below ~5.196 is
// captured, so the shadow is a circle of exactly this radius at any
// inclination.
pub const SCHWARZSCHILD_SHADOW_RADIUS: f64 = 5.196152422706632;

// ============================================================================
// METRIC HELPERS
// ============================================================================

// Δ (Delta) = r² - 2r + a²
// Vanishes at the horizons
#[inline]
pub fn delta(r: f64, a: f64) -> f64 {
    r * r - 2.0 * r + a * a
}

// dΔ/dr = 2r - 2
// Appears in the spherical photon orbit conserved quantities
#[inline]
pub fn delta_prime(r: f64) -> f64 {
    2.0 * r - 2.0
}

// Event horizon radius r₊ = 1 + √(1 - a²)
//
// Spin dependence:
// - a = 0 (Schwarzschild): r₊ = 2
// - a = 0.9: r₊ ≈ 1.44
// - |a| → 1 (extremal): r₊ → 1
#[inline]
pub fn horizon_radius(a: f64) -> f64 {
    1.0 + (1.0 - a * a).sqrt()
}
