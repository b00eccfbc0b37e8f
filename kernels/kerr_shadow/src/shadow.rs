// Shadow boundary generator: unstable spherical photon orbits projected
// onto the observer's sky

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{DomainError, KerrError, NumericalError};
use crate::metric::{delta, delta_prime, SCHWARZSCHILD_SHADOW_RADIUS};
use crate::roots::{self, SolverConfig};
use crate::types::BlackHole;

// ============================================================================
// TOLERANCES AND BRACKETS
// ============================================================================

// Inclinations with |sin i| below this are face-on (from either pole): the
// α = -ξ/sin i projection degenerates there and the circle closed form
// takes over.
const FACE_ON_SIN_TOL: f64 = 1e-6;

// β² values in (-BETA_SQ_CLAMP, 0) are floating-point noise next to the
// window endpoints and clamp to zero; anything more negative means the
// sweep left the visible window and is reported as a NumericalError.
const BETA_SQ_CLAMP: f64 = 1e-6;

// The circular photon orbit radius lies in (1, 4) for every |a| < 1:
// r = 3 at a = 0, → 1 toward the prograde extremal limit, → 4 retrograde.
const PHOTON_SHELL_BRACKET: (f64, f64) = (1.0, 4.0);

// ============================================================================
// SKY-PLANE TYPES
// ============================================================================

// One point on the observer's sky, in impact-parameter coordinates
//
// α runs along the equatorial direction, β along the projected spin axis
// (positive = upper half of the sky). Prograde photons of a hole with
// a > 0 land at negative α, which is where the high-spin silhouette
// flattens into its D shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyPoint {
    pub alpha: f64,
    pub beta: f64,
}

// Width/height/equal-area summary of a shadow curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryMetrics {
    // Horizontal extent, max α - min α
    pub horizontal_diameter: f64,

    // Vertical extent, max β - min β
    pub vertical_diameter: f64,

    // Radius of the circle with the same enclosed area, √(A/π)
    pub equivalent_radius: f64,
}

// Closed shadow boundary curve for one (spin, inclination) pair
//
// Invariants:
// - points().len() equals the n_samples the curve was built with
// - the first and last points coincide (closure point duplicated)
// - the +β half is traversed first, forward in photon radius, then the
//   -β half backward, so consumers can draw the polygon as-is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowCurve {
    pub spin: f64,

    // Observer inclination from the spin axis, radians
    pub inclination: f64,

    points: Vec<SkyPoint>,
}

impl ShadowCurve {
    pub fn points(&self) -> &[SkyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // First and last points coincide within tol (Euclidean distance)
    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                let da = first.alpha - last.alpha;
                let db = first.beta - last.beta;
                (da * da + db * db).sqrt() <= tol
            }
            _ => false,
        }
    }

    // Boundary summary used by the export tool
    //
    // The area comes from the shoelace sum over the closed polygon; the
    // duplicated closure point contributes a zero term, so it needs no
    // special-casing.
    pub fn metrics(&self) -> BoundaryMetrics {
        let mut min_a = f64::INFINITY;
        let mut max_a = f64::NEG_INFINITY;
        let mut min_b = f64::INFINITY;
        let mut max_b = f64::NEG_INFINITY;
        for p in &self.points {
            min_a = min_a.min(p.alpha);
            max_a = max_a.max(p.alpha);
            min_b = min_b.min(p.beta);
            max_b = max_b.max(p.beta);
        }

        let mut twice_area = 0.0;
        for pair in self.points.windows(2) {
            twice_area += pair[0].alpha * pair[1].beta - pair[1].alpha * pair[0].beta;
        }
        let area = 0.5 * twice_area.abs();

        BoundaryMetrics {
            horizontal_diameter: max_a - min_a,
            vertical_diameter: max_b - min_b,
            equivalent_radius: (area / PI).sqrt(),
        }
    }
}

// ============================================================================
// PHOTON SHELL
// ============================================================================

// Bounds of the photon shell: the prograde and retrograde circular photon
// orbit radii, returned ordered (min, max)
//
// Math: equatorial photons circle where r^(3/2) - 3r^(1/2) ± 2a = 0 (minus
// spin for one sense, plus for the other). On [1, 4] each condition has
// exactly one sign change for |a| < 1, so both roots bracket strictly.
//
// Examples:
// - a = 0:   (3, 3): the shell collapses onto the photon sphere
// - a = 0.9: (≈1.558, ≈3.910)
// - a < 0 mirrors a > 0; the ordering makes the pair sign-independent
pub fn photon_shell(a: f64, cfg: &SolverConfig) -> Result<(f64, f64), NumericalError> {
    let (lo, hi) = PHOTON_SHELL_BRACKET;
    let with_spin = roots::find_root(|r| r * r.sqrt() - 3.0 * r.sqrt() + 2.0 * a, lo, hi, cfg)?;
    let against_spin = roots::find_root(|r| r * r.sqrt() - 3.0 * r.sqrt() - 2.0 * a, lo, hi, cfg)?;
    Ok(if with_spin <= against_spin {
        (with_spin, against_spin)
    } else {
        (against_spin, with_spin)
    })
}

// ============================================================================
// SPHERICAL ORBIT CONSERVED QUANTITIES
// ============================================================================

// Conserved (ξ, η) of the unstable spherical photon orbit at radius r
//
// Math (Δ = r² - 2r + a², Δ' = 2r - 2, A = 4rΔ/Δ'):
//   ξ = ((r² + a²)Δ' - 4rΔ) / (aΔ')
//   η = A²/Δ - (ξ - a)²
//
// ξ is the photon angular momentum per unit energy, η the Carter-constant
// combination; together they pin the orbit's sky projection. ξ decreases
// monotonically across the shell, positive at the prograde edge and
// negative at the retrograde edge for a > 0. Not defined at a = 0 (the a
// in the ξ denominator); callers route that case to the Schwarzschild
// branch instead.
fn photon_constants(r: f64, a: f64) -> (f64, f64) {
    let d = delta(r, a);
    let dp = delta_prime(r);
    let big_a = 4.0 * r * d / dp;

    let xi = ((r * r + a * a) * dp - 4.0 * r * d) / (a * dp);
    let eta = big_a * big_a / d - (xi - a) * (xi - a);
    (xi, eta)
}

// Bardeen projection of (ξ, η) to sky-plane impact parameters
//
// α = -ξ / sin i
// β² = η + a²cos²i - ξ²cos²i/sin²i
//
// Returns (α, β²); the caller picks the ± branch for β and owns the
// negative-radicand policy.
fn project(xi: f64, eta: f64, a: f64, sin_i: f64, cos_i: f64) -> (f64, f64) {
    let alpha = -xi / sin_i;
    let cot_sq = (cos_i * cos_i) / (sin_i * sin_i);
    let beta_sq = eta + a * a * cos_i * cos_i - xi * xi * cot_sq;
    (alpha, beta_sq)
}

// Radius of the spherical orbit with ξ = 0, the one that projects onto the
// spin axis
//
// ξ changes sign across the shell, so the shell brackets the root. Its
// orbit has β² = η + a²cos²i > 0 at every inclination, which makes it the
// anchor point for the visible-window search, and the face-on circle
// radius inherits the square of any ξ residual, so this solve runs to
// machine resolution instead of cfg.tol.
fn xi_zero_radius(a: f64, shell: (f64, f64), cfg: &SolverConfig) -> Result<f64, NumericalError> {
    let tight = SolverConfig {
        tol: 0.0,
        max_iter: cfg.max_iter,
    };
    roots::find_root(|r| photon_constants(r, a).0, shell.0, shell.1, &tight)
}

// ============================================================================
// SHADOW BOUNDARY
// ============================================================================

// Compute the closed shadow boundary curve for spin a and observer
// inclination (radians, measured from the spin axis).
//
// Branches:
// - |a| below the Schwarzschild cutoff: circle of radius √27, any i
// - |sin i| < 1e-6: face-on circle from the ξ = 0 orbit (i = π included
//   by reflection symmetry)
// - otherwise: sweep the visible window of the photon shell, +β half
//   forward then -β half backward
//
// The returned curve has exactly n_samples points with the first repeated
// at the end.
pub fn compute_shadow(a: f64, inclination: f64, n_samples: usize) -> Result<ShadowCurve, KerrError> {
    compute_shadow_with(a, inclination, n_samples, &SolverConfig::default())
}

// Same as compute_shadow with explicit solver tolerances
pub fn compute_shadow_with(
    a: f64,
    inclination: f64,
    n_samples: usize,
    cfg: &SolverConfig,
) -> Result<ShadowCurve, KerrError> {
    let bh = BlackHole::new(a)?;
    if !inclination.is_finite() || !(0.0..=PI).contains(&inclination) {
        return Err(DomainError::InclinationOutOfRange(inclination).into());
    }
    if n_samples < 3 {
        return Err(DomainError::ResolutionTooLow(n_samples).into());
    }

    let points = if bh.is_schwarzschild() {
        circle_points(SCHWARZSCHILD_SHADOW_RADIUS, n_samples)
    } else if inclination.sin().abs() < FACE_ON_SIN_TOL {
        let radius = face_on_radius(a, cfg)?;
        circle_points(radius, n_samples)
    } else {
        sweep_points(a, inclination, n_samples, cfg)?
    };

    Ok(ShadowCurve {
        spin: a,
        inclination,
        points,
    })
}

// Face-on circle radius √(η(r₀) + a²) where ξ(r₀) = 0
//
// At the poles the projection degenerates (sin i = 0) but the boundary is
// an exact circle traced by the zero-angular-momentum orbit, so the
// closed form replaces the sweep.
fn face_on_radius(a: f64, cfg: &SolverConfig) -> Result<f64, NumericalError> {
    let shell = photon_shell(a, cfg)?;
    let r0 = xi_zero_radius(a, shell, cfg)?;
    let (_, eta) = photon_constants(r0, a);
    Ok((eta + a * a).sqrt())
}

// Closed circle centred on the origin: n points with the first duplicated
// at the end
fn circle_points(radius: f64, n: usize) -> Vec<SkyPoint> {
    let mut points = Vec::with_capacity(n);
    for k in 0..n - 1 {
        let theta = 2.0 * PI * k as f64 / (n - 1) as f64;
        points.push(SkyPoint {
            alpha: radius * theta.cos(),
            beta: radius * theta.sin(),
        });
    }
    let first = points[0];
    points.push(first);
    points
}

// Sweep the visible window of the photon shell and emit the closed curve
fn sweep_points(
    a: f64,
    inclination: f64,
    n_samples: usize,
    cfg: &SolverConfig,
) -> Result<Vec<SkyPoint>, KerrError> {
    let sin_i = inclination.sin();
    let cos_i = inclination.cos();

    let shell = photon_shell(a, cfg)?;
    let anchor = xi_zero_radius(a, shell, cfg)?;

    let beta_sq_at = |r: f64| {
        let (xi, eta) = photon_constants(r, a);
        project(xi, eta, a, sin_i, cos_i).1
    };

    // Away from edge-on the visible window shrinks inside the shell. The
    // ξ = 0 orbit always projects (β² > 0 there), so it splits the shell
    // into two halves each holding at most one window endpoint.
    let r_lo = if beta_sq_at(shell.0) >= 0.0 {
        shell.0
    } else {
        roots::find_root(&beta_sq_at, shell.0, anchor, cfg)?
    };
    let r_hi = if beta_sq_at(shell.1) >= 0.0 {
        shell.1
    } else {
        roots::find_root(&beta_sq_at, anchor, shell.1, cfg)?
    };

    // Index layout: 0..=half climbs the +β branch from r_lo to r_hi, the
    // rest descends the -β branch strictly inside the window, and the
    // final slot repeats point 0 to close the polygon exactly.
    let distinct = n_samples - 1;
    let half = distinct / 2;

    let mut points = Vec::with_capacity(n_samples);
    for k in 0..distinct {
        let (r, sign) = if k <= half {
            let t = k as f64 / half as f64;
            (r_lo + (r_hi - r_lo) * t, 1.0)
        } else {
            let t = (k - half) as f64 / (distinct - half) as f64;
            (r_hi - (r_hi - r_lo) * t, -1.0)
        };

        let (xi, eta) = photon_constants(r, a);
        let (alpha, beta_sq) = project(xi, eta, a, sin_i, cos_i);

        let beta = if k == 0 || k == half {
            // Window endpoints sit on the equatorial axis by construction
            0.0
        } else if beta_sq >= 0.0 {
            sign * beta_sq.sqrt()
        } else if beta_sq > -BETA_SQ_CLAMP {
            0.0
        } else {
            return Err(NumericalError::NegativeBetaSquared { r, value: beta_sq }.into());
        };

        points.push(SkyPoint { alpha, beta });
    }
    let first = points[0];
    points.push(first);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::PHOTON_SPHERE_RADIUS;

    const DEG: f64 = PI / 180.0;

    fn radius_stats(curve: &ShadowCurve) -> (f64, f64) {
        let radii: Vec<f64> = curve
            .points()
            .iter()
            .map(|p| (p.alpha * p.alpha + p.beta * p.beta).sqrt())
            .collect();
        let mean = radii.iter().sum::<f64>() / radii.len() as f64;
        let var = radii.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / radii.len() as f64;
        (mean, var.sqrt())
    }

    #[test]
    fn test_schwarzschild_circle() {
        let curve = compute_shadow(0.0, 45.0 * DEG, 2048).unwrap();
        let (mean, std) = radius_stats(&curve);
        assert!(
            (mean - 27.0_f64.sqrt()).abs() < 1e-3,
            "mean radius {} should be sqrt(27)",
            mean
        );
        assert!(std < 1e-3, "a = 0 shadow should be circular, std = {}", std);
    }

    #[test]
    fn test_schwarzschild_independent_of_inclination() {
        for &i in &[0.0, 30.0 * DEG, 60.0 * DEG, 90.0 * DEG, PI] {
            let curve = compute_shadow(0.0, i, 257).unwrap();
            for p in curve.points() {
                let r = (p.alpha * p.alpha + p.beta * p.beta).sqrt();
                assert!((r - SCHWARZSCHILD_SHADOW_RADIUS).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_face_on_mirror_symmetry() {
        let curve = compute_shadow(0.9, 0.0, 4096).unwrap();
        let max_a = curve
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_a = curve
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::INFINITY, f64::min);
        assert!(
            (max_a + min_a).abs() < 1e-3,
            "face-on curve should mirror in alpha, got max {} min {}",
            max_a,
            min_a
        );
    }

    #[test]
    fn test_face_on_approaches_schwarzschild_at_small_spin() {
        // Just above the Schwarzschild cutoff: continuity across the branch
        let curve = compute_shadow(1e-6, 0.0, 512).unwrap();
        let (mean, std) = radius_stats(&curve);
        assert!((mean - 27.0_f64.sqrt()).abs() < 1e-3);
        assert!(std < 1e-6);
    }

    #[test]
    fn test_south_pole_matches_north_pole() {
        let north = compute_shadow(0.7, 0.0, 129).unwrap();
        let south = compute_shadow(0.7, PI, 129).unwrap();
        for (p, q) in north.points().iter().zip(south.points()) {
            assert!((p.alpha - q.alpha).abs() < 1e-9);
            assert!((p.beta - q.beta).abs() < 1e-9);
        }
    }

    #[test]
    fn test_closure_across_grid() {
        for &a in &[0.0, 0.5, 0.9, -0.9] {
            for &i in &[0.0, 30.0 * DEG, 60.0 * DEG, 90.0 * DEG] {
                for &n in &[3, 64, 501] {
                    let curve = compute_shadow(a, i, n).unwrap();
                    assert_eq!(curve.len(), n);
                    assert!(
                        curve.is_closed(1e-6),
                        "open curve at a = {}, i = {}, n = {}",
                        a,
                        i,
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_nans_across_grid() {
        for &a in &[0.0, 0.5, 0.9] {
            for &i in &[0.0, 30.0 * DEG, 60.0 * DEG, 90.0 * DEG] {
                let curve = compute_shadow(a, i, 1024).unwrap();
                for p in curve.points() {
                    assert!(
                        p.alpha.is_finite() && p.beta.is_finite(),
                        "non-finite sample at a = {}, i = {}",
                        a,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn test_d_shaped_curve_at_high_spin() {
        // a = 0.9 at 60°: flattened on the prograde (negative α) side with
        // the centroid pushed toward +α
        let curve = compute_shadow(0.9, 60.0 * DEG, 500).unwrap();
        assert_eq!(curve.len(), 500);
        assert!(curve.is_closed(1e-6));

        let max_a = curve
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_a = curve
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::INFINITY, f64::min);
        let max_b = curve
            .points()
            .iter()
            .map(|p| p.beta)
            .fold(f64::NEG_INFINITY, f64::max);

        assert!(
            max_a + min_a > 0.05,
            "high-spin curve should flatten on the prograde side"
        );
        assert!(max_b > 4.0 && max_b < 6.0, "max beta out of range: {}", max_b);
    }

    #[test]
    fn test_retrograde_spin_mirrors_prograde() {
        let pro = compute_shadow(0.9, 60.0 * DEG, 401).unwrap();
        let ret = compute_shadow(-0.9, 60.0 * DEG, 401).unwrap();

        // Flipping the spin mirrors the silhouette in α
        let max_pro = pro
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_ret = ret
            .points()
            .iter()
            .map(|p| p.alpha)
            .fold(f64::INFINITY, f64::min);
        assert!((max_pro + min_ret).abs() < 1e-6);
    }

    #[test]
    fn test_upper_branch_alpha_monotone() {
        // ξ decreases monotonically across the shell, so the +β half must
        // sweep α strictly left to right; with the -β half mirroring it the
        // polygon cannot self-intersect
        let curve = compute_shadow(0.9, 60.0 * DEG, 401).unwrap();
        let half = (401 - 1) / 2;
        for k in 1..=half {
            assert!(
                curve.points()[k].alpha > curve.points()[k - 1].alpha,
                "alpha should increase along the +β branch at k = {}",
                k
            );
        }
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(
            compute_shadow(1.0, 0.5, 100),
            Err(KerrError::Domain(DomainError::SpinOutOfRange(_)))
        ));
        assert!(matches!(
            compute_shadow(-1.2, 0.5, 100),
            Err(KerrError::Domain(_))
        ));
        assert!(matches!(
            compute_shadow(0.5, -0.1, 100),
            Err(KerrError::Domain(DomainError::InclinationOutOfRange(_)))
        ));
        assert!(matches!(
            compute_shadow(0.5, PI + 0.1, 100),
            Err(KerrError::Domain(DomainError::InclinationOutOfRange(_)))
        ));
        assert!(matches!(
            compute_shadow(0.5, 0.5, 2),
            Err(KerrError::Domain(DomainError::ResolutionTooLow(2)))
        ));
    }

    #[test]
    fn test_photon_shell_examples() {
        let cfg = SolverConfig::default();

        let (lo, hi) = photon_shell(0.0, &cfg).unwrap();
        assert!((lo - PHOTON_SPHERE_RADIUS).abs() < 1e-9);
        assert!((hi - PHOTON_SPHERE_RADIUS).abs() < 1e-9);

        let (lo, hi) = photon_shell(0.9, &cfg).unwrap();
        assert!((lo - 1.5579).abs() < 1e-3, "prograde orbit at a = 0.9, got {}", lo);
        assert!((hi - 3.9103).abs() < 1e-3, "retrograde orbit at a = 0.9, got {}", hi);

        // Sign symmetry: the shell only depends on |a|
        let (lo_m, hi_m) = photon_shell(-0.9, &cfg).unwrap();
        assert!((lo - lo_m).abs() < 1e-9 && (hi - hi_m).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_metrics_near_schwarzschild_scale() {
        let curve = compute_shadow(0.5, 60.0 * DEG, 2048).unwrap();
        let m = curve.metrics();
        assert!(m.horizontal_diameter > 0.0);
        assert!(m.vertical_diameter > 0.0);
        assert!(m.equivalent_radius > 0.0);

        // All three sit near the a = 0 values 2√27 ≈ 10.39 and √27 ≈ 5.20
        assert!((m.horizontal_diameter - 10.39).abs() < 1.0);
        assert!((m.vertical_diameter - 10.39).abs() < 1.0);
        assert!((m.equivalent_radius - 5.2).abs() < 0.6);
    }

    #[test]
    fn test_curve_serializes() {
        let curve = compute_shadow(0.3, 45.0 * DEG, 65).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        assert!(json.contains("\"spin\":0.3"));
        assert!(json.contains("\"alpha\""));
    }
}
