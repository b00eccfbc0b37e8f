// Bracketed scalar root finding
//
// Both observable families reduce to "find the root of a smooth scalar
// function inside a bracket that provably contains it": the ISCO from the
// marginal-stability condition, the photon shell bounds from the circular
// photon orbit condition, and the visible-window endpoints from β² = 0.
// One bounded bisection routine serves them all.

use crate::error::NumericalError;

// ============================================================================
// SOLVER CONFIGURATION
// ============================================================================

// Convergence knobs for the bracketed root solver
//
// - tol: absolute bracket width at which the midpoint is accepted
// - max_iter: hard bound on bisection steps; hitting it is an error, not a
//   silent best-effort answer
//
// Bisection halves the bracket every step, so the defaults converge any
// bracket used in this crate (width ≤ 8) with dozens of iterations to
// spare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tol: f64,
    pub max_iter: usize,
}

impl SolverConfig {
    pub fn new(tol: f64, max_iter: usize) -> Self {
        assert!(tol > 0.0, "Tolerance must be positive");
        assert!(max_iter > 0, "Iteration cap must be positive");
        Self { tol, max_iter }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tol: 1e-12,
            max_iter: 128,
        }
    }
}

// ============================================================================
// BISECTION
// ============================================================================

// Find a root of f inside [lo, hi] by bisection.
//
// Requirements: f continuous on the bracket with f(lo) and f(hi) of
// opposite sign. An endpoint that is already an exact root is returned
// immediately, and the bracket may be given in either order.
//
// Failure is explicit: a same-sign bracket, a non-finite endpoint value,
// or an exhausted iteration cap comes back as a NumericalError carrying
// the bracket and residual, never as a best-effort radius.
pub fn find_root<F>(f: F, lo: f64, hi: f64, cfg: &SolverConfig) -> Result<f64, NumericalError>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

    let mut f_lo = f(lo);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    let f_hi = f(hi);
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if !f_lo.is_finite() || !f_hi.is_finite() || f_lo * f_hi > 0.0 {
        return Err(NumericalError::NoBracket { lo, hi, f_lo, f_hi });
    }

    for _ in 0..cfg.max_iter {
        let mid = 0.5 * (lo + hi);
        // Bracket at floating-point resolution: the midpoint cannot move
        // any further, so this is the best representable answer
        if mid <= lo || mid >= hi {
            return Ok(mid);
        }

        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if !f_mid.is_finite() {
            return Err(NumericalError::NoConvergence {
                lo,
                hi,
                residual: f_mid,
                max_iter: cfg.max_iter,
            });
        }

        // Keep the half that still straddles the sign change
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }

        if hi - lo <= cfg.tol {
            return Ok(0.5 * (lo + hi));
        }
    }

    let mid = 0.5 * (lo + hi);
    Err(NumericalError::NoConvergence {
        lo,
        hi,
        residual: f(mid),
        max_iter: cfg.max_iter,
    })
}
