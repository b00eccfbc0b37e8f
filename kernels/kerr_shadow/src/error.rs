// Error taxonomy for the Kerr observable solvers

use thiserror::Error;

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Input outside the physically supported range.
///
/// These are caller mistakes, not solver failures. The offending value is
/// carried in the variant so the caller can see exactly what was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// Spin must satisfy |a| < 1 (sub-extremal Kerr).
    #[error("spin a = {0} is outside the supported range |a| < 1")]
    SpinOutOfRange(f64),

    /// Inclination must lie in [0, pi] radians (angle from the spin axis).
    #[error("inclination i = {0} rad is outside the supported range [0, pi]")]
    InclinationOutOfRange(f64),

    /// A closed curve needs at least 3 samples.
    #[error("n_samples = {0} is below the minimum of 3")]
    ResolutionTooLow(usize),

    /// No equatorial circular orbit exists at the requested radius: inside
    /// the circular photon orbit the energy radicand r^(3/2) - 3r^(1/2) + 2a
    /// goes non-positive.
    #[error("no equatorial circular orbit at r = {r} for spin a = {a}")]
    NoCircularOrbit { r: f64, a: f64 },
}

// ============================================================================
// NUMERICAL ERRORS
// ============================================================================

/// A bounded numeric procedure failed.
///
/// These computations are deterministic, so retrying with the same inputs
/// reproduces the failure and nothing retries automatically. The last
/// bracket and residual are carried for diagnosis; callers may relax the
/// tolerance or widen the bracket and try again themselves.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NumericalError {
    /// The supplied bracket does not straddle a sign change.
    #[error("bracket [{lo}, {hi}] has no sign change (f(lo) = {f_lo:e}, f(hi) = {f_hi:e})")]
    NoBracket { lo: f64, hi: f64, f_lo: f64, f_hi: f64 },

    /// The iteration cap was reached before the bracket narrowed to
    /// tolerance.
    #[error("no convergence after {max_iter} iterations (bracket [{lo}, {hi}], residual {residual:e})")]
    NoConvergence {
        lo: f64,
        hi: f64,
        residual: f64,
        max_iter: usize,
    },

    /// The beta^2 radicand of the sky projection went negative beyond
    /// floating-point noise.
    #[error("beta^2 = {value:e} at photon radius r = {r} is negative beyond tolerance")]
    NegativeBetaSquared { r: f64, value: f64 },
}

// ============================================================================
// TOP-LEVEL ERROR
// ============================================================================

/// Sum of the two failure families, returned by the public solver entry
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KerrError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Numerical(#[from] NumericalError),
}
