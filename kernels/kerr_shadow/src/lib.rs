// kernels/kerr_shadow/src/lib.rs
// Kerr black hole observables: ISCO radius and radiative efficiency from
// the marginal stability condition, and shadow boundary curves from the
// unstable spherical photon orbits.
//
// Geometric units G = c = M = 1 throughout; radii in units of GM/c²,
// spin as the dimensionless a = J/M² with sign carrying the orbital
// sense (a > 0 prograde, a < 0 retrograde).

pub mod error;
pub mod isco;
pub mod metric;
pub mod roots;
pub mod shadow;
pub mod types;

pub use error::{DomainError, KerrError, NumericalError};
pub use isco::{compute_isco, compute_isco_with, IscoResult};
pub use roots::{find_root, SolverConfig};
pub use shadow::{
    compute_shadow, compute_shadow_with, photon_shell, BoundaryMetrics, ShadowCurve, SkyPoint,
};
pub use types::{BlackHole, SPIN_EPSILON};
