/// Failure of a simulation setup or run.
///
/// A kinematic dead point is *not* represented here. Locking is an expected
/// physical outcome and folds into [`crate::LockState`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A length or inertia that must be positive and finite is not.
    ///
    /// Rejected at construction, before any integration begins.
    #[error("invalid configuration: {name} = {value}")]
    InvalidConfiguration {
        /// Field name of the offending parameter.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The effective-inertia denominator of the equation of motion fell
    /// below [`DEGENERACY_EPS`](crate::DEGENERACY_EPS), or a derivative
    /// probe produced a non-finite value.
    #[error("degenerate effective inertia at theta = {theta} rad")]
    Degenerate {
        /// Driver angle at failure.
        theta: f64,
    },
    /// A failure inside the time integrator, tagged with the simulation
    /// time and output sample index it occurred at.
    #[error("integration aborted at t = {t}, sample {step}")]
    Integration {
        /// Simulation time at failure.
        t: f64,
        /// Output sample index at failure.
        step: usize,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}
