//! Equation of motion of the torque-driven linkage.
//!
//! The velocity ratio comes from the velocity-loop equation in closed
//! form. The first and second derivatives of the follower angle with
//! respect to the driver angle are central finite differences through the
//! closure solver; the step size is a tunable on [`Dynamics`] with
//! truncation error `O(dx^2)` and a rounding floor `O(eps / dx)`, so values
//! far from the default trade one against the other.
use crate::{kin, Error, FourBar, LockState};

/// Default finite-difference step in radians.
pub const DEFAULT_DIFF_STEP: f64 = 1e-5;

/// Effective-inertia denominators below this magnitude abort the run.
pub const DEGENERACY_EPS: f64 = 1e-9;

/// Inertial parameters and the constant driving torque.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    /// Moment of inertia of the driver link
    pub j_in: f64,
    /// Moment of inertia of the follower link
    pub j_out: f64,
    /// Constant torque applied to the driver link
    pub torque: f64,
}

impl Inertia {
    /// Check that both inertias are positive and all values finite.
    pub fn validate(&self) -> Result<(), Error> {
        let Self { j_in, j_out, torque } = *self;
        for (name, value) in [("j_in", j_in), ("j_out", j_out)] {
            if !value.is_finite() || value <= 0. {
                return Err(Error::InvalidConfiguration { name, value });
            }
        }
        if !torque.is_finite() {
            return Err(Error::InvalidConfiguration { name: "torque", value: torque });
        }
        Ok(())
    }
}

/// The torque-balance model of one linkage.
///
/// Combines the geometry, the inertial parameters, and the derivative
/// engine into the state derivative consumed by the integrator.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Dynamics {
    /// Link lengths
    pub fb: FourBar,
    /// Inertias and applied torque
    pub inertia: Inertia,
    /// Finite-difference step of the derivative engine (radians)
    pub diff_step: f64,
}

impl Dynamics {
    /// Create a validated model with the default derivative step.
    pub fn new(fb: FourBar, inertia: Inertia) -> Result<Self, Error> {
        fb.validate()?;
        inertia.validate()?;
        Ok(Self { fb, inertia, diff_step: DEFAULT_DIFF_STEP })
    }

    /// Replace the finite-difference step.
    pub fn with_diff_step(self, diff_step: f64) -> Self {
        Self { diff_step, ..self }
    }

    /// Velocity ratio of the follower to the driver link.
    ///
    /// Closed form of `dO/dθ` from the velocity-loop equation, where `O`
    /// is the follower angle. Equals the transmitted torque ratio between
    /// the two links.
    pub fn mech_ratio(&self, theta: f64, lock: &mut LockState) -> f64 {
        let FourBar { l1, l2, l4, .. } = self.fb;
        let out = kin::output_angle(&self.fb, theta, lock);
        let f = l2 * l4 * (out - theta).sin();
        (l1 * l2 * theta.cos() + f) / (l1 * l4 * out.cos() + f)
    }

    /// First derivative of the follower angle by symmetric difference.
    pub fn d1(&self, theta: f64, lock: &mut LockState) -> f64 {
        let dx = self.diff_step;
        (kin::output_angle(&self.fb, theta + dx, lock)
            - kin::output_angle(&self.fb, theta - dx, lock))
            / (2. * dx)
    }

    /// Second derivative of the follower angle by the three-point stencil.
    pub fn d2(&self, theta: f64, lock: &mut LockState) -> f64 {
        let dx = self.diff_step;
        (kin::output_angle(&self.fb, theta + dx, lock)
            + kin::output_angle(&self.fb, theta - dx, lock)
            - 2. * kin::output_angle(&self.fb, theta, lock))
            / (dx * dx)
    }

    /// Angular acceleration of the driver link at `(theta, omega)`.
    ///
    /// Torque balance reflected to the driver coordinate: the numerator
    /// nets the applied torque against the centrifugal coupling term, the
    /// denominator is the angle-dependent effective inertia. A near-zero
    /// denominator is fatal and surfaces as [`Error::Degenerate`].
    pub fn accel(&self, theta: f64, omega: f64, lock: &mut LockState) -> Result<f64, Error> {
        let Inertia { j_in, j_out, torque } = self.inertia;
        let ratio = self.mech_ratio(theta, lock);
        let den = j_in + j_out * self.d1(theta, lock) * ratio;
        if !den.is_finite() || den.abs() < DEGENERACY_EPS {
            tracing::error!(theta, den, "effective inertia degenerated");
            return Err(Error::Degenerate { theta });
        }
        Ok((torque - j_out * omega * omega * self.d2(theta, lock) * ratio) / den)
    }

    /// State derivative `[dθ/dt, dω/dt]` for the integrator.
    ///
    /// A locked mechanism returns `[0, 0]`. The derivative never rewrites
    /// the angle itself; clamping to the lock angle is the caller's job.
    pub fn state_deriv(&self, state: [f64; 2], lock: &mut LockState) -> Result<[f64; 2], Error> {
        if lock.is_locked() {
            return Ok([0., 0.]);
        }
        let [theta, omega] = state;
        Ok([omega, self.accel(theta, omega, lock)?])
    }
}
