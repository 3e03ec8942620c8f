//! Fixed-step integration of the motion state.
//!
//! The state `[θ, ω]` advances by classical fourth-order Runge-Kutta,
//! substituted for a general-purpose adaptive solver. In the smooth
//! (unlocked) regime the local error is `O(h^5)` per substep; raise
//! [`Simulation::substeps`] to tighten it. The dynamics are discontinuous
//! at lock onset, so the lock is handled as a terminal state-machine
//! transition instead of asking the stepper to absorb the discontinuity:
//! once the closure solver trips the lock, the state clamps to the lock
//! angle with zero velocity and every remaining sample is frozen there.
use crate::{Dynamics, Error, LockState};

/// One trajectory sample.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Simulation time
    pub t: f64,
    /// Driver angle (radians)
    pub theta: f64,
    /// Driver angular velocity (radians per second)
    pub omega: f64,
}

/// Ordered `(t, θ, ω)` samples of one simulation run.
pub type Trajectory = Vec<Sample>;

/// A configured simulation run over `[0, t_end]`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    /// Dynamics model
    pub model: Dynamics,
    /// Initial driver angle (radians)
    pub theta0: f64,
    /// Initial driver angular velocity (radians per second)
    pub omega0: f64,
    /// End of the time span
    pub t_end: f64,
    /// Number of output samples
    pub samples: usize,
    /// Runge-Kutta steps between two output samples
    pub substeps: usize,
}

impl Simulation {
    /// Create a run from the initial state with the default time grid.
    pub fn new(model: Dynamics, theta0: f64, omega0: f64) -> Self {
        Self { model, theta0, omega0, t_end: 100., samples: 400, substeps: 4 }
    }

    /// Set the time span and output sample count.
    pub fn with_time(self, t_end: f64, samples: usize) -> Self {
        Self { t_end, samples, ..self }
    }

    /// Set the number of Runge-Kutta steps between two output samples.
    pub fn with_substeps(self, substeps: usize) -> Self {
        Self { substeps, ..self }
    }

    /// Integrate the trajectory eagerly.
    ///
    /// Returns the sampled trajectory together with the final lock state.
    /// The run either completes the full sample count or aborts on a
    /// numerical singularity ([`Error::Integration`] wrapping the cause
    /// with the time and sample index).
    pub fn run(&self) -> Result<(Trajectory, LockState), Error> {
        if !self.t_end.is_finite() || self.t_end <= 0. {
            return Err(Error::InvalidConfiguration { name: "t_end", value: self.t_end });
        }
        let mut lock = LockState::new(self.theta0);
        let substeps = self.substeps.max(1);
        let dt = self.t_end / self.samples.saturating_sub(1).max(1) as f64;
        let h = dt / substeps as f64;
        let mut state = [self.theta0, self.omega0];
        let mut out = Vec::with_capacity(self.samples);
        for step in 0..self.samples {
            let t = step as f64 * dt;
            if lock.is_locked() {
                out.push(Sample { t, theta: lock.lock_angle(), omega: 0. });
                continue;
            }
            out.push(Sample { t, theta: state[0], omega: state[1] });
            if step + 1 == self.samples {
                break;
            }
            for i in 0..substeps {
                state = rk4(&self.model, state, h, &mut lock).map_err(|source| {
                    Error::Integration { t: t + i as f64 * h, step, source: Box::new(source) }
                })?;
                if lock.is_locked() {
                    state = [lock.lock_angle(), 0.];
                    break;
                }
            }
        }
        Ok((out, lock))
    }
}

/// One classical Runge-Kutta step of width `h`.
fn rk4(model: &Dynamics, y: [f64; 2], h: f64, lock: &mut LockState) -> Result<[f64; 2], Error> {
    let k1 = model.state_deriv(y, lock)?;
    let k2 = model.state_deriv(shift(y, k1, h / 2.), lock)?;
    let k3 = model.state_deriv(shift(y, k2, h / 2.), lock)?;
    let k4 = model.state_deriv(shift(y, k3, h), lock)?;
    Ok(std::array::from_fn(|i| {
        y[i] + h / 6. * (k1[i] + 2. * k2[i] + 2. * k3[i] + k4[i])
    }))
}

fn shift(y: [f64; 2], k: [f64; 2], h: f64) -> [f64; 2] {
    std::array::from_fn(|i| y[i] + h * k[i])
}
