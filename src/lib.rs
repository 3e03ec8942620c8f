//! Four🍀bar dynamics simulates the torque-driven motion of planar four-bar
//! linkages.
//!
//! The crate solves the position-closure equation of the loop, tracks
//! kinematic dead points ([`LockState`]), and integrates the equation of
//! motion of the driver link over time:
//!
//! ```
//! use four_bar_dyn::{Dynamics, FourBar, Inertia, Simulation};
//!
//! let fb = FourBar::example();
//! let inertia = Inertia { j_in: 60., j_out: 10., torque: 0. };
//! let sim = Simulation::new(Dynamics::new(fb, inertia)?, 0., 0.2).with_time(100., 400);
//! let (trajectory, lock) = sim.run()?;
//! assert_eq!(trajectory.len(), 400);
//! assert!(!lock.is_locked());
//! # Ok::<(), four_bar_dyn::Error>(())
//! ```
//!
//! Rendering is out of scope. The [`coord`] module maps angles to pin
//! positions and link segments for an external renderer.
#![warn(missing_docs)]
pub use crate::coord::*;
pub use crate::dynamics::*;
pub use crate::error::*;
pub use crate::fb::*;
pub use crate::kin::*;
pub use crate::ode::*;
pub use crate::stat::*;

pub mod coord;
mod dynamics;
mod error;
mod fb;
pub mod kin;
mod ode;
mod stat;
#[cfg(test)]
mod tests;
