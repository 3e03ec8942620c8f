//! Planar four-bar geometry.
use crate::{Error, FourBarTy};

/// Link lengths of a planar four-bar linkage.
///
/// # Parameters
///
/// + Ground link `l1`
/// + Driver link `l2`
/// + Coupler link `l3`
/// + Follower link `l4`
///
/// The driver pivot sits at the origin and the follower pivot at `(0, l1)`,
/// so the ground link is the vertical offset between the two fixed pivots.
/// All lengths must be positive and finite; whether the loop closes is a
/// property of the instantaneous driver angle, not of the lengths alone.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourBar {
    /// Length of the ground link
    pub l1: f64,
    /// Length of the driver link
    pub l2: f64,
    /// Length of the coupler link
    pub l3: f64,
    /// Length of the follower link
    pub l4: f64,
}

impl Default for FourBar {
    fn default() -> Self {
        Self::example()
    }
}

impl FourBar {
    /// Create a validated linkage from the loop lengths.
    pub fn new(l1: f64, l2: f64, l3: f64, l4: f64) -> Result<Self, Error> {
        let fb = Self { l1, l2, l3, l4 };
        fb.validate()?;
        Ok(fb)
    }

    /// An example crank rocker.
    pub const fn example() -> Self {
        Self { l1: 1., l2: 0.5, l3: 1., l4: 0.8 }
    }

    /// Check that every length is positive and finite.
    pub fn validate(&self) -> Result<(), Error> {
        let Self { l1, l2, l3, l4 } = *self;
        for (name, value) in [("l1", l1), ("l2", l2), ("l3", l3), ("l4", l4)] {
            if !value.is_finite() || value <= 0. {
                return Err(Error::InvalidConfiguration { name, value });
            }
        }
        Ok(())
    }

    /// The planar loop `[l1, l2, l3, l4]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.l1, self.l2, self.l3, self.l4]
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_loop(self.planar_loop())
    }
}
