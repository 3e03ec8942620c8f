//! Linkage classification and dead-point bookkeeping.

/// Dead-point state of one simulation run.
///
/// Written only by the closure solver ([`crate::kin::output_angle`]); read
/// by the dynamics model, the input filter, and the coordinate mapper.
/// Once `locked` is set it stays set for the rest of the run, and
/// `lock_angle` holds the last driver angle with a real closure solution.
/// The state is threaded explicitly through every call that needs it, so
/// independent runs (e.g. parameter sweeps) never interfere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockState {
    locked: bool,
    lock_angle: f64,
}

impl LockState {
    /// Start a run unlocked at the initial driver angle.
    ///
    /// The initial angle is assumed solvable. Seeding with an unsolvable
    /// angle leaves the fallback nowhere valid to freeze at.
    pub const fn new(theta0: f64) -> Self {
        Self { locked: false, lock_angle: theta0 }
    }

    /// Whether the mechanism has reached a dead point in this run.
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Last driver angle with a real closure solution.
    pub const fn lock_angle(&self) -> f64 {
        self.lock_angle
    }

    pub(crate) fn record_valid(&mut self, theta: f64) {
        if !self.locked {
            self.lock_angle = theta;
        }
    }

    pub(crate) fn lock(&mut self) {
        if !self.locked {
            tracing::debug!(lock_angle = self.lock_angle, "dead point reached");
            self.locked = true;
        }
    }
}

/// Type of the four-bar linkage.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum FourBarTy {
    /// Grashof double crank (Drag-link)
    GCCC,
    /// Grashof crank rocker
    GCRR,
    /// Grashof double rocker
    GRCR,
    /// Grashof rocker crank
    GRRC,
    /// Non-Grashof triple rocker (ground link is the longest)
    RRR1,
    /// Non-Grashof triple rocker (driver link is the longest)
    RRR2,
    /// Non-Grashof triple rocker (coupler link is the longest)
    RRR3,
    /// Non-Grashof triple rocker (follower link is the longest)
    RRR4,
    /// Invalid
    Invalid,
}

impl FourBarTy {
    /// Detect from four-bar loop `[l1, l2, l3, l4]`.
    pub fn from_loop(fb_loop: [f64; 4]) -> Self {
        let [l1, l2, l3, l4] = fb_loop;
        let mut sorted = fb_loop;
        sorted.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = sorted;
        if l > s + p + q {
            return Self::Invalid;
        }
        if s + l < p + q {
            match s {
                s if s == l1 => Self::GCCC,
                s if s == l2 => Self::GCRR,
                s if s == l3 => Self::GRCR,
                s if s == l4 => Self::GRRC,
                _ => unreachable!(),
            }
        } else {
            match l {
                l if l == l1 => Self::RRR1,
                l if l == l2 => Self::RRR2,
                l if l == l3 => Self::RRR3,
                l if l == l4 => Self::RRR4,
                _ => unreachable!(),
            }
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GCCC => "Grashof double crank (Drag-link, GCCC)",
            Self::GCRR => "Grashof crank rocker (GCRR)",
            Self::GRCR => "Grashof double rocker (GRCR)",
            Self::GRRC => "Grashof rocker crank (GRRC)",
            Self::RRR1 => "Non-Grashof triple rocker (RRR1)",
            Self::RRR2 => "Non-Grashof triple rocker (RRR2)",
            Self::RRR3 => "Non-Grashof triple rocker (RRR3)",
            Self::RRR4 => "Non-Grashof triple rocker (RRR4)",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR | Self::GRCR | Self::GRRC)
    }
}
