//! Position closure of the four-bar loop.
//!
//! The loop closes through the diagonal `h` between the follower pivot and
//! the driver pin. The closure condition reduces to a sine term `s`; the
//! loop has a real solution iff `|s| <= 1`. Outside that range the
//! mechanism stands at a dead point and the solver falls back to the last
//! valid angle recorded in [`LockState`].
use crate::{FourBar, LockState};

/// Diagonal length between the follower pivot and the driver pin.
pub fn diagonal(fb: &FourBar, theta: f64) -> f64 {
    let FourBar { l1, l2, .. } = *fb;
    (l1 * l1 + l2 * l2 - 2. * l1 * l2 * theta.sin()).sqrt()
}

/// Sine term of the closure equation.
///
/// The loop closes at `theta` iff the result is within `[-1, 1]`.
pub fn closure_sine(fb: &FourBar, theta: f64) -> f64 {
    let FourBar { l3, l4, .. } = *fb;
    let h = diagonal(fb, theta);
    (l4 * l4 - l3 * l3 + h * h) / (2. * l4 * h)
}

/// Solve the closure equation without lock bookkeeping.
///
/// Returns `None` at a dead point.
pub fn try_output_angle(fb: &FourBar, theta: f64) -> Option<f64> {
    let s = closure_sine(fb, theta);
    (s.abs() <= 1.).then(|| {
        let FourBar { l1, l2, .. } = *fb;
        f64::atan2(l2 * theta.cos(), l1 - l2 * theta.sin()) - s.asin()
    })
}

/// Solve the closure equation for the follower angle.
///
/// On success `theta` is recorded as the last valid angle. When no real
/// solution exists the mechanism is at a dead point: the lock flag is set
/// and the stored last-valid angle is solved instead. The fallback is a
/// single bounded re-evaluation rather than a recursion, since the stored
/// angle is known solvable.
pub fn output_angle(fb: &FourBar, theta: f64, lock: &mut LockState) -> f64 {
    match try_output_angle(fb, theta) {
        Some(out) => {
            lock.record_valid(theta);
            out
        }
        None => {
            lock.lock();
            // NAN only if the lock state was seeded with an unsolvable angle
            try_output_angle(fb, lock.lock_angle()).unwrap_or(f64::NAN)
        }
    }
}

/// Clamp a driver angle to the locking configuration.
///
/// Returns `theta` unchanged while the run is unlocked and the angle is
/// solvable. After a lock, every query returns [`LockState::lock_angle`],
/// including angles that would otherwise be solvable, so that post-lock
/// frames freeze at the locking configuration.
pub fn filter_angle(fb: &FourBar, theta: f64, lock: &LockState) -> f64 {
    if lock.is_locked() || closure_sine(fb, theta).abs() > 1. {
        lock.lock_angle()
    } else {
        theta
    }
}
