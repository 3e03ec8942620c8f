//! Pin positions and link segments for an external renderer.
//!
//! Every query passes the driver angle through [`kin::filter_angle`]
//! first, so frames rendered after a lock stay at the locking
//! configuration.
use crate::{kin, FourBar, LockState};
use nalgebra as na;

fn angle(p: na::Point2<f64>, d: f64, a: f64) -> na::Point2<f64> {
    p + d * na::Vector2::new(a.cos(), a.sin())
}

/// The four pin positions at a lock-filtered driver angle.
///
/// Order: driver pivot, follower pivot, driver pin, follower pin.
pub fn pos(fb: &FourBar, theta: f64, lock: &LockState) -> [[f64; 2]; 4] {
    let theta = kin::filter_angle(fb, theta, lock);
    let p1 = na::Point2::origin();
    let p2 = na::Point2::new(0., fb.l1);
    let p3 = angle(p1, fb.l2, theta);
    // the filtered angle always has a real solution
    let out = kin::try_output_angle(fb, theta).unwrap_or(f64::NAN);
    let p4 = angle(p2, fb.l4, out);
    macro_rules! build_coords {
        [$($p:ident),+] => { [$([$p.x, $p.y]),+] }
    }
    build_coords![p1, p2, p3, p4]
}

/// The four link segments as endpoint pairs.
///
/// Order: ground, driver, follower, coupler.
pub fn links(fb: &FourBar, theta: f64, lock: &LockState) -> [[[f64; 2]; 2]; 4] {
    let [p1, p2, p3, p4] = pos(fb, theta, lock);
    [[p1, p2], [p1, p3], [p2, p4], [p3, p4]]
}
