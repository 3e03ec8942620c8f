use crate::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::{FRAC_PI_2, TAU};

fn rocker() -> FourBar {
    FourBar::new(1., 0.6, 0.6, 0.7).unwrap()
}

#[test]
fn closure_round_trip() {
    let fb = FourBar::example();
    for i in 0..360 {
        let theta = i as f64 / 360. * TAU;
        assert!(kin::closure_sine(&fb, theta).abs() <= 1.);
        let out = kin::try_output_angle(&fb, theta).unwrap();
        // the follower pin must sit one coupler length from the driver pin
        let [px, py] = [fb.l2 * theta.cos(), fb.l2 * theta.sin()];
        let [qx, qy] = [fb.l4 * out.cos(), fb.l4 * out.sin() + fb.l1];
        assert_abs_diff_eq!((qx - px).hypot(qy - py), fb.l3, epsilon = 1e-9);
    }
}

#[test]
fn closure_reference_values() {
    let fb = FourBar::example();
    let mut lock = LockState::new(0.);
    assert_abs_diff_eq!(kin::diagonal(&fb, 0.), 1.25f64.sqrt(), epsilon = 1e-12);
    let s = kin::closure_sine(&fb, 0.);
    assert_abs_diff_eq!(s, 0.4975251, epsilon = 1e-6);
    let out = kin::output_angle(&fb, 0., &mut lock);
    assert!(!lock.is_locked());
    assert_abs_diff_eq!(out, f64::atan2(fb.l2, fb.l1) - s.asin(), epsilon = 1e-12);
    assert_abs_diff_eq!(out, -0.0571, epsilon = 1e-3);
}

#[test]
fn rocker_sweep_locks() {
    let fb = rocker();
    assert_eq!(fb.ty(), FourBarTy::RRR1);
    assert!(!fb.ty().is_grashof());
    let mut lock = LockState::new(0.);
    let mut tripped = false;
    for i in 0..=360 {
        let theta = i as f64 / 360. * TAU;
        let out = kin::output_angle(&fb, theta, &mut lock);
        assert!(out.is_finite());
        tripped |= lock.is_locked();
    }
    assert!(tripped);
    // freeze is idempotent, even for angles that are solvable on their own
    let frozen = lock.lock_angle();
    assert_eq!(kin::filter_angle(&fb, 0.1, &lock), frozen);
    assert_eq!(kin::filter_angle(&fb, 5., &lock), frozen);
    assert!(kin::try_output_angle(&fb, frozen).is_some());
}

#[test]
fn ratio_matches_finite_difference() {
    let fb = FourBar::example();
    let model = Dynamics::new(fb, Inertia { j_in: 60., j_out: 10., torque: 0. }).unwrap();
    let mut lock = LockState::new(0.);
    for i in 0..8 {
        let theta = i as f64 / 8. * TAU;
        let ratio = model.mech_ratio(theta, &mut lock);
        let d1 = model.d1(theta, &mut lock);
        assert_relative_eq!(ratio, d1, epsilon = 1e-6, max_relative = 1e-6);
    }
    assert!(!lock.is_locked());
}

#[test]
fn ratio_at_symmetric_configuration() {
    // at θ = 90° the velocity loop reduces to -l2 / (l1 - l2)
    let fb = FourBar::new(1., 0.5, 0.8, 0.8).unwrap();
    let model = Dynamics::new(fb, Inertia { j_in: 1., j_out: 1., torque: 0. }).unwrap();
    let mut lock = LockState::new(FRAC_PI_2);
    assert_abs_diff_eq!(model.mech_ratio(FRAC_PI_2, &mut lock), -1., epsilon = 1e-12);
}

#[test]
fn equilibrium_stays_at_rest() {
    let inertia = Inertia { j_in: 60., j_out: 10., torque: 0. };
    let model = Dynamics::new(FourBar::example(), inertia).unwrap();
    let (traj, lock) = Simulation::new(model, 0., 0.).with_time(10., 100).run().unwrap();
    assert!(!lock.is_locked());
    assert_eq!(traj.len(), 100);
    for s in traj {
        assert_eq!(s.theta, 0.);
        assert_eq!(s.omega, 0.);
    }
}

#[test]
fn trajectory_freezes_after_lock() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    // follower inertia low enough that the crank drives into the dead point
    let model = Dynamics::new(rocker(), Inertia { j_in: 1., j_out: 1e-6, torque: 2. }).unwrap();
    let sim = Simulation::new(model, 0., 0.).with_time(5., 250).with_substeps(8);
    let (traj, lock) = sim.run().unwrap();
    assert!(lock.is_locked());
    let first = traj
        .iter()
        .position(|s| s.omega == 0. && s.theta == lock.lock_angle())
        .unwrap();
    assert!(first > 0);
    assert!(traj[first - 1].omega > 0.);
    for s in &traj[first..] {
        assert_eq!(s.theta, lock.lock_angle());
        assert_eq!(s.omega, 0.);
    }
}

#[test]
fn invalid_configuration_is_rejected() {
    let err = FourBar::new(0., 1., 1., 1.);
    assert!(matches!(err, Err(Error::InvalidConfiguration { name: "l1", .. })));
    assert!(FourBar::new(1., f64::NAN, 1., 1.).is_err());
    let inertia = Inertia { j_in: -1., j_out: 1., torque: 0. };
    let err = Dynamics::new(FourBar::example(), inertia);
    assert!(matches!(err, Err(Error::InvalidConfiguration { name: "j_in", .. })));
    let model = Dynamics::new(FourBar::example(), Inertia { j_in: 1., j_out: 1., torque: 0. });
    let sim = Simulation::new(model.unwrap(), 0., 0.).with_time(-1., 10);
    assert!(sim.run().is_err());
}

#[test]
fn coordinate_mapper_pins_and_links() {
    let fb = FourBar::example();
    let lock = LockState::new(0.);
    let [p1, p2, p3, p4] = coord::pos(&fb, 0., &lock);
    assert_eq!(p1, [0., 0.]);
    assert_eq!(p2, [0., fb.l1]);
    assert_eq!(p3, [fb.l2, 0.]);
    let d = (p4[0] - p3[0]).hypot(p4[1] - p3[1]);
    assert_abs_diff_eq!(d, fb.l3, epsilon = 1e-9);
    let segs = coord::links(&fb, 0., &lock);
    assert_eq!(segs[0], [p1, p2]);
    assert_eq!(segs[1], [p1, p3]);
    assert_eq!(segs[2], [p2, p4]);
    assert_eq!(segs[3], [p3, p4]);
}

#[test]
fn coordinate_mapper_freezes_after_lock() {
    let fb = rocker();
    let mut lock = LockState::new(0.);
    kin::output_angle(&fb, 0.5, &mut lock);
    kin::output_angle(&fb, 3.6, &mut lock); // dead point
    assert!(lock.is_locked());
    assert_eq!(lock.lock_angle(), 0.5);
    let frozen = coord::pos(&fb, 0.5, &lock);
    assert_eq!(coord::pos(&fb, 1., &lock), frozen);
    assert_eq!(coord::pos(&fb, 6., &lock), frozen);
}

#[test]
fn grashof_classification() {
    assert_eq!(FourBarTy::from_loop([90., 35., 70., 70.]), FourBarTy::GCRR);
    assert!(FourBarTy::from_loop([90., 35., 70., 70.]).is_grashof());
    assert_eq!(FourBar::example().ty(), FourBarTy::GCRR);
    assert_eq!(rocker().ty().name(), "Non-Grashof triple rocker (RRR1)");
    assert_eq!(FourBarTy::from_loop([10., 1., 1., 1.]), FourBarTy::Invalid);
    assert!(!FourBarTy::from_loop([10., 1., 1., 1.]).is_valid());
}
