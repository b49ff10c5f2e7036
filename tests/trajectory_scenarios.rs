use approx::assert_relative_eq;
use ballistic_tables::{
    estimate_distance, muzzle_velocity, projectile_acceleration, DragFunction, NoDrag,
    QuadraticDrag, TrajectoryParameters, TrajectoryPoint, TrajectoryStepper,
};

const G_FPS2: f64 = 32.17405;

fn run<D: DragFunction>(drag: D, v0: f64, step: f64, range: f64) -> Vec<TrajectoryPoint> {
    let mut stepper = TrajectoryStepper::new(TrajectoryParameters {
        g: G_FPS2,
        v0,
        theta: 0.0,
        drag,
    });

    let steps = (range / step).round() as usize;
    (0..=steps)
        .map(|i| stepper.step(i as f64 * step).unwrap())
        .collect()
}

#[test]
fn test_flat_fire_vacuum() {
    let points = run(NoDrag, 3000.0, 100.0, 500.0);
    assert_eq!(points.len(), 6);

    for pair in points.windows(2) {
        assert!(pair[1].time > pair[0].time);
        assert!(pair[1].drop.abs() >= pair[0].drop.abs());
        assert!(pair[1].drop <= 0.0);
    }

    let last = points.last().unwrap();
    assert_relative_eq!(last.time, 500.0 / 3000.0, max_relative = 0.01);
    // first interval starts level, so Euler sees no drop yet
    assert_eq!(points[1].drop, 0.0);
    assert!(last.drop < 0.0);
}

#[test]
fn test_vacuum_drop_converges_with_finer_steps() {
    let range = 500.0;
    let exact_drop = |t: f64| -0.5 * G_FPS2 * t * t;

    let mut previous_error = f64::INFINITY;
    for step in [100.0, 50.0, 10.0, 1.0] {
        let last = *run(NoDrag, 3000.0, step, range).last().unwrap();
        let error = (last.drop - exact_drop(last.time)).abs();
        assert!(error < previous_error, "step {step}: {error} >= {previous_error}");
        previous_error = error;
    }

    let fine = *run(NoDrag, 3000.0, 1.0, range).last().unwrap();
    assert_relative_eq!(fine.drop, exact_drop(fine.time), max_relative = 0.01);
}

#[test]
fn test_runs_are_deterministic() {
    let drag = QuadraticDrag::for_projectile(0.0023769, 0.2, 0.223 / 12.0, 55.0 / (7000.0 * G_FPS2));
    let first = run(drag, 2800.0, 25.0, 1000.0);
    let second = run(drag, 2800.0, 25.0, 1000.0);
    assert_eq!(first, second);
}

#[test]
fn test_light_drag_slows_projectile_early() {
    let drag = |v: f64| 1.0e-4 * v * v;
    let points = run(drag, 3000.0, 10.0, 200.0);

    for pair in points.windows(2) {
        assert!(pair[1].velocity <= pair[0].velocity);
    }
    assert!(points.last().unwrap().velocity < 3000.0);
}

#[test]
fn test_drag_increases_time_of_flight() {
    let vacuum = run(NoDrag, 3000.0, 10.0, 300.0);
    let dragged = run(|v: f64| 1.0e-4 * v * v, 3000.0, 10.0, 300.0);
    assert!(dragged.last().unwrap().time > vacuum.last().unwrap().time);
    assert!(dragged.last().unwrap().drop < vacuum.last().unwrap().drop);
}

#[test]
fn test_mil_dot_reference() {
    assert_relative_eq!(estimate_distance(18.0, 10.0), 1800.0);
}

#[test]
fn test_muzzle_velocity_pipeline() {
    // .223, 55 gr, 55000 psi, 18 in barrel in ft/slug/lbf
    let mass = 55.0 / (7000.0 * G_FPS2);
    let acceleration = projectile_acceleration(55_000.0 * 144.0, 0.223 / 12.0, mass);
    let v0 = muzzle_velocity(acceleration, 18.0 / 12.0);
    assert!(v0 > 4000.0 && v0 < 6000.0, "v0 = {v0}");
}
