//! Behavioral properties of the stepping engine, exercised through the public API.

use approx::assert_abs_diff_eq;
use fdm_wave_sim::{resolve_neighbors, BoundaryPolicy, Geometry, ManualClock, ObstacleMask,
                   SimConfig, Simulation, SourceConfig, WaveParams};
use fdm_wave_sim::stepper::ELEMS_PER_TASK;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(width: usize, height: usize, c2: f64, boundary: BoundaryPolicy) -> SimConfig {
    SimConfig {
        width,
        height,
        params: WaveParams {
            wave_speed_squared: c2,
            dx_squared: 1.,
            dt_squared: 1.,
            boundary,
        },
        geometry: Geometry::Open,
        source: None,
        ..SimConfig::default()
    }
}

fn sim(config: &SimConfig) -> Simulation {
    Simulation::with_clock(config, ManualClock::default()).unwrap()
}

#[test]
fn zero_field_stays_zero() {
    init_tracing();
    for &policy in &[BoundaryPolicy::Wall, BoundaryPolicy::Follow, BoundaryPolicy::Anti] {
        let mut s = Simulation::with_clock(&SimConfig {
                                              geometry: Geometry::ParabolicWedge,
                                              ..config(32, 24, 0.5, policy)
                                          },
                                          ManualClock::default())
            .unwrap();
        for _ in 0..5 {
            s.step();
        }
        assert!(s.snapshot().field().iter().all(|&x| x == 0.));
    }
}

#[test]
fn four_by_four_impulse() {
    init_tracing();
    let mut s = sim(&config(4, 4, 1., BoundaryPolicy::Wall));
    s.set_cell(1, 1, 1.).unwrap();
    s.step();

    let snap = s.snapshot();
    for y in 0..4 {
        for x in 0..4 {
            let expected = match (x, y) {
                (1, 1) => -2.,
                (0, 1) | (2, 1) | (1, 0) | (1, 2) => 1.,
                _ => 0.,
            };
            assert_eq!(snap.get(x, y), expected, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn single_cell_boundary_values() {
    // every neighbor of a 1x1 grid is off-grid: next = 2c + mu (4b - 4c)
    let c = 1.5;
    for &(policy, expected) in &[(BoundaryPolicy::Wall, -3.),
                                 (BoundaryPolicy::Follow, 3.),
                                 (BoundaryPolicy::Anti, -9.)] {
        let mut s = sim(&config(1, 1, 1., policy));
        s.set_cell(0, 0, c).unwrap();
        s.step();
        assert_eq!(s.snapshot().get(0, 0), expected, "{:?}", policy);
    }
}

#[test]
fn single_row_edge_uses_policy() {
    let mask = ObstacleMask::empty(2, 1);
    let field = [2., 7.];
    let n = resolve_neighbors(&field, &mask, BoundaryPolicy::Wall, 0, 0);
    assert_eq!((n.left, n.up, n.down, n.right), (0., 0., 0., 7.));
    let n = resolve_neighbors(&field, &mask, BoundaryPolicy::Follow, 0, 0);
    assert_eq!((n.left, n.up, n.down, n.right), (2., 2., 2., 7.));
    let n = resolve_neighbors(&field, &mask, BoundaryPolicy::Anti, 1, 0);
    assert_eq!((n.left, n.up, n.down, n.right), (2., -7., -7., -7.));
}

#[test]
fn stored_wall_value_is_ignored() {
    init_tracing();
    let wall = |x: usize, y: usize, _: usize, _: usize| x == 3 && (1..4).contains(&y);
    let base = config(7, 5, 0.5, BoundaryPolicy::Follow);

    let mut curr = vec![0.; 35];
    curr[2 * 7 + 2] = 1.;
    let last = vec![0.; 35];
    let mut poisoned = curr.clone();
    for y in 1..4 {
        poisoned[y * 7 + 3] = 1e12;
    }

    let mut a = Simulation::with_mask(&base,
                                      ObstacleMask::from_predicate(7, 5, wall),
                                      ManualClock::default())
        .unwrap();
    let mut b = Simulation::with_mask(&base,
                                      ObstacleMask::from_predicate(7, 5, wall),
                                      ManualClock::default())
        .unwrap();
    a.load_state(&curr, &last).unwrap();
    b.load_state(&poisoned, &last).unwrap();
    a.step();
    b.step();

    let (sa, sb) = (a.snapshot(), b.snapshot());
    for y in 0..5 {
        for x in 0..7 {
            if !sa.is_wall(x, y) {
                assert_eq!(sa.get(x, y), sb.get(x, y), "cell ({}, {})", x, y);
            }
        }
    }
    // (2, 2) sees the wall on its right as its own value under Follow
    let mu = a.coefficient();
    assert_eq!(sa.get(2, 2), 2. + mu * (0. + 0. + 0. + 1. - 4.));
}

#[test]
fn rotation_matches_independent_reference() {
    let mut s = sim(&SimConfig {
                        geometry: Geometry::ParabolicWedge,
                        ..config(40, 30, 0.5, BoundaryPolicy::Anti)
                    });
    let curr: Vec<f64> = (0..1200).map(|i| ((i * 37 % 101) as f64 / 50.) - 1.).collect();
    let last: Vec<f64> = (0..1200).map(|i| ((i * 53 % 89) as f64 / 44.) - 1.).collect();
    s.load_state(&curr, &last).unwrap();

    let mask = s.mask().clone();
    let mu = s.coefficient();
    let mut expected = vec![0.; 1200];
    for y in 0..30 {
        for x in 0..40 {
            let i = y * 40 + x;
            if mask.is_wall(x, y) {
                continue;
            }
            let n = resolve_neighbors(&curr, &mask, BoundaryPolicy::Anti, x, y);
            expected[i] = 2. * curr[i] - last[i] + mu * (n.left + n.up + n.right + n.down -
                                                         4. * curr[i]);
        }
    }

    s.step();
    assert_eq!(s.previous(), &curr[..]);
    let snap = s.snapshot();
    for y in 0..30 {
        for x in 0..40 {
            if !mask.is_wall(x, y) {
                assert_abs_diff_eq!(snap.get(x, y), expected[y * 40 + x], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn centered_pulse_stays_symmetric() {
    let (w, h) = (21, 15);
    let mut s = sim(&config(w, h, 0.5, BoundaryPolicy::Wall));
    s.set_cell(w / 2, h / 2, 1.).unwrap();
    for _ in 0..60 {
        s.step();
    }
    let snap = s.snapshot();
    assert!(snap.max_abs() > 0.);
    for y in 0..h {
        for x in 0..w {
            let v = snap.get(x, y);
            assert_abs_diff_eq!(v, snap.get(w - 1 - x, y), epsilon = 1e-9);
            assert_abs_diff_eq!(v, snap.get(x, h - 1 - y), epsilon = 1e-9);
        }
    }
}

#[test]
fn identical_runs_are_bit_identical() {
    let cfg = SimConfig {
        geometry: Geometry::ParabolicWedge,
        source: Some(SourceConfig::left_wedge()),
        ..config(64, 48, 0.5, BoundaryPolicy::Wall)
    };
    let clock_a = ManualClock::default();
    let clock_b = ManualClock::default();
    let mut a = Simulation::with_clock(&cfg, clock_a.clone()).unwrap();
    let mut b = Simulation::with_clock(&cfg, clock_b.clone()).unwrap();

    for _ in 0..100 {
        clock_a.advance(1. / 60.);
        clock_b.advance(1. / 60.);
        a.step();
        b.step();
    }
    assert_eq!(a.tick(), 100);
    assert_eq!(a.snapshot().field(), b.snapshot().field());
    assert_eq!(a.previous(), b.previous());
}

#[test]
fn parallel_stepping_matches_serial() {
    // more cells than one rayon task holds, so the row split really happens
    let (w, h) = (320, 240);
    assert!(w * h > ELEMS_PER_TASK);
    let mut cfg = SimConfig {
        geometry: Geometry::ParabolicWedge,
        source: Some(SourceConfig::left_wedge()),
        ..config(w, h, 0.5, BoundaryPolicy::Anti)
    };
    let clock_a = ManualClock::default();
    let clock_b = ManualClock::default();
    let mut a = Simulation::with_clock(&cfg, clock_a.clone()).unwrap();
    cfg.parallel = true;
    let mut b = Simulation::with_clock(&cfg, clock_b.clone()).unwrap();

    for _ in 0..100 {
        clock_a.advance(1. / 60.);
        clock_b.advance(1. / 60.);
        a.step();
        b.step();
    }
    assert!(a.snapshot().max_abs() > 0.);
    assert_eq!(a.snapshot().field(), b.snapshot().field());
    assert_eq!(a.previous(), b.previous());
}

#[test]
fn stable_preset_does_not_diverge() {
    init_tracing();
    let clock = ManualClock::default();
    let cfg = SimConfig {
        width: 64,
        height: 48,
        ..SimConfig::wedge()
    };
    let mut s = Simulation::with_clock(&cfg, clock.clone()).unwrap();
    for _ in 0..500 {
        clock.advance(1. / 60.);
        s.step();
    }
    let snap = s.snapshot();
    assert!(snap.is_finite());
    assert!(snap.max_abs() < 1e6);

    let clock = ManualClock::default();
    let cfg = SimConfig {
        width: 64,
        height: 48,
        ..SimConfig::open_channel()
    };
    let mut s = Simulation::with_clock(&cfg, clock.clone()).unwrap();
    for _ in 0..500 {
        clock.advance(1. / 60.);
        s.step();
    }
    assert!(s.snapshot().is_finite());
}

#[test]
fn resized_preset_drives_anchored_source() {
    let clock = ManualClock::new(0.25);
    let cfg = SimConfig {
        width: 1280,
        height: 960,
        ..SimConfig::wedge()
    };
    let mut s = Simulation::with_clock(&cfg, clock).unwrap();
    s.step();
    let snap = s.snapshot();
    assert_abs_diff_eq!(snap.get(1280 / 16, 960 / 2), 20. * (2.5f64).sin(), epsilon = 1e-12);
    assert_eq!(snap.get(40, 240), 0.);
    assert_eq!(snap.field().iter().filter(|&&x| x != 0.).count(), 1);
}

#[test]
fn unstable_parameters_diverge_without_error() {
    let mut s = sim(&config(16, 16, 1., BoundaryPolicy::Follow));
    s.set_cell(5, 7, 1.).unwrap();
    for _ in 0..600 {
        s.step();
    }
    let snap = s.snapshot();
    assert!(!snap.is_finite() || snap.max_abs() > 1e100);
}
