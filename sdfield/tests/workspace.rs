//! Integration tests validating analytic derivatives against a
//! finite-difference oracle, plus grid/occupancy agreement properties.
use approx::assert_relative_eq;
use nalgebra::{Matrix2, RowVector2, Vector2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sdfield::{
    occupancy_map, sample_collision_free, sample_workspace, shape,
    workspace::sample_circles, Circle, DifferentiableMap, Ellipse, Error,
    Rect, Segment, Shape, SignedDistanceMap, Workspace, WorkspaceDistanceMap,
};

const FD_STEP: f64 = 1e-6;

/// Centered finite-difference approximation of the Jacobian
fn fd_jacobian<F: DifferentiableMap>(
    f: &F,
    x: &Vector2<f64>,
) -> RowVector2<f64> {
    let mut j = RowVector2::zeros();
    for k in 0..2 {
        let mut dx = Vector2::zeros();
        dx[k] = FD_STEP;
        j[k] =
            (f.forward(&(x + dx)) - f.forward(&(x - dx))) / (2.0 * FD_STEP);
    }
    j
}

/// Centered finite-difference of the analytic Jacobian
fn fd_hessian<F: DifferentiableMap>(f: &F, x: &Vector2<f64>) -> Matrix2<f64> {
    let mut h = Matrix2::zeros();
    for k in 0..2 {
        let mut dx = Vector2::zeros();
        dx[k] = FD_STEP;
        let dj = (f.jacobian(&(x + dx)).unwrap()
            - f.jacobian(&(x - dx)).unwrap())
            / (2.0 * FD_STEP);
        h.set_row(k, &dj);
    }
    h
}

fn check_jacobian<F: DifferentiableMap>(f: &F, x: &Vector2<f64>) {
    assert_relative_eq!(
        f.jacobian(x).unwrap(),
        fd_jacobian(f, x),
        epsilon = 1e-6,
        max_relative = 1e-6
    );
}

fn check_hessian<F: DifferentiableMap>(f: &F, x: &Vector2<f64>) {
    assert_relative_eq!(
        f.hessian(x).unwrap(),
        fd_hessian(f, x),
        epsilon = 1e-6,
        max_relative = 1e-6
    );
}

////////////////////////////////////////////////////////////////////////////////

#[test]
fn circle_derivatives_match_finite_differences() {
    let c = Circle::default();
    let f = SignedDistanceMap::new(&c);
    // One probe outside, one inside; both away from the singular center
    for x in [Vector2::new(0.31, 0.17), Vector2::new(-0.05, 0.08)] {
        check_jacobian(&f, &x);
        check_hessian(&f, &x);
    }
}

#[test]
fn circle_override_equals_generic_gradient() {
    let mut rng = StdRng::seed_from_u64(42);
    let x = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());

    // Outside the small circle, inside the large one; the closed form and
    // the generic formula must agree exactly in both regimes
    for radius in [0.2, 2.0] {
        let c = Circle::new(Vector2::zeros(), radius);
        assert_relative_eq!(
            c.dist_gradient(&x).unwrap(),
            shape::border_normal(&c, &x).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn segment_jacobian_matches_finite_differences() {
    let p1 = Vector2::new(0.23, 0.91);
    let p2 = Vector2::new(-0.41, 0.07);
    let s = Segment::from_endpoints(p1, p2);
    let (q1, q2) = s.endpoints();
    assert_relative_eq!(p1, q1, epsilon = 1e-12);
    assert_relative_eq!(p2, q2, epsilon = 1e-12);

    let s = Segment::default();
    let f = SignedDistanceMap::new(&s);
    // One probe per projection branch, all off the segment itself
    for x in [
        Vector2::new(0.1, 0.3),   // interior branch
        Vector2::new(0.7, 0.2),   // past the first endpoint
        Vector2::new(-0.9, -0.4), // past the second endpoint
    ] {
        check_jacobian(&f, &x);
    }
    // Hessian is out of scope for segments
    assert!(f.hessian(&Vector2::new(0.1, 0.3)).is_err());
}

#[test]
fn rect_distance_and_jacobian() {
    let b = Rect::default();
    assert_relative_eq!(
        b.dist_from_border(&Vector2::new(0.0, 1.0)),
        0.5,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        b.dist_from_border(&Vector2::new(1.0, 0.0)),
        0.5,
        epsilon = 1e-6
    );

    let b = Rect::new(Vector2::new(0.5, 0.5), Vector2::new(1.0, 1.0));
    let f = SignedDistanceMap::new(&b);
    // Outside probe, then an inside probe away from the diagonal ridges
    check_jacobian(&f, &Vector2::new(1.2, 0.7));
    check_jacobian(&f, &Vector2::new(0.5, 0.8));

    let b = Rect::new(Vector2::new(-0.5, 0.5), Vector2::new(0.5, 0.5));
    let f = SignedDistanceMap::new(&b);
    check_jacobian(&f, &Vector2::new(0.0, 0.5));
}

#[test]
fn box_sampling_stays_inside() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..5 {
        let b = Rect::new(
            Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()),
            Vector2::new(rng.gen::<f64>() + 0.5, rng.gen::<f64>() + 0.5),
        );
        for _ in 0..50 {
            let p = b.sample_uniform(&mut rng);
            assert!(b.is_inside(&p));

            let q = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());
            assert!(!b.is_inside(&(q + b.upper_corner())));
            assert!(!b.is_inside(&(-q + b.lower_corner())));
        }
    }
}

#[test]
fn ellipse_reference_distances() {
    let e = Ellipse::new(Vector2::zeros(), 0.1, 0.2);
    let d = e.dist_from_border(&Vector2::new(0.3, 0.0));
    assert!((d - 0.2).abs() < 1e-6, "d = {d}");
    let d = e.dist_from_border(&Vector2::new(0.0, 0.3));
    assert!((d - 0.1).abs() < 1e-6, "d = {d}");
}

#[test]
fn sampled_circle_derivatives_match_finite_differences() {
    let mut rng = StdRng::seed_from_u64(11);
    // Probe outside the unit square that contains all sampled centers, so
    // it cannot coincide with a singular center point
    let x = Vector2::new(1.5, 1.7);
    for c in sample_circles(&mut rng, 10) {
        let f = SignedDistanceMap::new(&c);
        check_jacobian(&f, &x);
        check_hessian(&f, &x);
    }
}

#[test]
fn workspace_derivatives_match_finite_differences() {
    let mut w = Workspace::default();
    w.add_circle(Vector2::new(-0.3, 0.0), 0.1);
    w.add_circle(Vector2::new(0.3, 0.0), 0.1);
    let f = WorkspaceDistanceMap::new(&w);
    // Probe clearly nearer the second circle, far from the equidistance
    // kink on the y axis
    let x = Vector2::new(0.2, 0.1);
    check_jacobian(&f, &x);
    check_hessian(&f, &x);

    let (d, j) = f.evaluate(&x).unwrap();
    assert_relative_eq!(d, f.forward(&x));
    assert_relative_eq!(j, f.jacobian(&x).unwrap());
}

#[test]
fn meshgrid_matches_pixel_map() {
    let n = 10;
    let w = Workspace::default();
    let pm = w.pixel_map(n).unwrap();
    let grid = w.bounds.meshgrid(n).unwrap();
    for i in 0..n {
        for j in 0..n {
            let p = grid.point(i, j);
            let g = pm.world_to_grid(&p);
            assert_eq!(g, Vector2::new(i as i64, j as i64));
            assert_relative_eq!(pm.grid_to_world(&g), p, epsilon = 1e-12);
        }
    }
}

#[test]
fn grid_distance_field_matches_pointwise_queries() {
    let n = 24;
    let mut rng = StdRng::seed_from_u64(5);
    let w = sample_workspace(&mut rng, 10, 0.15);
    let pm = w.pixel_map(n).unwrap();
    let grid = w.bounds.meshgrid(n).unwrap();
    let (dist, index) = w.min_dist_field(&grid);
    for i in 0..n {
        for j in 0..n {
            let p = pm.grid_to_world(&Vector2::new(i as i64, j as i64));
            let (d, k) = w.min_dist(&p);
            assert_relative_eq!(dist[(i, j)], d, epsilon = 1e-9);
            assert_eq!(index[(i, j)], k);
        }
    }
}

#[test]
fn occupancy_map_agrees_with_min_dist() {
    let n = 10;
    let mut rng = StdRng::seed_from_u64(0);
    let w = sample_workspace(&mut rng, 5, 0.15);
    let occ = occupancy_map(n, &w).unwrap();
    let pm = w.pixel_map(n).unwrap();
    for i in 0..n {
        for j in 0..n {
            let p = pm.grid_to_world(&Vector2::new(i as i64, j as i64));
            assert_eq!(occ[(i, j)], w.min_dist(&p).0 < 0.0);
        }
    }
}

#[test]
fn shape_grid_field_matches_pointwise() {
    let bounds = Rect::default();
    let grid = bounds.meshgrid(12).unwrap();
    let c = Circle::new(Vector2::new(0.1, -0.1), 0.25);
    let dist = c.dist_field(&grid);
    let inside = c.inside_field(&grid);
    for i in 0..12 {
        for j in 0..12 {
            let p = grid.point(i, j);
            assert_eq!(dist[(i, j)], c.dist_from_border(&p));
            assert_eq!(inside[(i, j)], c.is_inside(&p));
        }
    }
}

#[test]
fn tie_break_is_deterministic() {
    let mut w = Workspace::default();
    w.add_circle(Vector2::new(-0.2, 0.0), 0.1);
    w.add_circle(Vector2::new(0.2, 0.0), 0.1);
    for _ in 0..10 {
        assert_eq!(w.min_dist(&Vector2::zeros()).1, Some(0));
    }
}

#[test]
fn collision_free_sampling() {
    let mut rng = StdRng::seed_from_u64(9);
    let w = sample_workspace(&mut rng, 10, 0.15);
    for _ in 0..20 {
        let p = sample_collision_free(&mut rng, &w, 0.0);
        assert!(!w.in_collision(&p));
        assert!(w.bounds.is_inside(&p));
    }
}

#[test]
fn capability_gaps_are_reported() {
    let x = Vector2::new(0.3, 0.1);
    assert!(matches!(
        Ellipse::default().closest_point(&x),
        Err(Error::Unsupported { shape: "Ellipse", .. })
    ));
    assert!(matches!(
        Segment::default().dist_hessian(&x),
        Err(Error::Unsupported { shape: "Segment", .. })
    ));
    assert!(matches!(
        Rect::default().dist_hessian(&x),
        Err(Error::Unsupported { shape: "Rect", .. })
    ));
}
