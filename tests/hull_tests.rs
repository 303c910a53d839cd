//! End-to-end tests for the convex hull of unions of polyhedra.

use num_bigint::BigInt;
use num_rational::BigRational;
use polyhull::{BasicSet, Set};

fn row(v: &[i64]) -> Vec<BigInt> {
    v.iter().map(|&x| BigInt::from(x)).collect()
}

fn pt(coords: &[(i64, i64)]) -> Vec<BigRational> {
    coords
        .iter()
        .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
        .collect()
}

fn ipt(coords: &[i64]) -> Vec<BigRational> {
    coords
        .iter()
        .map(|&n| BigRational::from_integer(BigInt::from(n)))
        .collect()
}

fn sorted_ineqs(b: &BasicSet) -> Vec<Vec<BigInt>> {
    let mut rows = b.ineqs().to_vec();
    rows.sort();
    rows
}

fn sorted_eqs(b: &BasicSet) -> Vec<Vec<BigInt>> {
    let mut rows = b.eqs().to_vec();
    rows.sort();
    rows
}

/// An axis-aligned box given by inclusive integer corner points.
fn square(x0: i64, y0: i64, x1: i64, y1: i64) -> BasicSet {
    let mut b = BasicSet::universe(2);
    b.add_inequality(row(&[-x0, 1, 0]));
    b.add_inequality(row(&[x1, -1, 0]));
    b.add_inequality(row(&[-y0, 0, 1]));
    b.add_inequality(row(&[y1, 0, -1]));
    b
}

fn cube(o: i64, s: i64) -> BasicSet {
    let mut b = BasicSet::universe(3);
    for i in 0..3 {
        let mut lo = vec![0i64; 4];
        lo[0] = -o;
        lo[1 + i] = 1;
        b.add_inequality(row(&lo));
        let mut hi = vec![0i64; 4];
        hi[0] = o + s;
        hi[1 + i] = -1;
        b.add_inequality(row(&hi));
    }
    b
}

fn two_squares() -> Set {
    Set::from_members(2, vec![square(0, 0, 1, 1), square(2, 2, 3, 3)])
}

fn two_squares_hull_rows() -> Vec<Vec<BigInt>> {
    let mut expected = vec![
        row(&[0, 1, 0]),
        row(&[3, -1, 0]),
        row(&[0, 0, 1]),
        row(&[3, 0, -1]),
        row(&[1, 1, -1]),
        row(&[1, -1, 1]),
    ];
    expected.sort();
    expected
}

#[test]
fn hull_of_two_points_on_a_line() {
    let mut a = BasicSet::universe(1);
    a.add_equality(row(&[0, 1]));
    let mut b = BasicSet::universe(1);
    b.add_equality(row(&[-2, 1]));
    let hull = Set::from_members(1, vec![a, b]).convex_hull().unwrap();
    assert_eq!(sorted_eqs(&hull), Vec::<Vec<BigInt>>::new());
    assert_eq!(sorted_ineqs(&hull), vec![row(&[0, 1]), row(&[2, -1])]);
}

#[test]
fn hull_of_two_squares() {
    let hull = two_squares().convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());
}

#[test]
fn hull_of_triangle_and_its_reflection() {
    // The unit triangle and its reflection through the origin hull to
    // the cross polytope |x| + |y| <= 1.
    let mut t = BasicSet::universe(2);
    t.add_inequality(row(&[0, 1, 0]));
    t.add_inequality(row(&[0, 0, 1]));
    t.add_inequality(row(&[1, -1, -1]));
    let mut r = BasicSet::universe(2);
    r.add_inequality(row(&[0, -1, 0]));
    r.add_inequality(row(&[0, 0, -1]));
    r.add_inequality(row(&[1, 1, 1]));
    let hull = Set::from_members(2, vec![t, r]).convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(hull.n_ineq(), 4);
    for v in [
        ipt(&[1, 0]),
        ipt(&[0, 1]),
        ipt(&[-1, 0]),
        ipt(&[0, -1]),
        ipt(&[0, 0]),
        pt(&[(1, 2), (1, 2)]),
        pt(&[(1, 2), (-1, 2)]),
    ] {
        assert!(hull.contains(&v), "expected {:?} inside", v);
    }
    for v in [
        ipt(&[1, 1]),
        pt(&[(3, 5), (3, 5)]),
        pt(&[(-3, 5), (-3, 5)]),
        pt(&[(3, 5), (-3, 5)]),
    ] {
        assert!(!hull.contains(&v), "expected {:?} outside", v);
    }
}

#[test]
fn hull_of_opposite_halflines_is_the_universe() {
    let mut a = BasicSet::universe(1);
    a.add_inequality(row(&[0, 1]));
    let mut b = BasicSet::universe(1);
    b.add_inequality(row(&[0, -1]));
    let hull = Set::from_members(1, vec![a, b]).convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(hull.n_ineq(), 0);
    assert!(!hull.is_empty());
}

#[test]
fn hull_of_two_axis_rays_is_the_quadrant() {
    let mut a = BasicSet::universe(2);
    a.add_inequality(row(&[0, 1, 0]));
    a.add_equality(row(&[0, 0, 1]));
    let mut b = BasicSet::universe(2);
    b.add_equality(row(&[0, 1, 0]));
    b.add_inequality(row(&[0, 0, 1]));
    let hull = Set::from_members(2, vec![a, b]).convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(
        sorted_ineqs(&hull),
        vec![row(&[0, 0, 1]), row(&[0, 1, 0])]
    );
}

#[test]
fn hull_of_an_empty_union_is_empty() {
    let hull = Set::from_members(2, vec![BasicSet::empty(2)])
        .convex_hull()
        .unwrap();
    assert!(hull.is_empty());
    let hull = Set::empty(3).convex_hull().unwrap();
    assert!(hull.is_empty());
}

#[test]
fn hull_of_parallel_strips() {
    // Two strips unbounded in x hull to one strip.
    let mut a = BasicSet::universe(2);
    a.add_inequality(row(&[0, 0, 1]));
    a.add_inequality(row(&[1, 0, -1]));
    let mut b = BasicSet::universe(2);
    b.add_inequality(row(&[-2, 0, 1]));
    b.add_inequality(row(&[3, 0, -1]));
    let hull = Set::from_members(2, vec![a, b]).convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(
        sorted_ineqs(&hull),
        vec![row(&[0, 0, 1]), row(&[3, 0, -1])]
    );
}

#[test]
fn hull_of_two_cubes() {
    // Box facets plus one facet per ordered coordinate pair.
    let hull = Set::from_members(3, vec![cube(0, 1), cube(2, 1)])
        .convex_hull()
        .unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(hull.n_ineq(), 12);
    for v in [ipt(&[0, 0, 0]), ipt(&[1, 1, 0]), ipt(&[3, 3, 3]), ipt(&[2, 3, 2])] {
        assert!(hull.contains(&v), "expected {:?} inside", v);
    }
    for v in [ipt(&[2, 0, 0]), ipt(&[0, 2, 2]), ipt(&[4, 3, 3])] {
        assert!(!hull.contains(&v), "expected {:?} outside", v);
    }
    // The six cross facets x_i - x_j <= 1.
    let rows = sorted_ineqs(&hull);
    for (i, j) in [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)] {
        let mut cross = vec![0i64; 4];
        cross[0] = 1;
        cross[1 + i] = -1;
        cross[1 + j] = 1;
        assert!(rows.contains(&row(&cross)), "missing facet {:?}", cross);
    }
}

#[test]
fn hull_is_idempotent() {
    let hull = two_squares().convex_hull().unwrap();
    let again = Set::from_basic(hull.clone()).convex_hull().unwrap();
    assert_eq!(sorted_eqs(&again), sorted_eqs(&hull));
    assert_eq!(sorted_ineqs(&again), sorted_ineqs(&hull));
}

#[test]
fn hull_is_invariant_under_member_order() {
    let reversed = Set::from_members(2, vec![square(2, 2, 3, 3), square(0, 0, 1, 1)]);
    let hull = reversed.convex_hull().unwrap();
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());
}

#[test]
fn hull_ignores_redundant_input_constraints() {
    let mut a = square(0, 0, 1, 1);
    a.add_inequality(row(&[5, 1, 0])); // x >= -5, redundant
    let s = Set::from_members(2, vec![a, square(2, 2, 3, 3)]);
    let hull = s.convex_hull().unwrap();
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());
}

#[test]
fn hull_absorbs_empty_members() {
    let s = Set::from_members(
        2,
        vec![square(0, 0, 1, 1), BasicSet::empty(2), square(2, 2, 3, 3)],
    );
    let hull = s.convex_hull().unwrap();
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());

    // A member that is empty without being flagged is absorbed too.
    let mut hidden = BasicSet::universe(2);
    hidden.add_inequality(row(&[-1, 1, 1]));
    hidden.add_inequality(row(&[0, -1, 0]));
    hidden.add_inequality(row(&[0, 0, -1]));
    let s = Set::from_members(2, vec![square(0, 0, 1, 1), hidden, square(2, 2, 3, 3)]);
    let hull = s.convex_hull().unwrap();
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());
}

#[test]
fn initial_facet_walks_through_a_vertex_slice() {
    // Lead with a diagonal constraint whose tightened hyperplane
    // touches the union in a single vertex: the initial-facet walk
    // then sees a slice gaining two equalities at once and must
    // project and wrap its way down to a true facet.
    let mut a = BasicSet::universe(2);
    a.add_inequality(row(&[0, 1, 1])); // x + y >= 0, tight only at (0,0)
    a.add_inequality(row(&[0, 1, 0]));
    a.add_inequality(row(&[1, -1, 0]));
    a.add_inequality(row(&[0, 0, 1]));
    a.add_inequality(row(&[1, 0, -1]));
    let s = Set::from_members(2, vec![a, square(2, 2, 3, 3)]);
    let hull = s.convex_hull().unwrap();
    assert_eq!(sorted_ineqs(&hull), two_squares_hull_rows());
}

#[test]
fn simple_hull_is_a_superset_with_input_normals() {
    let simple = two_squares().simple_hull().unwrap();
    // Only axis-aligned normals occur in the members, so the simple
    // hull is the bounding box, a strict superset of the true hull.
    assert_eq!(
        sorted_ineqs(&simple),
        vec![
            row(&[0, 0, 1]),
            row(&[0, 1, 0]),
            row(&[3, 0, -1]),
            row(&[3, -1, 0]),
        ]
    );
    let hull = two_squares().convex_hull().unwrap();
    // Every vertex of the true hull stays inside the simple hull.
    for v in [
        ipt(&[0, 0]),
        ipt(&[1, 0]),
        ipt(&[0, 1]),
        ipt(&[3, 2]),
        ipt(&[2, 3]),
        ipt(&[3, 3]),
    ] {
        assert!(hull.contains(&v));
        assert!(simple.contains(&v));
    }
    // And the simple hull admits points the true hull excludes.
    assert!(!hull.contains(&ipt(&[0, 3])));
    assert!(simple.contains(&ipt(&[0, 3])));
}

#[test]
fn single_polyhedron_reduction() {
    let mut b = square(0, 0, 2, 2);
    b.add_inequality(row(&[9, -1, -1])); // x + y <= 9, redundant
    let r = b.convex_hull().unwrap();
    assert_eq!(r.n_ineq(), 4);
    assert!(r.flags().no_redundant);
    assert!(r.flags().no_implicit);
}

#[test]
fn hull_members_sharing_a_facet() {
    // Two triangles forming the unit square.
    let mut a = BasicSet::universe(2);
    a.add_inequality(row(&[0, 1, 0]));
    a.add_inequality(row(&[0, 0, 1]));
    a.add_inequality(row(&[1, -1, -1]));
    let mut b = BasicSet::universe(2);
    b.add_inequality(row(&[1, -1, 0]));
    b.add_inequality(row(&[1, 0, -1]));
    b.add_inequality(row(&[-1, 1, 1]));
    let hull = Set::from_members(2, vec![a, b]).convex_hull().unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert_eq!(
        sorted_ineqs(&hull),
        vec![
            row(&[0, 0, 1]),
            row(&[0, 1, 0]),
            row(&[1, 0, -1]),
            row(&[1, -1, 0]),
        ]
    );
}

#[test]
fn hull_of_point_and_square() {
    // A degenerate member (a single point) outside the square.
    let mut p = BasicSet::universe(2);
    p.add_equality(row(&[-2, 1, 0]));
    p.add_equality(row(&[0, 0, 1]));
    let hull = Set::from_members(2, vec![square(0, 0, 1, 1), p])
        .convex_hull()
        .unwrap();
    assert_eq!(hull.n_eq(), 0);
    assert!(hull.contains(&ipt(&[2, 0])));
    assert!(hull.contains(&ipt(&[1, 1])));
    assert!(hull.contains(&pt(&[(3, 2), (1, 4)])));
    assert!(!hull.contains(&ipt(&[2, 1])));
    assert!(!hull.contains(&pt(&[(9, 4), (0, 1)])));
}
