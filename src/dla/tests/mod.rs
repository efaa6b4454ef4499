mod test_order_basic;

use crate::geom::{Point3, Tolerance, Vec3};

pub(super) fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

pub(super) fn assert_vec_close(actual: Vec3, expected: Vec3) {
    assert!(
        Tolerance::LOOSE.approx_eq_vec3(actual, expected),
        "expected {expected:?}, got {actual:?}"
    );
}

pub(super) fn assert_point_close(actual: Point3, expected: Point3) {
    assert!(
        Tolerance::LOOSE.approx_eq_point3(actual, expected),
        "expected {expected:?}, got {actual:?}"
    );
}
