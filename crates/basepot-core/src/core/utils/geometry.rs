use nalgebra::Point3;

/// Euclidean (L2) distance between two points, in the input's units.
#[inline]
pub fn euclidean_distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}
