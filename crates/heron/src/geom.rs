pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

/// Additive distance offset; keeps `distance` strictly positive for coincident points.
pub const EPSILON: f64 = 1e-6;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Euclidean distance between `a` and `b`, plus `epsilon`.
pub fn distance(a: Point, b: Point, epsilon: f64) -> f64 {
    (a - b).length() + epsilon
}

/// Clamps both coordinates into the unit square.
pub fn clamp_unit(p: Point) -> Point {
    point(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0))
}
