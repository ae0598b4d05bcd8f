pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn sum(lhs: Vector, rhs: Vector) -> Vector {
    lhs + rhs
}

pub fn difference(lhs: Point, rhs: Point) -> Vector {
    lhs - rhs
}

pub fn scale(v: Vector, factor: f64) -> Vector {
    v * factor
}

pub fn length(v: Vector) -> f64 {
    v.length()
}

/// Unit vector pointing the same way as `v`, or `None` for the zero vector.
pub fn normalize(v: Vector) -> Option<Vector> {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(v / len)
}

/// Splits `lhs - rhs` into its direction and length.
///
/// Returns `None` when the two points coincide, which callers treat as "no force".
pub fn direction(lhs: Point, rhs: Point) -> Option<(Vector, f64)> {
    let delta = difference(lhs, rhs);
    let len = length(delta);
    normalize(delta).map(|unit| (unit, len))
}
