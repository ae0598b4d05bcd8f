//! Force laws used by the settle pass.

use gitstories_core::geom::{self, Point, Vector};

/// Repulsion felt by a body at `at` from a body at `from`, pointing away from `from`.
///
/// Magnitude is `q1 * q2 / distance / scale`. Coincident centers contribute nothing.
pub fn repulsion(at: Point, from: Point, q1: f64, q2: f64, scale: f64) -> Vector {
    match geom::direction(at, from) {
        Some((unit, distance)) => geom::scale(unit, q1 * q2 / distance / scale),
        None => Vector::zero(),
    }
}

/// Linear spring force on the `first` endpoint; the `second` endpoint feels its negation.
///
/// Positive when compressed below `rest`, negative when stretched past it. Returns `None` for
/// coincident endpoints.
pub fn spring(
    first: Point,
    second: Point,
    stiffness: f64,
    rest: f64,
    scale: f64,
) -> Option<Vector> {
    let (unit, distance) = geom::direction(first, second)?;
    let magnitude = -stiffness * (distance - rest);
    Some(geom::scale(unit, magnitude / scale))
}

/// Whether each endpoint of a `(first, second)` edge receives the spring force.
///
/// Files always move; a folder only moves when the other endpoint is also a folder, so folders
/// anchor the files that orbit them.
pub fn spring_targets(first_is_file: bool, second_is_file: bool) -> (bool, bool) {
    (
        first_is_file || !second_is_file,
        second_is_file || !first_is_file,
    )
}
