use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Per-kind body constants and spawn placement for new nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    pub folder_radius: f64,
    pub file_radius: f64,
    pub folder_mass: f64,
    pub file_mass: f64,
    /// New folders spawn within `±folder_jitter` of their parent's center on each axis.
    pub folder_jitter: f64,
    /// New files spawn on a circle of this radius around their folder.
    pub file_orbit_radius: f64,
    pub folder_color: Color,
    pub file_color: Color,
    /// Seed for spawn placement. `0` behaves like `1`.
    pub random_seed: u64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            folder_radius: 10.0,
            file_radius: 5.0,
            folder_mass: 10.0,
            file_mass: 1.0,
            folder_jitter: 10.0,
            file_orbit_radius: 30.0,
            folder_color: Color::grey(96),
            file_color: Color::grey(160),
            random_seed: 0,
        }
    }
}
