use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Force-law and integration constants.
///
/// Every field has a default, so partial JSON/YAML configs only need to name what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerOptions {
    /// Repulsion charge of a folder. Folders spread out more than files.
    pub folder_charge: f64,
    pub file_charge: f64,
    /// Divisor applied to every repulsion term.
    pub repulsion_scale: f64,
    /// Divisor applied to every spring term.
    pub spring_scale: f64,
    pub folder_folder_stiffness: f64,
    /// Stiffness of an edge with at least one file endpoint.
    pub folder_file_stiffness: f64,
    /// Rest length between two folders, on top of their radii.
    pub folder_folder_slack: f64,
    pub folder_file_slack: f64,
    /// Velocity multiplier applied every tick; must stay below `1.0` for the layout to settle.
    pub damping: f64,
    /// Acceleration and displacement are divided by this once per tick.
    pub substeps: f64,
    /// Slots reserved up front for nodes and edges.
    pub initial_capacity: usize,
}

impl Default for BalancerOptions {
    fn default() -> Self {
        Self {
            folder_charge: 30.0,
            file_charge: 3.0,
            repulsion_scale: 10.0,
            spring_scale: 10.0,
            folder_folder_stiffness: 0.05,
            folder_file_stiffness: 0.1,
            folder_folder_slack: 60.0,
            folder_file_slack: 20.0,
            damping: 0.9,
            substeps: 4.0,
            initial_capacity: 1024,
        }
    }
}

impl BalancerOptions {
    /// Rejects values that make the integration diverge or produce non-finite positions.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("folder_charge", self.folder_charge),
            ("file_charge", self.file_charge),
            ("folder_folder_stiffness", self.folder_folder_stiffness),
            ("folder_file_stiffness", self.folder_file_stiffness),
            ("folder_folder_slack", self.folder_folder_slack),
            ("folder_file_slack", self.folder_file_slack),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
        }
        for (field, value) in [
            ("repulsion_scale", self.repulsion_scale),
            ("spring_scale", self.spring_scale),
            ("substeps", self.substeps),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, value, "must be finite and positive"));
            }
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(invalid("damping", self.damping, "must be in [0, 1)"));
        }
        Ok(())
    }

    pub(crate) fn charge(&self, is_file: bool) -> f64 {
        if is_file {
            self.file_charge
        } else {
            self.folder_charge
        }
    }

    /// Stiffness and slack for an edge between two endpoints of the given kinds.
    pub(crate) fn spring(&self, first_is_file: bool, second_is_file: bool) -> (f64, f64) {
        if first_is_file || second_is_file {
            (self.folder_file_stiffness, self.folder_file_slack)
        } else {
            (self.folder_folder_stiffness, self.folder_folder_slack)
        }
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> Error {
    Error::InvalidOptions {
        field,
        value,
        reason,
    }
}
