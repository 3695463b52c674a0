//! System configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::axis::AxisConfig;
use crate::request::{ControlInterface, DurationDiscretization, Synchronization};

/// Maximum number of axes in one configuration.
pub const MAX_AXES: usize = 16;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemConfig {
    /// Global control interface.
    #[serde(default)]
    pub control_interface: ControlInterface,

    /// Global synchronization.
    #[serde(default)]
    pub synchronization: Synchronization,

    /// Global duration discretization.
    #[serde(default)]
    pub duration_discretization: DurationDiscretization,

    /// Axes, in degree-of-freedom order.
    #[serde(default)]
    pub axes: Vec<AxisConfig, MAX_AXES>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes.iter().find(|axis| axis.name.as_str() == name)
    }

    /// Degree-of-freedom index of an axis.
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|axis| axis.name.as_str() == name)
    }

    /// List all axis names in degree-of-freedom order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|axis| axis.name.as_str())
    }
}
