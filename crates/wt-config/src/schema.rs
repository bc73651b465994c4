//! Tunnel configuration file schema.

use serde::{Deserialize, Serialize};
use wt_sim::AmbientProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TunnelConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub physics: PhysicsDef,
    #[serde(default)]
    pub noise: NoiseDef,
    #[serde(default)]
    pub controls: ControlsDef,
    #[serde(default)]
    pub polling: PollingDef,
    #[serde(default)]
    pub ambient: AmbientProfile,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            physics: PhysicsDef::default(),
            noise: NoiseDef::default(),
            controls: ControlsDef::default(),
            polling: PollingDef::default(),
            ambient: AmbientProfile::default(),
        }
    }
}

fn default_version() -> u32 {
    crate::LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsDef {
    pub base_pressure_hpa: f64,
    pub air_density_kg_m3: f64,
    pub wing_area_m2: f64,
    pub max_airspeed_mph: f64,
    pub static_drop_factor: f64,
    pub lift_slope_per_deg: f64,
    pub stall_angle_deg: f64,
    pub stall_recovery_deg: f64,
    pub drag_base: f64,
    pub drag_factor: f64,
}

impl Default for PhysicsDef {
    fn default() -> Self {
        Self {
            base_pressure_hpa: 1013.25,
            air_density_kg_m3: 1.225,
            wing_area_m2: 0.1,
            max_airspeed_mph: 60.0,
            static_drop_factor: 0.1,
            lift_slope_per_deg: 0.1,
            stall_angle_deg: 15.0,
            stall_recovery_deg: 10.0,
            drag_base: 0.02,
            drag_factor: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseDef {
    pub airspeed_mph: f64,
    pub fan_output_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for NoiseDef {
    fn default() -> Self {
        Self {
            airspeed_mph: 2.0,
            fan_output_pct: 2.0,
            seed: None,
        }
    }
}

/// Step sizes of the panel's +/- buttons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsDef {
    pub fan_step_pct: f64,
    pub aoa_step_deg: f64,
}

impl Default for ControlsDef {
    fn default() -> Self {
        Self {
            fan_step_pct: 5.0,
            aoa_step_deg: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollingDef {
    pub rate_hz: f64,
    /// Readings kept in the history log.
    pub history: usize,
}

impl Default for PollingDef {
    fn default() -> Self {
        Self {
            rate_hz: 10.0,
            history: 600,
        }
    }
}
