//! Per-poll instrument snapshot.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wt_core::units::{Angle, Force, Pressure, Velocity, deg, hpa, mph, newtons};

use crate::noise::NoiseSource;
use crate::physics::{AeroModel, mph_to_mps};
use crate::state::{RunStatus, SimulationState};

/// Every instrument value shown on the panel for one poll.
///
/// Built fresh by [`poll`]; never cached or updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingSet {
    pub airspeed_mph: f64,
    pub airspeed_ms: f64,
    pub static_pressure_hpa: f64,
    pub dynamic_pressure_hpa: f64,
    pub angle_of_attack_deg: f64,
    pub lift_force_n: f64,
    pub drag_force_n: f64,
    pub fan_output_pct: f64,
    pub elapsed_s: f64,
    pub is_running: bool,
}

impl ReadingSet {
    pub fn airspeed(&self) -> Velocity {
        mph(self.airspeed_mph)
    }

    pub fn static_pressure(&self) -> Pressure {
        hpa(self.static_pressure_hpa)
    }

    pub fn dynamic_pressure(&self) -> Pressure {
        hpa(self.dynamic_pressure_hpa)
    }

    pub fn angle_of_attack(&self) -> Angle {
        deg(self.angle_of_attack_deg)
    }

    pub fn lift(&self) -> Force {
        newtons(self.lift_force_n)
    }

    pub fn drag(&self) -> Force {
        newtons(self.drag_force_n)
    }

    pub fn status(&self) -> RunStatus {
        if self.is_running {
            RunStatus::Running
        } else {
            RunStatus::Stopped
        }
    }

    /// Lift over drag, or `None` when there is no drag to divide by.
    pub fn lift_to_drag(&self) -> Option<f64> {
        (self.drag_force_n > 0.0).then(|| self.lift_force_n / self.drag_force_n)
    }
}

/// Sample every instrument for the current control state.
///
/// Reads `state` only; the noise source is the sole thing advanced.
pub fn poll(
    state: &SimulationState,
    now: Instant,
    model: &AeroModel,
    noise: &mut dyn NoiseSource,
) -> ReadingSet {
    let running = state.is_running();
    let angle = state.angle_of_attack_deg();

    let airspeed_mph = model.airspeed_mph(state.fan_speed_pct(), running, noise);
    let pressure = model.pressure(airspeed_mph);
    let forces = model.lift_drag(airspeed_mph, angle);
    let fan_output_pct = model.fan_output_pct(state.fan_speed_pct(), running, noise);

    let reading = ReadingSet {
        airspeed_mph,
        airspeed_ms: mph_to_mps(airspeed_mph),
        static_pressure_hpa: pressure.static_hpa,
        dynamic_pressure_hpa: pressure.dynamic_hpa,
        angle_of_attack_deg: angle,
        lift_force_n: forces.lift_n,
        drag_force_n: forces.drag_n,
        fan_output_pct,
        elapsed_s: state.elapsed(now).as_secs_f64(),
        is_running: running,
    };
    debug!(
        airspeed_mph = reading.airspeed_mph,
        lift_n = reading.lift_force_n,
        drag_n = reading.drag_force_n,
        "polled"
    );
    reading
}
