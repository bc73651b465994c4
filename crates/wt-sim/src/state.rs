//! Control inputs of the tunnel.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wt_core::Bounds;

/// Allowed fan throttle range (percent).
pub const FAN_SPEED_LIMITS: Bounds = Bounds::new_unchecked(0.0, 100.0);
/// Allowed angle of attack range (degrees).
pub const ANGLE_OF_ATTACK_LIMITS: Bounds = Bounds::new_unchecked(-20.0, 20.0);
/// Fan speed restored by [`SimulationState::reset`].
pub const DEFAULT_FAN_SPEED_PCT: f64 = 50.0;
/// Angle restored by [`SimulationState::reset`].
pub const DEFAULT_ANGLE_OF_ATTACK_DEG: f64 = 0.0;

/// Whether the tunnel is blowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Running,
    Stopped,
}

impl RunStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable control state of one tunnel.
///
/// Fan speed and angle of attack are clamped on every write, so readers can
/// rely on them being inside [`FAN_SPEED_LIMITS`] and
/// [`ANGLE_OF_ATTACK_LIMITS`]. NaN writes are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    is_running: bool,
    fan_speed_pct: f64,
    angle_of_attack_deg: f64,
    started_at: Instant,
}

impl SimulationState {
    /// Stopped tunnel at default fan speed and zero angle, timed from `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            is_running: false,
            fan_speed_pct: DEFAULT_FAN_SPEED_PCT,
            angle_of_attack_deg: DEFAULT_ANGLE_OF_ATTACK_DEG,
            started_at: now,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn fan_speed_pct(&self) -> f64 {
        self.fan_speed_pct
    }

    pub fn angle_of_attack_deg(&self) -> f64 {
        self.angle_of_attack_deg
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn status(&self) -> RunStatus {
        if self.is_running {
            RunStatus::Running
        } else {
            RunStatus::Stopped
        }
    }

    /// Runtime since the last start or reset. Zero if `now` predates it.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn set_fan_speed(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN fan speed");
            return;
        }
        self.fan_speed_pct = FAN_SPEED_LIMITS.clamp(value);
        debug!(fan_speed_pct = self.fan_speed_pct, "fan speed set");
    }

    pub fn adjust_fan_speed(&mut self, delta: f64) {
        self.set_fan_speed(self.fan_speed_pct + delta);
    }

    pub fn set_angle_of_attack(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN angle of attack");
            return;
        }
        self.angle_of_attack_deg = ANGLE_OF_ATTACK_LIMITS.clamp(value);
        debug!(
            angle_of_attack_deg = self.angle_of_attack_deg,
            "angle of attack set"
        );
    }

    pub fn adjust_angle_of_attack(&mut self, delta: f64) {
        self.set_angle_of_attack(self.angle_of_attack_deg + delta);
    }

    /// Start blowing and restart the runtime clock.
    pub fn start(&mut self, now: Instant) {
        self.is_running = true;
        self.started_at = now;
        info!("simulation started");
    }

    /// Stop blowing. Fan speed and angle are kept.
    pub fn stop(&mut self) {
        self.is_running = false;
        info!("simulation stopped");
    }

    /// Start if stopped, stop if running. Returns the new status.
    pub fn toggle(&mut self, now: Instant) -> RunStatus {
        if self.is_running {
            self.stop();
        } else {
            self.start(now);
        }
        self.status()
    }

    /// Restore default controls and restart the runtime clock.
    ///
    /// Leaves the run flag alone.
    pub fn reset(&mut self, now: Instant) {
        self.started_at = now;
        self.fan_speed_pct = DEFAULT_FAN_SPEED_PCT;
        self.angle_of_attack_deg = DEFAULT_ANGLE_OF_ATTACK_DEG;
        info!(running = self.is_running, "simulation reset");
    }
}
