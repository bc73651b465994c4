//! Wind tunnel simulation engine.
//!
//! Provides:
//! - Control state with clamped fan speed and angle of attack
//! - Closed-form tunnel aerodynamics (airspeed, pressure, lift, drag)
//! - Per-poll instrument snapshots
//! - An owned tunnel handle and a mutex-guarded shared handle
//! - Poll cadence, gauge arithmetic, reading history
//! - A free-running ambient flow generator
//!
//! # Polling model
//!
//! Nothing here runs on its own. A presentation layer owns a timer (10 Hz
//! by default), calls [`WindTunnel::poll`] on each tick and renders the
//! returned [`ReadingSet`]. Its event handlers call the mutators directly.

pub mod ambient;
pub mod cadence;
pub mod error;
pub mod gauge;
pub mod history;
pub mod noise;
pub mod physics;
pub mod reading;
pub mod state;
pub mod tunnel;

pub use ambient::{AmbientFlowGenerator, AmbientProfile, AmbientReading};
pub use cadence::{DEFAULT_POLL_HZ, PollCadence, PollSchedule};
pub use error::{SimError, SimResult};
pub use gauge::{GaugeKind, GaugeNeedle, GaugeScale, GaugeSpec, PANEL_GAUGES, Panel, SpeedBand};
pub use history::{LogSummary, ReadingLog};
pub use noise::{FixedNoise, NoiseSource, RandomNoise, SilentNoise};
pub use physics::{AeroModel, Forces, PressurePair, mph_to_mps};
pub use reading::{ReadingSet, poll};
pub use state::{
    ANGLE_OF_ATTACK_LIMITS, DEFAULT_ANGLE_OF_ATTACK_DEG, DEFAULT_FAN_SPEED_PCT, FAN_SPEED_LIMITS,
    RunStatus, SimulationState,
};
pub use tunnel::{SharedTunnel, WindTunnel};
