//! Owned tunnel handle tying state, physics, noise and time together.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use wt_core::{Clock, MonotonicClock};

use crate::noise::{NoiseSource, RandomNoise};
use crate::physics::{AeroModel, Forces, PressurePair};
use crate::reading::{ReadingSet, poll};
use crate::state::{RunStatus, SimulationState};

/// One wind tunnel: control state plus everything needed to poll it.
///
/// UI event handlers call the mutators; the UI timer calls [`WindTunnel::poll`].
#[derive(Debug)]
pub struct WindTunnel<N = RandomNoise, C = MonotonicClock> {
    state: SimulationState,
    model: AeroModel,
    noise: N,
    clock: C,
}

impl WindTunnel {
    /// Bench tunnel on the real clock with entropy-seeded noise.
    pub fn with_defaults() -> Self {
        Self::new(AeroModel::default(), RandomNoise::from_entropy(), MonotonicClock)
    }
}

impl<N: NoiseSource, C: Clock> WindTunnel<N, C> {
    pub fn new(model: AeroModel, noise: N, clock: C) -> Self {
        let state = SimulationState::new(clock.now());
        Self {
            state,
            model,
            noise,
            clock,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn model(&self) -> &AeroModel {
        &self.model
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_fan_speed(&mut self, value: f64) {
        self.state.set_fan_speed(value);
    }

    pub fn adjust_fan_speed(&mut self, delta: f64) {
        self.state.adjust_fan_speed(delta);
    }

    pub fn set_angle_of_attack(&mut self, value: f64) {
        self.state.set_angle_of_attack(value);
    }

    pub fn adjust_angle_of_attack(&mut self, delta: f64) {
        self.state.adjust_angle_of_attack(delta);
    }

    pub fn start(&mut self) {
        let now = self.clock.now();
        self.state.start(now);
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    pub fn toggle(&mut self) -> RunStatus {
        let now = self.clock.now();
        self.state.toggle(now)
    }

    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.state.reset(now);
    }

    pub fn status(&self) -> RunStatus {
        self.state.status()
    }

    pub fn elapsed(&self) -> Duration {
        self.state.elapsed(self.clock.now())
    }

    /// Fresh snapshot of every instrument at the clock's current time.
    pub fn poll(&mut self) -> ReadingSet {
        let now = self.clock.now();
        poll(&self.state, now, &self.model, &mut self.noise)
    }

    // Single-value reads. Each one takes its own fresh poll.

    pub fn airspeed_mph(&mut self) -> f64 {
        self.poll().airspeed_mph
    }

    pub fn pressures(&mut self) -> PressurePair {
        let r = self.poll();
        PressurePair {
            static_hpa: r.static_pressure_hpa,
            dynamic_hpa: r.dynamic_pressure_hpa,
        }
    }

    pub fn forces(&mut self) -> Forces {
        let r = self.poll();
        Forces {
            lift_n: r.lift_force_n,
            drag_n: r.drag_force_n,
        }
    }

    pub fn fan_output_pct(&mut self) -> f64 {
        self.poll().fan_output_pct
    }
}

/// Cloneable handle that serializes every call on one tunnel.
///
/// For hosts where the polling timer and the event handlers run on
/// different threads.
#[derive(Debug)]
pub struct SharedTunnel<N = RandomNoise, C = MonotonicClock> {
    inner: Arc<Mutex<WindTunnel<N, C>>>,
}

impl<N, C> Clone for SharedTunnel<N, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: NoiseSource, C: Clock> SharedTunnel<N, C> {
    pub fn new(tunnel: WindTunnel<N, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tunnel)),
        }
    }

    /// Run `f` with exclusive access to the tunnel.
    pub fn with<R>(&self, f: impl FnOnce(&mut WindTunnel<N, C>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn set_fan_speed(&self, value: f64) {
        self.inner.lock().set_fan_speed(value);
    }

    pub fn adjust_fan_speed(&self, delta: f64) {
        self.inner.lock().adjust_fan_speed(delta);
    }

    pub fn set_angle_of_attack(&self, value: f64) {
        self.inner.lock().set_angle_of_attack(value);
    }

    pub fn adjust_angle_of_attack(&self, delta: f64) {
        self.inner.lock().adjust_angle_of_attack(delta);
    }

    pub fn start(&self) {
        self.inner.lock().start();
    }

    pub fn stop(&self) {
        self.inner.lock().stop();
    }

    pub fn toggle(&self) -> RunStatus {
        self.inner.lock().toggle()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn status(&self) -> RunStatus {
        self.inner.lock().status()
    }

    pub fn poll(&self) -> ReadingSet {
        self.inner.lock().poll()
    }

    /// Copy of the current control state.
    pub fn snapshot_state(&self) -> SimulationState {
        self.inner.lock().state().clone()
    }
}

impl<N: NoiseSource, C: Clock> From<WindTunnel<N, C>> for SharedTunnel<N, C> {
    fn from(tunnel: WindTunnel<N, C>) -> Self {
        Self::new(tunnel)
    }
}
