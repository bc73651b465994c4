//! Free-running flow generator with no controls.
//!
//! Produces slowly oscillating airspeed, pressure and flow direction, each a
//! sine wave plus uniform jitter. Useful as a demo feed when no tunnel
//! controls are wired up.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use wt_core::units::constants::STANDARD_PRESSURE_HPA;

use crate::noise::NoiseSource;

/// Shape of the generated signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientProfile {
    /// Mean airspeed (m/s)
    pub base_airspeed_ms: f64,
    /// Sine amplitude of airspeed (m/s)
    pub airspeed_variation_ms: f64,
    /// Airspeed sine angular rate (rad/s)
    pub airspeed_rate: f64,
    /// Airspeed jitter half-width (m/s)
    pub airspeed_noise_ms: f64,
    /// Mean pressure (hPa)
    pub base_pressure_hpa: f64,
    /// Sine amplitude of pressure (hPa)
    pub pressure_variation_hpa: f64,
    /// Pressure sine angular rate (rad/s)
    pub pressure_rate: f64,
    /// Pressure jitter half-width (hPa)
    pub pressure_noise_hpa: f64,
    /// Mean flow direction (deg)
    pub base_flow_angle_deg: f64,
    /// Sine amplitude of flow direction (deg)
    pub flow_angle_variation_deg: f64,
    /// Flow direction sine angular rate (rad/s)
    pub flow_angle_rate: f64,
    /// Flow direction jitter half-width (deg)
    pub flow_angle_noise_deg: f64,
}

impl Default for AmbientProfile {
    fn default() -> Self {
        Self {
            base_airspeed_ms: 25.0,
            airspeed_variation_ms: 5.0,
            airspeed_rate: 0.5,
            airspeed_noise_ms: 2.0,
            base_pressure_hpa: STANDARD_PRESSURE_HPA,
            pressure_variation_hpa: 10.0,
            pressure_rate: 0.1,
            pressure_noise_hpa: 1.0,
            base_flow_angle_deg: 0.0,
            flow_angle_variation_deg: 15.0,
            flow_angle_rate: 0.3,
            flow_angle_noise_deg: 2.0,
        }
    }
}

/// One sample of the free-running feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientReading {
    pub airspeed_ms: f64,
    pub pressure_hpa: f64,
    pub flow_direction_deg: f64,
    pub elapsed_s: f64,
}

#[derive(Debug, Clone)]
pub struct AmbientFlowGenerator {
    profile: AmbientProfile,
    started_at: Instant,
}

impl AmbientFlowGenerator {
    pub fn new(profile: AmbientProfile, now: Instant) -> Self {
        Self {
            profile,
            started_at: now,
        }
    }

    pub fn profile(&self) -> &AmbientProfile {
        &self.profile
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Restart the time base.
    pub fn reset(&mut self, now: Instant) {
        self.started_at = now;
    }

    pub fn airspeed_ms(&self, t: f64, noise: &mut dyn NoiseSource) -> f64 {
        let p = &self.profile;
        let wave = (t * p.airspeed_rate).sin() * p.airspeed_variation_ms;
        (p.base_airspeed_ms + wave + noise.uniform(p.airspeed_noise_ms)).max(0.0)
    }

    pub fn pressure_hpa(&self, t: f64, noise: &mut dyn NoiseSource) -> f64 {
        let p = &self.profile;
        let wave = (t * p.pressure_rate).sin() * p.pressure_variation_hpa;
        p.base_pressure_hpa + wave + noise.uniform(p.pressure_noise_hpa)
    }

    pub fn flow_direction_deg(&self, t: f64, noise: &mut dyn NoiseSource) -> f64 {
        let p = &self.profile;
        let wave = (t * p.flow_angle_rate).sin() * p.flow_angle_variation_deg;
        p.base_flow_angle_deg + wave + noise.uniform(p.flow_angle_noise_deg)
    }

    pub fn sample(&self, now: Instant, noise: &mut dyn NoiseSource) -> AmbientReading {
        let t = self.elapsed(now).as_secs_f64();
        AmbientReading {
            airspeed_ms: self.airspeed_ms(t, noise),
            pressure_hpa: self.pressure_hpa(t, noise),
            flow_direction_deg: self.flow_direction_deg(t, noise),
            elapsed_s: t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FixedNoise, RandomNoise, SilentNoise};

    #[test]
    fn starts_at_base_values() {
        let t0 = Instant::now();
        let generator = AmbientFlowGenerator::new(AmbientProfile::default(), t0);
        let r = generator.sample(t0, &mut SilentNoise);
        assert_eq!(r.airspeed_ms, 25.0);
        assert_eq!(r.pressure_hpa, 1013.25);
        assert_eq!(r.flow_direction_deg, 0.0);
        assert_eq!(r.elapsed_s, 0.0);
    }

    #[test]
    fn samples_stay_within_envelope() {
        let t0 = Instant::now();
        let generator = AmbientFlowGenerator::new(AmbientProfile::default(), t0);
        let mut noise = RandomNoise::seeded(9);
        for i in 0..600 {
            let r = generator.sample(t0 + Duration::from_millis(100 * i), &mut noise);
            assert!((18.0..=32.0).contains(&r.airspeed_ms), "{r:?}");
            assert!((1002.25..=1024.25).contains(&r.pressure_hpa), "{r:?}");
            assert!((-17.0..=17.0).contains(&r.flow_direction_deg), "{r:?}");
        }
    }

    #[test]
    fn quarter_period_peaks() {
        let t0 = Instant::now();
        let generator = AmbientFlowGenerator::new(AmbientProfile::default(), t0);
        // sin(0.5 t) peaks at t = pi
        let t = std::f64::consts::PI;
        assert!((generator.airspeed_ms(t, &mut SilentNoise) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn airspeed_floor_is_zero() {
        let profile = AmbientProfile {
            base_airspeed_ms: 0.0,
            ..AmbientProfile::default()
        };
        let generator = AmbientFlowGenerator::new(profile, Instant::now());
        let t = 3.0 * std::f64::consts::PI;
        assert_eq!(
            generator.airspeed_ms(t, &mut FixedNoise(f64::NEG_INFINITY)),
            0.0
        );
    }

    #[test]
    fn reset_restarts_time_base() {
        let t0 = Instant::now();
        let mut generator = AmbientFlowGenerator::new(AmbientProfile::default(), t0);
        let later = t0 + Duration::from_secs(12);
        assert_eq!(generator.elapsed(later), Duration::from_secs(12));
        generator.reset(later);
        assert_eq!(generator.sample(later, &mut SilentNoise).elapsed_s, 0.0);
    }
}
