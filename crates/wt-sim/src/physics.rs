//! Closed-form tunnel aerodynamics.
//!
//! Maps control inputs to derived readings:
//! - fan speed to test-section airspeed (linear, with jitter)
//! - airspeed to static/dynamic pressure (Bernoulli approximation)
//! - airspeed and angle of attack to lift and drag on a fixed test wing
//!
//! Everything here is stateless. The only nondeterminism is the noise drawn
//! from the caller's [`NoiseSource`].

use serde::{Deserialize, Serialize};
use uom::si::force::newton;
use uom::si::pressure::pascal;
use wt_core::units::constants::{PA_PER_HPA, SEA_LEVEL_DENSITY_KG_M3, STANDARD_PRESSURE_HPA};
use wt_core::units::{Area, Density, Force, Pressure, Velocity, as_mps, kg_per_m3, m2, mph, pa};

use crate::noise::NoiseSource;

/// Static and dynamic pressure pair, both in hPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressurePair {
    pub static_hpa: f64,
    pub dynamic_hpa: f64,
}

/// Aerodynamic forces on the test wing, in newtons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Forces {
    pub lift_n: f64,
    pub drag_n: f64,
}

/// Parameters of the tunnel and its test wing.
///
/// `Default` reproduces the bench tunnel: 60 mph at full fan, a 0.1 m² wing,
/// sea-level air, stall at 15°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeroModel {
    /// Ambient pressure (hPa)
    pub base_pressure_hpa: f64,
    /// Air density (kg/m³)
    pub air_density_kg_m3: f64,
    /// Test wing planform area (m²)
    pub wing_area_m2: f64,
    /// Airspeed at 100% fan (mph)
    pub max_airspeed_mph: f64,
    /// Share of dynamic pressure subtracted from static pressure
    pub static_drop_factor: f64,
    /// Lift coefficient per degree in the linear region
    pub lift_slope_per_deg: f64,
    /// Angle where the linear region ends (deg)
    pub stall_angle_deg: f64,
    /// Degrees past stall over which lift decays to zero
    pub stall_recovery_deg: f64,
    /// Zero-angle drag coefficient
    pub drag_base: f64,
    /// Drag growth per (deg²/100)
    pub drag_factor: f64,
    /// Half-width of the airspeed jitter (mph)
    pub airspeed_noise_mph: f64,
    /// Half-width of the fan output jitter (percent)
    pub fan_output_noise_pct: f64,
}

impl Default for AeroModel {
    fn default() -> Self {
        Self {
            base_pressure_hpa: STANDARD_PRESSURE_HPA,
            air_density_kg_m3: SEA_LEVEL_DENSITY_KG_M3,
            wing_area_m2: 0.1,
            max_airspeed_mph: 60.0,
            static_drop_factor: 0.1,
            lift_slope_per_deg: 0.1,
            stall_angle_deg: 15.0,
            stall_recovery_deg: 10.0,
            drag_base: 0.02,
            drag_factor: 0.01,
            airspeed_noise_mph: 2.0,
            fan_output_noise_pct: 2.0,
        }
    }
}

/// Convert statute miles per hour to metres per second.
#[inline]
pub fn mph_to_mps(airspeed_mph: f64) -> f64 {
    as_mps(mph(airspeed_mph))
}

impl AeroModel {
    pub fn air_density(&self) -> Density {
        kg_per_m3(self.air_density_kg_m3)
    }

    pub fn wing_area(&self) -> Area {
        m2(self.wing_area_m2)
    }

    /// Same model with both jitter terms disabled.
    pub fn noiseless(mut self) -> Self {
        self.airspeed_noise_mph = 0.0;
        self.fan_output_noise_pct = 0.0;
        self
    }

    /// Dynamic pressure `0.5·ρ·v²` in pascals for an airspeed in mph.
    pub fn dynamic_pressure_pa(&self, airspeed_mph: f64) -> f64 {
        let v: Velocity = mph(airspeed_mph);
        let q: Pressure = self.air_density() * v * v * 0.5;
        q.get::<pascal>()
    }

    /// Test-section airspeed in mph. Zero whenever the tunnel is stopped.
    pub fn airspeed_mph(
        &self,
        fan_speed_pct: f64,
        is_running: bool,
        noise: &mut dyn NoiseSource,
    ) -> f64 {
        if !is_running {
            return 0.0;
        }
        let base = (fan_speed_pct / 100.0) * self.max_airspeed_mph;
        let jitter = noise.uniform(self.airspeed_noise_mph);
        (base + jitter).max(0.0)
    }

    /// Static and dynamic pressure for an airspeed in mph.
    pub fn pressure(&self, airspeed_mph: f64) -> PressurePair {
        let q_hpa = self.dynamic_pressure_pa(airspeed_mph) / PA_PER_HPA;
        PressurePair {
            static_hpa: self.base_pressure_hpa - self.static_drop_factor * q_hpa,
            dynamic_hpa: self.base_pressure_hpa + q_hpa,
        }
    }

    /// Lift coefficient for an angle of attack in degrees.
    ///
    /// Linear up to the stall angle. Past stall the magnitude decays linearly
    /// and is positive for either sign of angle.
    pub fn lift_coefficient(&self, angle_deg: f64) -> f64 {
        let magnitude = angle_deg.abs();
        if magnitude <= self.stall_angle_deg {
            self.lift_slope_per_deg * angle_deg
        } else {
            self.lift_slope_per_deg
                * self.stall_angle_deg
                * (1.0 - (magnitude - self.stall_angle_deg) / self.stall_recovery_deg)
        }
    }

    /// Drag coefficient for an angle of attack in degrees.
    pub fn drag_coefficient(&self, angle_deg: f64) -> f64 {
        self.drag_base + self.drag_factor * angle_deg * angle_deg / 100.0
    }

    /// Lift and drag on the test wing. Exactly zero airspeed gives zero force.
    pub fn lift_drag(&self, airspeed_mph: f64, angle_deg: f64) -> Forces {
        if airspeed_mph == 0.0 {
            return Forces::default();
        }
        let q_area: Force = pa(self.dynamic_pressure_pa(airspeed_mph)) * self.wing_area();
        let q_area = q_area.get::<newton>();
        Forces {
            lift_n: q_area * self.lift_coefficient(angle_deg),
            drag_n: q_area * self.drag_coefficient(angle_deg),
        }
    }

    /// Reported fan throttle. Jittered and clamped to [0, 100] while running,
    /// the stored value untouched otherwise.
    pub fn fan_output_pct(
        &self,
        fan_speed_pct: f64,
        is_running: bool,
        noise: &mut dyn NoiseSource,
    ) -> f64 {
        if !is_running {
            return fan_speed_pct;
        }
        let jitter = noise.uniform(self.fan_output_noise_pct);
        (fan_speed_pct + jitter).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FixedNoise, RandomNoise, SilentNoise};
    use wt_core::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };

    #[test]
    fn stopped_tunnel_has_no_airspeed() {
        let model = AeroModel::default();
        let mut noise = FixedNoise(f64::INFINITY);
        assert_eq!(model.airspeed_mph(100.0, false, &mut noise), 0.0);
    }

    #[test]
    fn full_fan_airspeed_within_jitter() {
        let model = AeroModel::default();
        let mut noise = RandomNoise::seeded(11);
        for _ in 0..1_000 {
            let v = model.airspeed_mph(100.0, true, &mut noise);
            assert!((58.0..=62.0).contains(&v), "airspeed {v}");
        }
    }

    #[test]
    fn airspeed_never_negative() {
        let model = AeroModel::default();
        let mut noise = FixedNoise(f64::NEG_INFINITY);
        assert_eq!(model.airspeed_mph(0.0, true, &mut noise), 0.0);
        assert!(nearly_equal(
            model.airspeed_mph(50.0, true, &mut noise),
            28.0,
            TOL
        ));
    }

    #[test]
    fn zero_airspeed_pressure_is_ambient() {
        let p = AeroModel::default().pressure(0.0);
        assert_eq!(p.static_hpa, 1013.25);
        assert_eq!(p.dynamic_hpa, 1013.25);
    }

    #[test]
    fn pressure_at_sixty_mph() {
        // 60 mph = 26.8224 m/s, q = 440.6531... Pa
        let p = AeroModel::default().pressure(60.0);
        let v: f64 = 60.0 * 0.44704;
        let q_hpa = 0.5 * 1.225 * v * v / 100.0;
        assert!(nearly_equal(p.dynamic_hpa, 1013.25 + q_hpa, TOL));
        assert!(nearly_equal(p.static_hpa, 1013.25 - 0.1 * q_hpa, TOL));
        assert!(p.static_hpa < 1013.25 && 1013.25 < p.dynamic_hpa);
    }

    #[test]
    fn no_force_without_airflow() {
        let f = AeroModel::default().lift_drag(0.0, 10.0);
        assert_eq!(f, Forces { lift_n: 0.0, drag_n: 0.0 });
    }

    #[test]
    fn lift_coefficient_linear_region() {
        let model = AeroModel::default();
        assert!(nearly_equal(model.lift_coefficient(10.0), 1.0, TOL));
        assert!(nearly_equal(model.lift_coefficient(-10.0), -1.0, TOL));
        assert!(nearly_equal(model.lift_coefficient(15.0), 1.5, TOL));
        assert_eq!(model.lift_coefficient(0.0), 0.0);
    }

    #[test]
    fn lift_coefficient_post_stall_is_unsigned() {
        let model = AeroModel::default();
        assert!(nearly_equal(model.lift_coefficient(20.0), 0.75, TOL));
        assert!(nearly_equal(model.lift_coefficient(-20.0), 0.75, TOL));
        assert!(nearly_equal(model.lift_coefficient(17.5), 1.125, TOL));
    }

    #[test]
    fn drag_coefficient_grows_with_angle() {
        let model = AeroModel::default();
        assert!(nearly_equal(model.drag_coefficient(0.0), 0.02, TOL));
        assert!(nearly_equal(model.drag_coefficient(10.0), 0.03, TOL));
        assert!(nearly_equal(model.drag_coefficient(-20.0), 0.06, TOL));
    }

    #[test]
    fn forces_at_full_speed() {
        let model = AeroModel::default();
        let v: f64 = 60.0 * 0.44704;
        let q = 0.5 * 1.225 * v * v;
        let f = model.lift_drag(60.0, 5.0);
        assert!(nearly_equal(f.lift_n, q * 0.1 * 0.5, TOL));
        assert!(nearly_equal(f.drag_n, q * 0.1 * 0.0225, TOL));
    }

    #[test]
    fn fan_output_untouched_when_stopped() {
        let model = AeroModel::default();
        let mut noise = FixedNoise(2.0);
        assert_eq!(model.fan_output_pct(37.5, false, &mut noise), 37.5);
    }

    #[test]
    fn fan_output_clamped_when_running() {
        let model = AeroModel::default();
        assert_eq!(
            model.fan_output_pct(100.0, true, &mut FixedNoise(f64::INFINITY)),
            100.0
        );
        assert_eq!(
            model.fan_output_pct(0.0, true, &mut FixedNoise(f64::NEG_INFINITY)),
            0.0
        );
        assert_eq!(model.fan_output_pct(50.0, true, &mut FixedNoise(-1.5)), 48.5);
    }

    #[test]
    fn noiseless_model_is_deterministic() {
        let model = AeroModel::default().noiseless();
        let mut noise = FixedNoise(f64::INFINITY);
        assert!(nearly_equal(
            model.airspeed_mph(50.0, true, &mut noise),
            30.0,
            TOL
        ));
        assert_eq!(model.fan_output_pct(50.0, true, &mut SilentNoise), 50.0);
    }
}
