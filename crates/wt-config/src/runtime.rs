//! Turn a validated config into engine objects.

use wt_core::Clock;
use wt_sim::{AeroModel, AmbientFlowGenerator, PollCadence, RandomNoise, ReadingLog, WindTunnel};

use crate::ConfigResult;
use crate::schema::TunnelConfig;

pub fn aero_model(config: &TunnelConfig) -> AeroModel {
    let p = &config.physics;
    AeroModel {
        base_pressure_hpa: p.base_pressure_hpa,
        air_density_kg_m3: p.air_density_kg_m3,
        wing_area_m2: p.wing_area_m2,
        max_airspeed_mph: p.max_airspeed_mph,
        static_drop_factor: p.static_drop_factor,
        lift_slope_per_deg: p.lift_slope_per_deg,
        stall_angle_deg: p.stall_angle_deg,
        stall_recovery_deg: p.stall_recovery_deg,
        drag_base: p.drag_base,
        drag_factor: p.drag_factor,
        airspeed_noise_mph: config.noise.airspeed_mph,
        fan_output_noise_pct: config.noise.fan_output_pct,
    }
}

/// Noise source for the config; `seed_override` wins over the file's seed.
pub fn noise_source(config: &TunnelConfig, seed_override: Option<u64>) -> RandomNoise {
    RandomNoise::from_seed_opt(seed_override.or(config.noise.seed))
}

pub fn poll_cadence(config: &TunnelConfig) -> ConfigResult<PollCadence> {
    Ok(PollCadence::from_frequency(config.polling.rate_hz)?)
}

pub fn reading_log(config: &TunnelConfig) -> ConfigResult<ReadingLog> {
    Ok(ReadingLog::new(config.polling.history)?)
}

pub fn build_tunnel<C: Clock>(
    config: &TunnelConfig,
    clock: C,
    seed_override: Option<u64>,
) -> WindTunnel<RandomNoise, C> {
    WindTunnel::new(
        aero_model(config),
        noise_source(config, seed_override),
        clock,
    )
}

pub fn ambient_generator<C: Clock>(config: &TunnelConfig, clock: &C) -> AmbientFlowGenerator {
    AmbientFlowGenerator::new(config.ambient.clone(), clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::ManualClock;

    #[test]
    fn default_config_builds_default_model() {
        assert_eq!(aero_model(&TunnelConfig::default()), AeroModel::default());
    }

    #[test]
    fn seed_override_wins() {
        let mut config = TunnelConfig::default();
        config.noise.seed = Some(1);
        assert_eq!(noise_source(&config, Some(2)).seed(), Some(2));
        assert_eq!(noise_source(&config, None).seed(), Some(1));
    }

    #[test]
    fn cadence_and_log_follow_polling_section() {
        let mut config = TunnelConfig::default();
        config.polling.rate_hz = 20.0;
        config.polling.history = 3;
        let cadence = poll_cadence(&config).unwrap();
        assert!((cadence.frequency() - 20.0).abs() < 1e-9);
        assert_eq!(reading_log(&config).unwrap().capacity(), 3);

        config.polling.rate_hz = -1.0;
        assert!(poll_cadence(&config).is_err());
    }

    #[test]
    fn built_tunnel_uses_configured_noise() {
        let mut config = TunnelConfig::default();
        config.noise.airspeed_mph = 0.0;
        config.noise.fan_output_pct = 0.0;
        let mut tunnel = build_tunnel(&config, ManualClock::new(), Some(5));
        tunnel.start();
        tunnel.set_fan_speed(100.0);
        let r = tunnel.poll();
        assert!((r.airspeed_mph - 60.0).abs() < 1e-12);
        assert_eq!(r.fan_output_pct, 100.0);
    }
}
