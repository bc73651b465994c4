//! Configuration validation.

use crate::schema::{ControlsDef, NoiseDef, PhysicsDef, PollingDef, TunnelConfig};
use wt_sim::AmbientProfile;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason,
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn positive(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    if finite(field, v)? > 0.0 {
        Ok(v)
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    if finite(field, v)? >= 0.0 {
        Ok(v)
    } else {
        Err(invalid(field, v, "must not be negative"))
    }
}

/// Largest accepted jitter half-width for any noise term.
pub const MAX_NOISE_AMPLITUDE: f64 = 1.0e6;

fn noise_amplitude(field: &'static str, v: f64) -> Result<f64, ValidationError> {
    if non_negative(field, v)? <= MAX_NOISE_AMPLITUDE {
        Ok(v)
    } else {
        Err(invalid(field, v, "exceeds the noise amplitude limit"))
    }
}

pub fn validate_config(config: &TunnelConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    validate_physics(&config.physics)?;
    validate_noise(&config.noise)?;
    validate_controls(&config.controls)?;
    validate_polling(&config.polling)?;
    validate_ambient(&config.ambient)?;
    Ok(())
}

fn validate_physics(p: &PhysicsDef) -> Result<(), ValidationError> {
    positive("physics.base_pressure_hpa", p.base_pressure_hpa)?;
    positive("physics.air_density_kg_m3", p.air_density_kg_m3)?;
    positive("physics.wing_area_m2", p.wing_area_m2)?;
    positive("physics.max_airspeed_mph", p.max_airspeed_mph)?;
    non_negative("physics.static_drop_factor", p.static_drop_factor)?;
    finite("physics.lift_slope_per_deg", p.lift_slope_per_deg)?;
    non_negative("physics.stall_angle_deg", p.stall_angle_deg)?;
    positive("physics.stall_recovery_deg", p.stall_recovery_deg)?;
    non_negative("physics.drag_base", p.drag_base)?;
    non_negative("physics.drag_factor", p.drag_factor)?;
    Ok(())
}

fn validate_noise(n: &NoiseDef) -> Result<(), ValidationError> {
    noise_amplitude("noise.airspeed_mph", n.airspeed_mph)?;
    noise_amplitude("noise.fan_output_pct", n.fan_output_pct)?;
    Ok(())
}

fn validate_controls(c: &ControlsDef) -> Result<(), ValidationError> {
    positive("controls.fan_step_pct", c.fan_step_pct)?;
    positive("controls.aoa_step_deg", c.aoa_step_deg)?;
    Ok(())
}

fn validate_polling(p: &PollingDef) -> Result<(), ValidationError> {
    positive("polling.rate_hz", p.rate_hz)?;
    if p.history == 0 {
        return Err(invalid("polling.history", p.history, "must be positive"));
    }
    Ok(())
}

fn validate_ambient(a: &AmbientProfile) -> Result<(), ValidationError> {
    finite("ambient.base_airspeed_ms", a.base_airspeed_ms)?;
    finite("ambient.airspeed_variation_ms", a.airspeed_variation_ms)?;
    finite("ambient.airspeed_rate", a.airspeed_rate)?;
    noise_amplitude("ambient.airspeed_noise_ms", a.airspeed_noise_ms)?;
    positive("ambient.base_pressure_hpa", a.base_pressure_hpa)?;
    finite("ambient.pressure_variation_hpa", a.pressure_variation_hpa)?;
    finite("ambient.pressure_rate", a.pressure_rate)?;
    noise_amplitude("ambient.pressure_noise_hpa", a.pressure_noise_hpa)?;
    finite("ambient.base_flow_angle_deg", a.base_flow_angle_deg)?;
    finite("ambient.flow_angle_variation_deg", a.flow_angle_variation_deg)?;
    finite("ambient.flow_angle_rate", a.flow_angle_rate)?;
    noise_amplitude("ambient.flow_angle_noise_deg", a.flow_angle_noise_deg)?;
    Ok(())
}
