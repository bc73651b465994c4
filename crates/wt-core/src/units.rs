// wt-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, Area as UomArea, Force as UomForce, MassDensity as UomMassDensity,
    Pressure as UomPressure, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type Force = UomForce;
pub type Pressure = UomPressure;
pub type Velocity = UomVelocity;

#[inline]
pub fn mph(v: f64) -> Velocity {
    use uom::si::velocity::mile_per_hour;
    Velocity::new::<mile_per_hour>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn hpa(v: f64) -> Pressure {
    use uom::si::pressure::hectopascal;
    Pressure::new::<hectopascal>(v)
}

#[inline]
pub fn newtons(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

/// Velocity in metres per second.
#[inline]
pub fn as_mps(v: Velocity) -> f64 {
    use uom::si::velocity::meter_per_second;
    v.get::<meter_per_second>()
}

pub mod constants {
    /// Sea-level standard atmosphere.
    pub const STANDARD_PRESSURE_HPA: f64 = 1013.25;
    pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
    /// Exact statute-mile conversion.
    pub const MPS_PER_MPH: f64 = 0.44704;
    pub const PA_PER_HPA: f64 = 100.0;
}
