//! Toolkit-independent gauge arithmetic.
//!
//! Range clamping, fill fraction, needle easing and speed bands for the
//! instrument panel. Drawing is left to whatever front-end renders these.

use serde::{Deserialize, Serialize};
use wt_core::Bounds;

use crate::reading::ReadingSet;

/// Value range of a dial.
pub type GaugeScale = Bounds;

/// Fraction of the remaining gap the needle closes per animation frame.
pub const NEEDLE_EASING: f64 = 0.15;
/// Gaps at or below this are left alone.
pub const NEEDLE_DEADBAND: f64 = 0.1;
/// Full-scale reading of the airspeed dial (mph).
pub const SPEED_DIAL_MAX_MPH: f64 = 60.0;

/// Needle that eases toward its target over successive frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeNeedle {
    scale: GaugeScale,
    current: f64,
    target: f64,
}

impl GaugeNeedle {
    /// Needle resting at the bottom of `scale`.
    pub fn new(scale: GaugeScale) -> Self {
        Self {
            scale,
            current: scale.min,
            target: scale.min,
        }
    }

    pub fn scale(&self) -> GaugeScale {
        self.scale
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Point the needle at `value`, clamped into the scale. NaN is ignored.
    pub fn set_target(&mut self, value: f64) {
        if !value.is_nan() {
            self.target = self.scale.clamp(value);
        }
    }

    /// Advance one frame. Returns `true` if the needle moved.
    pub fn animate(&mut self) -> bool {
        let gap = self.target - self.current;
        if gap.abs() > NEEDLE_DEADBAND {
            self.current += gap * NEEDLE_EASING;
            true
        } else {
            false
        }
    }

    /// Jump straight to the target.
    pub fn settle(&mut self) {
        self.current = self.target;
    }

    /// Sweep fraction of the current needle position.
    pub fn fraction(&self) -> f64 {
        self.scale.fraction(self.current)
    }
}

/// Colour band of the airspeed dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedBand {
    Low,
    Medium,
    High,
}

impl SpeedBand {
    /// Band for `airspeed_mph` on a 0..=60 mph dial split in thirds.
    pub fn classify(airspeed_mph: f64) -> Self {
        let fraction = (airspeed_mph / SPEED_DIAL_MAX_MPH).clamp(0.0, 1.0);
        if fraction < 1.0 / 3.0 {
            Self::Low
        } else if fraction < 2.0 / 3.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MED",
            Self::High => "HIGH",
        }
    }
}

/// Which reading a panel gauge shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaugeKind {
    StaticPressure,
    DynamicPressure,
    AngleOfAttack,
    FanOutput,
    Lift,
    Drag,
}

/// Title, unit and range of one panel gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSpec {
    pub kind: GaugeKind,
    pub title: &'static str,
    pub unit: &'static str,
    pub scale: GaugeScale,
}

impl GaugeSpec {
    /// The value this gauge displays from a reading.
    pub fn value(&self, reading: &ReadingSet) -> f64 {
        match self.kind {
            GaugeKind::StaticPressure => reading.static_pressure_hpa,
            GaugeKind::DynamicPressure => reading.dynamic_pressure_hpa,
            GaugeKind::AngleOfAttack => reading.angle_of_attack_deg,
            GaugeKind::FanOutput => reading.fan_output_pct,
            GaugeKind::Lift => reading.lift_force_n,
            GaugeKind::Drag => reading.drag_force_n,
        }
    }
}

/// Round gauges on the standard instrument panel.
pub const PANEL_GAUGES: [GaugeSpec; 6] = [
    GaugeSpec {
        kind: GaugeKind::StaticPressure,
        title: "STATIC P",
        unit: "hPa",
        scale: Bounds::new_unchecked(1000.0, 1030.0),
    },
    GaugeSpec {
        kind: GaugeKind::DynamicPressure,
        title: "DYNAMIC P",
        unit: "hPa",
        scale: Bounds::new_unchecked(1000.0, 1030.0),
    },
    GaugeSpec {
        kind: GaugeKind::AngleOfAttack,
        title: "AOA",
        unit: "deg",
        scale: Bounds::new_unchecked(-20.0, 20.0),
    },
    GaugeSpec {
        kind: GaugeKind::FanOutput,
        title: "FAN OUT",
        unit: "%",
        scale: Bounds::new_unchecked(0.0, 100.0),
    },
    GaugeSpec {
        kind: GaugeKind::Lift,
        title: "LIFT",
        unit: "N",
        scale: Bounds::new_unchecked(-2.0, 8.0),
    },
    GaugeSpec {
        kind: GaugeKind::Drag,
        title: "DRAG",
        unit: "N",
        scale: Bounds::new_unchecked(0.0, 3.0),
    },
];

/// A full panel of eased needles, one per [`PANEL_GAUGES`] entry.
#[derive(Debug, Clone)]
pub struct Panel {
    needles: Vec<(GaugeSpec, GaugeNeedle)>,
    speed_mph: f64,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self {
            needles: PANEL_GAUGES
                .iter()
                .map(|spec| (*spec, GaugeNeedle::new(spec.scale)))
                .collect(),
            speed_mph: 0.0,
        }
    }

    /// Retarget every needle from a fresh reading.
    pub fn update(&mut self, reading: &ReadingSet) {
        for (spec, needle) in &mut self.needles {
            needle.set_target(spec.value(reading));
        }
        self.speed_mph = reading.airspeed_mph;
    }

    /// Advance every needle one frame. Returns `true` if any moved.
    pub fn animate(&mut self) -> bool {
        let mut moved = false;
        for (_, needle) in &mut self.needles {
            moved |= needle.animate();
        }
        moved
    }

    pub fn settle(&mut self) {
        for (_, needle) in &mut self.needles {
            needle.settle();
        }
    }

    pub fn speed_mph(&self) -> f64 {
        self.speed_mph
    }

    pub fn speed_band(&self) -> SpeedBand {
        SpeedBand::classify(self.speed_mph)
    }

    pub fn needles(&self) -> impl Iterator<Item = (&GaugeSpec, &GaugeNeedle)> {
        self.needles.iter().map(|(spec, needle)| (spec, needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needle_target_is_clamped() {
        let mut n = GaugeNeedle::new(Bounds::new_unchecked(-2.0, 8.0));
        assert_eq!(n.current(), -2.0);
        n.set_target(50.0);
        assert_eq!(n.target(), 8.0);
        n.set_target(-50.0);
        assert_eq!(n.target(), -2.0);
        n.set_target(f64::NAN);
        assert_eq!(n.target(), -2.0);
    }

    #[test]
    fn needle_eases_toward_target() {
        let mut n = GaugeNeedle::new(Bounds::new_unchecked(0.0, 100.0));
        n.set_target(100.0);
        assert!(n.animate());
        assert!((n.current() - 15.0).abs() < 1e-12);
        assert!(n.animate());
        assert!((n.current() - 27.75).abs() < 1e-12);

        for _ in 0..200 {
            n.animate();
        }
        assert!((n.target() - n.current()).abs() <= NEEDLE_DEADBAND);
        assert!(!n.animate());
    }

    #[test]
    fn needle_inside_deadband_stays_put() {
        let mut n = GaugeNeedle::new(Bounds::new_unchecked(0.0, 100.0));
        n.set_target(0.05);
        assert!(!n.animate());
        assert_eq!(n.current(), 0.0);
        n.settle();
        assert_eq!(n.current(), 0.05);
    }

    #[test]
    fn needle_fraction() {
        let mut n = GaugeNeedle::new(Bounds::new_unchecked(-20.0, 20.0));
        n.set_target(0.0);
        n.settle();
        assert!((n.fraction() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn speed_bands_split_in_thirds() {
        assert_eq!(SpeedBand::classify(0.0), SpeedBand::Low);
        assert_eq!(SpeedBand::classify(19.9), SpeedBand::Low);
        assert_eq!(SpeedBand::classify(25.0), SpeedBand::Medium);
        assert_eq!(SpeedBand::classify(45.0), SpeedBand::High);
        assert_eq!(SpeedBand::classify(120.0), SpeedBand::High);
        assert_eq!(SpeedBand::classify(-5.0), SpeedBand::Low);
    }

    #[test]
    fn panel_tracks_reading() {
        let reading = ReadingSet {
            airspeed_mph: 50.0,
            airspeed_ms: 50.0 * 0.44704,
            static_pressure_hpa: 1012.0,
            dynamic_pressure_hpa: 1025.0,
            angle_of_attack_deg: 10.0,
            lift_force_n: 12.0,
            drag_force_n: 1.0,
            fan_output_pct: 66.0,
            elapsed_s: 3.0,
            is_running: true,
        };
        let mut panel = Panel::new();
        panel.update(&reading);
        panel.settle();

        let lift = panel
            .needles()
            .find(|(spec, _)| spec.kind == GaugeKind::Lift)
            .map(|(_, n)| n.current());
        assert_eq!(lift, Some(8.0));
        assert_eq!(panel.speed_band(), SpeedBand::High);
        assert_eq!(panel.needles().count(), PANEL_GAUGES.len());
    }
}
