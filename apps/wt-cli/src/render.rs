//! Text rendering of readings for the terminal.

use std::io::{self, Write};

use wt_core::Bounds;
use wt_sim::history::{csv_header, csv_row};
use wt_sim::{AeroModel, AmbientReading, Panel, ReadingSet};

const BAR_WIDTH: usize = 24;

/// Horizontal fill bar for a sweep fraction in [0, 1].
pub fn bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn table_header() -> String {
    format!(
        "{:>8} {:>8} {:>9} {:>10} {:>10} {:>7} {:>8} {:>8} {:>8}",
        "t [s]", "status", "v [mph]", "Ps [hPa]", "Pd [hPa]", "AOA", "L [N]", "D [N]", "fan %"
    )
}

pub fn table_row(r: &ReadingSet) -> String {
    format!(
        "{:>8.2} {:>8} {:>9.2} {:>10.2} {:>10.2} {:>7.1} {:>8.3} {:>8.3} {:>8.1}",
        r.elapsed_s,
        r.status().label(),
        r.airspeed_mph,
        r.static_pressure_hpa,
        r.dynamic_pressure_hpa,
        r.angle_of_attack_deg,
        r.lift_force_n,
        r.drag_force_n,
        r.fan_output_pct
    )
}

/// Multi-line instrument panel: one bar per gauge plus the speed dial.
pub fn dashboard(panel: &Panel, reading: &ReadingSet) -> String {
    let mut out = format!(
        "== WIND TUNNEL  [{}]  t={:.1}s ==\n",
        reading.status(),
        reading.elapsed_s
    );
    let speed_fraction = (panel.speed_mph() / wt_sim::gauge::SPEED_DIAL_MAX_MPH).clamp(0.0, 1.0);
    out.push_str(&format!(
        "{:<10} [{}] {:>8.2} mph {:>4}\n",
        "AIRSPEED",
        bar(speed_fraction, BAR_WIDTH),
        panel.speed_mph(),
        panel.speed_band().label()
    ));
    for (spec, needle) in panel.needles() {
        out.push_str(&format!(
            "{:<10} [{}] {:>8.2} {}\n",
            spec.title,
            bar(needle.fraction(), BAR_WIDTH),
            needle.current(),
            spec.unit
        ));
    }
    out
}

/// Writes readings as CSV as they arrive, header first.
pub struct CsvStream<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> CsvStream<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "{}", csv_header())?;
        Ok(Self { out, rows: 0 })
    }

    pub fn write(&mut self, reading: &ReadingSet) -> io::Result<()> {
        writeln!(self.out, "{}", csv_row(reading))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

pub fn ambient_header() -> String {
    format!(
        "{:>8} {:>10} {:>12} {:>10}",
        "t [s]", "v [m/s]", "P [hPa]", "dir [deg]"
    )
}

pub fn ambient_row(r: &AmbientReading) -> String {
    format!(
        "{:>8.2} {:>10.2} {:>12.2} {:>10.1}",
        r.elapsed_s, r.airspeed_ms, r.pressure_hpa, r.flow_direction_deg
    )
}

/// One row of the lift/drag polar at a fixed airspeed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PolarPoint {
    pub angle_deg: f64,
    pub cl: f64,
    pub cd: f64,
    pub lift_n: f64,
    pub drag_n: f64,
}

pub fn polar(model: &AeroModel, airspeed_mph: f64, angles: &[f64]) -> Vec<PolarPoint> {
    angles
        .iter()
        .map(|&angle_deg| {
            let forces = model.lift_drag(airspeed_mph, angle_deg);
            PolarPoint {
                angle_deg,
                cl: model.lift_coefficient(angle_deg),
                cd: model.drag_coefficient(angle_deg),
                lift_n: forces.lift_n,
                drag_n: forces.drag_n,
            }
        })
        .collect()
}

/// Most points a polar sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Angles across `range` inclusive in `step` increments.
///
/// `None` for a non-positive step or one that would exceed [`MAX_SWEEP_POINTS`].
pub fn sweep(range: Bounds, step: f64) -> Option<Vec<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let intervals = (range.span() / step + 1e-9).floor();
    if intervals.is_nan() || intervals >= MAX_SWEEP_POINTS as f64 {
        return None;
    }
    let n = intervals as usize;
    Some((0..=n).map(|i| range.min + i as f64 * step).collect())
}

pub fn polar_header() -> String {
    format!(
        "{:>7} {:>8} {:>8} {:>9} {:>9} {:>7}",
        "AOA", "CL", "CD", "L [N]", "D [N]", "L/D"
    )
}

pub fn polar_row(p: &PolarPoint) -> String {
    let ratio = if p.drag_n > 0.0 {
        format!("{:>7.2}", p.lift_n / p.drag_n)
    } else {
        format!("{:>7}", "-")
    };
    format!(
        "{:>7.1} {:>8.4} {:>8.4} {:>9.4} {:>9.4} {}",
        p.angle_deg, p.cl, p.cd, p.lift_n, p.drag_n, ratio
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> ReadingSet {
        ReadingSet {
            airspeed_mph: 30.0,
            airspeed_ms: 30.0 * 0.44704,
            static_pressure_hpa: 1012.4,
            dynamic_pressure_hpa: 1014.1,
            angle_of_attack_deg: 5.0,
            lift_force_n: 0.5,
            drag_force_n: 0.02,
            fan_output_pct: 50.0,
            elapsed_s: 1.5,
            is_running: true,
        }
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0, 4), "----");
        assert_eq!(bar(0.5, 4), "##--");
        assert_eq!(bar(1.0, 4), "####");
        assert_eq!(bar(7.0, 4), "####");
        assert_eq!(bar(f64::NAN, 4), "----");
    }

    #[test]
    fn table_row_lines_up_with_header() {
        let row = table_row(&reading());
        assert_eq!(row.len(), table_header().len());
        assert!(row.contains("RUNNING"));
    }

    #[test]
    fn dashboard_shows_every_gauge() {
        let mut panel = Panel::new();
        let r = reading();
        panel.update(&r);
        panel.settle();
        let text = dashboard(&panel, &r);
        assert_eq!(text.lines().count(), 2 + wt_sim::PANEL_GAUGES.len());
        assert!(text.contains("MED"));
        assert!(text.contains("LIFT"));
    }

    #[test]
    fn sweep_is_inclusive() {
        let range = Bounds::new_unchecked(-2.0, 2.0);
        assert_eq!(sweep(range, 1.0).unwrap(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(
            sweep(Bounds::new_unchecked(0.0, 0.0), 1.0).unwrap(),
            vec![0.0]
        );
        assert!(sweep(range, 0.0).is_none());
        assert!(sweep(range, f64::NAN).is_none());
    }

    #[test]
    fn sweep_refuses_excessive_point_counts() {
        let range = Bounds::new_unchecked(-20.0, 20.0);
        assert!(sweep(range, 1e-300).is_none());
        assert!(sweep(range, 1e-3).is_none());
        let fine = sweep(range, 0.01).unwrap();
        assert_eq!(fine.len(), 4001);
    }

    #[test]
    fn polar_at_zero_airspeed_has_no_forces() {
        let model = AeroModel::default();
        let points = polar(&model, 0.0, &[10.0]);
        assert_eq!(points[0].lift_n, 0.0);
        assert!((points[0].cl - 1.0).abs() < 1e-12);
        assert!(polar_row(&points[0]).ends_with('-'));
    }
}
