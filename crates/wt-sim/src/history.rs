//! Bounded history of polled readings.

use std::collections::VecDeque;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::reading::ReadingSet;

/// Aggregate statistics over the readings currently held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub samples: usize,
    pub mean_airspeed_mph: f64,
    pub max_airspeed_mph: f64,
    pub mean_lift_n: f64,
    pub mean_drag_n: f64,
    pub mean_fan_output_pct: f64,
    pub span_s: f64,
}

/// FIFO of the most recent readings; the oldest falls off when full.
#[derive(Debug, Clone)]
pub struct ReadingLog {
    entries: VecDeque<ReadingSet>,
    capacity: usize,
}

const CSV_HEADER: &str = "elapsed_s,is_running,airspeed_mph,airspeed_ms,static_pressure_hpa,dynamic_pressure_hpa,angle_of_attack_deg,lift_force_n,drag_force_n,fan_output_pct";

impl ReadingLog {
    /// # Errors
    ///
    /// Returns error if `capacity` is zero.
    pub fn new(capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidArg {
                what: "log capacity must be positive",
            });
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, reading: ReadingSet) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(reading);
    }

    pub fn latest(&self) -> Option<&ReadingSet> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadingSet> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `None` when the log is empty.
    pub fn summary(&self) -> Option<LogSummary> {
        let first = self.entries.front()?;
        let last = self.entries.back()?;
        let n = self.entries.len() as f64;

        let mut sum_airspeed = 0.0;
        let mut max_airspeed = f64::NEG_INFINITY;
        let mut sum_lift = 0.0;
        let mut sum_drag = 0.0;
        let mut sum_fan = 0.0;
        for r in &self.entries {
            sum_airspeed += r.airspeed_mph;
            max_airspeed = max_airspeed.max(r.airspeed_mph);
            sum_lift += r.lift_force_n;
            sum_drag += r.drag_force_n;
            sum_fan += r.fan_output_pct;
        }

        Some(LogSummary {
            samples: self.entries.len(),
            mean_airspeed_mph: sum_airspeed / n,
            max_airspeed_mph: max_airspeed,
            mean_lift_n: sum_lift / n,
            mean_drag_n: sum_drag / n,
            mean_fan_output_pct: sum_fan / n,
            span_s: (last.elapsed_s - first.elapsed_s).max(0.0),
        })
    }

    /// Write the log as CSV with a header row.
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for r in &self.entries {
            writeln!(out, "{}", csv_row(r))?;
        }
        Ok(())
    }
}

/// One CSV line (no trailing newline) in [`ReadingLog::write_csv`] column order.
pub fn csv_row(r: &ReadingSet) -> String {
    format!(
        "{:.3},{},{:.4},{:.4},{:.4},{:.4},{:.2},{:.4},{:.4},{:.3}",
        r.elapsed_s,
        r.is_running,
        r.airspeed_mph,
        r.airspeed_ms,
        r.static_pressure_hpa,
        r.dynamic_pressure_hpa,
        r.angle_of_attack_deg,
        r.lift_force_n,
        r.drag_force_n,
        r.fan_output_pct
    )
}

/// CSV header matching [`csv_row`].
pub fn csv_header() -> &'static str {
    CSV_HEADER
}
