//! Fixed-rate polling schedule.
//!
//! The presentation layer owns the timer; these types only answer "is a poll
//! due yet" and "how long until the next one". Between polls the last
//! reading is simply held on screen.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use wt_core::ensure_finite;

use crate::error::{SimError, SimResult};

/// Default panel refresh rate.
pub const DEFAULT_POLL_HZ: f64 = 10.0;

/// Poll period configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollCadence {
    /// Poll period.
    pub period: Duration,
}

impl Default for PollCadence {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(100),
        }
    }
}

impl PollCadence {
    /// Create a cadence from a period.
    ///
    /// # Errors
    ///
    /// Returns error if `period` is zero.
    pub fn new(period: Duration) -> SimResult<Self> {
        if period.is_zero() {
            return Err(SimError::InvalidArg {
                what: "poll period must be positive",
            });
        }
        Ok(Self { period })
    }

    /// Create a cadence from a frequency in Hz.
    pub fn from_frequency(freq_hz: f64) -> SimResult<Self> {
        if ensure_finite(freq_hz, "poll frequency")? <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "poll frequency must be positive",
            });
        }
        let period = Duration::try_from_secs_f64(1.0 / freq_hz).map_err(|_| {
            SimError::InvalidArg {
                what: "poll frequency out of range",
            }
        })?;
        Self::new(period)
    }

    /// Poll frequency in Hz.
    pub fn frequency(&self) -> f64 {
        1.0 / self.period.as_secs_f64()
    }
}

/// Tracks when the next poll is due.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSchedule {
    cadence: PollCadence,
    next_due: Instant,
}

impl PollSchedule {
    /// First poll is due one period after `start`.
    pub fn new(cadence: PollCadence, start: Instant) -> Self {
        Self {
            cadence,
            next_due: start + cadence.period,
        }
    }

    pub fn cadence(&self) -> PollCadence {
        self.cadence
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns `true` if `now >= next_due`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Move to the next slot after `now`.
    ///
    /// Slots missed while the caller was late are dropped rather than
    /// replayed. Returns the number of slots skipped.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let period = self.cadence.period;
        self.next_due += period;
        if self.next_due > now {
            return 0;
        }

        let behind = now.duration_since(self.next_due).as_nanos();
        let missed = behind / period.as_nanos() + 1;
        let jump = u64::try_from(period.as_nanos().saturating_mul(missed)).unwrap_or(u64::MAX);
        self.next_due = self
            .next_due
            .checked_add(Duration::from_nanos(jump))
            .or_else(|| now.checked_add(period))
            .unwrap_or(now);

        let skipped = u32::try_from(missed).unwrap_or(u32::MAX);
        warn!(skipped, "poll schedule fell behind");
        skipped
    }

    /// Restart the schedule from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.cadence.period;
    }

    /// Time remaining until the next poll; zero if already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
