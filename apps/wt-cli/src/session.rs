//! Timed polling loop shared by the `run` and `ambient` commands.

use std::time::Duration;

use wt_core::Clock;
use wt_sim::{NoiseSource, PollCadence, PollSchedule, ReadingSet, WindTunnel};

use crate::error::{CliError, CliResult};

/// How long to poll and how to nudge the controls along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub duration: Duration,
    /// Press the +fan / +AOA buttons this often.
    pub ramp_every: Option<Duration>,
    pub fan_step_pct: f64,
    pub aoa_step_deg: f64,
}

impl SessionPlan {
    pub fn fixed(duration: Duration) -> Self {
        Self {
            duration,
            ramp_every: None,
            fan_step_pct: 0.0,
            aoa_step_deg: 0.0,
        }
    }
}

/// Parse a positive, finite number of seconds.
pub fn seconds(what: &str, value: f64) -> CliResult<Duration> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CliError::InvalidArg(format!(
            "{what} must be a positive number of seconds, got {value}"
        )));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| CliError::InvalidArg(format!("{what}: {e}")))
}

/// Poll `tunnel` on `cadence` until `plan.duration` has passed on the
/// tunnel's clock. `wait` blocks until the next slot; returns the poll count.
pub fn run_session<N, C>(
    tunnel: &mut WindTunnel<N, C>,
    cadence: PollCadence,
    plan: &SessionPlan,
    mut wait: impl FnMut(Duration),
    mut on_reading: impl FnMut(&ReadingSet) -> CliResult<()>,
) -> CliResult<usize>
where
    N: NoiseSource,
    C: Clock,
{
    let begin = tunnel.clock().now();
    let end = begin
        .checked_add(plan.duration)
        .ok_or_else(|| CliError::InvalidArg("session duration too long".to_string()))?;
    let mut schedule = PollSchedule::new(cadence, begin);
    let mut next_ramp = plan.ramp_every.map(|every| begin + every);
    let mut polls = 0;

    loop {
        let now = tunnel.clock().now();
        if now >= end {
            break;
        }
        if !schedule.is_due(now) {
            wait(schedule.time_until_due(now).min(end - now));
            continue;
        }
        schedule.advance(now);

        if let (Some(due), Some(every)) = (next_ramp, plan.ramp_every)
            && now >= due
        {
            tunnel.adjust_fan_speed(plan.fan_step_pct);
            tunnel.adjust_angle_of_attack(plan.aoa_step_deg);
            next_ramp = Some(due + every);
        }

        let reading = tunnel.poll();
        on_reading(&reading)?;
        polls += 1;
    }
    Ok(polls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::ManualClock;
    use wt_sim::{AeroModel, SilentNoise};

    fn bench(clock: &ManualClock) -> WindTunnel<SilentNoise, &ManualClock> {
        WindTunnel::new(AeroModel::default(), SilentNoise, clock)
    }

    #[test]
    fn polls_once_per_period() {
        let clock = ManualClock::new();
        let mut tunnel = bench(&clock);
        tunnel.start();
        let plan = SessionPlan::fixed(Duration::from_millis(1050));

        let mut seen = Vec::new();
        let polls = run_session(
            &mut tunnel,
            PollCadence::default(),
            &plan,
            |d| clock.advance(d),
            |r| {
                seen.push(r.elapsed_s);
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(polls, 10);
        assert!((seen[0] - 0.1).abs() < 1e-9);
        assert!((seen[9] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_presses_buttons() {
        let clock = ManualClock::new();
        let mut tunnel = bench(&clock);
        tunnel.start();
        tunnel.set_fan_speed(0.0);
        let plan = SessionPlan {
            duration: Duration::from_millis(2050),
            ramp_every: Some(Duration::from_millis(500)),
            fan_step_pct: 5.0,
            aoa_step_deg: 1.0,
        };

        run_session(
            &mut tunnel,
            PollCadence::default(),
            &plan,
            |d| clock.advance(d),
            |_| Ok(()),
        )
        .unwrap();

        assert_eq!(tunnel.state().fan_speed_pct(), 20.0);
        assert_eq!(tunnel.state().angle_of_attack_deg(), 4.0);
    }

    #[test]
    fn callback_error_stops_session() {
        let clock = ManualClock::new();
        let mut tunnel = bench(&clock);
        let plan = SessionPlan::fixed(Duration::from_secs(10));
        let result = run_session(
            &mut tunnel,
            PollCadence::default(),
            &plan,
            |d| clock.advance(d),
            |_| Err(CliError::InvalidArg("stop".into())),
        );
        assert!(result.is_err());
    }

    #[test]
    fn csv_stream_keeps_every_row_past_log_capacity() {
        use crate::render::CsvStream;
        use wt_sim::ReadingLog;

        let clock = ManualClock::new();
        let mut tunnel = bench(&clock);
        tunnel.start();
        let mut log = ReadingLog::new(3).unwrap();
        let mut csv = CsvStream::new(Vec::new()).unwrap();

        let polls = run_session(
            &mut tunnel,
            PollCadence::default(),
            &SessionPlan::fixed(Duration::from_millis(1050)),
            |d| clock.advance(d),
            |r| {
                log.push(*r);
                csv.write(r)?;
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(polls, 10);
        assert_eq!(log.len(), 3);
        assert_eq!(csv.rows(), 10);
        let text = String::from_utf8(csv.finish().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 11);
        assert_eq!(text.lines().next(), Some(wt_sim::history::csv_header()));
    }

    #[test]
    fn rejects_bad_seconds() {
        assert!(seconds("duration", 0.0).is_err());
        assert!(seconds("duration", f64::NAN).is_err());
        assert!(seconds("duration", -3.0).is_err());
        assert_eq!(
            seconds("duration", 1.5).unwrap(),
            Duration::from_millis(1500)
        );
    }
}
