//! Recurring-cycle scheduling with a one-second polling loop.
//!
//! The loop runs cycles synchronously, so invocations never overlap. The
//! only termination path is an interrupt signal; a cycle in flight when the
//! process is killed leaves its partial file state as-is.

use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime};
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info};

/// Recurrence of the generate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleInterval {
    /// Every minute.
    Minutely,
    /// Every hour.
    Hourly,
    /// Every day at midnight.
    Daily,
    /// Every Monday at midnight.
    Weekly,
}

/// Unknown `schedule_interval` value in the configuration.
#[derive(Error, Debug)]
#[error("Unsupported schedule interval: {0}")]
pub struct UnknownIntervalError(pub String);

impl FromStr for ScheduleInterval {
    type Err = UnknownIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutely" => Ok(ScheduleInterval::Minutely),
            "hourly" => Ok(ScheduleInterval::Hourly),
            "daily" => Ok(ScheduleInterval::Daily),
            "weekly" => Ok(ScheduleInterval::Weekly),
            other => Err(UnknownIntervalError(other.to_string())),
        }
    }
}

impl ScheduleInterval {
    pub fn describe(&self) -> &'static str {
        match self {
            ScheduleInterval::Minutely => "every minute",
            ScheduleInterval::Hourly => "every hour",
            ScheduleInterval::Daily => "every day at midnight",
            ScheduleInterval::Weekly => "every Monday at midnight",
        }
    }
}

/// Compute the next due time strictly after `after`.
pub fn next_occurrence(interval: ScheduleInterval, after: NaiveDateTime) -> NaiveDateTime {
    match interval {
        ScheduleInterval::Minutely => after + Duration::minutes(1),
        ScheduleInterval::Hourly => after + Duration::hours(1),
        ScheduleInterval::Daily => (after.date() + Duration::days(1)).and_time(NaiveTime::MIN),
        ScheduleInterval::Weekly => {
            let days_until_monday = match after.date().weekday().num_days_from_monday() {
                0 => 7,
                n => 7 - n,
            };
            (after.date() + Duration::days(i64::from(days_until_monday))).and_time(NaiveTime::MIN)
        }
    }
}

/// Run `cycle` once immediately, then on the given cadence until interrupted.
///
/// Due work is polled once per second; due cycles run synchronously within
/// the loop, one at a time. A failing cycle is logged and the schedule
/// continues with the next invocation.
pub async fn run_scheduler<F>(interval: ScheduleInterval, mut cycle: F) -> anyhow::Result<()>
where
    F: FnMut() -> anyhow::Result<()>,
{
    info!("Schedule set: {}", interval.describe());
    info!("Ad log scheduler started");

    let mut shutdown = shutdown_channel();

    // First cycle runs immediately, out-of-band of the schedule.
    if let Err(e) = cycle() {
        error!("Log generation cycle failed: {e:#}");
    }
    let mut next_due = next_occurrence(interval, Local::now().naive_local());

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                info!("Scheduler stopped by interrupt");
                return Ok(());
            }
            _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
                let now = Local::now().naive_local();
                if now >= next_due {
                    if let Err(e) = cycle() {
                        error!("Log generation cycle failed: {e:#}");
                    }
                    next_due = next_occurrence(interval, now);
                }
            }
        }
    }
}

/// Sets up a shutdown signal handler.
fn shutdown_channel() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_known_intervals() {
        assert_eq!(
            "minutely".parse::<ScheduleInterval>().unwrap(),
            ScheduleInterval::Minutely
        );
        assert_eq!(
            "hourly".parse::<ScheduleInterval>().unwrap(),
            ScheduleInterval::Hourly
        );
        assert_eq!(
            "daily".parse::<ScheduleInterval>().unwrap(),
            ScheduleInterval::Daily
        );
        assert_eq!(
            "weekly".parse::<ScheduleInterval>().unwrap(),
            ScheduleInterval::Weekly
        );
    }

    #[test]
    fn test_parse_unknown_interval_fails() {
        let err = "fortnightly".parse::<ScheduleInterval>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported schedule interval: fortnightly");
    }

    #[test]
    fn test_minutely_and_hourly_offsets() {
        let base = at(2026, 8, 27, 10, 30, 45);
        assert_eq!(
            next_occurrence(ScheduleInterval::Minutely, base),
            at(2026, 8, 27, 10, 31, 45)
        );
        assert_eq!(
            next_occurrence(ScheduleInterval::Hourly, base),
            at(2026, 8, 27, 11, 30, 45)
        );
    }

    #[test]
    fn test_daily_is_next_midnight() {
        assert_eq!(
            next_occurrence(ScheduleInterval::Daily, at(2026, 8, 27, 10, 30, 45)),
            at(2026, 8, 28, 0, 0, 0)
        );
        // Exactly at midnight still advances a full day.
        assert_eq!(
            next_occurrence(ScheduleInterval::Daily, at(2026, 8, 27, 0, 0, 0)),
            at(2026, 8, 28, 0, 0, 0)
        );
    }

    #[test]
    fn test_weekly_is_next_monday_midnight() {
        // 2026-08-27 is a Thursday; the next Monday is 2026-08-31.
        assert_eq!(
            next_occurrence(ScheduleInterval::Weekly, at(2026, 8, 27, 10, 0, 0)),
            at(2026, 8, 31, 0, 0, 0)
        );
        // From a Monday, the next occurrence is a week later.
        assert_eq!(
            next_occurrence(ScheduleInterval::Weekly, at(2026, 8, 31, 0, 0, 0)),
            at(2026, 9, 7, 0, 0, 0)
        );
    }
}
