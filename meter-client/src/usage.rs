//! Usage metrics derived from meter readings.
//!
//! Pure functions over plain data, no storage or clock dependencies. The
//! caller supplies `now` so results are reproducible.

use time::OffsetDateTime;

use crate::domain::{BaselineRecord, ReadingRecord};

/// Fixed tracking window in days. The cycle is 30 days flat, not a
/// calendar month.
pub const CYCLE_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Display metrics for one meter's current tracking period.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UsageSummary {
    /// Whole days elapsed since the baseline reading, rounded up.
    pub days_since_baseline: i64,
    /// Units consumed since the baseline, clamped to zero.
    pub total_units_used: f64,
    /// Units per elapsed day, rounded to 2 decimal places.
    pub average_daily_usage: f64,
    /// Share of the cycle elapsed, in percent, capped at 100.
    pub progress_percent: f64,
    /// Days remaining until the cycle boundary.
    pub days_to_next: i64,
}

impl UsageSummary {
    fn no_baseline() -> Self {
        Self {
            days_since_baseline: 0,
            total_units_used: 0.0,
            average_daily_usage: 0.0,
            progress_percent: 0.0,
            days_to_next: CYCLE_DAYS,
        }
    }
}

/// Compute the usage summary for one meter.
///
/// Readings may arrive unsorted and with duplicate dates. Anything dated
/// on or before the baseline date is ignored. Without a baseline every
/// metric falls back to its zero default. The function is total: it never
/// fails, whatever the input.
pub fn summarize(
    readings: &[ReadingRecord],
    baseline: Option<&BaselineRecord>,
    now: OffsetDateTime,
) -> UsageSummary {
    let Some(baseline) = baseline else {
        return UsageSummary::no_baseline();
    };

    let baseline_start = baseline.reading_date.midnight().assume_utc();
    let days_since_baseline = ceil_days((now - baseline_start).whole_seconds());

    // Latest reading strictly after the baseline date; ties on the date
    // resolve to the highest value so the result is deterministic.
    let latest_after = readings
        .iter()
        .filter(|r| r.reading_date > baseline.reading_date)
        .max_by(|a, b| {
            a.reading_date
                .cmp(&b.reading_date)
                .then(a.units.total_cmp(&b.units))
        });

    let total_units_used = match latest_after {
        Some(latest) => (latest.units - baseline.units).max(0.0),
        None => 0.0,
    };

    let average_daily_usage = if days_since_baseline > 0 {
        round2(total_units_used / days_since_baseline as f64)
    } else {
        0.0
    };

    let progress_percent =
        round1((days_since_baseline as f64 / CYCLE_DAYS as f64 * 100.0).min(100.0));

    UsageSummary {
        days_since_baseline,
        total_units_used,
        average_daily_usage,
        progress_percent,
        days_to_next: (CYCLE_DAYS - days_since_baseline).max(0),
    }
}

fn ceil_days(seconds: i64) -> i64 {
    seconds.div_euclid(SECONDS_PER_DAY)
        + if seconds.rem_euclid(SECONDS_PER_DAY) > 0 { 1 } else { 0 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};
    use time::{Date, Duration};

    use super::*;
    use crate::domain::MeterId;

    fn reading(reading_date: Date, units: f64) -> ReadingRecord {
        ReadingRecord {
            id: 0,
            meter_id: MeterId::Home,
            reading_date,
            units,
        }
    }

    fn baseline(reading_date: Date, units: f64) -> BaselineRecord {
        BaselineRecord {
            id: 0,
            meter_id: MeterId::Home,
            reading_date,
            units,
        }
    }

    #[test]
    fn worked_example_at_cycle_end() {
        let b = baseline(date!(2024 - 01 - 01), 100.0);
        let readings = vec![reading(date!(2024 - 01 - 15), 150.0)];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-31 00:00:00 UTC));

        assert_eq!(s.days_since_baseline, 30);
        assert_eq!(s.total_units_used, 50.0);
        assert_eq!(s.average_daily_usage, 1.67);
        assert_eq!(s.progress_percent, 100.0);
        assert_eq!(s.days_to_next, 0);
    }

    #[test]
    fn no_baseline_yields_defaults_regardless_of_readings() {
        let readings = vec![
            reading(date!(2024 - 01 - 05), 120.0),
            reading(date!(2024 - 01 - 20), 180.0),
        ];
        let s = summarize(&readings, None, datetime!(2024-02-01 12:00:00 UTC));

        assert_eq!(s.days_since_baseline, 0);
        assert_eq!(s.total_units_used, 0.0);
        assert_eq!(s.average_daily_usage, 0.0);
        assert_eq!(s.progress_percent, 0.0);
        assert_eq!(s.days_to_next, CYCLE_DAYS);
    }

    #[test]
    fn readings_on_or_before_baseline_date_are_ignored() {
        let b = baseline(date!(2024 - 01 - 10), 200.0);
        let readings = vec![
            reading(date!(2024 - 01 - 05), 500.0),
            reading(date!(2024 - 01 - 10), 9999.0),
            reading(date!(2024 - 01 - 12), 230.0),
        ];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-20 00:00:00 UTC));

        assert_eq!(s.total_units_used, 30.0);
    }

    #[test]
    fn no_readings_after_baseline_means_zero_usage() {
        let b = baseline(date!(2024 - 01 - 10), 200.0);
        let readings = vec![reading(date!(2024 - 01 - 01), 180.0)];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-20 00:00:00 UTC));

        assert_eq!(s.total_units_used, 0.0);
        assert_eq!(s.average_daily_usage, 0.0);
        assert_eq!(s.days_since_baseline, 10);
    }

    #[test]
    fn usage_is_clamped_on_value_regression() {
        // Meter rollover or a data-entry error must never show negative usage.
        let b = baseline(date!(2024 - 01 - 01), 100.0);
        let readings = vec![reading(date!(2024 - 01 - 15), 40.0)];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-20 00:00:00 UTC));

        assert_eq!(s.total_units_used, 0.0);
        assert_eq!(s.average_daily_usage, 0.0);
    }

    #[test]
    fn unsorted_input_with_duplicate_dates_resolves_deterministically() {
        let b = baseline(date!(2024 - 01 - 01), 100.0);
        let readings = vec![
            reading(date!(2024 - 01 - 20), 120.0),
            reading(date!(2024 - 01 - 25), 130.0),
            reading(date!(2024 - 01 - 25), 135.0),
            reading(date!(2024 - 01 - 18), 110.0),
        ];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-26 00:00:00 UTC));

        // The duplicate 01-25 rows resolve to the higher value.
        assert_eq!(s.total_units_used, 35.0);
    }

    #[test]
    fn partial_days_round_up() {
        let b = baseline(date!(2024 - 01 - 01), 100.0);
        let s = summarize(&[], Some(&b), datetime!(2024-01-01 12:00:00 UTC));

        assert_eq!(s.days_since_baseline, 1);
        assert_eq!(s.days_to_next, 29);
    }

    #[test]
    fn average_is_zero_when_no_days_elapsed() {
        let b = baseline(date!(2024 - 01 - 01), 100.0);
        let readings = vec![reading(date!(2024 - 01 - 02), 150.0)];
        // `now` is exactly the baseline midnight: zero elapsed days even
        // though a later-dated reading already exists.
        let s = summarize(&readings, Some(&b), datetime!(2024-01-01 00:00:00 UTC));

        assert_eq!(s.days_since_baseline, 0);
        assert_eq!(s.total_units_used, 50.0);
        assert_eq!(s.average_daily_usage, 0.0);
    }

    #[test]
    fn progress_is_monotonic_and_caps_at_100() {
        let b = baseline(date!(2024 - 01 - 01), 0.0);
        let start = datetime!(2024-01-01 00:00:00 UTC);

        let mut previous = -1.0;
        for days in 0..=70 {
            let s = summarize(&[], Some(&b), start + Duration::days(days));
            assert!(s.progress_percent >= previous);
            assert!(s.progress_percent <= 100.0);
            assert_eq!(s.days_to_next, (CYCLE_DAYS - days).max(0));
            previous = s.progress_percent;
        }

        let s = summarize(&[], Some(&b), start + Duration::days(45));
        assert_eq!(s.progress_percent, 100.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let b = baseline(date!(2024 - 01 - 01), 0.0);
        let readings = vec![reading(date!(2024 - 01 - 02), 10.0)];
        let s = summarize(&readings, Some(&b), datetime!(2024-01-04 00:00:00 UTC));

        // 10 / 3 days
        assert_eq!(s.average_daily_usage, 3.33);
    }
}
