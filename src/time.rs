//! Time keeping for the watch face
//!
//! [`TimeSnapshot`] is what a tick hands to the renderer. [`TimeManager`]
//! derives wall clock time from a reference point and the uptime counter,
//! since the PineTime has no battery-backed RTC.

use core::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike};

/// Snapshot field names, used in [`TimeError::OutOfRange`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hour,
    Minute,
    Second,
    Day,
    Month,
    DayOfWeek,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Hour => "hour24",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::Day => "day",
            Field::Month => "month",
            Field::DayOfWeek => "day_of_week",
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// A snapshot field is outside its valid range.
    OutOfRange { field: Field },
    /// The clock could not produce a time.
    Unavailable,
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::OutOfRange { field } => write!(f, "{} out of range", field.name()),
            TimeError::Unavailable => f.write_str("time unavailable"),
        }
    }
}

/// Local time fields delivered with each tick.
///
/// Can only be built with every field in range, see [`TimeSnapshot::new`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    hour24: u8,
    minute: u8,
    second: u8,
    day: u8,
    month: u8,
    /// Sunday = 0
    day_of_week: u8,
}

impl TimeSnapshot {
    /// Create a snapshot, checking every field against its range.
    pub fn new(
        hour24: u8,
        minute: u8,
        second: u8,
        day: u8,
        month: u8,
        day_of_week: u8,
    ) -> Result<Self, TimeError> {
        check(Field::Hour, hour24, 0, 23)?;
        check(Field::Minute, minute, 0, 59)?;
        check(Field::Second, second, 0, 59)?;
        check(Field::Day, day, 1, 31)?;
        check(Field::Month, month, 1, 12)?;
        check(Field::DayOfWeek, day_of_week, 0, 6)?;

        Ok(Self {
            hour24,
            minute,
            second,
            day,
            month,
            day_of_week,
        })
    }

    /// Create a snapshot from a local date and time.
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        // chrono keeps every field in range, leap seconds aside
        Self {
            hour24: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
            day: time.day() as u8,
            month: time.month() as u8,
            day_of_week: time.weekday().num_days_from_sunday() as u8,
        }
    }

    pub fn hour24(&self) -> u8 {
        self.hour24
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Month, January = 1
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of the week, Sunday = 0
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }
}

fn check(field: Field, value: u8, min: u8, max: u8) -> Result<(), TimeError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TimeError::OutOfRange { field })
    }
}

/// Clock time anchored to an uptime reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Uptime in seconds when `time` was taken
    uptime_secs: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: DateTime::UNIX_EPOCH.naive_utc(),
            uptime_secs: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UTC date and time
    pub fn from_datetime(time: NaiveDateTime, uptime_secs: u64) -> Self {
        Self { time, uptime_secs }
    }

    /// Create new time reference from a UNIX timestamp
    pub fn from_timestamp(timestamp: i64, uptime_secs: u64) -> Result<Self, TimeError> {
        let time = DateTime::from_timestamp(timestamp, 0)
            .ok_or(TimeError::Unavailable)?
            .naive_utc();
        Ok(Self { time, uptime_secs })
    }
}

#[derive(Debug, Default)]
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    pub fn new(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Current UTC time at the given uptime
    pub fn now(&self, uptime_secs: u64) -> Result<NaiveDateTime, TimeError> {
        // Uptime before the reference counts as no time elapsed
        let elapsed = uptime_secs.saturating_sub(self.reference.uptime_secs);
        let elapsed = i64::try_from(elapsed).map_err(|_| TimeError::Unavailable)?;
        self.reference
            .time
            .checked_add_signed(Duration::try_seconds(elapsed).ok_or(TimeError::Unavailable)?)
            .ok_or(TimeError::Unavailable)
    }

    /// Local time snapshot at the given uptime
    pub fn snapshot(
        &self,
        uptime_secs: u64,
        timezone_offset_secs: i32,
    ) -> Result<TimeSnapshot, TimeError> {
        let local = self
            .now(uptime_secs)?
            .checked_add_signed(Duration::seconds(i64::from(timezone_offset_secs)))
            .ok_or(TimeError::Unavailable)?;
        Ok(TimeSnapshot::from_datetime(&local))
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            TimeSnapshot::new(24, 0, 0, 1, 1, 0),
            Err(TimeError::OutOfRange { field: Field::Hour })
        );
        assert_eq!(
            TimeSnapshot::new(0, 60, 0, 1, 1, 0),
            Err(TimeError::OutOfRange { field: Field::Minute })
        );
        assert_eq!(
            TimeSnapshot::new(0, 0, 60, 1, 1, 0),
            Err(TimeError::OutOfRange { field: Field::Second })
        );
        assert_eq!(
            TimeSnapshot::new(0, 0, 0, 0, 1, 0),
            Err(TimeError::OutOfRange { field: Field::Day })
        );
        assert_eq!(
            TimeSnapshot::new(0, 0, 0, 1, 13, 0),
            Err(TimeError::OutOfRange { field: Field::Month })
        );
        assert_eq!(
            TimeSnapshot::new(0, 0, 0, 1, 12, 7),
            Err(TimeError::OutOfRange {
                field: Field::DayOfWeek
            })
        );
        assert!(TimeSnapshot::new(23, 59, 59, 31, 12, 6).is_ok());
    }

    #[test]
    fn snapshot_from_datetime_counts_weekdays_from_sunday() {
        // 2024-03-03 was a Sunday
        let snapshot = TimeSnapshot::from_datetime(&datetime(2024, 3, 3, 7, 8, 9));
        assert_eq!(snapshot.day_of_week(), 0);
        assert_eq!(snapshot.day(), 3);
        assert_eq!(snapshot.month(), 3);
        assert_eq!(
            (snapshot.hour24(), snapshot.minute(), snapshot.second()),
            (7, 8, 9)
        );

        let saturday = TimeSnapshot::from_datetime(&datetime(2024, 3, 9, 0, 0, 0));
        assert_eq!(saturday.day_of_week(), 6);
    }

    #[test]
    fn manager_advances_with_uptime() {
        let reference = TimeReference::from_datetime(datetime(2024, 1, 1, 12, 0, 0), 100);
        let manager = TimeManager::new(reference);

        assert_eq!(manager.now(100).unwrap(), datetime(2024, 1, 1, 12, 0, 0));
        assert_eq!(manager.now(165).unwrap(), datetime(2024, 1, 1, 12, 1, 5));
        // Uptime before the reference does not go back in time
        assert_eq!(manager.now(10).unwrap(), datetime(2024, 1, 1, 12, 0, 0));
    }

    #[test]
    fn snapshot_applies_timezone_across_midnight() {
        let reference = TimeReference::from_datetime(datetime(2024, 12, 31, 23, 30, 0), 0);
        let manager = TimeManager::new(reference);

        let local = manager.snapshot(0, 3_600).unwrap();
        assert_eq!((local.hour24(), local.minute()), (0, 30));
        assert_eq!((local.day(), local.month()), (1, 1));
        // 2025-01-01 is a Wednesday
        assert_eq!(local.day_of_week(), 3);
    }

    #[test]
    fn set_time_reanchors_the_clock() {
        let mut manager = TimeManager::default();
        assert_eq!(manager.now(0).unwrap(), DateTime::UNIX_EPOCH.naive_utc());
        assert_eq!(manager.now(0).unwrap().and_utc().timestamp(), 0);

        manager.set_time(TimeReference::from_timestamp(1_700_000_000, 50).unwrap());
        assert_eq!(
            manager.now(60).unwrap(),
            DateTime::from_timestamp(1_700_000_010, 0).unwrap().naive_utc()
        );
    }
}
