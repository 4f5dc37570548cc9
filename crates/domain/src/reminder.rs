use std::fmt;

use chrono::{Days, Duration, NaiveDateTime, NaiveTime};

/// Preferred time of day for the daily workout reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutTime {
    hour: u32,
    minute: u32,
}

impl WorkoutTime {
    #[must_use]
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Parse a time given in 12-hour (`6:00 PM`) or 24-hour (`18:00`) notation.
    pub fn parse(value: &str) -> Result<Self, WorkoutTimeError> {
        let value = value.trim();
        let invalid = || WorkoutTimeError::Invalid(value.to_string());

        let (hour, rest) = value.split_once(':').ok_or_else(invalid)?;
        let hour = parse_digits(hour, 1..=2).ok_or_else(invalid)?;
        let minute = rest.get(..2).and_then(|m| parse_digits(m, 2..=2)).ok_or_else(invalid)?;
        if minute > 59 {
            return Err(invalid());
        }

        let suffix = rest.get(2..).ok_or_else(invalid)?;
        if suffix.is_empty() {
            return Self::new(hour, minute).ok_or_else(invalid);
        }

        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }
        let hour = match suffix.trim_start().to_ascii_lowercase().as_str() {
            "am" => hour % 12,
            "pm" => hour % 12 + 12,
            _ => return Err(invalid()),
        };
        Self::new(hour, minute).ok_or_else(invalid)
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    #[must_use]
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// The next point in time at this time of day, today if it has not passed yet.
    #[must_use]
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.time());
        if today < now {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        }
    }

    #[must_use]
    pub fn duration_until(&self, now: NaiveDateTime) -> Duration {
        self.next_occurrence(now) - now
    }
}

impl fmt::Display for WorkoutTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn parse_digits(value: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !len.contains(&value.len()) || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutTimeError {
    #[error("Invalid workout time format: {0}")]
    Invalid(String),
}
