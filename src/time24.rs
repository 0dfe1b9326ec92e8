//! # 24-Hour Time of Day
//!
//! The clock face only ever shows hours, minutes and seconds. They are
//! decoded from a Unix timestamp in the local time zone once per redraw.

use crate::digits::Digit;
use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// `None` unless `hour < 24`, `minute < 60` and `second < 60`.
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    /// Decode a Unix timestamp in the local time zone.
    pub fn decode(unix_seconds: i64) -> Self {
        Self::decode_in(&Local, unix_seconds)
    }

    /// Decode a Unix timestamp in an arbitrary zone.
    pub fn decode_in<Tz: TimeZone>(tz: &Tz, unix_seconds: i64) -> Self {
        let utc = DateTime::<Utc>::from_timestamp(unix_seconds, 0).unwrap_or_default();
        let local = utc.with_timezone(tz);
        Self {
            hour: (local.hour() % 24) as u8,
            minute: local.minute() as u8,
            // A leap second reads as :59.
            second: local.second().min(59) as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// The six glyph digits, left to right.
    pub fn digits(&self) -> [Digit; 6] {
        let (h1, h0) = Digit::pair(self.hour);
        let (m1, m0) = Digit::pair(self.minute);
        let (s1, s0) = Digit::pair(self.second);
        [h1, h0, m1, m0, s1, s0]
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(TimeOfDay::new(23, 59, 59).is_some());
        assert!(TimeOfDay::new(24, 0, 0).is_none());
        assert!(TimeOfDay::new(0, 60, 0).is_none());
        assert!(TimeOfDay::new(0, 0, 60).is_none());
    }

    #[test]
    fn decodes_in_a_fixed_zone() {
        // 2024-03-01T01:07:45Z
        let ts = 1_709_255_265;
        let utc = TimeOfDay::decode_in(&Utc, ts);
        assert_eq!(utc.to_string(), "01:07:45");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(TimeOfDay::decode_in(&plus_two, ts).to_string(), "03:07:45");

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(TimeOfDay::decode_in(&minus_five, ts).to_string(), "20:07:45");
    }

    #[test]
    fn digits_read_left_to_right() {
        let t = TimeOfDay::new(3, 7, 45).unwrap();
        let values: Vec<u8> = t.digits().iter().map(|d| d.value()).collect();
        assert_eq!(values, vec![0, 3, 0, 7, 4, 5]);
    }

    #[test]
    fn local_decode_matches_chrono_formatting() {
        for ts in [0_i64, 86_399, 1_000_000_000, 1_709_255_265, 1_900_000_123] {
            let expected = Local
                .timestamp_opt(ts, 0)
                .single()
                .unwrap()
                .format("%H:%M:%S")
                .to_string();
            let decoded = TimeOfDay::decode(ts);
            assert_eq!(decoded.to_string(), expected);
            assert!(decoded.hour() < 24 && decoded.minute() < 60 && decoded.second() < 60);
        }
    }
}
