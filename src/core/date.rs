use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday(pub u8);

impl Weekday {
    pub const MON: Self = Self(0);
    pub const SUN: Self = Self(6);

    pub fn short_name(self) -> &'static str {
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"][self.0 as usize % 7]
    }

    pub fn index(self) -> usize {
        self.0 as usize % 7
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn month_name(month: u8) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES[(month.clamp(1, 12) - 1) as usize]
}

impl Date {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Checked constructor.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {month}"));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(format!(
                "Invalid day {day} for {month}/{year} (max {max_day})"
            ));
        }
        Ok(Self { year, month, day })
    }

    /// Current date in the local time zone.
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn from_unix_days(days: i64) -> Self {
        let z = days + 719468;
        let era = if z >= 0 { z } else { z - 146096 } / 146097;
        let doe = (z - era * 146097) as u32;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let y = yoe as i64 + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = if m <= 2 { y + 1 } else { y };
        Self {
            year: y as i32,
            month: m as u8,
            day: d as u8,
        }
    }

    pub fn to_unix_days(self) -> i64 {
        let y = if self.month <= 2 {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let m = self.month as i64;
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146097 + doe - 719468
    }

    pub fn add_days(self, days: i64) -> Self {
        Self::from_unix_days(self.to_unix_days() + days)
    }

    /// Moves by whole months, clamping the day to the target month's length.
    pub fn add_months(self, months: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + months;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let day = self.day.min(days_in_month(year, month));
        Self { year, month, day }
    }

    pub fn first_of_month(self) -> Self {
        Self { day: 1, ..self }
    }

    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday.
        Weekday(((self.to_unix_days() + 3).rem_euclid(7)) as u8)
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Parses strict `YYYY-MM-DD`.
    pub fn parse_iso(text: &str) -> Result<Self, String> {
        let parts: Vec<&str> = text.trim().split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(format!("Expected YYYY-MM-DD, got '{text}'"));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(format!("Expected YYYY-MM-DD, got '{text}'"));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in '{text}'"))?;
        let month: u8 = month
            .parse()
            .map_err(|_| format!("Invalid month in '{text}'"))?;
        let day: u8 = day.parse().map_err(|_| format!("Invalid day in '{text}'"))?;
        Self::from_ymd(year, month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Date, Weekday, days_in_month};
    use chrono::{Local, NaiveDate};

    #[test]
    fn today_follows_local_calendar() {
        let before = Date::from(Local::now().date_naive());
        let today = Date::today();
        let after = Date::from(Local::now().date_naive());
        assert!(today == before || today == after);
    }

    #[test]
    fn converts_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        assert_eq!(Date::from(naive), Date::new(2026, 10, 18));
    }

    #[test]
    fn unix_day_conversion_is_symmetric() {
        let date = Date::new(2024, 2, 29);
        assert_eq!(Date::from_unix_days(date.to_unix_days()), date);
        assert_eq!(Date::new(1970, 1, 1).to_unix_days(), 0);
    }

    #[test]
    fn add_months_clamps_day() {
        let date = Date::new(2024, 1, 31).add_months(1);
        assert_eq!(date, Date::new(2024, 2, 29));
        let back = Date::new(2024, 1, 15).add_months(-1);
        assert_eq!(back, Date::new(2023, 12, 15));
    }

    #[test]
    fn weekday_matches_known_dates() {
        assert_eq!(Date::new(2024, 1, 1).weekday(), Weekday::MON);
        assert_eq!(Date::new(2023, 12, 31).weekday(), Weekday::SUN);
    }

    #[test]
    fn parse_iso_rejects_impossible_dates() {
        assert!(Date::parse_iso("2023-02-29").is_err());
        assert!(Date::parse_iso("2023-13-01").is_err());
        assert!(Date::parse_iso("2023-1-01").is_err());
        assert_eq!(Date::parse_iso("2024-02-29"), Ok(Date::new(2024, 2, 29)));
    }

    #[test]
    fn february_length_follows_leap_rules() {
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn serializes_as_iso_string() {
        let json = serde_json::to_string(&Date::new(2025, 6, 1)).expect("serialize");
        assert_eq!(json, "\"2025-06-01\"");
    }
}
