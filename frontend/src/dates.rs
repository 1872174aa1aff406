use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate, TimeDelta};

use crate::error::DateError;

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the browser's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses the value of an `<input type="date">`.
pub fn parse_input_date(raw: &str) -> Result<NaiveDate, DateError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, INPUT_FORMAT).map_err(|_| DateError::Invalid(raw.to_string()))
}

pub fn to_input_value(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Renders a server timestamp (`2024-03-01` or `2024-03-01T00:00:00.000Z`)
/// as `dd/mm/yyyy`, leaving anything unparseable untouched.
pub fn display_date(raw: &str) -> String {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, INPUT_FORMAT).ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Date `days` after `start` (negative offsets go backwards).
pub fn add_days(start: NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
    TimeDelta::try_days(days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(DateError::OutOfRange)
}

/// `Monday, January 1, 2024`
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(n: i64, singular: &str) -> String {
            if n == 1 {
                format!("{n} {singular}")
            } else {
                format!("{n} {singular}s")
            }
        }
        write!(
            f,
            "{}, {}, {}",
            unit(i64::from(self.years), "Year"),
            unit(i64::from(self.months), "Month"),
            unit(i64::from(self.days), "Day")
        )
    }
}

/// Calendar difference between `birth` and `today`.
///
/// Whole months are counted first; the remaining days run from the last
/// monthly anniversary, which falls on the month's final day when the birth
/// day does not exist in that month.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> Result<Age, DateError> {
    if birth > today {
        return Err(DateError::BirthInFuture);
    }

    let mut whole_months =
        (today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32;
    if today.day() < birth.day() {
        whole_months -= 1;
    }
    let mut whole_months = u32::try_from(whole_months).map_err(|_| DateError::OutOfRange)?;
    // A clamped anniversary (Jan 31 -> Feb 29) can arrive before the birth day number.
    if birth
        .checked_add_months(Months::new(whole_months + 1))
        .is_some_and(|next| next <= today)
    {
        whole_months += 1;
    }

    let anniversary = birth
        .checked_add_months(Months::new(whole_months))
        .ok_or(DateError::OutOfRange)?;
    let days = u32::try_from((today - anniversary).num_days()).map_err(|_| DateError::OutOfRange)?;

    Ok(Age {
        years: (whole_months / 12) as i32,
        months: whole_months % 12,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_input_values() {
        assert_eq!(parse_input_date("2024-02-29"), Ok(ymd(2024, 2, 29)));
        assert_eq!(parse_input_date(" 2024-01-05 "), Ok(ymd(2024, 1, 5)));
        assert!(parse_input_date("").is_err());
        assert!(parse_input_date("2023-02-29").is_err());
    }

    #[test]
    fn hundredth_day_crosses_months_and_years() {
        assert_eq!(add_days(ymd(2024, 1, 1), 100), Ok(ymd(2024, 4, 10)));
        assert_eq!(add_days(ymd(2023, 11, 15), 36), Ok(ymd(2023, 12, 21)));
        assert_eq!(add_days(ymd(2023, 12, 31), 1), Ok(ymd(2024, 1, 1)));
        assert_eq!(add_days(ymd(2024, 3, 1), -1), Ok(ymd(2024, 2, 29)));
        assert_eq!(add_days(ymd(2024, 3, 1), i64::MAX), Err(DateError::OutOfRange));
    }

    #[test]
    fn long_format() {
        assert_eq!(format_long(ymd(2024, 4, 10)), "Wednesday, April 10, 2024");
    }

    #[test]
    fn display_date_accepts_timestamps() {
        assert_eq!(display_date("2024-03-01T00:00:00.000Z"), "01/03/2024");
        assert_eq!(display_date("2024-03-01"), "01/03/2024");
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn age_on_birthday() {
        let age = age_between(ymd(1990, 6, 15), ymd(2024, 6, 15)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 34,
                months: 0,
                days: 0
            }
        );
        assert_eq!(age.to_string(), "34 Years, 0 Months, 0 Days");
    }

    #[test]
    fn age_counts_from_month_end_anniversary() {
        // No February 31st: the last anniversary is 2024-02-29.
        let age = age_between(ymd(2000, 1, 31), ymd(2024, 3, 1)).unwrap();
        assert_eq!(
            age,
            Age {
                years: 24,
                months: 1,
                days: 1
            }
        );
    }

    #[test]
    fn clamped_anniversary_counts_on_month_end() {
        let birth = ymd(2000, 1, 31);
        assert_eq!(
            age_between(birth, ymd(2024, 2, 29)).unwrap(),
            Age {
                years: 24,
                months: 1,
                days: 0
            }
        );
        assert_eq!(
            age_between(birth, ymd(2024, 2, 28)).unwrap(),
            Age {
                years: 24,
                months: 0,
                days: 28
            }
        );
        assert_eq!(
            age_between(ymd(2000, 3, 31), ymd(2024, 4, 30)).unwrap(),
            Age {
                years: 24,
                months: 1,
                days: 0
            }
        );
    }

    #[test]
    fn age_borrows_months_from_year() {
        let age = age_between(ymd(1999, 11, 20), ymd(2024, 2, 10)).unwrap();
        // Last anniversary 2024-01-20, 21 days earlier.
        assert_eq!(
            age,
            Age {
                years: 24,
                months: 2,
                days: 21
            }
        );
        assert_eq!(age.to_string(), "24 Years, 2 Months, 21 Days");
    }

    #[test]
    fn singular_units() {
        let age = Age {
            years: 1,
            months: 1,
            days: 1,
        };
        assert_eq!(age.to_string(), "1 Year, 1 Month, 1 Day");
    }

    #[test]
    fn future_birth_is_rejected() {
        assert_eq!(
            age_between(ymd(2030, 1, 1), ymd(2024, 1, 1)),
            Err(DateError::BirthInFuture)
        );
        assert!(is_future(ymd(2024, 1, 2), ymd(2024, 1, 1)));
        assert!(!is_future(ymd(2024, 1, 1), ymd(2024, 1, 1)));
    }
}
