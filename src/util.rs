//! Time conversion helpers shared by the filter factories.

use std::str::FromStr;

use crate::filters::FilterError;

/// Units of time accepted by [`get_seconds`].
///
/// A month is regarded as 30 days and a year as 365 days. When finer
/// control is needed, use days directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// The length of one of this unit, in seconds.
    pub fn seconds(self) -> f64 {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = MINUTE * 60.0;
        const DAY: f64 = HOUR * 24.0;
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => MINUTE,
            TimeUnit::Hours => HOUR,
            TimeUnit::Days => DAY,
            TimeUnit::Weeks => DAY * 7.0,
            TimeUnit::Months => DAY * 30.0,
            TimeUnit::Years => DAY * 365.0,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            "w" | "wk" | "wks" | "week" | "weeks" => Ok(TimeUnit::Weeks),
            "mon" | "month" | "months" => Ok(TimeUnit::Months),
            "y" | "yr" | "yrs" | "year" | "years" => Ok(TimeUnit::Years),
            _ => Err(FilterError::UnsupportedTimeUnit(s.to_string())),
        }
    }
}

/// Convert an amount of time in the given unit to seconds.
///
/// Fails fast if the unit string is not one of the recognized aliases.
pub fn get_seconds(amount: f64, unit: &str) -> Result<f64, FilterError> {
    let unit: TimeUnit = unit.parse()?;
    Ok(amount * unit.seconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_aliases_parse() {
        assert_eq!("sec".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert_eq!("MINS".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("hr".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!("wk".parse::<TimeUnit>().unwrap(), TimeUnit::Weeks);
        assert_eq!("month".parse::<TimeUnit>().unwrap(), TimeUnit::Months);
        assert_eq!("yrs".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = get_seconds(1.0, "fortnight").unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedTimeUnit(_)));
    }

    #[test]
    fn month_is_thirty_days() {
        assert_eq!(get_seconds(1.0, "mon").unwrap(), 30.0 * 24.0 * 3600.0);
        assert_eq!(get_seconds(2.0, "d").unwrap(), 2.0 * 86400.0);
    }
}
