use anyhow::{bail, Result};
use chrono::{Datelike, Local, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};
use serde_json::json;

use crate::register_toolbelt;

const COMMON_TIMEZONES: &[&str] = &[
    "America/New_York",
    "America/Los_Angeles",
    "America/Chicago",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Kolkata",
    "Australia/Sydney",
    "UTC",
];

#[derive(Default)]
pub struct Clock;

register_toolbelt! {
    Clock {
        description: "Calendar and timezone helpers",
        tools: {
            "calculate_age" => calculate_age {
                description: "Calculate age from birth date.",
                params: [
                    "birth_date": "string" => "Birth date in YYYY-MM-DD format",
                ]
            },
            "get_timezone_info" => get_timezone_info {
                description: "Get current time and information for a specific timezone.",
                params: [
                    "timezone_name": "string" => "Timezone name (e.g., 'America/New_York', 'Europe/London', 'Asia/Tokyo')",
                ]
            }
        }
    }
}

impl Clock {
    fn calculate_age(&self, args: &serde_json::Value) -> Result<String> {
        let birth_date = args["birth_date"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'birth_date' argument"))?;

        let birth = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Birth date must be in YYYY-MM-DD format"))?;
        let today = Local::now().date_naive();

        if birth > today {
            bail!("Birth date cannot be in the future");
        }

        let (years, months, days) = age_between(birth, today);
        Ok(json!({
            "years": years,
            "months": months,
            "days": days
        })
        .to_string())
    }

    fn get_timezone_info(&self, args: &serde_json::Value) -> Result<String> {
        let timezone_name = args["timezone_name"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'timezone_name' argument"))?;

        let tz: Tz = timezone_name.parse().map_err(|_| {
            anyhow::anyhow!("Unknown timezone. Try one of: {}", COMMON_TIMEZONES.join(", "))
        })?;

        let utc_now = Utc::now();
        let local_now = utc_now.with_timezone(&tz);

        let offset = tz.offset_from_utc_datetime(&utc_now.naive_utc());
        let offset_hours = offset.fix().local_minus_utc() as f64 / 3600.0;
        let is_dst = !offset.dst_offset().is_zero();

        Ok(json!({
            "timezone": timezone_name,
            "current_time": local_now.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
            "utc_offset": format!("{:+.1} hours", offset_hours),
            "is_dst": is_dst,
            "utc_time": utc_now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        })
        .to_string())
    }
}

/// Calendar difference between two dates as whole years, months, and days.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> (i32, u32, u32) {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    let mut months = today.month() as i32 - birth.month() as i32;
    if today.day() < birth.day() {
        months -= 1;
    }
    if months < 0 {
        months += 12;
    }

    let days = if today.day() >= birth.day() {
        today.day() - birth.day()
    } else {
        let (prev_year, prev_month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        // Clamped: a birth day past the end of the previous month counts as zero.
        (days_in_month(prev_year, prev_month) as i64 - birth.day() as i64 + today.day() as i64)
            .max(0) as u32
    };

    (years, months as u32, days)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_on_exact_birthday() {
        assert_eq!(age_between(date(2000, 1, 1), date(2020, 1, 1)), (20, 0, 0));
    }

    #[test]
    fn age_with_partial_month() {
        // Birthday already passed this year, current day before the birth day.
        assert_eq!(age_between(date(1998, 4, 27), date(2025, 6, 25)), (27, 1, 29));
    }

    #[test]
    fn age_before_birthday_this_year() {
        assert_eq!(age_between(date(1998, 4, 27), date(2025, 3, 1)), (26, 10, 2));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let err = calculate_age_handler(&json!({"birth_date": "9999-01-01"})).unwrap_err();
        assert!(err.to_string().contains("future"));
    }

    #[test]
    fn malformed_birth_date_is_rejected() {
        let err = calculate_age_handler(&json!({"birth_date": "27-04-1998"})).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn utc_timezone_info() {
        let result = get_timezone_info_handler(&json!({"timezone_name": "UTC"})).unwrap();
        let info: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(info["timezone"], "UTC");
        assert_eq!(info["utc_offset"], "+0.0 hours");
        assert_eq!(info["is_dst"], false);
    }

    #[test]
    fn unknown_timezone_suggests_alternatives() {
        let err = get_timezone_info_handler(&json!({"timezone_name": "Mars/Olympus"})).unwrap_err();
        assert!(err.to_string().contains("Unknown timezone"));
        assert!(err.to_string().contains("Europe/London"));
    }
}
