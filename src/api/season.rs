// FTC season arithmetic
// Author: kelexine (https://github.com/kelexine)

use chrono::{Datelike, NaiveDate, Utc};

/// Seasons kick off in September; a season is named for its starting year.
pub fn season_for(date: NaiveDate) -> i32 {
    if date.month() >= 9 {
        date.year()
    } else {
        date.year() - 1
    }
}

pub fn current_season() -> i32 {
    season_for(Utc::now().date_naive())
}

/// TOA season key: 2024 -> `"2425"`.
pub fn toa_season_key(season: i32) -> String {
    format!("{:02}{:02}", season.rem_euclid(100), (season + 1).rem_euclid(100))
}

/// Accept `2024` or the short TOA-style `2425` form.
pub fn parse_season(input: &str) -> Option<i32> {
    let value: i32 = input.trim().parse().ok()?;
    match value {
        2000..=2099 => Some(value),
        // "2425" style: two consecutive two-digit years
        0..=9999 if (value / 100 + 1) % 100 == value % 100 => Some(2000 + value / 100),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_boundary() {
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()), 2023);
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()), 2024);
        assert_eq!(season_for(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), 2024);
    }

    #[test]
    fn test_toa_season_key() {
        assert_eq!(toa_season_key(2024), "2425");
        assert_eq!(toa_season_key(2099), "9900");
    }

    #[test]
    fn test_parse_season() {
        assert_eq!(parse_season("2023"), Some(2023));
        assert_eq!(parse_season("2324"), Some(2023));
        assert_eq!(parse_season("1999"), None);
        assert_eq!(parse_season("abc"), None);
    }
}
