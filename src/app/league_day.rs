use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use chrono_tz::Tz;

use crate::app::Date;

/// League nights are played on Tuesdays.
pub const LEAGUE_WEEKDAY: Weekday = Weekday::Tue;

pub fn next_league_day(now: DateTime<Utc>, timezone: Tz) -> Date {
    let today = now.with_timezone(&timezone).naive_local().date();
    let days_ahead = (7 + LEAGUE_WEEKDAY.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;

    (today + Duration::days(i64::from(days_ahead))).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod league_day_test {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Detroit;

    #[test]
    fn test_next_league_day_from_friday() {
        let now = Utc.ymd(2019, 3, 1).and_hms(15, 0, 0);

        assert_eq!(next_league_day(now, Detroit), "2019-03-05");
    }

    #[test]
    fn test_next_league_day_on_tuesday_is_today() {
        let now = Utc.ymd(2019, 3, 5).and_hms(17, 0, 0);

        assert_eq!(next_league_day(now, Detroit), "2019-03-05");
    }

    #[test]
    fn test_next_league_day_uses_league_time_zone() {
        // still Tuesday evening in Detroit, already Wednesday in UTC
        let now = Utc.ymd(2019, 3, 6).and_hms(3, 0, 0);

        assert_eq!(next_league_day(now, Detroit), "2019-03-05");
        assert_eq!(next_league_day(now, chrono_tz::UTC), "2019-03-12");
    }
}
