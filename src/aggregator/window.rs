use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, Utc};

/// All displayed times are in Indian Standard Time (UTC+5:30).
pub const LOCAL_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn local_offset() -> FixedOffset {
    // east_opt only rejects offsets of a day or more
    FixedOffset::east_opt(LOCAL_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Convert an upstream UTC kickoff to local time.
pub fn to_local(utc: DateTime<Utc>) -> DateTime<FixedOffset> {
    utc.with_timezone(&local_offset())
}

/// Trailing window of match dates ending today (local time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub now_local: DateTime<FixedOffset>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateWindow {
    pub fn ending_at(now: DateTime<Utc>, lookback_days: u32) -> Self {
        let now_local = to_local(now);
        let date_to = now_local.date_naive();
        let date_from = date_to
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(date_to);
        DateWindow {
            now_local,
            date_from,
            date_to,
        }
    }

    pub fn date_from_param(&self) -> String {
        self.date_from.format("%Y-%m-%d").to_string()
    }

    pub fn date_to_param(&self) -> String {
        self.date_to.format("%Y-%m-%d").to_string()
    }

    pub fn date_from_display(&self) -> String {
        self.date_from.format("%B %d").to_string()
    }

    pub fn date_to_display(&self) -> String {
        self.date_to.format("%B %d, %Y").to_string()
    }

    pub fn current_time_display(&self) -> String {
        self.now_local.format("%A, %B %d, %Y at %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_in_local_time() {
        // 20:00 UTC is already the next day in IST
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        let window = DateWindow::ending_at(now, 3);
        assert_eq!(window.date_to_param(), "2024-03-02");
        assert_eq!(window.date_from_param(), "2024-02-28");
        assert_eq!(window.date_from_display(), "February 28");
        assert_eq!(window.date_to_display(), "March 02, 2024");
        assert_eq!(window.current_time_display(), "Saturday, March 02, 2024 at 01:30");
    }

    #[test]
    fn test_zero_lookback_is_today_only() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let window = DateWindow::ending_at(now, 0);
        assert_eq!(window.date_from, window.date_to);
    }

    #[test]
    fn test_local_offset_is_ist() {
        assert_eq!(local_offset().local_minus_utc(), 19_800);
    }

    #[test]
    fn test_to_local() {
        let kickoff = Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap();
        assert_eq!(to_local(kickoff).format("%d-%m %H:%M").to_string(), "02-03 20:30");
    }
}
