//! Date helpers for display and streak counting

use chrono::{DateTime, Local, NaiveDate};

/// Calendar day of a timestamp in local time
pub fn local_day(dt: &DateTime<Local>) -> NaiveDate {
    dt.date_naive()
}

/// Relative age label for a timestamp
///
/// Returns strings like: "Just now", "5h ago", "Yesterday", "3d ago"
pub fn time_ago(then: DateTime<Local>, now: DateTime<Local>) -> String {
    let hours = now.signed_duration_since(then).num_hours();

    match hours {
        h if h < 1 => "Just now".to_string(),
        h if h < 24 => format!("{}h ago", h),
        h if h < 48 => "Yesterday".to_string(),
        h => format!("{}d ago", h / 24),
    }
}

/// Format a timestamp for detailed display
pub fn format_timestamp(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_time_ago_buckets() {
        let now = Local::now();
        assert_eq!(time_ago(now - Duration::minutes(59), now), "Just now");
        assert_eq!(time_ago(now - Duration::hours(5), now), "5h ago");
        assert_eq!(time_ago(now - Duration::hours(30), now), "Yesterday");
        assert_eq!(time_ago(now - Duration::hours(24 * 4 + 3), now), "4d ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = Local::now();
        assert_eq!(time_ago(now + Duration::hours(2), now), "Just now");
    }
}
