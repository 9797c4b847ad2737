//! Helper functions for CLI output

use chrono::{DateTime, Utc};

/// Formats a time as relative to now (e.g., "2 days ago")
pub fn format_relative_time(at: DateTime<Utc>) -> String {
    relative_to(at, Utc::now())
}

fn relative_to(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(at);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if duration.num_days() < 30 {
        let days = duration.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if duration.num_days() < 365 {
        let months = duration.num_days() / 30;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = duration.num_days() / 365;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_buckets() {
        let now = Utc::now();
        assert_eq!(relative_to(now, now), "just now");
        assert_eq!(relative_to(now - Duration::minutes(1), now), "1 min ago");
        assert_eq!(relative_to(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_to(now - Duration::days(45), now), "1 month ago");
        assert_eq!(relative_to(now - Duration::days(800), now), "2 years ago");
    }
}
