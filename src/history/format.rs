use std::borrow::Cow;

use chrono::{DateTime, Local, Utc};

use crate::models::ChatRecord;

/// Responses longer than this many characters are collapsed unless expanded.
pub const TRUNCATE_AT: usize = 150;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Humanized age of a record relative to `now`:
/// - "Just now" under a minute (including timestamps in the future)
/// - "{m}m ago", "{h}h ago", "{d}d ago" under an hour, a day and a week
/// - absolute local date and time after that: "Oct 3, 02:15 PM"
pub fn format_date(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff_ms = now.signed_duration_since(*timestamp).num_milliseconds();
    let minutes = diff_ms.div_euclid(MS_PER_MINUTE);
    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    let days = diff_ms.div_euclid(MS_PER_DAY);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        format_absolute(timestamp)
    }
}

fn format_absolute(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%b %-d, %I:%M %p").to_string()
}

/// True when the text is long enough to be collapsed.
pub fn is_truncatable(text: &str) -> bool {
    text.chars().nth(TRUNCATE_AT).is_some()
}

/// First [`TRUNCATE_AT`] characters plus "..." for long collapsed text, otherwise the text itself.
pub fn truncate_response(text: &str, expanded: bool) -> Cow<'_, str> {
    if expanded {
        return Cow::Borrowed(text);
    }

    match text.char_indices().nth(TRUNCATE_AT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Display form of one record, rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub id: String,
    pub time: String,
    pub prompt: String,
    pub response: String,
    pub expandable: bool,
    pub expanded: bool,
}

pub fn render_record(record: &ChatRecord, expanded: bool, now: &DateTime<Utc>) -> RecordView {
    RecordView {
        id: record.id.clone(),
        time: format_date(&record.created_at, now),
        prompt: record.prompt.clone(),
        response: truncate_response(&record.response, expanded).into_owned(),
        expandable: is_truncatable(&record.response),
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_just_now() {
        let now = now();
        assert_eq!(format_date(&now, &now), "Just now");
        assert_eq!(format_date(&(now - Duration::seconds(59)), &now), "Just now");
        assert_eq!(format_date(&(now - Duration::milliseconds(59_999)), &now), "Just now");
    }

    #[test]
    fn test_format_future_timestamp_is_just_now() {
        let now = now();
        assert_eq!(format_date(&(now + Duration::minutes(5)), &now), "Just now");
    }

    #[test]
    fn test_format_minutes() {
        let now = now();
        assert_eq!(format_date(&(now - Duration::milliseconds(60_000)), &now), "1m ago");
        assert_eq!(format_date(&(now - Duration::minutes(45)), &now), "45m ago");
        assert_eq!(format_date(&(now - Duration::seconds(3599)), &now), "59m ago");
    }

    #[test]
    fn test_format_hours() {
        let now = now();
        assert_eq!(format_date(&(now - Duration::minutes(60)), &now), "1h ago");
        assert_eq!(format_date(&(now - Duration::hours(3)), &now), "3h ago");
        assert_eq!(format_date(&(now - Duration::minutes(24 * 60 - 1)), &now), "23h ago");
    }

    #[test]
    fn test_format_days() {
        let now = now();
        assert_eq!(format_date(&(now - Duration::hours(24)), &now), "1d ago");
        assert_eq!(format_date(&(now - Duration::days(5)), &now), "5d ago");
        assert_eq!(format_date(&(now - Duration::hours(7 * 24 - 1)), &now), "6d ago");
    }

    #[test]
    fn test_format_absolute_after_a_week() {
        let now = now();
        let timestamp = now - Duration::days(7);
        let local = timestamp.with_timezone(&Local);

        let formatted = format_date(&timestamp, &now);
        assert!(formatted.starts_with(&local.format("%b %-d,").to_string()));
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
    }

    #[test]
    fn test_minutes_consistent_with_floor_under_an_hour() {
        let now = now();
        for ms in (0..3_600_000).step_by(7_919) {
            let formatted = format_date(&(now - Duration::milliseconds(ms)), &now);
            let minutes = ms / 60_000;
            if minutes < 1 {
                assert_eq!(formatted, "Just now");
            } else {
                assert_eq!(formatted, format!("{}m ago", minutes));
            }
        }
    }

    #[test]
    fn test_truncate_long_response() {
        let text = "a".repeat(200);
        let collapsed = truncate_response(&text, false);

        assert_eq!(collapsed, format!("{}...", "a".repeat(150)));
        assert_eq!(truncate_response(&text, true), text);
    }

    #[test]
    fn test_truncate_boundary() {
        let exactly = "b".repeat(150);
        assert_eq!(truncate_response(&exactly, false), exactly);
        assert!(!is_truncatable(&exactly));

        let one_more = "b".repeat(151);
        assert!(is_truncatable(&one_more));
        assert_eq!(truncate_response(&one_more, false), format!("{}...", exactly));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(160);
        let collapsed = truncate_response(&text, false);

        assert_eq!(collapsed.chars().count(), 153);
        assert!(collapsed.starts_with(&"é".repeat(150)));
    }

    #[test]
    fn test_render_record() {
        let record = ChatRecord {
            id: "1".to_string(),
            prompt: "Best restaurants in Beirut?".to_string(),
            response: "x".repeat(151),
            created_at: now() - Duration::hours(2),
        };

        let view = render_record(&record, false, &now());
        assert_eq!(view.time, "2h ago");
        assert!(view.expandable);
        assert!(!view.expanded);
        assert!(view.response.ends_with("..."));

        let view = render_record(&record, true, &now());
        assert_eq!(view.response, record.response);
    }
}
