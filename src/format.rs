use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{StudySession, in_same_week};

/// Relative date for list views: Today, Tomorrow, the weekday name inside the
/// current week, otherwise "Mon D, YYYY".
pub fn format_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        return "Today".to_owned();
    }
    if day == today + Duration::days(1) {
        return "Tomorrow".to_owned();
    }
    if in_same_week(day, today) {
        return day.format("%A").to_string();
    }
    day.format("%b %-d, %Y").to_string()
}

pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;

    if remaining_minutes == 0 {
        return format!("{hours}h");
    }
    format!("{hours}h {remaining_minutes}m")
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::from(1024u32).powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text} {}", UNITS[exponent as usize])
}

/// Completion percent, rounded; zero when there is nothing to complete.
pub fn calculate_progress(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((f64::from(completed) / f64::from(total)) * 100.0).round() as u8
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_owned();
    }
    let mut truncated = text.chars().take(max_length).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Total study minutes per day, for the activity calendar.
pub fn calendar_data(sessions: &[StudySession]) -> BTreeMap<NaiveDate, u32> {
    let mut data = BTreeMap::new();
    for session in sessions {
        *data.entry(session.date).or_insert(0) += session.duration;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_near_now_are_relative() {
        // A Wednesday.
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap();

        assert_eq!(format_date(now, now), "Today");
        assert_eq!(format_date(now + Duration::days(1), now), "Tomorrow");
        assert_eq!(format_date(now + Duration::days(3), now), "Saturday");
        assert_eq!(format_date(now + Duration::days(10), now), "Aug 30, 2025");
        assert_eq!(format_date(now - Duration::days(30), now), "Jul 21, 2025");
    }

    #[test]
    fn durations_split_into_hours_and_minutes() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(60), "1h");
        assert_eq!(format_duration(150), "2h 30m");
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn progress_rounds_and_guards_empty_totals() {
        assert_eq!(calculate_progress(0, 0), 0);
        assert_eq!(calculate_progress(7, 12), 58);
        assert_eq!(calculate_progress(12, 12), 100);
        assert_eq!(calculate_progress(1, 3), 33);
    }

    #[test]
    fn truncation_appends_an_ellipsis() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("hello world", 5), "hello...");
    }

    #[test]
    fn calendar_sums_minutes_per_day() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 23).unwrap();
        let sessions = vec![
            StudySession {
                id: "1".to_owned(),
                course_id: "1".to_owned(),
                date,
                duration: 45,
                lessons_completed: 1,
                quiz_score: Some(85),
            },
            StudySession {
                id: "2".to_owned(),
                course_id: "2".to_owned(),
                date,
                duration: 30,
                lessons_completed: 1,
                quiz_score: None,
            },
        ];
        let data = calendar_data(&sessions);
        assert_eq!(data.get(&date), Some(&75));
    }
}
