use std::time::Duration;

/// Formats a duration as `mm:ss`; minutes keep counting past an hour.
pub fn format_time(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
