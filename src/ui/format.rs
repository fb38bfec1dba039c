use chrono::{DateTime, Local, TimeZone, Utc};

/// `YYYY-MM-DD` in local time
pub fn format_date(timestamp: Option<&str>) -> String {
    parse_local(timestamp)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

/// `HH:MM` on a 24-hour clock in local time
pub fn format_time(timestamp: Option<&str>) -> String {
    parse_local(timestamp)
        .map(|date| date.format("%H:%M").to_string())
        .unwrap_or_else(|| "Unknown time".to_string())
}

/// Date and time of an already parsed timestamp, `-` when absent
pub fn format_datetime(timestamp: Option<&DateTime<Utc>>) -> String {
    match timestamp {
        Some(timestamp) => {
            let local = timestamp.with_timezone(&Local);
            format!("{} {}", local.format("%Y-%m-%d"), local.format("%H:%M"))
        }
        None => "-".to_string(),
    }
}

fn parse_local(timestamp: Option<&str>) -> Option<DateTime<Local>> {
    let timestamp = timestamp.filter(|timestamp| !timestamp.is_empty())?;
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|parsed| Local.from_utc_datetime(&parsed.naive_utc()))
}
