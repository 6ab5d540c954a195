//! Named text variables used by `$name` substitution and `set`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, TimeZone};

/// Ordered name to value map. Values are plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    values: BTreeMap<String, String>,
}

impl VariableStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the conventional metadata entries.
    pub fn seeded(timestamp: Option<&str>) -> Self {
        let mut store = Self::new();
        store.set("creator", "Unknown");
        let date = match timestamp {
            Some(stamp) => stamp.to_string(),
            None => timestamp_now(),
        };
        store.set("date", date);
        store.set("title", "Unknown");
        store
    }

    /// Insert or replace.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The current local time as `Www, dd Mmm yyyy hh:mm:ss ±hhmm`.
pub fn timestamp_now() -> String {
    format_timestamp(&Local::now())
}

/// Format a zoned time with its numeric UTC offset.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Offset, Utc};

    use super::*;

    #[test]
    fn seeded_entries() {
        let store = VariableStore::seeded(Some("Mon, 01 Jan 2024 00:00:00 +0000"));
        assert_eq!(store.get("creator"), Some("Unknown"));
        assert_eq!(store.get("title"), Some("Unknown"));
        assert_eq!(store.get("date"), Some("Mon, 01 Jan 2024 00:00:00 +0000"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn set_replaces() {
        let mut store = VariableStore::new();
        store.set("x", "1");
        store.set("x", "2");
        assert_eq!(store.get("x"), Some("2"));
        assert_eq!(store.get("y"), None);
    }

    #[test]
    fn epoch_formats() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(format_timestamp(&epoch), "Thu, 01 Jan 1970 00:00:00 +0000");
    }

    #[test]
    fn leap_day_formats() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 12, 34, 56).unwrap();
        assert_eq!(format_timestamp(&at), "Thu, 29 Feb 2024 12:34:56 +0000");
    }

    #[test]
    fn offset_is_printed_as_hours_and_minutes() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = tokyo.with_ymd_and_hms(2026, 10, 16, 22, 37, 27).unwrap();
        assert_eq!(format_timestamp(&at), "Fri, 16 Oct 2026 22:37:27 +0900");

        let newfoundland = FixedOffset::west_opt(3 * 3600 + 1800).unwrap();
        let at = newfoundland.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&at), "Fri, 02 Jan 2026 03:04:05 -0330");
    }

    #[test]
    fn clock_timestamp_uses_the_local_offset() {
        let stamp = timestamp_now();
        assert_eq!(stamp.len(), "Www, dd Mmm yyyy hh:mm:ss +hhmm".len());
        let offset = Local::now().offset().fix().local_minus_utc();
        let sign = if offset < 0 { '-' } else { '+' };
        let offset = offset.abs();
        let expected = format!("{sign}{:02}{:02}", offset / 3600, (offset % 3600) / 60);
        assert!(stamp.ends_with(&expected), "{stamp} should end with {expected}");
    }

    #[test]
    fn seeded_without_override_reads_the_clock() {
        let store = VariableStore::seeded(None);
        let date = store.get("date").unwrap();
        assert!(DateTime::parse_from_str(date, "%a, %d %b %Y %H:%M:%S %z").is_ok(), "{date}");
    }
}
