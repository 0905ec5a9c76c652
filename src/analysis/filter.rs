use tracing::debug;

use crate::model::HackathonRecord;

/// Criteria for narrowing a set of hackathons. Every criterion that is set
/// must hold; unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Exact status, e.g. `Upcoming`.
    pub status: Option<String>,
    /// Exact location type, e.g. `ONLINE`.
    pub location_type: Option<String>,
    /// A theme the record must carry.
    pub theme: Option<String>,
    /// Require real prizes (not empty, not `$0`). `false` does not filter.
    pub has_prizes: bool,
    /// Require a non-empty website. `false` does not filter.
    pub has_website: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn has_prizes(mut self, has_prizes: bool) -> Self {
        self.has_prizes = has_prizes;
        self
    }

    pub fn has_website(mut self, has_website: bool) -> Self {
        self.has_website = has_website;
        self
    }

    /// Build criteria from `(key, value)` pairs such as `("status", "Open")`.
    ///
    /// Boolean keys accept `true`/`false`/`1`/`0`/`yes`/`no`. Unknown keys and
    /// unreadable booleans are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Filter::default();
        for (key, value) in pairs {
            match key {
                "status" => filter.status = Some(value.to_string()),
                "location_type" => filter.location_type = Some(value.to_string()),
                "theme" => filter.theme = Some(value.to_string()),
                "has_prizes" => filter.has_prizes = parse_flag(value).unwrap_or(false),
                "has_website" => filter.has_website = parse_flag(value).unwrap_or(false),
                _ => debug!(key, "ignoring unknown filter key"),
            }
        }
        filter
    }

    pub fn matches(&self, record: &HackathonRecord) -> bool {
        self.status
            .as_deref()
            .is_none_or(|status| record.status.as_deref() == Some(status))
            && self
                .location_type
                .as_deref()
                .is_none_or(|location_type| record.location_type.as_deref() == Some(location_type))
            && self.theme.as_deref().is_none_or(|theme| record.has_theme(theme))
            && (!self.has_prizes || record.has_prizes())
            && (!self.has_website || record.has_website())
    }

    /// The matching records, cloned. `records` is left untouched.
    pub fn apply(&self, records: &[HackathonRecord]) -> Vec<HackathonRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        status: &str,
        location_type: &str,
        themes: &[&str],
        prizes: Option<&str>,
    ) -> HackathonRecord {
        HackathonRecord {
            title: Some(format!("{status} {location_type} {}", themes.join("+"))),
            status: Some(status.to_string()),
            location_type: Some(location_type.to_string()),
            themes: Some(themes.iter().map(|t| t.to_string()).collect()),
            prizes: prizes.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> Vec<HackathonRecord> {
        vec![
            record("Upcoming", "ONLINE", &["ai", "web"], Some("$1,000")),
            record("Upcoming", "IN-PERSON", &["ai"], Some("$0")),
            record("Open", "ONLINE", &["web"], None),
            record("Ended", "ONLINE", &["ai"], Some("")),
            HackathonRecord {
                website: Some("https://site.dev".to_string()),
                prizes: Some("Swag".to_string()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_has_prizes_excludes_missing_and_sentinel() {
        let records = sample();
        let with_prizes = Filter::new().has_prizes(true).apply(&records);
        assert_eq!(with_prizes.len(), 2);
        assert!(with_prizes.iter().all(|r| r.has_prizes()));
        assert!(with_prizes
            .iter()
            .all(|r| !matches!(r.prizes.as_deref(), None | Some("$0") | Some(""))));
    }

    #[test]
    fn test_combined_criteria_equal_sequential_filters() {
        let records = sample();
        let combined = Filter::new()
            .status("Upcoming")
            .location_type("ONLINE")
            .theme("ai")
            .apply(&records);

        let a = Filter::new().theme("ai").apply(&records);
        let b = Filter::new().location_type("ONLINE").apply(&a);
        let sequential = Filter::new().status("Upcoming").apply(&b);

        let c = Filter::new().status("Upcoming").apply(&records);
        let d = Filter::new().theme("ai").apply(&c);
        let reversed = Filter::new().location_type("ONLINE").apply(&d);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined, sequential);
        assert_eq!(combined, reversed);
    }

    #[test]
    fn test_empty_filter_keeps_everything_without_mutating() {
        let records = sample();
        let all = Filter::new().apply(&records);
        assert_eq!(all, records);
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_has_website_false_does_not_filter() {
        let records = sample();
        assert_eq!(Filter::new().has_website(false).apply(&records).len(), 5);
        assert_eq!(Filter::new().has_website(true).apply(&records).len(), 1);
    }

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let filter = Filter::from_pairs([
            ("status", "Open"),
            ("colour", "blue"),
            ("has_prizes", "true"),
            ("has_website", "maybe"),
        ]);
        assert_eq!(filter, Filter::new().status("Open").has_prizes(true));
    }
}
