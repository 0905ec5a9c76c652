use std::sync::LazyLock;

use chrono::Month;
use regex::Regex;

use crate::model::HackathonRecord;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}").unwrap_or_else(|_| unreachable!()));

/// Month labels as they appear in listing dates, checked in this order.
///
/// The first label found anywhere in the text wins, so a range such as
/// "June 28 to Jan 2" resolves to `Jan`.
pub const MONTH_TABLE: [(&str, u8); 12] = [
    ("Jan", 1),
    ("Feb", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("Aug", 8),
    ("Sept", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

pub const UNKNOWN: &str = "Unknown";

/// One hackathon reduced to the columns the charts use.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub title: String,
    pub status: String,
    pub location_type: String,
    pub dates: String,
    pub location: String,
    pub themes: Vec<String>,
    pub num_themes: usize,
    pub year: Option<i32>,
    pub month: Option<Month>,
    /// Table label of the month, or `Unknown`.
    pub month_name: &'static str,
}

impl TableRow {
    pub fn from_record(record: &HackathonRecord) -> Self {
        let dates = record.dates.clone().unwrap_or_default();
        let themes = record.themes().to_vec();
        let (month, month_name) = match extract_month(&dates) {
            Some((name, number)) => (Month::try_from(number).ok(), name),
            None => (None, UNKNOWN),
        };
        Self {
            title: record.title.clone().unwrap_or_default(),
            status: record.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            location_type: record
                .location_type
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            year: extract_year(&dates),
            location: record.location.clone().unwrap_or_default(),
            num_themes: themes.len(),
            themes,
            dates,
            month,
            month_name,
        }
    }
}

/// Row-per-record view of a set of hackathons.
#[derive(Debug, Clone, Default)]
pub struct HackathonTable {
    pub rows: Vec<TableRow>,
}

impl HackathonTable {
    pub fn from_records(records: &[HackathonRecord]) -> Self {
        Self {
            rows: records.iter().map(TableRow::from_record).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// First `20xx` number anywhere in `dates`.
pub fn extract_year(dates: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(dates)
        .and_then(|m| m.as_str().parse().ok())
}

/// First entry of [`MONTH_TABLE`] whose label occurs in `dates`.
pub fn extract_month(dates: &str) -> Option<(&'static str, u8)> {
    MONTH_TABLE
        .iter()
        .find(|(name, _)| dates.contains(name))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_year_wins() {
        assert_eq!(extract_year("Nov 1, 2024 to Jan 31, 2025"), Some(2024));
        assert_eq!(extract_year("Ongoing"), None);
        assert_eq!(extract_year("ends 2099"), Some(2099));
    }

    #[test]
    fn test_month_table_order_wins_over_text_position() {
        assert_eq!(extract_month("June 28 to Jan 2"), Some(("Jan", 1)));
        assert_eq!(extract_month("Sept 3, 2025"), Some(("Sept", 9)));
        assert_eq!(extract_month("September 3"), Some(("Sept", 9)));
        assert_eq!(extract_month("Mar 3 to Sep 9"), None);
        assert_eq!(extract_month(""), None);
    }

    #[test]
    fn test_row_defaults() {
        let row = TableRow::from_record(&HackathonRecord::default());
        assert_eq!(row.status, UNKNOWN);
        assert_eq!(row.location_type, UNKNOWN);
        assert_eq!(row.month_name, UNKNOWN);
        assert_eq!(row.month, None);
        assert_eq!(row.year, None);
        assert_eq!(row.num_themes, 0);
    }

    #[test]
    fn test_row_derives_year_and_month() {
        let record = HackathonRecord {
            dates: Some("Oct 4, 2023 to Oct 6, 2023".to_string()),
            themes: Some(vec!["ai".to_string(), "iot".to_string()]),
            ..Default::default()
        };
        let row = TableRow::from_record(&record);
        assert_eq!(row.year, Some(2023));
        assert_eq!(row.month, Some(Month::October));
        assert_eq!(row.month_name, "Oct");
        assert_eq!(row.num_themes, 2);
    }
}
