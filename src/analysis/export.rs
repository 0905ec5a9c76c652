use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{HackathonError, Result};
use crate::model::HackathonRecord;

pub const CSV_OUTPUT_FILE: &str = "hackathons.csv";

/// Exported columns, in order. Other record fields are dropped.
pub const CSV_COLUMNS: [&str; 10] = [
    "title",
    "status",
    "location_type",
    "dates",
    "location",
    "organizer",
    "prizes",
    "themes",
    "website",
    "detail_url",
];

/// One CSV row; missing fields become empty cells and themes are joined with `", "`.
pub fn csv_row(record: &HackathonRecord) -> [String; 10] {
    let cell = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        cell(&record.title),
        cell(&record.status),
        cell(&record.location_type),
        cell(&record.dates),
        cell(&record.location),
        cell(&record.organizer),
        cell(&record.prizes),
        record.themes().join(", "),
        cell(&record.website),
        cell(&record.detail_url),
    ]
}

/// Write a header and one row per record to `writer`.
pub fn write_csv<W: Write>(records: &[HackathonRecord], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export records to a CSV file at `path`.
pub fn export_csv(records: &[HackathonRecord], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| HackathonError::io(path, e))?;
    write_csv(records, file)?;
    info!(path = %path.display(), count = records.len(), "data exported");
    Ok(())
}
