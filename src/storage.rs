use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{HackathonError, Result};
use crate::model::HackathonRecord;

/// Write `value` as pretty-printed UTF-8 JSON, replacing any existing file.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| HackathonError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| HackathonError::io(path, e))?;
    info!(path = %path.display(), "data saved");
    Ok(())
}

/// Load a JSON array of hackathon records.
pub fn load_records(path: &Path) -> Result<Vec<HackathonRecord>> {
    let file = File::open(path).map_err(|e| HackathonError::io(path, e))?;
    let records: Vec<HackathonRecord> = serde_json::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), count = records.len(), "loaded hackathons");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hackathon-scraper-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let path = temp_path("records.json");
        let records = vec![
            HackathonRecord {
                title: Some("Hack São Paulo".to_string()),
                themes: Some(vec!["web".to_string(), "web".to_string()]),
                ..Default::default()
            },
            HackathonRecord::default(),
        ];
        save_json(&records, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Hack São Paulo"));
        assert!(raw.contains("\n  {"));

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let path = temp_path("replace.json");
        std::fs::write(&path, "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]").unwrap();
        save_json::<[HackathonRecord]>(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_records(&temp_path("does-not-exist.json"));
        assert!(matches!(result, Err(HackathonError::Io { .. })));
    }
}
