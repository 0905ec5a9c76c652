use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use serde::Serialize;

use crate::model::HackathonRecord;

/// Occurrence counts that rank by count, ties in first-seen order.
#[derive(Debug, Clone)]
pub struct Tally<K = String> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn add(&mut self, key: impl Into<K>) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, most frequent first.
    pub fn most_common(&self) -> Vec<(&K, usize)> {
        self.entries
            .iter()
            .map(|(key, count)| (key, *count))
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .collect_vec()
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> Vec<(&K, usize)> {
        self.most_common().into_iter().take(n).collect_vec()
    }
}

impl<K: Eq + Hash + Clone, T: Into<K>> FromIterator<T> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

impl<K: Eq + Hash + Clone + Serialize> Serialize for Tally<K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.most_common())
    }
}

/// Frequency statistics over a set of hackathons.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub status: Tally,
    pub location_type: Tally,
    pub themes: Tally,
    pub with_prizes: usize,
    pub with_organizer: usize,
    pub with_website: usize,
}

impl Statistics {
    /// Tally status, location type and themes, and count records carrying
    /// prizes, organizer and website. Absent fields are simply not counted.
    pub fn compute(records: &[HackathonRecord]) -> Self {
        let mut stats = Statistics {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if let Some(status) = &record.status {
                stats.status.add(status);
            }
            if let Some(location_type) = &record.location_type {
                stats.location_type.add(location_type);
            }
            for theme in record.themes() {
                stats.themes.add(theme);
            }
            stats.with_prizes += usize::from(record.has_prizes());
            stats.with_organizer += usize::from(record.has_organizer());
            stats.with_website += usize::from(record.has_website());
        }

        stats
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "HACKATHON DATA STATISTICS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "\nTotal Hackathons: {}", self.total)?;

        writeln!(f, "\nBy Status:")?;
        for (status, count) in self.status.most_common() {
            writeln!(f, "  {status}: {count}")?;
        }

        writeln!(f, "\nBy Location Type:")?;
        for (location_type, count) in self.location_type.most_common() {
            writeln!(f, "  {location_type}: {count}")?;
        }

        writeln!(f, "\nTop 10 Themes:")?;
        for (theme, count) in self.themes.top(10) {
            writeln!(f, "  {theme}: {count}")?;
        }

        writeln!(f, "\nHackathons with Prizes: {}", self.with_prizes)?;
        writeln!(f, "Hackathons with Organizer Info: {}", self.with_organizer)?;
        write!(f, "Hackathons with Website: {}", self.with_website)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: &str) -> HackathonRecord {
        HackathonRecord {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_counts() {
        let records = vec![with_status("Open"), with_status("Open"), with_status("Ended")];
        let stats = Statistics::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.status.get("Open"), 2);
        assert_eq!(stats.status.get("Ended"), 1);
        assert_eq!(stats.status.get("Upcoming"), 0);
        assert!(stats.location_type.is_empty());
    }

    #[test]
    fn test_theme_and_presence_counts() {
        let records = vec![
            HackathonRecord {
                themes: Some(vec!["ai".into(), "web".into(), "ai".into()]),
                prizes: Some("$0".into()),
                organizer: Some("Org".into()),
                ..Default::default()
            },
            HackathonRecord {
                themes: Some(vec!["web".into()]),
                prizes: Some("$500".into()),
                website: Some(String::new()),
                ..Default::default()
            },
            HackathonRecord {
                website: Some("https://x.dev".into()),
                ..Default::default()
            },
        ];
        let stats = Statistics::compute(&records);
        assert_eq!(stats.themes.get("ai"), 2);
        assert_eq!(stats.themes.get("web"), 2);
        assert_eq!(stats.with_prizes, 1);
        assert_eq!(stats.with_organizer, 1);
        assert_eq!(stats.with_website, 1);
    }

    #[test]
    fn test_most_common_breaks_ties_by_first_seen() {
        let tally: Tally = ["b", "a", "c", "a", "c"].into_iter().collect();
        let ranked = tally
            .most_common()
            .into_iter()
            .map(|(key, count)| (key.as_str(), count))
            .collect_vec();
        assert_eq!(ranked, [("a", 2), ("c", 2), ("b", 1)]);
        assert_eq!(tally.top(1)[0].1, 2);
        assert_eq!(tally.len(), 3);
    }

    #[test]
    fn test_display_lists_sections() {
        let stats = Statistics::compute(&[with_status("Upcoming")]);
        let text = stats.to_string();
        assert!(text.contains("Total Hackathons: 1"));
        assert!(text.contains("  Upcoming: 1"));
        assert!(text.ends_with("Hackathons with Website: 0"));
    }
}
