use serde::{Deserialize, Serialize};

/// Prize text the site shows when a hackathon has no prize pool.
pub const NO_PRIZE: &str = "$0";

/// A single hackathon as scraped from a listing card, optionally enriched
/// with the fields of its detail page.
///
/// Every field is optional. A field the page did not provide stays `None` and
/// is left out of the serialized JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackathonRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Free text badge, usually `ONLINE` or `IN-PERSON`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    /// Date range as shown on the listing card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    /// Free text, usually one of `Upcoming`, `Open` or `Ended`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Theme tags in page order. Duplicates are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Prize text; [`NO_PRIZE`] means there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Fields extracted from a hackathon detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HackathonDetails {
    pub full_description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub prizes: Option<String>,
    pub website: Option<String>,
}

impl HackathonDetails {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl HackathonRecord {
    /// Overwrite this record's fields with every field the detail page provided.
    /// Fields missing from `details` leave the listing values untouched.
    pub fn merge_details(&mut self, details: HackathonDetails) {
        fn overwrite(target: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *target = value;
            }
        }

        overwrite(&mut self.full_description, details.full_description);
        overwrite(&mut self.start_date, details.start_date);
        overwrite(&mut self.end_date, details.end_date);
        overwrite(&mut self.location, details.location);
        overwrite(&mut self.organizer, details.organizer);
        overwrite(&mut self.prizes, details.prizes);
        overwrite(&mut self.website, details.website);
    }

    /// Prize text is present, non-empty and not the `$0` sentinel.
    pub fn has_prizes(&self) -> bool {
        self.prizes
            .as_deref()
            .is_some_and(|p| !p.is_empty() && p != NO_PRIZE)
    }

    pub fn has_organizer(&self) -> bool {
        self.organizer.as_deref().is_some_and(|o| !o.is_empty())
    }

    pub fn has_website(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.is_empty())
    }

    /// Theme tags, or an empty slice when the card had no theme block.
    pub fn themes(&self) -> &[String] {
        self.themes.as_deref().unwrap_or_default()
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes().iter().any(|t| t == theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_details_overwrites_only_present_fields() {
        let mut record = HackathonRecord {
            title: Some("Build Week".to_string()),
            location: Some("Online".to_string()),
            organizer: Some("Listing Org".to_string()),
            ..Default::default()
        };
        record.merge_details(HackathonDetails {
            location: Some("Berlin, Germany".to_string()),
            prizes: Some("$5,000".to_string()),
            ..Default::default()
        });

        assert_eq!(record.title.as_deref(), Some("Build Week"));
        assert_eq!(record.location.as_deref(), Some("Berlin, Germany"));
        assert_eq!(record.organizer.as_deref(), Some("Listing Org"));
        assert_eq!(record.prizes.as_deref(), Some("$5,000"));
    }

    #[test]
    fn test_prize_sentinel_is_not_a_prize() {
        let mut record = HackathonRecord::default();
        assert!(!record.has_prizes());
        record.prizes = Some(NO_PRIZE.to_string());
        assert!(!record.has_prizes());
        record.prizes = Some(String::new());
        assert!(!record.has_prizes());
        record.prizes = Some("Swag".to_string());
        assert!(record.has_prizes());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let record = HackathonRecord {
            title: Some("Café Hack".to_string()),
            themes: Some(vec!["ai".to_string()]),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["title"], "Café Hack");
        assert!(!object.contains_key("organizer"));
    }

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let record: HackathonRecord =
            serde_json::from_str(r#"{"title": "X", "scraped_by": "someone"}"#).unwrap();
        assert_eq!(record.title.as_deref(), Some("X"));
        assert_eq!(record.themes(), &[] as &[String]);
    }
}
