use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Source of account ownership and last-touch data, standing in for a CRM.
pub trait ContactDirectory {
    fn owner(&self, practice: &str) -> Option<String>;
    fn days_since_contact(&self, practice: &str) -> Option<u32>;

    fn owner_or_unassigned(&self, practice: &str) -> String {
        self.owner(practice)
            .unwrap_or_else(|| UNASSIGNED_OWNER.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEntry {
    pub owner: Option<String>,
    pub days_since_contact: Option<u32>,
}

/// In-memory directory keyed by practice name.
#[derive(Debug, Clone, Default)]
pub struct StaticContactDirectory {
    entries: HashMap<String, ContactEntry>,
}

impl StaticContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact(
        mut self,
        practice: impl Into<String>,
        owner: impl Into<String>,
        days_since_contact: u32,
    ) -> Self {
        self.insert(
            practice,
            ContactEntry {
                owner: Some(owner.into()),
                days_since_contact: Some(days_since_contact),
            },
        );
        self
    }

    pub fn insert(&mut self, practice: impl Into<String>, entry: ContactEntry) {
        self.entries.insert(practice.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<Self, ContactImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    /// Reads `Practice Name`, `Owner`, `Last Contact` columns. Day spans are
    /// measured against `as_of`; contacts dated after it count as zero days.
    pub fn from_reader<R: Read>(reader: R, as_of: NaiveDate) -> Result<Self, ContactImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut directory = Self::new();

        for (index, record) in csv_reader.deserialize::<ContactRow>().enumerate() {
            let row = record?;
            let days_since_contact = match row.last_contact.as_deref() {
                Some(raw) => {
                    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                        ContactImportError::InvalidDate {
                            row: index + 2,
                            value: raw.to_string(),
                        }
                    })?;
                    Some(days_between(date, as_of))
                }
                None => None,
            };

            directory.insert(
                row.practice_name,
                ContactEntry {
                    owner: row.owner,
                    days_since_contact,
                },
            );
        }

        info!(contacts = directory.len(), %as_of, "loaded contact directory");
        Ok(directory)
    }
}

fn days_between(last_contact: NaiveDate, as_of: NaiveDate) -> u32 {
    let span = (as_of - last_contact).num_days().max(0);
    u32::try_from(span).unwrap_or(u32::MAX)
}

impl ContactDirectory for StaticContactDirectory {
    fn owner(&self, practice: &str) -> Option<String> {
        self.entries
            .get(practice)
            .and_then(|entry| entry.owner.clone())
    }

    fn days_since_contact(&self, practice: &str) -> Option<u32> {
        self.entries
            .get(practice)
            .and_then(|entry| entry.days_since_contact)
    }
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    #[serde(rename = "Practice Name")]
    practice_name: String,
    #[serde(rename = "Owner", default, deserialize_with = "empty_string_as_none")]
    owner: Option<String>,
    #[serde(
        rename = "Last Contact",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_contact: Option<String>,
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum ContactImportError {
    #[error("failed to read contact export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid contact CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: last contact '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid date")
    }

    #[test]
    fn unknown_practice_falls_back_to_unassigned() {
        let directory = StaticContactDirectory::new().with_contact("Known", "Dana Okon", 4);
        assert_eq!(directory.owner_or_unassigned("Known"), "Dana Okon");
        assert_eq!(directory.owner_or_unassigned("Missing"), UNASSIGNED_OWNER);
        assert_eq!(directory.days_since_contact("Missing"), None);
    }

    #[test]
    fn csv_rows_derive_days_from_as_of_date() {
        let csv = "Practice Name,Owner,Last Contact\n\
Sunrise Family Medicine,Jamie Reyes,2025-03-17\n\
Valley Primary Care,,2025-03-25\n\
Metro Health Associates,Marcus Webb,\n";

        let directory =
            StaticContactDirectory::from_reader(csv.as_bytes(), as_of()).expect("contacts load");

        assert_eq!(directory.len(), 3);
        assert_eq!(directory.days_since_contact("Sunrise Family Medicine"), Some(3));
        assert_eq!(directory.days_since_contact("Valley Primary Care"), Some(0));
        assert_eq!(directory.owner("Valley Primary Care"), None);
        assert_eq!(directory.days_since_contact("Metro Health Associates"), None);
        assert_eq!(
            directory.owner("Metro Health Associates").as_deref(),
            Some("Marcus Webb")
        );
    }

    #[test]
    fn malformed_date_reports_row() {
        let csv = "Practice Name,Owner,Last Contact\nSunrise,Jamie,03/17/2025\n";
        let err = StaticContactDirectory::from_reader(csv.as_bytes(), as_of())
            .expect_err("date is invalid");
        assert!(matches!(err, ContactImportError::InvalidDate { row: 2, .. }));
        assert!(err.to_string().contains("03/17/2025"));
    }
}
