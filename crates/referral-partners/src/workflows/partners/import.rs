use super::contacts::empty_string_as_none;
use super::domain::{BhReferralGap, Practice};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub fn import_practices_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Practice>, ImportError> {
    let file = std::fs::File::open(path)?;
    import_practices(file)
}

/// Reads practices from CSV. Accepts the score export as input, so extra
/// columns such as `Rank` or `Score` are ignored.
pub fn import_practices<R: Read>(reader: R) -> Result<Vec<Practice>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut practices = Vec::new();

    for (index, record) in csv_reader.deserialize::<PracticeRow>().enumerate() {
        let row = record?;
        practices.push(row.into_practice(index + 2)?);
    }

    info!(practices = practices.len(), "imported practice list");
    Ok(practices)
}

#[derive(Debug, Deserialize)]
struct PracticeRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Practice Type", default)]
    practice_type: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Provider Count")]
    provider_count: String,
    #[serde(rename = "BH Referral Gap", default)]
    bh_referral_gap: String,
    #[serde(
        rename = "Insurance Networks",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    insurance_networks: Option<String>,
    #[serde(rename = "Monthly Patient Volume")]
    monthly_patient_volume: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

impl PracticeRow {
    fn into_practice(self, row: usize) -> Result<Practice, ImportError> {
        let provider_count = parse_count(&self.provider_count, row, "Provider Count")?;
        let monthly_patient_volume =
            parse_count(&self.monthly_patient_volume, row, "Monthly Patient Volume")?;
        let insurance_networks = self
            .insurance_networks
            .as_deref()
            .map(split_networks)
            .unwrap_or_default();

        Ok(Practice {
            name: self.name,
            practice_type: self.practice_type,
            location: self.location,
            provider_count,
            bh_referral_gap: BhReferralGap::parse(&self.bh_referral_gap),
            insurance_networks,
            monthly_patient_volume,
            notes: self.notes,
        })
    }
}

fn split_networks(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|network| !network.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_count(raw: &str, row: usize, column: &'static str) -> Result<u32, ImportError> {
    raw.trim()
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| ImportError::InvalidNumber {
            row,
            column,
            value: raw.to_string(),
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read practice list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid practice CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {column} '{value}' is not a non-negative whole number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_minimal_columns_and_splits_networks() {
        let csv = "Name,Practice Type,Location,Provider Count,BH Referral Gap,\
                   Insurance Networks,Monthly Patient Volume,Notes\n\
                   Harbor Clinic,Primary Care,\"Portland, OR\",12,Full,\
                   Aetna; Cigna ;,\"1,800\",Busy clinic\n";

        let practices = import_practices(csv.as_bytes()).expect("import succeeds");
        assert_eq!(practices.len(), 1);
        let p = &practices[0];
        assert_eq!(p.location, "Portland, OR");
        assert_eq!(p.provider_count, 12);
        assert_eq!(p.bh_referral_gap, BhReferralGap::Full);
        assert_eq!(p.insurance_networks, vec!["Aetna", "Cigna"]);
        assert_eq!(p.monthly_patient_volume, 1800);
    }

    #[test]
    fn empty_networks_column_yields_no_networks() {
        let csv = "Name,Provider Count,Monthly Patient Volume,Insurance Networks\nSolo,1,100,\n";
        let practices = import_practices(csv.as_bytes()).expect("import succeeds");
        assert!(practices[0].insurance_networks.is_empty());
        assert_eq!(practices[0].bh_referral_gap, BhReferralGap::Unknown(String::new()));
    }

    #[test]
    fn bad_count_names_row_and_column() {
        let csv = "Name,Provider Count,Monthly Patient Volume\nSolo,1,100\nBroken,many,100\n";
        let err = import_practices(csv.as_bytes()).expect_err("count is invalid");
        assert!(matches!(
            err,
            ImportError::InvalidNumber {
                row: 3,
                column: "Provider Count",
                ..
            }
        ));
    }
}
