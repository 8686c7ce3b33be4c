use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Insurance panels accepted by the partner network unless configured otherwise.
pub const DEFAULT_ACCEPTED_NETWORKS: [&str; 12] = [
    "Aetna",
    "Anthem",
    "Blue Cross Blue Shield",
    "Cigna",
    "Humana",
    "Medicaid",
    "Medicare",
    "Oscar Health",
    "United Healthcare",
    "Optum",
    "Molina Healthcare",
    "Centene",
];

/// Inputs to the scoring rubric that vary by partner program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub accepted_networks: BTreeSet<String>,
}

impl ScoringConfig {
    pub fn with_networks<I, S>(networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted_networks: networks.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::with_networks(DEFAULT_ACCEPTED_NETWORKS)
    }
}
