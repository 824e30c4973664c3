//! Faction member-count payload and its split into chart series.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// One entry of `GET /api/faction_member_count/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionStat {
    pub name: String,
    pub member_count: u64,
}

/// Parallel label/count sequences, in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactionSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl FactionSeries {
    pub fn from_stats(stats: &[FactionStat]) -> Self {
        let labels = stats.iter().map(|f| f.name.clone()).collect();
        let counts = stats.iter().map(|f| f.member_count).collect();
        Self { labels, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Parse the faction-count response body.
pub fn parse_faction_counts(body: &str) -> Result<Vec<FactionStat>, ClientError> {
    Ok(serde_json::from_str(body)?)
}
