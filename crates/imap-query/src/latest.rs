use std::fmt;
use std::path::Path;

use imap_naming::grammar::version_number;
use serde::{Deserialize, Deserializer, Serialize};

/// One file entry returned by the archive's query endpoint.
///
/// Decoding is lenient: missing or `null` text fields become empty strings,
/// so one sparse entry never rejects the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instrument: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_level: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descriptor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(default)]
    pub repointing: Option<Repointing>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub extension: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_path: String,
    /// Any further keys the archive sends, kept for faithful JSON output.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Repointing as the archive reports it: a bare number or a
/// `repoint<NNNNN>` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repointing {
    Number(u32),
    Label(String),
}

impl fmt::Display for Repointing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repointing::Number(n) => write!(f, "{n}"),
            Repointing::Label(label) => f.write_str(label),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl QueryResult {
    /// Last component of `file_path`.
    pub fn filename(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn version_number(&self) -> Option<u16> { version_number(&self.version) }
}

/// Keep only the entries carrying the highest version number.
///
/// Ties are all kept. Entries whose version does not parse as `vNNN` can
/// never be the latest and are dropped.
pub fn filter_latest(results: Vec<QueryResult>) -> Vec<QueryResult> {
    let Some(max) = results.iter().filter_map(QueryResult::version_number).max() else {
        return Vec::new();
    };

    results
        .into_iter()
        .filter(|r| r.version_number() == Some(max))
        .collect()
}
