use imap_naming::grammar::{
    LATEST, format_repointing, is_valid_date, is_valid_query_version, is_valid_repointing,
};
use imap_naming::{DataLevel, Extension, Instrument, ScienceFilePath};

use crate::error::{QueryParameterError, Result};
use crate::latest::{QueryResult, filter_latest};

/// Optional predicates of an archive query. Unset fields are never sent.
///
/// # Examples
///
/// ```
/// use imap_query::QueryParams;
///
/// let query = QueryParams::default()
///     .instrument("mag")
///     .version("latest")
///     .validate()
///     .unwrap();
/// assert_eq!(query.to_query_string(), "instrument=mag");
/// assert!(query.is_latest());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub instrument: Option<String>,
    pub data_level: Option<String>,
    pub descriptor: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Encoded as `repoint<NNNNN>`.
    pub repointing: Option<String>,
    /// `vNNN` or `latest`.
    pub version: Option<String>,
    pub extension: Option<String>,
}

impl QueryParams {
    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn data_level(mut self, data_level: impl Into<String>) -> Self {
        self.data_level = Some(data_level.into());
        self
    }

    pub fn descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn repointing(mut self, repointing: impl Into<String>) -> Self {
        self.repointing = Some(repointing.into());
        self
    }

    /// Set the repointing predicate from its number.
    pub fn repointing_number(self, repointing: u32) -> Self {
        self.repointing(format_repointing(repointing))
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Predicates matching exactly the given file.
    pub fn for_file(file: &ScienceFilePath) -> Self {
        let params = Self::default()
            .instrument(file.instrument().as_str())
            .data_level(file.data_level().as_str())
            .descriptor(file.descriptor())
            .start_date(file.start_date())
            .version(file.version())
            .extension(file.extension().as_str());
        match file.repointing() {
            Some(r) => params.repointing_number(r),
            None => params,
        }
    }

    fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("instrument", &self.instrument),
            ("data_level", &self.data_level),
            ("descriptor", &self.descriptor),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("repointing", &self.repointing),
            ("version", &self.version),
            ("extension", &self.extension),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// Check every present predicate. Nothing here touches the network.
    pub fn validate(&self) -> Result<Query> {
        let latest = self.version.as_deref() == Some(LATEST);
        let mut pairs = self.present();

        if latest {
            pairs.retain(|(key, _)| *key != "version");
            if pairs.is_empty() {
                return Err(QueryParameterError::LatestAlone);
            }
        }
        if pairs.is_empty() {
            return Err(QueryParameterError::Empty);
        }

        if let Some(v) = self.instrument.as_deref().filter(|v| v.parse::<Instrument>().is_err()) {
            return Err(QueryParameterError::Instrument(v.to_string()));
        }
        if let Some(v) = self.data_level.as_deref().filter(|v| v.parse::<DataLevel>().is_err()) {
            return Err(QueryParameterError::DataLevel(v.to_string()));
        }
        if let Some(v) = self.start_date.as_deref().filter(|v| !is_valid_date(v)) {
            return Err(QueryParameterError::StartDate(v.to_string()));
        }
        if let Some(v) = self.end_date.as_deref().filter(|v| !is_valid_date(v)) {
            return Err(QueryParameterError::EndDate(v.to_string()));
        }
        if let Some(v) = self.version.as_deref().filter(|v| !is_valid_query_version(v)) {
            return Err(QueryParameterError::Version(v.to_string()));
        }
        if let Some(v) = self.repointing.as_deref().filter(|v| !is_valid_repointing(v)) {
            return Err(QueryParameterError::Repointing(v.to_string()));
        }
        if let Some(v) = self.extension.as_deref().filter(|v| v.parse::<Extension>().is_err()) {
            return Err(QueryParameterError::Extension(v.to_string()));
        }

        Ok(Query {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
            latest,
        })
    }
}

/// A validated query, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
    latest: bool,
}

impl Query {
    /// Predicates that go on the wire, in field order.
    pub fn pairs(&self) -> &[(&'static str, String)] { &self.pairs }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether results must be narrowed to the highest version.
    pub fn is_latest(&self) -> bool { self.latest }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Post-process the archive's answer for this query.
    pub fn apply(&self, results: Vec<QueryResult>) -> Vec<QueryResult> {
        if self.latest {
            filter_latest(results)
        } else {
            results
        }
    }
}
