use imap_naming::{DataLevel, Extension, Instrument};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryParameterError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParameterError {
    #[error("At least one query parameter must be provided. Run 'query -h' for more information.")]
    Empty,

    #[error("One other parameter must be run with 'version'")]
    LatestAlone,

    #[error("Not a valid instrument, please choose from {}", Instrument::choices())]
    Instrument(String),

    #[error("Not a valid data level, choose from {}", DataLevel::choices())]
    DataLevel(String),

    #[error("Not a valid start date, use format 'YYYYMMDD'.")]
    StartDate(String),

    #[error("Not a valid end date, use format 'YYYYMMDD'.")]
    EndDate(String),

    #[error("Not a valid version, use format 'vXXX'.")]
    Version(String),

    #[error("Not a valid repointing, use format repoint<num>, where <num> is a 5 digit integer.")]
    Repointing(String),

    #[error("Not a valid extension, choose from ({}).", quoted(Extension::ALL))]
    Extension(String),
}

impl QueryParameterError {
    /// Name of the predicate at fault, `None` for set-level errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::LatestAlone => Some("version"),
            Self::Instrument(_) => Some("instrument"),
            Self::DataLevel(_) => Some("data_level"),
            Self::StartDate(_) => Some("start_date"),
            Self::EndDate(_) => Some("end_date"),
            Self::Version(_) => Some("version"),
            Self::Repointing(_) => Some("repointing"),
            Self::Extension(_) => Some("extension"),
        }
    }
}

fn quoted(extensions: &[Extension]) -> String {
    extensions
        .iter()
        .map(|e| format!("'{e}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
