use std::fmt;

use thiserror::Error;

use crate::grammar::{DataLevel, FILENAME_CONVENTION, Instrument, MISSION};

pub type Result<T> = std::result::Result<T, NamingError>;

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("Filename {filename} does not match expected pattern: {convention}")]
    Grammar {
        filename: String,
        convention: &'static str,
    },

    #[error("{}", join_lines(.violations))]
    InvalidScienceFile { violations: Vec<Violation> },

    #[error(
        "Invalid SPICE file {filename}. Expected file to have one of the following extensions {}",
        .accepted.join(", ")
    )]
    InvalidSpiceFile {
        filename: String,
        accepted: Vec<&'static str>,
    },
}

impl NamingError {
    pub(crate) fn grammar(filename: impl Into<String>) -> Self {
        Self::Grammar {
            filename: filename.into(),
            convention: FILENAME_CONVENTION,
        }
    }

    /// Individual semantic failures, empty for structural errors.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InvalidScienceFile { violations } => violations,
            _ => &[],
        }
    }
}

/// A single failed semantic check on a science filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingAttribute(&'static str),
    Mission(String),
    Instrument(String),
    DataLevel(String),
    StartDate(String),
    Version(String),
    Repointing(u32),
    Extension { extension: String, data_level: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingAttribute(field) => write!(
                f,
                "Invalid filename, missing attribute {field}. Filename convention is {FILENAME_CONVENTION}"
            ),
            Violation::Mission(mission) => {
                write!(f, "Invalid mission {mission}. Please use {MISSION}")
            }
            Violation::Instrument(instrument) => write!(
                f,
                "Invalid instrument {instrument}. Please choose from {}",
                Instrument::choices()
            ),
            Violation::DataLevel(level) => write!(
                f,
                "Invalid data level {level}. Please choose from {}",
                DataLevel::choices()
            ),
            Violation::StartDate(date) => write!(
                f,
                "Invalid start date format {date}. Please use YYYYMMDD format."
            ),
            Violation::Version(version) => {
                write!(f, "Invalid version format {version}. Please use vXXX format.")
            }
            Violation::Repointing(repointing) => write!(
                f,
                "Invalid repointing number {repointing}. It must be an integer of at most 5 digits."
            ),
            Violation::Extension {
                extension,
                data_level,
            } => write!(
                f,
                "Invalid extension {extension} for data level {data_level}. Extension should be \
                 pkts for data level l0 and cdf for data level higher than l0"
            ),
        }
    }
}

fn join_lines(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
