//! Structural decomposition of science filenames.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{NamingError, Result};

// Instrument, level and descriptor are underscore-free runs, so the
// descriptor may carry hyphens. Only the date and repointing tokens are
// fixed width.
static FILENAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?<mission>[^_]+)_(?<instrument>[^_]+)_(?<data_level>[^_]+)_(?<descriptor>[^_]+)_(?<start_date>[0-9]{8})(?:-repoint(?<repointing>[0-9]{5}))?_(?<version>v[0-9]{3})\.(?<extension>cdf|pkts)$",
    )
    .unwrap()
});

/// Raw fields of a science filename, before any vocabulary check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilenameComponents {
    pub mission: String,
    pub instrument: String,
    pub data_level: String,
    pub descriptor: String,
    pub start_date: String,
    pub repointing: Option<u32>,
    pub version: String,
    pub extension: String,
}

/// Split a filename into its components. Does not validate instrument,
/// level or date; see [`crate::validate`] for that.
///
/// Any directory prefix is ignored.
pub fn extract_filename_components(filename: impl AsRef<Path>) -> Result<FilenameComponents> {
    let path = filename.as_ref();
    let name = base_name(path)?;

    let caps = FILENAME_REGEX
        .captures(name)
        .ok_or_else(|| NamingError::grammar(name))?;

    let field = |key: &str| caps.name(key).map(|m| m.as_str().to_string()).unwrap_or_default();

    // five ASCII digits always fit in u32
    let repointing = caps
        .name("repointing")
        .and_then(|m| m.as_str().parse::<u32>().ok());

    Ok(FilenameComponents {
        mission: field("mission"),
        instrument: field("instrument"),
        data_level: field("data_level"),
        descriptor: field("descriptor"),
        start_date: field("start_date"),
        repointing,
        version: field("version"),
        extension: field("extension"),
    })
}

pub(crate) fn base_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| NamingError::grammar(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> FilenameComponents {
        FilenameComponents {
            mission: "imap".into(),
            instrument: "mag".into(),
            data_level: "l1a".into(),
            descriptor: "burst".into(),
            start_date: "20210101".into(),
            repointing: None,
            version: "v001".into(),
            extension: "pkts".into(),
        }
    }

    #[test]
    fn extracts_plain_filename() {
        let components = extract_filename_components("imap_mag_l1a_burst_20210101_v001.pkts").unwrap();
        assert_eq!(components, expected());
    }

    #[test]
    fn extracts_repointing_as_integer() {
        let components =
            extract_filename_components("imap_mag_l1a_burst_20210101-repoint00001_v001.pkts").unwrap();
        assert_eq!(
            components,
            FilenameComponents {
                repointing: Some(1),
                ..expected()
            }
        );
    }

    #[test]
    fn descriptor_may_contain_hyphens() {
        let components = extract_filename_components("imap_mag_l1a_burst-1min_20210101_v001.pkts").unwrap();
        assert_eq!(components.descriptor, "burst-1min");
    }

    #[test]
    fn strips_directories() {
        let components = extract_filename_components(Path::new("/test/imap_mag_l1a_burst_20210101_v001.cdf")).unwrap();
        assert_eq!(
            components,
            FilenameComponents {
                extension: "cdf".into(),
                ..expected()
            }
        );
    }

    #[test]
    fn descriptor_is_required() {
        let err = extract_filename_components("imap_mag_l1a_20210101_v001.cdf").unwrap_err();
        assert!(matches!(err, NamingError::Grammar { .. }));
    }

    #[test]
    fn rejects_structural_failures() {
        for name in [
            "imap_mag_l1a_20210101_v001",
            "imap_mag_l1a_burst_20210101_v001",
            "imap_mag_l1a_burst_20210101_v001.txt",
            "imap_mag_l1a_burst_20210101-repoint0001_v001.cdf",
            "imap_mag_l1a_burst_2021-01-01_v001.cdf",
            "imap_mag_l1a_burst_x_20210101_v001.cdf",
        ] {
            assert!(
                matches!(extract_filename_components(name), Err(NamingError::Grammar { .. })),
                "{name} should not decompose"
            );
        }
    }

    #[test]
    fn grammar_error_names_file_and_convention() {
        let err = extract_filename_components("bogus.cdf").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bogus.cdf"));
        assert!(message.contains(crate::grammar::FILENAME_CONVENTION));
    }

    #[test]
    fn mission_is_left_to_validation() {
        let components = extract_filename_components("nasa_mag_l1a_burst_20210101_v001.cdf").unwrap();
        assert_eq!(components.mission, "nasa");
    }
}
