use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{NamingError, Result};
use crate::grammar::{DataLevel, Extension, Instrument, MISSION, format_repointing};
use crate::parse::{FilenameComponents, extract_filename_components};
use crate::validate::validate;

/// A science data file whose name passed every grammar and vocabulary check.
///
/// Layout on disk and in the archive:
///
/// ```text
/// imap/<instrument>/<data_level>/<YYYY>/<MM>/<filename>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScienceFilePath {
    instrument: Instrument,
    data_level: DataLevel,
    descriptor: String,
    start_date: String,
    repointing: Option<u32>,
    version: String,
    extension: Extension,
}

impl ScienceFilePath {
    /// Parse and validate a filename or a path ending in one.
    pub fn new(filename: impl AsRef<Path>) -> Result<Self> {
        Self::from_components(extract_filename_components(filename)?)
    }

    /// Validate already-decomposed components.
    pub fn from_components(components: FilenameComponents) -> Result<Self> {
        let violations = validate(&components);

        match (
            violations.is_empty(),
            components.instrument.parse::<Instrument>(),
            components.data_level.parse::<DataLevel>(),
            components.extension.parse::<Extension>(),
        ) {
            (true, Ok(instrument), Ok(data_level), Ok(extension)) => Ok(Self {
                instrument,
                data_level,
                descriptor: components.descriptor,
                start_date: components.start_date,
                repointing: components.repointing,
                version: components.version,
                extension,
            }),
            _ => Err(NamingError::InvalidScienceFile { violations }),
        }
    }

    /// Build the filename from its semantic fields and validate it exactly
    /// like a user-supplied name.
    ///
    /// The extension follows the level (`l0` gets `pkts`, everything else `cdf`).
    ///
    /// ```
    /// use imap_naming::ScienceFilePath;
    ///
    /// let file = ScienceFilePath::generate_from_inputs("mag", "l0", "raw", "20210101", "v001", Some(1)).unwrap();
    /// assert_eq!(file.filename(), "imap_mag_l0_raw_20210101-repoint00001_v001.pkts");
    /// ```
    pub fn generate_from_inputs(
        instrument: &str,
        data_level: &str,
        descriptor: &str,
        start_date: &str,
        version: &str,
        repointing: Option<u32>,
    ) -> Result<Self> {
        let extension = Extension::for_level_str(data_level);
        let time_field = match repointing {
            Some(r) => format!("{start_date}-{}", format_repointing(r)),
            None => start_date.to_string(),
        };
        let filename =
            format!("{MISSION}_{instrument}_{data_level}_{descriptor}_{time_field}_{version}.{extension}");
        Self::new(filename)
    }

    pub fn mission(&self) -> &'static str { MISSION }

    pub fn instrument(&self) -> Instrument { self.instrument }

    pub fn data_level(&self) -> DataLevel { self.data_level }

    pub fn descriptor(&self) -> &str { &self.descriptor }

    pub fn start_date(&self) -> &str { &self.start_date }

    pub fn repointing(&self) -> Option<u32> { self.repointing }

    pub fn version(&self) -> &str { &self.version }

    pub fn extension(&self) -> Extension { self.extension }

    /// Canonical filename rebuilt from the validated components.
    pub fn filename(&self) -> String { self.to_string() }

    fn year(&self) -> &str { &self.start_date[..4] }

    fn month(&self) -> &str { &self.start_date[4..6] }

    /// Slash-separated archive key, used verbatim in request URLs.
    pub fn archive_key(&self) -> String {
        format!(
            "{MISSION}/{}/{}/{}/{}/{}",
            self.instrument,
            self.data_level,
            self.year(),
            self.month(),
            self.filename()
        )
    }

    pub fn relative_path(&self) -> PathBuf {
        [
            MISSION,
            self.instrument.as_str(),
            self.data_level.as_str(),
            self.year(),
            self.month(),
        ]
        .iter()
        .collect::<PathBuf>()
        .join(self.filename())
    }

    /// Relative path joined under `base` when one is given.
    pub fn construct_path(&self, base: Option<&Path>) -> PathBuf {
        match base {
            Some(base) => base.join(self.relative_path()),
            None => self.relative_path(),
        }
    }
}

impl fmt::Display for ScienceFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{MISSION}_{}_{}_{}_{}",
            self.instrument, self.data_level, self.descriptor, self.start_date
        )?;
        if let Some(repointing) = self.repointing {
            write!(f, "-{}", format_repointing(repointing))?;
        }
        write!(f, "_{}.{}", self.version, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn test_new_exposes_components() {
        let file = ScienceFilePath::new("imap_mag_l1a_burst_20210101_v001.cdf").unwrap();
        assert_eq!(file.mission(), "imap");
        assert_eq!(file.instrument(), Instrument::Mag);
        assert_eq!(file.data_level(), DataLevel::L1a);
        assert_eq!(file.descriptor(), "burst");
        assert_eq!(file.start_date(), "20210101");
        assert_eq!(file.repointing(), None);
        assert_eq!(file.version(), "v001");
        assert_eq!(file.extension(), Extension::Cdf);
    }

    #[test]
    fn test_new_accepts_directories() {
        let file = ScienceFilePath::new(Path::new("/test/imap_mag_l1a_burst_20210101_v001.cdf")).unwrap();
        assert_eq!(file.filename(), "imap_mag_l1a_burst_20210101_v001.cdf");
    }

    #[test]
    fn test_new_rejects_invalid_files() {
        // structural
        assert!(matches!(
            ScienceFilePath::new("imap_mag_l1a_burst_20210101_v001"),
            Err(NamingError::Grammar { .. })
        ));
        assert!(matches!(
            ScienceFilePath::new("imap_mag_l1a_burst_20210101-repoint0001_v001.cdf"),
            Err(NamingError::Grammar { .. })
        ));
        // semantic
        assert!(matches!(
            ScienceFilePath::new("imap_mag_l1a_burst_20210101_v001.pkts"),
            Err(NamingError::InvalidScienceFile { .. })
        ));
        assert!(matches!(
            ScienceFilePath::new("imap_sdc_l1a_burst_20210101_v001.cdf"),
            Err(NamingError::InvalidScienceFile { .. })
        ));
    }

    #[test]
    fn test_error_message_lists_every_violation() {
        let err = ScienceFilePath::new("nasa_sdc_l1a_burst_20210132_v001.pkts").unwrap_err();
        assert_eq!(err.violations().len(), 4);
        assert!(matches!(err.violations()[0], Violation::Mission(_)));

        let message = err.to_string();
        assert_eq!(message.lines().count(), 4);
        assert!(message.contains("Invalid mission nasa"));
        assert!(message.contains("Invalid instrument sdc"));
        assert!(message.contains("Invalid start date"));
        assert!(message.contains("Invalid extension"));
    }

    #[test]
    fn test_round_trip_filename() {
        for name in [
            "imap_mag_l1a_burst_20210101_v001.cdf",
            "imap_mag_l0_raw_20210101-repoint00001_v001.pkts",
            "imap_swe_l1_test-description_20100101_v000.cdf",
            "imap_ultra_l3d_a-b-c_20991231-repoint99999_v999.cdf",
        ] {
            assert_eq!(ScienceFilePath::new(name).unwrap().filename(), name);
        }
    }

    #[test]
    fn test_construct_path() {
        let file = ScienceFilePath::new("imap_mag_l1a_burst_20210101_v001.cdf").unwrap();
        let relative = Path::new("imap/mag/l1a/2021/01/imap_mag_l1a_burst_20210101_v001.cdf");

        assert_eq!(file.construct_path(None), relative);
        assert_eq!(file.construct_path(Some(Path::new("/data"))), Path::new("/data").join(relative));
        assert_eq!(file.archive_key(), "imap/mag/l1a/2021/01/imap_mag_l1a_burst_20210101_v001.cdf");
    }

    #[test]
    fn test_generate_from_inputs() {
        let file = ScienceFilePath::generate_from_inputs("mag", "l1a", "burst", "20210101", "v001", None).unwrap();
        assert_eq!(file.archive_key(), "imap/mag/l1a/2021/01/imap_mag_l1a_burst_20210101_v001.cdf");

        let file = ScienceFilePath::generate_from_inputs("mag", "l0", "raw", "20210101", "v001", None).unwrap();
        assert_eq!(file.archive_key(), "imap/mag/l0/2021/01/imap_mag_l0_raw_20210101_v001.pkts");

        let file = ScienceFilePath::generate_from_inputs("mag", "l0", "raw", "20210101", "v001", Some(1)).unwrap();
        assert_eq!(
            file.archive_key(),
            "imap/mag/l0/2021/01/imap_mag_l0_raw_20210101-repoint00001_v001.pkts"
        );
        assert_eq!(file.repointing(), Some(1));
    }

    #[test]
    fn test_generate_from_inputs_validates() {
        assert!(ScienceFilePath::generate_from_inputs("sdc", "l1a", "burst", "20210101", "v001", None).is_err());
        assert!(ScienceFilePath::generate_from_inputs("mag", "l1a", "", "20210101", "v001", None).is_err());
        // does not fit the 5-digit field, so the grammar cannot decompose it
        assert!(matches!(
            ScienceFilePath::generate_from_inputs("mag", "l1a", "burst", "20210101", "v001", Some(100_000)),
            Err(NamingError::Grammar { .. })
        ));
    }
}
