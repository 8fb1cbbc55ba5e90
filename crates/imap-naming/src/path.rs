use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::science::ScienceFilePath;
use crate::spice::{SpiceFilePath, SpiceKind};

/// Any file the archive stores, tagged by family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArchivePath {
    Science(ScienceFilePath),
    Spice(SpiceFilePath),
}

impl ArchivePath {
    /// Classify by extension: SPICE kernel extensions go to the SPICE
    /// family, everything else must be a science filename.
    ///
    /// Only the final path component is considered.
    pub fn from_filename(filename: impl AsRef<Path>) -> Result<Self> {
        let path = filename.as_ref();
        if SpiceKind::from_path(path).is_some() {
            Ok(Self::Spice(SpiceFilePath::new(path)?))
        } else {
            Ok(Self::Science(ScienceFilePath::new(path)?))
        }
    }

    pub fn filename(&self) -> String {
        match self {
            ArchivePath::Science(p) => p.filename(),
            ArchivePath::Spice(p) => p.filename().to_string(),
        }
    }

    pub fn archive_key(&self) -> String {
        match self {
            ArchivePath::Science(p) => p.archive_key(),
            ArchivePath::Spice(p) => p.archive_key(),
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        match self {
            ArchivePath::Science(p) => p.relative_path(),
            ArchivePath::Spice(p) => p.relative_path(),
        }
    }

    pub fn construct_path(&self, base: Option<&Path>) -> PathBuf {
        match self {
            ArchivePath::Science(p) => p.construct_path(base),
            ArchivePath::Spice(p) => p.construct_path(base),
        }
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.archive_key())
    }
}

impl From<ScienceFilePath> for ArchivePath {
    fn from(p: ScienceFilePath) -> Self { Self::Science(p) }
}

impl From<SpiceFilePath> for ArchivePath {
    fn from(p: SpiceFilePath) -> Self { Self::Spice(p) }
}
