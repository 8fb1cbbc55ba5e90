use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{NamingError, Result};
use crate::grammar::MISSION;
use crate::parse::base_name;

/// Directory under the mission root holding every SPICE kernel.
pub const SPICE_DIR: &str = "spice";

/// NAIF kernel type, derived solely from the file extension.
///
/// See <https://naif.jpl.nasa.gov/pub/naif/toolkit_docs/C/req/kernel.html>.
/// DSK, EK and IK kernels are not used on IMAP and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiceKind {
    /// `.bc` binary CK
    Ck,
    /// `.bpc` binary PCK, `.tpc` text PCK
    Pck,
    /// `.bsp` binary SPK
    Spk,
    /// `.tf` text FK
    Fk,
    /// `.tls` text LSK
    Lsk,
    /// `.tm` meta-kernel
    Mk,
    /// `.tsc` text SCLK
    Sclk,
}

const EXTENSION_TABLE: &[(&str, SpiceKind)] = &[
    (".bc", SpiceKind::Ck),
    (".bpc", SpiceKind::Pck),
    (".bsp", SpiceKind::Spk),
    (".tf", SpiceKind::Fk),
    (".tls", SpiceKind::Lsk),
    (".tm", SpiceKind::Mk),
    (".tpc", SpiceKind::Pck),
    (".tsc", SpiceKind::Sclk),
];

impl SpiceKind {
    /// Look up a dotted extension such as `.bsp`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        EXTENSION_TABLE
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, kind)| *kind)
    }

    /// Kind of the file at `path`, judged by its final extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_extension(&format!(".{ext}")))
    }

    /// Every accepted dotted extension, in table order.
    pub fn extensions() -> Vec<&'static str> {
        EXTENSION_TABLE.iter().map(|(ext, _)| *ext).collect()
    }

    pub fn subdir(&self) -> &'static str {
        match self {
            SpiceKind::Ck => "ck",
            SpiceKind::Pck => "pck",
            SpiceKind::Spk => "spk",
            SpiceKind::Fk => "fk",
            SpiceKind::Lsk => "lsk",
            SpiceKind::Mk => "mk",
            SpiceKind::Sclk => "sclk",
        }
    }
}

impl fmt::Display for SpiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// A SPICE kernel file. No internal filename structure is enforced.
///
/// ```text
/// imap/spice/<kind>/<filename>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpiceFilePath {
    filename: String,
    kind: SpiceKind,
}

impl SpiceFilePath {
    pub fn new(filename: impl AsRef<Path>) -> Result<Self> {
        let path = filename.as_ref();
        let invalid = || NamingError::InvalidSpiceFile {
            filename: path.to_string_lossy().into_owned(),
            accepted: SpiceKind::extensions(),
        };

        let name = base_name(path).map_err(|_| invalid())?;
        let kind = SpiceKind::from_path(path).ok_or_else(invalid)?;

        Ok(Self {
            filename: name.to_string(),
            kind,
        })
    }

    pub fn filename(&self) -> &str { &self.filename }

    pub fn kind(&self) -> SpiceKind { self.kind }

    pub fn archive_key(&self) -> String {
        format!("{MISSION}/{SPICE_DIR}/{}/{}", self.kind.subdir(), self.filename)
    }

    pub fn relative_path(&self) -> PathBuf {
        [MISSION, SPICE_DIR, self.kind.subdir(), self.filename.as_str()]
            .iter()
            .collect()
    }

    pub fn construct_path(&self, base: Option<&Path>) -> PathBuf {
        match base {
            Some(base) => base.join(self.relative_path()),
            None => self.relative_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spice_path() {
        let file = SpiceFilePath::new("test.bc").unwrap();
        assert_eq!(file.kind(), SpiceKind::Ck);
        assert_eq!(file.construct_path(None), Path::new("imap/spice/ck/test.bc"));
        assert_eq!(
            file.construct_path(Some(Path::new("/data"))),
            Path::new("/data/imap/spice/ck/test.bc")
        );
        assert_eq!(file.archive_key(), "imap/spice/ck/test.bc");
    }

    #[test]
    fn test_every_extension_maps() {
        let cases = [
            ("a.bc", "ck"),
            ("a.bpc", "pck"),
            ("a.bsp", "spk"),
            ("a.tf", "fk"),
            ("a.tls", "lsk"),
            ("a.tm", "mk"),
            ("a.tpc", "pck"),
            ("a.tsc", "sclk"),
        ];
        for (name, subdir) in cases {
            assert_eq!(SpiceFilePath::new(name).unwrap().kind().subdir(), subdir);
        }
    }

    #[test]
    fn test_directories_are_stripped() {
        let file = SpiceFilePath::new("some/where/naif0012.tls").unwrap();
        assert_eq!(file.filename(), "naif0012.tls");
        assert_eq!(file.archive_key(), "imap/spice/lsk/naif0012.tls");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        for name in ["test.txt", "test.bds", "test.ti", "test", "test.BC"] {
            let err = SpiceFilePath::new(name).unwrap_err();
            assert!(matches!(err, NamingError::InvalidSpiceFile { .. }), "{name}");
        }

        let message = SpiceFilePath::new("test.txt").unwrap_err().to_string();
        assert!(message.contains(".bc, .bpc, .bsp"));
    }
}
