//! Closed vocabularies and shape predicates of the IMAP filename convention.
//!
//! ```text
//! <mission>_<instrument>_<datalevel>_<descriptor>_<startdate>(-<repointing>)_<version>.<extension>
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Mission literal every science filename starts with.
pub const MISSION: &str = "imap";

/// Human-readable convention quoted in error messages.
pub const FILENAME_CONVENTION: &str =
    "<mission>_<instrument>_<datalevel>_<descriptor>_<startdate>(-<repointing>)_<version>.<extension>";

/// Query-only version sentinel selecting the highest version in a result set.
pub const LATEST: &str = "latest";

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v(?<number>[0-9]{3})$").unwrap());

static REPOINTING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^repoint(?<number>[0-9]{5})$").unwrap());

/// Error for a value outside one of the closed vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Comma-separated list of accepted spellings.
            pub fn choices() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownVariant { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Sensor or subsystem owning a data product.
    Instrument, "instrument" {
        Codice => "codice",
        Glows => "glows",
        Hi => "hi",
        Hit => "hit",
        Idex => "idex",
        Lo => "lo",
        Mag => "mag",
        Swapi => "swapi",
        Swe => "swe",
        Ultra => "ultra",
    }
}

vocabulary! {
    /// Processing stage tag.
    ///
    /// The set is flat: `l1a` and `l1` are unrelated members, there is no
    /// ordering implied between them.
    DataLevel, "data level" {
        L0 => "l0",
        L1 => "l1",
        L1a => "l1a",
        L1b => "l1b",
        L1c => "l1c",
        L1ca => "l1ca",
        L1cb => "l1cb",
        L1d => "l1d",
        L2 => "l2",
        L2pre => "l2pre",
        L3 => "l3",
        L3a => "l3a",
        L3b => "l3b",
        L3c => "l3c",
        L3d => "l3d",
    }
}

vocabulary! {
    /// Science file extension.
    Extension, "extension" {
        Pkts => "pkts",
        Cdf => "cdf",
    }
}

impl Extension {
    /// The only extension a file of `level` may carry.
    pub fn for_level(level: DataLevel) -> Self {
        match level {
            DataLevel::L0 => Extension::Pkts,
            _ => Extension::Cdf,
        }
    }

    /// Same rule for a level that has not been validated yet; unknown
    /// levels get `cdf`.
    pub fn for_level_str(level: &str) -> Self {
        level.parse::<DataLevel>().map_or(Extension::Cdf, Self::for_level)
    }
}

/// `true` when `input` is exactly eight digits naming a real Gregorian date.
pub fn is_valid_date(input: &str) -> bool {
    input.len() == 8
        && input.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(input, "%Y%m%d").is_ok()
}

/// `true` for `v` followed by exactly three digits.
pub fn is_valid_version(input: &str) -> bool {
    VERSION_REGEX.is_match(input)
}

/// Like [`is_valid_version`] but also admits the [`LATEST`] sentinel.
pub fn is_valid_query_version(input: &str) -> bool {
    input == LATEST || is_valid_version(input)
}

/// `true` for `repoint` followed by exactly five digits.
pub fn is_valid_repointing(input: &str) -> bool {
    REPOINTING_REGEX.is_match(input)
}

/// Encode a repointing number the way it appears in filenames.
pub fn format_repointing(repointing: u32) -> String {
    format!("repoint{repointing:05}")
}

/// Integer value of a `vNNN` version string.
pub fn version_number(version: &str) -> Option<u16> {
    VERSION_REGEX
        .captures(version)
        .and_then(|caps| caps.name("number"))
        .and_then(|m| m.as_str().parse().ok())
}

/// Largest repointing number representable in the 5-digit encoding.
pub const MAX_REPOINTING: u32 = 99_999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_date("20210101"));
        assert!(is_valid_date("20240229"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!is_valid_date("2021-01-01"));
        assert!(!is_valid_date("20210132"));
        assert!(!is_valid_date("2021010"));
        assert!(!is_valid_date("20230229"));
        assert!(!is_valid_date("+2021011"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_version_shape() {
        assert!(is_valid_version("v001"));
        assert!(!is_valid_version("v01"));
        assert!(!is_valid_version("v0001"));
        assert!(!is_valid_version("001"));
        assert!(!is_valid_version(LATEST));
        assert!(is_valid_query_version(LATEST));
        assert!(is_valid_query_version("v999"));
    }

    #[test]
    fn test_version_number() {
        assert_eq!(version_number("v000"), Some(0));
        assert_eq!(version_number("v012"), Some(12));
        assert_eq!(version_number("latest"), None);
    }

    #[test]
    fn test_repointing_encoding() {
        assert_eq!(format_repointing(1), "repoint00001");
        assert!(is_valid_repointing(&format_repointing(MAX_REPOINTING)));
        assert!(!is_valid_repointing("repoint0001"));
        assert!(!is_valid_repointing("1"));
    }

    #[test]
    fn test_vocabulary_round_trip() {
        for level in DataLevel::ALL {
            assert_eq!(level.as_str().parse::<DataLevel>().unwrap(), *level);
        }
        assert!("sdc".parse::<Instrument>().is_err());
        assert!("L1A".parse::<DataLevel>().is_err());
    }

    #[test]
    fn test_extension_for_level() {
        assert_eq!(Extension::for_level(DataLevel::L0), Extension::Pkts);
        assert_eq!(Extension::for_level(DataLevel::L1a), Extension::Cdf);
        assert_eq!(Extension::for_level_str("l0"), Extension::Pkts);
        assert_eq!(Extension::for_level_str("l3d"), Extension::Cdf);
        assert_eq!(Extension::for_level_str("l9"), Extension::Cdf);
        for level in DataLevel::ALL {
            assert_eq!(Extension::for_level_str(level.as_str()), Extension::for_level(*level));
        }
    }
}
