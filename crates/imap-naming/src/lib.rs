//! Filename grammar, validation, and storage path construction for IMAP data files.
//!
//! # Architecture
//!
//! - [`grammar`] - Closed vocabularies and shape predicates
//! - `parse.rs` - Structural decomposition of a filename into components
//! - `validate.rs` - Accumulating semantic checks over components
//! - `science.rs` / `spice.rs` - Validated file identities and their paths
//! - `path.rs` - Dispatch between the two file families
//!
//! A value of [`ScienceFilePath`] or [`SpiceFilePath`] only exists if its
//! filename passed every check, so holding one is proof of validity.

pub use error::{NamingError, Result, Violation};
pub use grammar::{DataLevel, Extension, Instrument};
pub use parse::{FilenameComponents, extract_filename_components};
pub use path::ArchivePath;
pub use science::ScienceFilePath;
pub use spice::{SpiceFilePath, SpiceKind};
pub use validate::validate;

mod error;
pub mod grammar;
mod parse;
mod path;
mod science;
mod spice;
mod validate;
