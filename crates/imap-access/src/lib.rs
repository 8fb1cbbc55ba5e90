//! Query, download, and upload against the IMAP science data archive.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable request/response types
//! - [`core`] - Pure transformations (redirect detection, endpoint URLs)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! Every filename and query predicate is validated before any request is
//! issued. Network failures surface as a single [`TransportError`] type and
//! are never retried.

pub mod core;
pub mod data;
mod config;
mod effects;
mod error;

pub use config::Config;
pub use data::{Method, Request, Response};
pub use effects::{DataAccess, HttpClient, send};
pub use error::{Error, LocalFileError, Result, TransportError};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use imap_naming::{ArchivePath, NamingError, ScienceFilePath, SpiceFilePath};
pub use imap_query::{QueryParameterError, QueryParams, QueryResult, Repointing};
