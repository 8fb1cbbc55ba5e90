//! Query predicate validation and latest-version selection.
//!
//! A [`QueryParams`] is a set of optional predicates. [`QueryParams::validate`]
//! checks every present predicate locally and yields a [`Query`], which is the
//! only thing that can be turned into a request. When the version predicate is
//! `latest`, it is withheld from the request and [`Query::apply`] keeps only the
//! results carrying the highest version.

pub use error::{QueryParameterError, Result};
pub use latest::{QueryResult, Repointing, filter_latest};
pub use params::{Query, QueryParams};

mod error;
mod latest;
mod params;
