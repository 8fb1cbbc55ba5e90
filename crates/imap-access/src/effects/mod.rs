//! I/O layer: the transport seam and the archive operations built on it.

mod archive;
mod http;

pub use archive::DataAccess;
pub use http::{HttpClient, send};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
