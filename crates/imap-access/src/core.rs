//! Pure transformations: redirect policy and endpoint URLs.

use imap_naming::ArchivePath;
use imap_query::Query;

/// Upper bound on chained redirects followed for a single request.
pub const MAX_REDIRECTS: usize = 10;

/// Header carrying the upload credential.
pub const API_KEY_HEADER: &str = "X-api-key";

/// Returns `true` if the archive is asking us to re-issue the request
/// elsewhere.
///
/// Only `307 Temporary Redirect` is followed: it is what freshly created
/// storage buckets answer with, and it preserves method and body.
///
/// ```
/// use imap_access::core::is_redirect;
///
/// assert!(is_redirect(307));
/// assert!(!is_redirect(200));
/// assert!(!is_redirect(302));
/// ```
pub fn is_redirect(status: u16) -> bool {
    status == 307
}

pub fn download_url(base_url: &str, path: &ArchivePath) -> String {
    format!("{base_url}/download/{}", path.archive_key())
}

pub fn query_url(base_url: &str, query: &Query) -> String {
    format!("{base_url}/query?{}", query.to_query_string())
}

pub fn upload_url(base_url: &str, filename: &str) -> String {
    format!("{base_url}/upload/{filename}")
}
