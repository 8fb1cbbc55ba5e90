use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use imap_naming::ArchivePath;
use imap_query::{QueryParams, QueryResult};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::{API_KEY_HEADER, download_url, query_url, upload_url};
use crate::data::Request;
use crate::effects::http::{HttpClient, send};
use crate::error::{Error, LocalFileError, Result, TransportError};

/// Archive operations bound to one configuration and one HTTP client.
pub struct DataAccess<C: HttpClient> {
    client: C,
    config: Config,
}

impl<C: HttpClient> DataAccess<C> {
    pub fn new(client: C, config: Config) -> Self { Self { client, config } }

    pub fn config(&self) -> &Config { &self.config }

    pub fn client(&self) -> &C { &self.client }

    /// Fetch a science or SPICE file into the data directory.
    ///
    /// Any directories in `path` are ignored; the destination is derived
    /// from the filename alone. If the destination already exists no
    /// request is made and the existing path is returned.
    pub fn download(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let archive_path = ArchivePath::from_filename(path)?;
        let destination = archive_path.construct_path(Some(self.config.data_dir()));

        if destination.exists() {
            info!(path = %destination.display(), "file already exists, skipping download");
            return Ok(destination);
        }

        let url = download_url(self.config.base_url(), &archive_path);
        info!(%url, "downloading file");
        let response = send(&self.client, &Request::get(&url))?;
        debug!(bytes = response.body.len(), "received file");

        write_atomic(&destination, &response.body)?;
        info!(path = %destination.display(), "file saved");
        Ok(destination)
    }

    /// Run a query against the archive's file index.
    ///
    /// Predicates are validated before any request; `version = "latest"`
    /// is resolved locally on the returned entries.
    pub fn query(&self, params: &QueryParams) -> Result<Vec<QueryResult>> {
        let query = params.validate()?;
        let url = query_url(self.config.base_url(), &query);
        info!(%url, "querying data archive");

        let response = send(&self.client, &Request::get(&url))?;
        debug!(body = %response.text(), "received query response");

        let results: Vec<QueryResult> =
            serde_json::from_slice(&response.body).map_err(TransportError::from)?;
        Ok(query.apply(results))
    }

    /// Upload a local file through a presigned URL.
    ///
    /// `api_key` takes precedence over the configured key; with neither,
    /// the request goes out without a credential header.
    pub fn upload(&self, path: impl AsRef<Path>, api_key: Option<&str>) -> Result<()> {
        let file_path = self.resolve_upload_source(path.as_ref())?;
        let name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LocalFileError::NotFound(file_path.clone()))?;

        let url = upload_url(self.config.base_url(), name);
        info!(file = %file_path.display(), %url, "uploading file");

        let mut request = Request::get(&url);
        if let Some(key) = api_key.or(self.config.api_key.as_deref()) {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = send(&self.client, &request)?;
        let presigned: String =
            serde_json::from_slice(&response.body).map_err(TransportError::from)?;
        debug!(url = %presigned, "received presigned upload URL");

        let contents = fs::read(&file_path).map_err(Error::io(&file_path))?;
        let response = send(&self.client, &Request::put(presigned, contents).header("Content-Type", ""))?;
        debug!(body = %response.text(), "upload completed");
        Ok(())
    }

    fn resolve_upload_source(&self, path: &Path) -> Result<PathBuf> {
        let file_path = fs::canonicalize(path)
            .map_err(|_| LocalFileError::NotFound(path.to_path_buf()))?;
        if !file_path.is_file() {
            return Err(LocalFileError::NotFound(file_path).into());
        }

        let data_dir = self.config.data_dir();
        let data_dir = fs::canonicalize(data_dir)
            .or_else(|_| std::path::absolute(data_dir))
            .map_err(Error::io(data_dir))?;
        if !file_path.starts_with(&data_dir) {
            return Err(LocalFileError::OutsideDataDir {
                path: file_path,
                data_dir,
            }
            .into());
        }
        Ok(file_path)
    }
}

/// Write `bytes` next to `destination` and move them into place, so a
/// failed transfer never leaves a truncated file behind.
fn write_atomic(destination: &Path, bytes: &[u8]) -> Result<()> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(Error::io(parent))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(Error::io(parent))?;
    staged.write_all(bytes).map_err(Error::io(staged.path()))?;
    staged
        .persist(destination)
        .map_err(|e| Error::io(destination)(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("imap/swe/l1/2010/01/file.cdf");

        write_atomic(&destination, b"Test data").unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"Test data");

        let leftovers: Vec<_> = fs::read_dir(destination.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("file.cdf");
        fs::write(&destination, b"old").unwrap();

        write_atomic(&destination, b"new").unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }
}
