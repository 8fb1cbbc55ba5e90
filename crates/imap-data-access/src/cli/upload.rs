use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use imap_access::{DataAccess, HttpClient};

use super::FILE_PATH_HELP;

#[derive(Args, Clone, Debug)]
pub struct UploadArg {
    #[arg(help = FILE_PATH_HELP)]
    pub file_path: PathBuf,
}

impl UploadArg {
    /// The credential comes from the configuration, which already carries
    /// any `--api-key` override.
    pub fn run<C: HttpClient>(self, access: &DataAccess<C>) -> Result<()> {
        access.upload(&self.file_path, None)?;
        println!("Successfully uploaded the file to the IMAP SDC");
        Ok(())
    }
}
