use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use imap_access::{DataAccess, HttpClient};

use super::FILE_PATH_HELP;

#[derive(Args, Clone, Debug)]
pub struct DownloadArg {
    #[arg(help = FILE_PATH_HELP)]
    pub file_path: PathBuf,
}

impl DownloadArg {
    pub fn run<C: HttpClient>(self, access: &DataAccess<C>) -> Result<()> {
        let output_path = access.download(&self.file_path)?;
        println!("Successfully downloaded the file to: {}", output_path.display());
        Ok(())
    }
}
