use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imap_access::{Config, DataAccess, ReqwestClient};
use tracing::Level;

mod completions;
mod download;
mod query;
mod upload;

const FILE_PATH_HELP: &str = "This must be the full path to the file.\n\
    E.g. imap/mag/l0/2025/01/imap_mag_l0_raw_20250101_v001.pkts";

#[derive(Clone, Debug, Parser)]
#[command(
    name = "imap-data-access",
    version = env!("CARGO_PKG_VERSION"),
    about = "This command line program accesses the IMAP SDC APIs to query, download, and upload data files.",
    long_about = None
)]
pub struct App {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Args)]
pub struct GlobalArgs {
    #[arg(
        long,
        global = true,
        help = "API key to authenticate with the IMAP SDC. This can also be set using the \
                IMAP_API_KEY environment variable. It is only necessary for uploading files."
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        global = true,
        value_parser = existing_dir,
        help = "Directory to use for reading and writing IMAP data. The default is a 'data/' \
                folder in the current working directory. This can also be set using the \
                IMAP_DATA_DIR environment variable."
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "URL of the IMAP SDC API. The default is https://api.dev.imap-mission.com. \
                This can also be set using the IMAP_DATA_ACCESS_URL environment variable."
    )]
    pub url: Option<String>,

    #[arg(long, global = true, help = "Print lots of debugging statements.")]
    pub debug: bool,

    #[arg(short, long, global = true, help = "Add verbose output")]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(
        name = "download",
        about = "Download a file from the IMAP SDC to the locally configured data directory."
    )]
    Download(download::DownloadArg),
    #[command(
        name = "query",
        about = "Query the IMAP SDC for files matching the query parameters. \
                 The query parameters are optional, but at least one must be provided."
    )]
    Query(query::QueryArg),
    #[command(name = "upload", about = "Upload a file to the IMAP SDC.")]
    Upload(upload::UploadArg),
    #[command(name = "completions", about = "Print a shell completion script")]
    Completions(completions::CompletionsArg),
}

impl App {
    pub fn run(self) -> Result<()> {
        match self.cmd {
            Commands::Download(arg) => arg.run(&self.global.access()?),
            Commands::Query(arg) => arg.run(&self.global.access()?),
            Commands::Upload(arg) => arg.run(&self.global.access()?),
            Commands::Completions(arg) => arg.run(),
        }
    }
}

impl GlobalArgs {
    /// `--debug` wins over `--verbose`; the default only shows warnings.
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Environment configuration with command line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir);
        }
        if let Some(url) = &self.url {
            config = config.with_url(url);
        }
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key);
        }
        config
    }

    fn access(&self) -> Result<DataAccess<ReqwestClient>> {
        Ok(DataAccess::new(ReqwestClient::new()?, self.config()))
    }
}

/// Canonical form, matching how upload sources are resolved.
fn existing_dir(value: &str) -> Result<PathBuf, String> {
    match fs::canonicalize(value) {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(format!("Data directory {value} does not exist")),
    }
}
