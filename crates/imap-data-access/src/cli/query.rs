use std::io::{self, Write};

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Args, ValueEnum};
use imap_access::{DataAccess, HttpClient};
use imap_naming::{Instrument, ScienceFilePath};
use imap_query::QueryParams;

use crate::ui::table::results_table;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct QueryArg {
    #[arg(
        long,
        help = "Name of the instrument",
        value_parser = PossibleValuesParser::new(Instrument::ALL.iter().map(|i| i.as_str()))
    )]
    pub instrument: Option<String>,

    #[arg(long, help = "Data level of the product (l0, l1a, l2, etc.)")]
    pub data_level: Option<String>,

    #[arg(long, help = "Descriptor of the product (raw, burst, etc.)")]
    pub descriptor: Option<String>,

    #[arg(long, help = "Start date for files in YYYYMMDD format")]
    pub start_date: Option<String>,

    #[arg(long, help = "End date for a range of file timestamps in YYYYMMDD format")]
    pub end_date: Option<String>,

    #[arg(long, help = "Repointing number (int)")]
    pub repointing: Option<u32>,

    #[arg(
        long,
        help = "Version of the product in the format 'v001'. Must have one other parameter to run. \
                Passing 'latest' will return latest version of a file"
    )]
    pub version: Option<String>,

    #[arg(long, help = "File extension (cdf, pkts)")]
    pub extension: Option<String>,

    #[arg(long, value_enum, default_value_t, help = "How to format the output")]
    pub output_format: OutputFormat,

    #[arg(
        long,
        conflicts_with_all = [
            "instrument", "data_level", "descriptor", "start_date",
            "end_date", "repointing", "version", "extension",
        ],
        help = "Name of a science file; its components become the query. \
                Cannot be combined with any other query parameter"
    )]
    pub filename: Option<String>,
}

impl QueryArg {
    /// Predicates to send, expanded from `--filename` when given.
    pub fn params(&self) -> Result<QueryParams> {
        if let Some(filename) = &self.filename {
            let file = ScienceFilePath::new(filename)?;
            return Ok(QueryParams::for_file(&file));
        }

        let params = QueryParams {
            instrument: self.instrument.clone(),
            data_level: self.data_level.clone(),
            descriptor: self.descriptor.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            repointing: None,
            version: self.version.clone(),
            extension: self.extension.clone(),
        };
        Ok(match self.repointing {
            Some(repointing) => params.repointing_number(repointing),
            None => params,
        })
    }

    pub fn run<C: HttpClient>(self, access: &DataAccess<C>) -> Result<()> {
        let results = access.query(&self.params()?)?;

        let mut out = io::stdout().lock();
        match self.output_format {
            OutputFormat::Table => writeln!(out, "{}", results_table(&results))?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?,
        }
        Ok(())
    }
}
