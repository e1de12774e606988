use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::data::Status;

/// Scrape, save, and query the public course list.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = default_tracing_format())]
    pub tracing: TracingFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover the current term and scrape one or all subjects
    Scrape {
        /// Only scrape this subject code (e.g. BIOL)
        #[arg(long)]
        subject: Option<String>,
        /// Use this term code instead of the latest discovered one
        #[arg(long)]
        term: Option<String>,
        /// Write records to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write records to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the latest term and the subject list
    Subjects,
    /// Load a saved file and print matching records as JSON
    Query(QueryArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["json", "csv"])))]
pub struct QueryArgs {
    #[arg(long)]
    pub json: Option<PathBuf>,
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[arg(long)]
    pub crn: Option<String>,
    #[arg(long)]
    pub course_id: Option<String>,
    #[arg(long)]
    pub instructor: Option<String>,
    #[arg(long)]
    pub attribute: Option<String>,
    /// OPEN or CLOSED
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
}

fn parse_status(raw: &str) -> Result<Status, String> {
    raw.parse().map_err(|e: crate::listing::ScrapeError| e.to_string())
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingFormat {
    Pretty,
    Json,
}

fn default_tracing_format() -> TracingFormat {
    if cfg!(debug_assertions) {
        TracingFormat::Pretty
    } else {
        TracingFormat::Json
    }
}
