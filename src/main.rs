use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod converter;
mod error;
mod record_loader;
mod result_writer;
mod sql_converter;

use converter::{ConvertOptions, convert};
use sql_converter::{DEFAULT_TABLE, QuoteStyle};

/// Turn a JSON list of video records into a single SQL INSERT statement.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON array of {id, path, correctSign} objects
    #[arg(long, value_name = "FILE", default_value = "videos.json")]
    input: PathBuf,

    /// File to write the statement to (overwritten)
    #[arg(long, value_name = "FILE", default_value = "videos.sql")]
    output: PathBuf,

    /// Table named in the INSERT statement
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TABLE)]
    table: String,

    /// Double single quotes inside values instead of substituting them verbatim
    #[arg(long)]
    escape_quotes: bool,

    /// Show a progress bar while formatting rows
    #[arg(long)]
    progress: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "videos2sql=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let options = ConvertOptions {
        table: args.table,
        quote_style: if args.escape_quotes {
            QuoteStyle::Escaped
        } else {
            QuoteStyle::Literal
        },
        show_progress: args.progress,
    };

    let start = Instant::now();
    let summary = convert(&args.input, &args.output, &options)?;
    tracing::debug!(
        records = summary.records,
        elapsed = ?start.elapsed(),
        "conversion finished"
    );

    println!("{}", completion_message(&summary.output));
    Ok(())
}

fn completion_message(output: &Path) -> String {
    format!("SQL queries have been written to {}", output.display())
}
