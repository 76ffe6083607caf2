//! Generate foreign table definitions from search index mappings
//!
//! Reads the JSON body of a get-mapping call on stdin and prints one
//! `DROP FOREIGN TABLE` / `CREATE FOREIGN TABLE` pair per doc type per index.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

mod config;
mod logging;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "esfdw-mapping-to-schema")]
#[command(about = "Generate foreign table schema from Elasticsearch mappings")]
#[command(long_about = "Generate foreign table schema from Elasticsearch mappings.

A foreign table is generated per doc type per index, named after the doc type
with dashes replaced by underscores. Nested objects are flattened into one
column per leaf field, with `__` separating the path components, so the field
foo.bar.baz becomes the column foo__bar__baz. Column types are always scalar;
edit the output by hand if array columns are wanted.")]
struct Args {
    /// Doc types to generate foreign table definitions for
    #[arg(short = 'd', long = "doc-types", num_args = 1..)]
    doc_types: Vec<String>,

    /// Indices whose mappings should be processed
    #[arg(short = 'i', long, num_args = 1..)]
    indices: Vec<String>,

    /// Foreign server object to use in the table definitions
    #[arg(short = 's', long)]
    server: Option<String>,

    /// YAML configuration file
    #[arg(short = 'c', long, env = "ESFDW_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::from_env(),
    };
    config.apply_logging_env();
    logging::init()?;

    run(io::stdin().lock(), io::stdout().lock(), args, &config)
}

/// Read a mapping document from `input` and write the DDL to `output`
fn run<R: Read, W: Write>(input: R, mut output: W, args: Args, config: &Config) -> Result<()> {
    let server = args
        .server
        .or_else(|| config.schema.server.clone())
        .context("No server given; pass --server or set ESFDW_SERVER")?;
    let indices = if args.indices.is_empty() {
        config.schema.indices.clone()
    } else {
        args.indices
    };
    let doc_types = if args.doc_types.is_empty() {
        config.schema.doc_types.clone()
    } else {
        args.doc_types
    };

    let mapping: serde_json::Value =
        serde_json::from_reader(input).context("Failed to parse mapping JSON from stdin")?;

    let statements = esfdw_schema::generate_schema(&mapping, &indices, &doc_types, &server)?;
    info!(tables = statements.len(), server = %server, "Generated foreign table definitions");

    writeln!(output, "{}", statements.join("\n"))?;
    output.flush()?;
    Ok(())
}
