//! tagmap CLI: map a JSON record between two schemas declared in config.
//!
//! ```text
//! tagmap --config mapping.toml --from Person --to Contact person.json
//! ```
//!
//! Input is read from the file argument or stdin; the mapped record is
//! printed to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tagmap::{MapRequest, run};
use tagmap_config::TagmapConfig;

#[derive(Parser)]
#[command(name = "tagmap")]
#[command(about = "Map a JSON record into another record shape by field tags")]
struct Cli {
    /// Config file declaring the record schemas [default: ~/.tagmap/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Record the input is read as
    #[arg(long)]
    from: String,
    /// Record to produce
    #[arg(long)]
    to: String,
    /// Fail on matched fields with incompatible types
    #[arg(long)]
    strict: bool,
    /// JSON input file (stdin when omitted)
    input: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TagmapConfig> {
    if let Some(path) = path {
        return Ok(TagmapConfig::load_from(path)?);
    }
    match TagmapConfig::load()? {
        Some(config) => {
            if let Some(path) = TagmapConfig::path() {
                tracing::info!(path = %path.display(), "using default config");
            }
            Ok(config)
        }
        None => bail!("no config file given and none found at ~/.tagmap/config.toml"),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let input = read_input(cli.input.as_deref())?;
    let request = MapRequest {
        from: &cli.from,
        to: &cli.to,
        strict: cli.strict,
    };

    let output = run(&config, &request, &input)?;
    println!("{output}");
    Ok(())
}
