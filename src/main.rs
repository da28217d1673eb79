mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vlmdeck::{generate, write_deck, AircraftConfig, Destination};

use report::render_summary;

/// Generate a VORLAX input deck from a parametric aircraft description.
#[derive(Parser, Debug)]
#[command(name = "vlmdeck", version, about)]
struct Cli {
    /// Aircraft configuration (YAML, or JSON when the extension is .json)
    config: PathBuf,

    /// Directory the deck is written into
    #[arg(long, conflicts_with_all = ["dir_file", "stdout"])]
    out_dir: Option<String>,

    /// File whose first non-empty line names the output directory
    #[arg(long, conflicts_with = "stdout")]
    dir_file: Option<PathBuf>,

    /// Print the deck on standard output instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Also write the derived metrics as JSON
    #[arg(long, value_name = "FILE")]
    metrics_json: Option<PathBuf>,

    /// Print a human-readable summary of the derived geometry
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AircraftConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    info!(project = config.project(), "loaded configuration");

    // The full deck exists in memory before any destination is touched.
    let (deck, text) = generate(&config).context("failed to build the deck")?;

    if cli.stdout {
        print!("{text}");
    } else {
        let directory = match (&cli.out_dir, &cli.dir_file) {
            (Some(directory), _) => Destination::Directory(directory.clone()).resolve()?,
            (None, Some(side_file)) => Destination::SideFile(side_file.clone()).resolve()?,
            (None, None) => {
                std::env::current_dir().context("failed to read the working directory")?
            }
        };
        write_deck(&directory, &text)?;
    }

    if let Some(path) = &cli.metrics_json {
        let json = serde_json::to_string_pretty(&deck.metrics)
            .context("failed to serialise derived metrics")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if cli.summary {
        let summary = render_summary(&config, &deck);
        if cli.stdout {
            eprint!("{summary}");
        } else {
            print!("{summary}");
        }
    }

    Ok(())
}
