//! knodel: transpile a session factory or session document to Tidal source.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use knodel::factory::FactoryRegistry;
use knodel::output::write_output;
use knodel::session::document::load_session;
use knodel::synth::available_synths;
use knodel::{Session, Transpiler, TranspilerConfig};

#[derive(Parser)]
#[command(name = "knodel", version)]
#[command(about = "Compose TidalCycles sessions in Rust and transpile them to Tidal source")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a session to Tidal source
    Transpile {
        /// Built-in factory name or path to a YAML session document
        source: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Transpiler config file (defaults to ~/.knodel/transpiler.yaml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Header comment text
        #[arg(long, conflicts_with = "no_header")]
        header: Option<String>,

        /// Omit the header comment
        #[arg(long)]
        no_header: bool,

        /// Separate configuration from streams with an empty line
        #[arg(long)]
        blank_line: bool,
    },

    /// List available synths and their controls
    Synths,

    /// List built-in session factories
    Factories,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transpile {
            source,
            output,
            config,
            header,
            no_header,
            blank_line,
        } => {
            let mut transpiler_config = match config {
                Some(path) => TranspilerConfig::load_from(&path)?,
                None => TranspilerConfig::load().unwrap_or_default(),
            };
            if let Some(header) = header {
                transpiler_config = transpiler_config.with_header(header);
            }
            if no_header {
                transpiler_config = transpiler_config.without_header();
            }
            if blank_line {
                transpiler_config.blank_line_after_config = true;
            }

            let session = resolve_session(&source)?;
            let text = Transpiler::new(transpiler_config).transpile(&session);

            match output {
                Some(path) => {
                    write_output(&path, &text)?;
                    info!("wrote {} streams to {}", session.streams().len(), path.display());
                }
                None => std::io::stdout().write_all(text.as_bytes())?,
            }
        }

        Commands::Synths => {
            for synth in available_synths() {
                println!("{} ({})", synth.sound, synth.name);
                for p in synth.parameters {
                    println!(
                        "  {:<10} default {:<8} range {:<14} {}",
                        p.name,
                        p.default,
                        p.range(),
                        p.description
                    );
                }
            }
        }

        Commands::Factories => {
            for entry in FactoryRegistry::builtin().entries() {
                println!("{:<8} {}", entry.name, entry.description);
            }
        }
    }

    Ok(())
}

/// A path to an existing file is read as a session document; anything else
/// is looked up as a built-in factory.
fn resolve_session(source: &str) -> Result<Session, Box<dyn std::error::Error>> {
    let path = Path::new(source);
    if path.is_file() {
        debug!(path = %path.display(), "loading session document");
        return Ok(load_session(path)?);
    }

    let registry = FactoryRegistry::builtin();
    match registry.resolve(source) {
        Some(factory) => {
            debug!(factory = source, "calling session factory");
            Ok(factory()?)
        }
        None => Err(format!(
            "no session document or factory named `{source}` (factories: {})",
            registry.names().join(", ")
        )
        .into()),
    }
}
