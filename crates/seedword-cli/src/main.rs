use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use seedword_cli::phrase_cmd::{self, PhraseAction};
use seedword_core::config::load_config;
use seedword_core::tracing_init::init_tracing;
use seedword_crypto::WordListBackend;

/// BIP-39 recovery phrase toolkit.
#[derive(Debug, Parser)]
#[command(name = "seedword", version, about)]
struct Cli {
    /// Wordlist lookup backend: sorted or indexed
    #[arg(long, global = true)]
    backend: Option<WordListBackend>,

    /// Newline-separated wordlist to use instead of the embedded English list
    #[arg(long, global = true, value_name = "PATH")]
    wordlist: Option<PathBuf>,

    /// Directory containing `.seedword/settings.json` (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Phrase(PhraseAction),
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let project_dir = cli.project_dir.or_else(|| std::env::current_dir().ok());
    let mut config = load_config(project_dir.as_deref())?;
    if let Some(backend) = cli.backend {
        config.wordlist.backend = backend;
    }
    if let Some(path) = cli.wordlist {
        config.wordlist.path = Some(path);
    }
    config.logging.json |= cli.log_json;

    init_tracing(&config.logging.level, config.logging.json);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.wordlist.backend,
        "seedword starting"
    );

    let ok = match cli.command {
        Commands::Config => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            true
        }
        Commands::Phrase(action) => {
            let list = config.open_wordlist()?;
            phrase_cmd::run(action, list.as_ref(), config.candidates.max_results)?
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
