use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use verirun::commands::{run, scan};
use verirun::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "verirun")]
#[command(about = "Batch runner for an external verification tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Harness configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory of the input corpus
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Input-file suffix, including the dot (default: .v)
    #[arg(long)]
    suffix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every corpus file through the tool and write the reports
    ///
    /// The tool command goes after `--`, e.g.
    /// `verirun run --corpus tests/crafted -- python avr.py`.
    /// Each case is invoked as
    /// `<tool...> --timeout <T> -n <case_id> -o <output_dir> <input_file>`.
    Run {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Timeout in seconds passed to the tool (default: 1)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Extra milliseconds before the harness kills the tool (default: 5000)
        #[arg(long)]
        grace_ms: Option<u64>,

        /// Directory passed to the tool for its own artifacts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Working directory for the tool
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Path of the structured JSON report
        #[arg(long)]
        results: Option<PathBuf>,

        /// Path of the plain-text statistics report
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Experiment name recorded in the reports
        #[arg(short, long)]
        name: Option<String>,

        /// Tool program and leading arguments
        #[arg(last = true)]
        tool: Vec<String>,
    },

    /// List discovered cases and their ids without running anything
    Scan {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the console report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            corpus,
            timeout,
            grace_ms,
            output_dir,
            base_dir,
            results,
            stats,
            name,
            tool,
        } => {
            let overrides = ConfigOverrides {
                experiment: name,
                corpus_dir: corpus.corpus,
                suffix: corpus.suffix,
                tool,
                timeout_secs: timeout,
                grace_ms,
                output_dir,
                base_dir,
                results_path: results,
                stats_path: stats,
            };
            run::execute(overrides, corpus.config.as_deref())
        }
        Commands::Scan { corpus } => {
            let overrides = ConfigOverrides {
                corpus_dir: corpus.corpus,
                suffix: corpus.suffix,
                ..ConfigOverrides::default()
            };
            scan::execute(overrides, corpus.config.as_deref())
        }
    }
}
