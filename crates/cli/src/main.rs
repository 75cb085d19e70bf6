//! QA Evaluation CLI
//!
//! Command-line interface for scoring question/answer pairs.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use qa_eval_cli::commands::{batch, config, evaluate, CommandContext};
use qa_eval_cli::output::OutputFormat;
use qa_eval_common::{telemetry, AppConfig};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qa-eval")]
#[command(author, version, about = "QA evaluation CLI")]
#[command(long_about = "Score question/answer pairs for relevance, factual accuracy, \
    coherence and fluency.\n\n\
    Supplying retrieved context adds recall, precision and F1 retrieval metrics.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Configuration file layered over config/default and config/{QA_EVAL_ENV}
    #[arg(short, long, global = true, env = "QA_EVAL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single question/answer pair
    #[command(alias = "e", alias = "eval")]
    Evaluate {
        /// The question that was asked
        #[arg(short, long)]
        question: String,

        /// The answer to evaluate
        #[arg(short, long)]
        answer: String,

        /// Reference answer
        #[arg(short, long)]
        ground_truth: Option<String>,

        /// Retrieved context passage (repeatable)
        #[arg(long = "context", value_name = "PASSAGE")]
        context: Vec<String>,
    },

    /// Evaluate the built-in sample question
    #[command(alias = "s")]
    Sample {
        /// Leave out the sample's retrieved context
        #[arg(long)]
        no_context: bool,
    },

    /// Evaluate every request in a JSON or YAML file
    #[command(alias = "b")]
    Batch {
        /// Request file; `.yaml`/`.yml` is read as YAML, anything else as JSON
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let mut app_config = AppConfig::load_from(cli.config.as_deref())?;
    if cli.verbose {
        app_config.telemetry.log_level = "debug".to_string();
    }

    // Initialize tracing
    telemetry::init_from_config(&app_config.telemetry)?;

    let ctx = CommandContext::new(app_config, cli.format.into())?;

    // Execute command
    let result = match cli.command {
        Commands::Evaluate {
            question,
            answer,
            ground_truth,
            context,
        } => {
            let request = evaluate::build_request(question, answer, ground_truth, context);
            evaluate::evaluate(&ctx, request).await
        }
        Commands::Sample { no_context } => evaluate::sample(&ctx, !no_context).await,
        Commands::Batch { file } => batch::evaluate_file(&ctx, &file).await,
        Commands::Config => config::show(&ctx),
    };

    // Handle errors
    if let Err(e) = result {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), e);
        if cli.verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
