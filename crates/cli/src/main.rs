//! NLC CLI
//!
//! Command-line client for the Natural Language Classifier service: create,
//! inspect, query and delete classifiers, and score a classifier against
//! labeled data.

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nlc_cli::commands::blind::{self, BlindOptions};
use nlc_cli::commands::input::DataSource;
use nlc_cli::commands::{classifier, config as config_cmd, CommandContext};
use nlc_cli::config::Config;
use nlc_cli::output::OutputFormat;
use nlc_evaluation::Top5Mode;

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliOutputFormat {
    /// Raw service response as JSON
    Json,
    /// Table output
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
#[command(name = "nlc")]
#[command(author, version, about = "Natural Language Classifier CLI")]
#[command(long_about = "Command-line client for the Natural Language Classifier service.\n\n\
    Train classifiers from labeled phrases, check their status, classify text, and run \
    blind evaluations that score a classifier against labeled data.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (overrides config)
    #[arg(short = 'o', long, global = true, value_enum)]
    format: Option<CliOutputFormat>,

    /// Service endpoint URL (overrides config)
    #[arg(long, global = true, env = "NLC_URL")]
    url: Option<String>,

    /// Service username (overrides config)
    #[arg(long, global = true, env = "NLC_USERNAME")]
    username: Option<String>,

    /// Service password (overrides config)
    #[arg(long, global = true, env = "NLC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Labeled data given inline or as a file
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct DataArgs {
    /// Labeled data as a JSON string
    #[arg(short = 'd', long = "data", value_name = "JSON_DATA")]
    data: Option<String>,

    /// Path to a JSON (or YAML) file with labeled data
    #[arg(short = 'f', long = "file", value_name = "JSON_FILE")]
    file: Option<PathBuf>,
}

impl DataArgs {
    fn into_source(self) -> Result<DataSource> {
        DataSource::from_flags(self.data, self.file)
            .ok_or_else(|| anyhow::anyhow!("Either -d or -f is required"))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and train a classifier
    Create {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Show the training status of a classifier
    Status {
        /// Classifier ID
        #[arg(short = 'c', long = "classifier", value_name = "CLASSIFIER_ID")]
        classifier_id: String,
    },

    /// Classify a phrase
    Classify {
        /// Classifier ID
        #[arg(short = 'c', long = "classifier", value_name = "CLASSIFIER_ID")]
        classifier_id: String,

        /// Phrase to classify
        #[arg(short = 't', long = "text", value_name = "QUESTION_TEXT")]
        text: String,
    },

    /// List classifiers
    #[command(alias = "ls")]
    List,

    /// Delete a classifier
    #[command(alias = "rm")]
    Delete {
        /// Classifier ID
        #[arg(short = 'c', long = "classifier", value_name = "CLASSIFIER_ID")]
        classifier_id: String,
    },

    /// Score a classifier against labeled data
    Blind {
        /// Classifier ID
        #[arg(short = 'c', long = "classifier", value_name = "CLASSIFIER_ID")]
        classifier_id: String,

        #[command(flatten)]
        data: DataArgs,

        /// Write the scored results as CSV
        #[arg(short = 'x', long = "csv", value_name = "CSV_OUTPUT_FILE")]
        csv: Option<PathBuf>,

        /// Write the scored results as JSON
        #[arg(short = 'j', long = "json", value_name = "JSON_OUTPUT_FILE")]
        json: Option<PathBuf>,

        /// Maximum number of classification requests in flight
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        concurrency: Option<usize>,

        /// How the top_5 flag is computed (literal: rank < 3, corrected: rank < 5)
        #[arg(long, value_name = "MODE", default_value_t = Top5Mode::default())]
        top5: Top5Mode,
    },

    /// Show current configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,
}

fn generate_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "nlc", &mut std::io::stdout());
}

/// Help and version exit 0 as usual. Missing flags, a missing or unknown
/// command and conflicting flags print usage and also exit 0; malformed
/// values keep clap's error exit.
fn exit_on_parse_error(err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::InvalidSubcommand
        | ErrorKind::ArgumentConflict => {
            let _ = err.print();
            std::process::exit(0);
        }
        _ => err.exit(),
    }
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| exit_on_parse_error(e));

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose);

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = command {
        generate_completions(shell);
        return Ok(());
    }

    // Load configuration
    let mut config = Config::load()?;

    // Override config with CLI arguments
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(username) = cli.username {
        config.username = Some(username);
    }
    if let Some(password) = cli.password {
        config.password = Some(password);
    }
    if let Some(format) = cli.format {
        config.output_format = format.into();
    }
    if cli.verbose {
        config.debug = true;
    }
    if !config.colored {
        colored::control::set_override(false);
    }

    if let Commands::Config { command } = &command {
        return match command {
            Some(ConfigCommands::Show) | None => config_cmd::show(&config),
        };
    }

    let ctx = CommandContext::new(config)?;

    match command {
        Commands::Create { data } => classifier::create(&ctx, data.into_source()?).await,
        Commands::Status { classifier_id } => classifier::status(&ctx, classifier_id).await,
        Commands::Classify {
            classifier_id,
            text,
        } => classifier::classify(&ctx, classifier_id, text).await,
        Commands::List => classifier::list(&ctx).await,
        Commands::Delete { classifier_id } => classifier::delete(&ctx, classifier_id).await,
        Commands::Blind {
            classifier_id,
            data,
            csv,
            json,
            concurrency,
            top5,
        } => {
            let options = BlindOptions {
                classifier_id,
                source: data.into_source()?,
                csv_output: csv,
                json_output: json,
                concurrency,
                top5_mode: top5,
            };
            blind::blind(&ctx, options).await.map(|_| ())
        }
        // Already handled above
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
