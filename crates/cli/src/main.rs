mod app;
mod commands;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// ShadowOps: shadow-work analytics on the terminal.
#[derive(Parser)]
#[command(name = "shadowops", version, about = "Shadow-work analytics dashboard")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Settings file (default: ./shadowops.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model id, overriding settings and SHADOWOPS_MODEL
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log gateway activity at debug level on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline metrics, gravity alerts and an executive summary
    Dashboard,

    /// List shadow nodes by gravity
    Nodes,

    /// Show one node with its edges, history and intervention verdicts
    Node {
        /// Node id (e.g. n1)
        id: String,
    },

    /// List detected insights above the confidence cutoff
    Insights,

    /// Friction map: node bubbles and relationship edges
    Map,

    /// Estimate the gravity reduction of an intervention strategy
    Simulate {
        /// Node id to simulate against
        #[arg(long)]
        node: String,
        /// Intervention strategy, in plain words
        #[arg(long, default_value = commands::simulate::DEFAULT_STRATEGY)]
        strategy: String,
    },

    /// Compare a declared workflow with observed behavior
    Reality {
        /// Workflow id (default: the first declared workflow)
        #[arg(long)]
        workflow: Option<String>,
    },

    /// Generate a simulated live signal stream
    Signals {
        /// Number of signals to generate
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Seed for reproducible streams
        #[arg(long)]
        seed: Option<u64>,
        /// Print the buffer as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Connected metadata sources and their health
    Sources,

    /// Print the effective settings
    Settings,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app = match App::load(cli.config.as_deref(), cli.model.as_deref(), cli.output, cli.quiet)
    {
        Ok(app) => app,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to create tokio runtime: {}", e),
                cli.output,
                cli.quiet,
            );
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Dashboard => rt.block_on(commands::dashboard::cmd_dashboard(&app)),
        Commands::Nodes => commands::nodes::cmd_nodes(&app),
        Commands::Node { id } => rt.block_on(commands::nodes::cmd_node(&app, &id)),
        Commands::Insights => commands::insights::cmd_insights(&app),
        Commands::Map => commands::map::cmd_map(&app),
        Commands::Simulate { node, strategy } => {
            rt.block_on(commands::simulate::cmd_simulate(&app, &node, &strategy))
        }
        Commands::Reality { workflow } => {
            rt.block_on(commands::reality::cmd_reality(&app, workflow.as_deref()))
        }
        Commands::Signals { count, seed, csv } => {
            commands::signals::cmd_signals(&app, count, seed, csv)
        }
        Commands::Sources => commands::sources::cmd_sources(&app),
        Commands::Settings => commands::settings::cmd_settings(&app),
    }
}

/// Report an error in the requested output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Pretty-print a JSON document on stdout.
pub(crate) fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{}", value),
    }
}
