//! kiln CLI: generates compile and link rules for C++ projects.
//!
//! Provides `kiln rules` to emit the rule set (as an artifact list, JSON, or a
//! ninja file) and `kiln init` for project scaffolding.

#![warn(missing_docs)]

mod init;
mod pipeline;
mod rules;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// kiln, a build-rule generator for C++ projects.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "C++ build-rule generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `kiln.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new kiln project.
    Init {
        /// Project name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Generate build rules for the current project.
    Rules(RulesArgs),
}

/// Arguments for the `kiln rules` subcommand.
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = RulesFormat::Text)]
    pub format: RulesFormat,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Output format for `kiln rules`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RulesFormat {
    /// Artifact paths, one per line.
    Text,
    /// Rules, artifacts, and digest as JSON.
    Json,
    /// A ninja build file.
    Ninja,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    init_tracing(&global);

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Rules(ref args) => rules::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber at a level matching `--quiet`/`--verbose`.
fn init_tracing(global: &GlobalArgs) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level(global))
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .without_time()
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install log subscriber: {e}");
    }
}

fn log_level(global: &GlobalArgs) -> tracing::Level {
    if global.quiet {
        tracing::Level::ERROR
    } else if global.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}
