//! gormlint CLI tool.
//!
//! Usage:
//! ```bash
//! gormlint check [OPTIONS] [PATHS]...
//! gormlint locate FILE --struct NAME --field NAME [--key KEY]
//! gormlint list-keys
//! gormlint list-rules
//! gormlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Validator for GORM struct tags in Go source
#[derive(Parser)]
#[command(name = "gormlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GORMLINT_CONFIG")]
    config: Option<PathBuf>,

    /// Struct tag namespace to validate (overrides the config file)
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate struct tags in Go files
    Check {
        /// Files or directories to check (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Rule preset
        #[arg(short, long, default_value = "recommended")]
        preset: PresetArg,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Print the text range a diagnostic for a struct/field/key maps to
    Locate {
        /// Go source file
        file: PathBuf,

        /// Struct name
        #[arg(long = "struct")]
        struct_name: String,

        /// Field name
        #[arg(long)]
        field: String,

        /// Offending tag key
        #[arg(long)]
        key: Option<String>,
    },

    /// List known tag keys and their classification
    ListKeys,

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with source snippets.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
}

/// Rule preset selection.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PresetArg {
    /// Every built-in rule.
    Recommended,
    /// Error-severity rules only.
    Strict,
    /// Structural checks only.
    Minimal,
}

impl From<PresetArg> for gormlint_rules::Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Recommended => Self::Recommended,
            PresetArg::Strict => Self::Strict,
            PresetArg::Minimal => Self::Minimal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let search = config_resolver::ConfigSearch::new(cli.config);
    let namespace = cli.namespace;

    match cli.command {
        Commands::Check {
            paths,
            format,
            preset,
            rules,
            exclude,
        } => {
            let root = paths.first().cloned().unwrap_or_else(|| PathBuf::from("."));
            let start = if root.is_file() {
                root.parent().map(PathBuf::from).unwrap_or_default()
            } else {
                root
            };
            let overrides = config_resolver::Overrides { namespace, exclude };
            let loaded = search.load(&start, &overrides)?;
            let options = commands::check::CheckOptions {
                format,
                preset: preset.into(),
                rules,
            };
            commands::check::run(&paths, &options, loaded.config)
        }
        Commands::Locate {
            file,
            struct_name,
            field,
            key,
        } => {
            let start = file.parent().map(PathBuf::from).unwrap_or_default();
            let overrides = config_resolver::Overrides {
                namespace,
                ..Default::default()
            };
            let loaded = search.load(&start, &overrides)?;
            commands::locate::run(&file, &struct_name, &field, key.as_deref(), &loaded.config)
        }
        Commands::ListKeys => {
            commands::list_keys::run();
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
