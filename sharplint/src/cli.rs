use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.sharplint.toml):
  Searched for in the first path and its parent directories.

  [sharplint]
  ignore = [\"SL-S001\"]             # Rule codes to skip
  exclude_folders = [\"Generated\"]  # Folders to skip, on top of bin/obj/.vs/...
  fix = false                      # Apply fixes without --fix

SUPPRESSION:
  Add `// sharplint: ignore` to a line to silence findings on it.

LOGGING:
  Set SHARPLINT_LOG (e.g. `SHARPLINT_LOG=debug`) to control log output.
";

/// Options for applying fixes.
#[derive(Args, Debug, Default, Clone)]
pub struct FixOptions {
    /// Apply available fixes and write the changed files.
    #[arg(long)]
    pub fix: bool,

    /// Compute fixes and report them without writing files (implies --fix).
    #[arg(long)]
    pub dry_run: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (debug-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    name = "sharplint",
    version,
    about = "Syntax-only lint rules and autofixes for C# sources",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Files or directories to analyze.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Rule codes to skip (repeatable).
    #[arg(long = "ignore", value_name = "RULE")]
    pub ignore: Vec<String>,

    /// Folders to exclude (repeatable).
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude_folders: Vec<String>,

    /// Fix options.
    #[command(flatten)]
    pub fix: FixOptions,

    /// Output options.
    #[command(flatten)]
    pub output: OutputOptions,
}
