use crate::analyzer::SharpLint;
use crate::cli::Cli;
use crate::config::Config;
use crate::constants::LOG_ENV_VAR;
use crate::output;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `SHARPLINT_LOG` takes precedence; otherwise `--verbose` selects `debug`
/// and the default is `warn`. A subscriber installed earlier (tests, hosts
/// embedding the library) is left in place.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run `SharpLint` with the given arguments.
///
/// Returns the process exit code: 1 when findings or parse errors remain, 0
/// otherwise.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run `SharpLint` with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["sharplint".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(2);
            }
        },
    };

    init_tracing(cli.output.verbose);

    // Load config from the first path or current directory
    let config_path = cli
        .paths
        .first()
        .map_or(std::path::Path::new("."), std::path::PathBuf::as_path);
    let config = Config::load_from_path(config_path);
    if let Some(path) = &config.config_file_path {
        tracing::debug!(path = %path.display(), "using configuration file");
    }

    let mut analyzer = SharpLint::new(config)
        .with_excludes(cli.exclude_folders)
        .with_ignored_rules(cli.ignore)
        .with_verbose(cli.output.verbose);
    if cli.fix.fix || cli.fix.dry_run {
        analyzer = analyzer.with_fix(true);
    }
    analyzer = analyzer.with_dry_run(cli.fix.dry_run);

    if cli.output.verbose && !cli.output.json {
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            threads = rayon::current_num_threads(),
            "starting"
        );
        output::print_exclusion_list(writer, &analyzer.exclude_folders)?;
    }

    let result = analyzer.analyze_paths(&cli.paths)?;

    if cli.output.json {
        output::print_json(writer, &result)?;
    } else {
        output::print_report(writer, &result)?;
    }

    let failed = result.analysis_summary.findings_count > 0
        || result.analysis_summary.parse_errors_count > 0;
    Ok(i32::from(failed))
}
