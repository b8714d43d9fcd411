use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};

use bump_version::cli::{run_release, ReleaseArgs};
use bump_version::config::{ReleaseConfig, DEFAULT_CONFIG_PATH};
use bump_version::git::GitRepository;
use bump_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Bump the version of a git-enabled python package, then commit, tag and push it"
)]
struct Args {
    #[arg(
        id = "release_version",
        value_name = "VERSION",
        help = "Version to release, e.g. v1.2.3 or 1.2.3"
    )]
    release_version: String,

    #[arg(short, long, help = "Config document [default: pyproject.toml]")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = parse_args();
    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        process::exit(1);
    }
}

/// Parses the command line, showing the project's current version in `--help`
fn parse_args() -> Args {
    let raw = std::env::args_os().skip(1).filter_map(|a| a.into_string().ok());
    let config = config_arg(raw).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut command = Args::command();
    if let Some(current) = current_version(&config) {
        command = command.after_help(format!("Current version: {}", current));
    }

    let matches = command.get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Picks the `--config` value out of raw arguments, before clap has run.
///
/// The help text is built before parsing, so the document it reads the
/// current version from has to be found by hand.
fn config_arg<I: IntoIterator<Item = String>>(args: I) -> Option<PathBuf> {
    let mut args = args.into_iter();
    let mut found = None;

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        } else if arg == "--config" || arg == "-c" {
            found = args.next().map(PathBuf::from);
        } else if let Some(value) = arg.strip_prefix("--config=") {
            found = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("-c").filter(|v| !v.is_empty()) {
            found = Some(PathBuf::from(value.strip_prefix('=').unwrap_or(value)));
        }
    }

    found
}

fn current_version(config: &Path) -> Option<String> {
    let config = ReleaseConfig::load(config).ok()?;
    config.current_version().map(str::to_string)
}

fn run(args: Args) -> Result<()> {
    let workdir = std::env::current_dir().context("Cannot determine the working directory")?;
    let repo = GitRepository::open(&workdir).context("Not in a git repository")?;

    let release = ReleaseArgs {
        version: args.release_version,
        config_path: args.config,
        workdir,
    };
    let report = run_release(&release, &repo)?;

    ui::display_release_summary(&report.tag, report.rewritten.len());
    Ok(())
}
