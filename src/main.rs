// gha-bump - Upgrade pinned actions in GitHub Actions workflows
// License: Apache-2.0

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use gha_bump::bump::{Bumper, FileReport, Options};
use gha_bump::config::Config;
use gha_bump::resolver::github::GitHubReleases;
use gha_bump::scan;
use std::path::{Path, PathBuf};

const USAGE: &str = "\
Usage:

  # Process all workflow YAML files in .github/workflows/
  gha-bump --write=[true|false] --verbose=[true|false] .

  # Process a single workflow YAML file
  gha-bump --write=[true|false] --verbose=[true|false] .github/workflows/build.yaml";

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "gha-bump",
    about = "gha-bump - Upgrade actions for GitHub Actions workflows",
    version,
    after_help = USAGE
)]
struct Cli {
    /// Write changes to the file
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    write: bool,
    /// Enable verbose output
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    verbose: bool,
    /// Config file path (default: ~/.gha-bump/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Workflow file, or a repository directory containing .github/workflows
    target: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    gha_bump::logger::init();

    let cli = Cli::parse();

    let Some(target) = cli.target.as_deref() else {
        Cli::command().print_help().ok();
        println!();
        return;
    };

    if cli.verbose {
        println!("gha-bump - Upgrade actions for GitHub Actions workflows");
        println!("Version: {}\n", gha_bump::VERSION);
    }

    if let Err(e) = run(&cli, target).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, target: &Path) -> anyhow::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    cfg.validate().context("invalid configuration")?;

    let files = scan::discover(target, &cfg.scan)?;
    if cli.verbose && target.is_dir() {
        println!(
            "Found {} workflow files in {}\n",
            files.len(),
            target.join(&cfg.scan.workflows_dir).display()
        );
    }

    let bumper = Bumper::new(
        GitHubReleases::new(&cfg.github)?,
        Options {
            write: cli.write,
            verbose: cli.verbose,
        },
    );

    let reports = bumper.run(&files).await?;
    if cli.verbose {
        print_summary(&reports, cli.write);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let cfg = match path {
        Some(p) => Config::load(p, true)?,
        None => match Config::default_path() {
            Ok(p) => Config::load(&p, false)?,
            Err(e) => {
                tracing::debug!("No default config location ({}), using defaults", e);
                let mut cfg = Config::default();
                cfg.apply_env_overrides();
                cfg
            }
        },
    };
    Ok(cfg)
}

fn print_summary(reports: &[FileReport], write: bool) {
    let total: usize = reports.iter().map(|r| r.replacements.len()).sum();
    let files = reports.iter().filter(|r| !r.replacements.is_empty()).count();

    if total == 0 {
        println!("\nAll actions are on their latest major version.");
        return;
    }

    println!();
    for report in reports.iter().filter(|r| !r.replacements.is_empty()) {
        println!("  {}: {} reference(s)", report.path.display(), report.replacements.len());
    }

    if write {
        println!("Updated {} reference(s) in {} file(s).", total, files);
    } else {
        println!(
            "Found {} reference(s) to update in {} file(s). Run with --write=true to apply.",
            total, files
        );
    }
}
