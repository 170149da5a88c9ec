//! difftriage - changed-file triage for monorepo CI
//!
//! Classifies the files changed between two git references into component
//! and pipeline assets plus python/markdown/yaml buckets, and prints a
//! `key=value` output block (and a markdown summary) for a CI orchestrator.
//!
//! The run never fails on degraded inputs: unreachable remotes, missing
//! merge bases and unusable filters all collapse to empty outputs with
//! exit status 0. Only a failure to write a requested output file aborts.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

use difftriage_core::{
    classify_changes, is_git_repo, render_outputs, render_summary_md, write_outputs,
    write_summary_md, ChangeSetProvider, GitChangeSetProvider, RunResult,
};

#[derive(Parser)]
#[command(name = "difftriage")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify changed files between two git references for CI", long_about = None)]
struct Cli {
    /// Comparison base reference
    #[arg(default_value = "origin/main")]
    base: String,

    /// Comparison head reference
    #[arg(default_value = "HEAD")]
    head: String,

    /// Include third_party/ components and pipelines as assets
    #[arg(action = clap::ArgAction::Set, default_value_t = true)]
    include_third_party: bool,

    /// Optional regex narrowing the raw changed-file list
    #[arg(default_value = "")]
    filter: String,

    /// Repository directory to diff
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Write the key=value block to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the markdown summary to this file instead of stdout
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    difftriage_core::init_tracing(cli.json, level);

    if !is_git_repo(&cli.repo) {
        tracing::warn!(event = "triage.not_a_repo", repo = %cli.repo.display());
    }

    let provider = GitChangeSetProvider::new(&cli.repo);
    let changed = provider.resolve(&cli.base, &cli.head).await;

    info!(
        event = "triage.resolved",
        base = %cli.base,
        head = %cli.head,
        files = changed.len(),
    );

    let filter = (!cli.filter.is_empty()).then_some(cli.filter.as_str());
    let result = classify_changes(changed, filter, cli.include_third_party);

    info!(
        event = "triage.classified",
        components = result.components.len(),
        pipelines = result.pipelines.len(),
        python = result.python_files.len(),
        markdown = result.markdown_files.len(),
        yaml = result.yaml_files.len(),
        has_changes = result.has_changes(),
    );

    emit(&result, cli.output.as_deref(), cli.summary.as_deref())
}

/// Emit the output block and summary, to files when requested.
fn emit(
    result: &RunResult,
    output: Option<&std::path::Path>,
    summary: Option<&std::path::Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            write_outputs(path, result).with_context(|| format!("write outputs to {:?}", path))?
        }
        None => print!("{}", render_outputs(result).context("render outputs")?),
    }

    match summary {
        Some(path) => write_summary_md(path, result)
            .with_context(|| format!("write summary to {:?}", path))?,
        None => print!("{}", render_summary_md(result)),
    }

    Ok(())
}
