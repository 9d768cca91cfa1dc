// gha-bump - Per-file pipeline: read, parse, resolve, rewrite

use crate::resolver::ReleaseLookup;
use crate::rewrite::{write_replacements, Replacements};
use crate::workflow::{collect_replacements, parse_workflow};
use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Persist replacements back to the workflow file.
    pub write: bool,
    /// Print each file, step and detected replacement.
    pub verbose: bool,
}

/// Outcome of processing one workflow file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub replacements: Replacements,
    pub written: bool,
}

pub struct Bumper<L> {
    lookup: L,
    options: Options,
}

impl<L: ReleaseLookup> Bumper<L> {
    pub fn new(lookup: L, options: Options) -> Self {
        Self { lookup, options }
    }

    /// Process files one after another, stopping at the first error.
    pub async fn run(&self, files: &[PathBuf]) -> anyhow::Result<Vec<FileReport>> {
        let mut reports = Vec::with_capacity(files.len());
        for file in files {
            reports.push(self.process_file(file).await?);
        }
        Ok(reports)
    }

    pub async fn process_file(&self, path: &Path) -> anyhow::Result<FileReport> {
        if self.options.verbose {
            println!("Processing: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let workflow = parse_workflow(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let replacements = collect_replacements(&workflow, &self.lookup, self.options.verbose)
            .await
            .with_context(|| format!("failed to resolve actions in {}", path.display()))?;

        if self.options.verbose && !replacements.is_empty() {
            println!("Detected following replacements:- ");
            for (old, new) in &replacements {
                println!("  {} -> {}", old, new);
            }
        }

        let written = if self.options.write {
            write_replacements(path, &content, &replacements)
                .with_context(|| format!("failed to write {}", path.display()))?
        } else {
            false
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            replacements,
            written,
        })
    }
}
