//! Script runner: read commands from a file, write responses to a file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use valet::Valet;
use valet_config::{ValetConfig, is_stdio};

use crate::style::{print_labeled, print_success};

pub fn run(input: Option<PathBuf>, output: Option<PathBuf>, config: &ValetConfig) -> Result<()> {
    let input = input.unwrap_or_else(|| config.io.input.clone());
    let output = output.unwrap_or_else(|| config.io.output.clone());

    let reader = open_input(&input)?;
    let writer = open_output(&output)?;

    tracing::debug!(input = %input.display(), output = %output.display(), "running script");

    let summary = Valet::new()
        .run_script(reader, writer)
        .with_context(|| format!("Failed to run script {}", input.display()))?;

    // Stdout carries responses when writing to "-"; keep it clean.
    if !is_stdio(&output) {
        print_success(&format!(
            "Processed {} command(s) into {}",
            summary.lines,
            output.display()
        ));
        print_labeled("Succeeded", &summary.succeeded.to_string());
        print_labeled("Rejected", &summary.rejected.to_string());
        print_labeled("Failed", &summary.failed.to_string());
        if summary.faulted > 0 {
            print_labeled("Faulted", &summary.faulted.to_string());
        }
    }

    Ok(())
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
