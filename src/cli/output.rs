use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use kal_ipc::SearchResultItem;

use super::CliArgs;

/// Read a JSON array of result items.
pub(crate) fn read_results(path: &Path) -> Result<Vec<SearchResultItem>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read results from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON list of result items", path.display()))
}

pub(crate) fn print_help() -> Result<()> {
    CliArgs::command().print_help()?;
    println!();
    Ok(())
}
