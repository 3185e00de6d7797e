//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use super::output;
use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command. Exits with status 1 when the run finds
/// classification errors or diagnostics.
pub fn run(path: &Path, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let resolved = config_resolver::load(path, config)?;
    tracing::debug!(
        "Checking {} ({})",
        resolved.root.display(),
        resolved.source
    );

    let result = kindlint_ts::check_project(&resolved.root, &resolved.config)
        .with_context(|| format!("Failed to check {}", resolved.root.display()))?;

    output::print(&result, format)?;

    if result.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
