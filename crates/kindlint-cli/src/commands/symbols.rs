//! Symbols command implementation.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use kindlint_core::{ArchSymbol, Classification};
use kindlint_ts::Project;

use crate::config_resolver;

/// Runs the symbols command. Exits with status 1 on classification errors.
pub fn run(path: &Path, config: Option<&Path>) -> Result<()> {
    let resolved = config_resolver::load(path, config)?;
    let project = Project::load(&resolved.root, &resolved.config.analyzer)
        .with_context(|| format!("Failed to analyze {}", resolved.root.display()))?;

    let classification = project.classify();
    print!("{}", render(&classification, project.root()));

    if classification.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

/// Renders symbol trees, then contracts, then errors.
fn render(classification: &Classification, root: &Path) -> String {
    let mut out = String::new();
    for symbol in &classification.symbols {
        write_symbol(&mut out, symbol, root, 0);
    }

    if !classification.contracts.is_empty() {
        out.push_str("\ncontracts:\n");
        for contract in &classification.contracts {
            let _ = writeln!(out, "  {}", contract.label);
        }
    }

    if classification.has_errors() {
        out.push_str("\nerrors:\n");
        for issue in &classification.errors {
            let _ = writeln!(
                out,
                "  {}:{}:{}: {}",
                relative(&issue.file, root),
                issue.line,
                issue.column,
                issue.error
            );
        }
    }
    out
}

fn write_symbol(out: &mut String, symbol: &ArchSymbol, root: &Path, depth: usize) {
    let _ = write!(
        out,
        "{}{} {}",
        "  ".repeat(depth),
        symbol.symbol_kind(),
        symbol.name()
    );
    if let Some(kind) = symbol.declared_kind() {
        let _ = write!(out, " ({kind})");
    }
    if let Some(location) = symbol.location() {
        let _ = write!(out, " @ {}", relative(location, root));
    }
    out.push('\n');

    for child in symbol.children() {
        write_symbol(out, child, root, depth + 1);
    }
}

fn relative(path: &Path, root: &Path) -> String {
    let rel = kindlint_core::paths::display_relative(path, root);
    if rel.is_empty() {
        ".".to_string()
    } else {
        rel
    }
}
