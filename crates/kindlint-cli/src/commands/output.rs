//! Shared output formatting for check results.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use kindlint_core::paths::display_relative;
use kindlint_core::CheckReport;
use kindlint_ts::ProjectReport;
use serde::Serialize;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &ProjectReport, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Compact => render_compact(result),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &ProjectReport) -> String {
    let mut out = String::new();
    let root = result.root.as_path();

    for issue in &result.classification.errors {
        let _ = writeln!(
            out,
            "classify at {}:{}:{}",
            display_relative(&issue.file, root),
            issue.line,
            issue.column
        );
        let _ = writeln!(out, "  \x1b[31merror\x1b[0m: {}", issue.error);
        out.push('\n');
    }

    for d in &result.report.diagnostics {
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            d.code,
            d.code.name(),
            display_relative(&d.file, root),
            d.line,
            d.column
        );
        let _ = writeln!(out, "  \x1b[31merror\x1b[0m: {}", d.message);
        if let Some(contract) = &d.contract {
            let _ = writeln!(out, "  = contract: {contract}");
        }
        out.push('\n');
    }

    let summary_color = if result.has_failures() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(
        out,
        "{}Found {} violation(s) in {} contract(s), {} classification error(s) in {} file(s)\x1b[0m",
        summary_color,
        result.report.violations_found,
        result.report.contracts_checked,
        result.classification.errors.len(),
        result.files_analyzed
    );
    out
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    root: &'a Path,
    files_analyzed: usize,
    #[serde(flatten)]
    report: &'a CheckReport,
    classification_errors: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    file: &'a Path,
    line: usize,
    column: usize,
    message: String,
}

fn render_json(result: &ProjectReport) -> Result<String> {
    let output = JsonOutput {
        root: &result.root,
        files_analyzed: result.files_analyzed,
        report: &result.report,
        classification_errors: result
            .classification
            .errors
            .iter()
            .map(|issue| JsonIssue {
                file: &issue.file,
                line: issue.line,
                column: issue.column,
                message: issue.error.to_string(),
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&output)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &ProjectReport) -> String {
    let root = result.root.as_path();
    let mut out = String::new();
    for issue in &result.classification.errors {
        let _ = writeln!(
            out,
            "{}:{}:{}: error [classify] {}",
            display_relative(&issue.file, root),
            issue.line,
            issue.column,
            issue.error
        );
    }
    for d in &result.report.diagnostics {
        let _ = writeln!(
            out,
            "{}:{}:{}: error [{}] {}",
            display_relative(&d.file, root),
            d.line,
            d.column,
            d.code,
            d.message
        );
    }
    out
}
