use std::collections::HashSet;

use super::FileCache;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::paths::relative_stem;
use crate::symbol::ArchSymbol;

/// Every file of `primary` needs a file of `related` at the same relative
/// path, extension aside.
pub(super) fn check(
    files: &mut FileCache<'_>,
    primary: &ArchSymbol,
    related: &ArchSymbol,
) -> Vec<Diagnostic> {
    let (Some(primary_files), Some(related_files)) = (files.of(primary), files.of(related)) else {
        return Vec::new();
    };

    let counterparts: HashSet<_> = related_files
        .files()
        .iter()
        .filter_map(|f| relative_stem(f, related_files.location()))
        .collect();

    let mut diagnostics = Vec::new();
    for file in primary_files.files() {
        let Some(stem) = relative_stem(file, primary_files.location()) else {
            continue;
        };
        if counterparts.contains(&stem) {
            continue;
        }
        let expected = related_files.location().join(&stem);
        diagnostics.push(Diagnostic::at_file_start(
            DiagnosticCode::MissingCounterpart,
            format!(
                "File '{}' has no counterpart at '{}'",
                file.display(),
                expected.display()
            ),
            file.clone(),
        ));
    }
    diagnostics
}
