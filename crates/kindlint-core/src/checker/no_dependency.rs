use super::{CheckContext, FileCache};
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::symbol::ArchSymbol;

/// One diagnostic per import edge from a file of `from` into `to`.
pub(super) fn check(
    cx: &CheckContext<'_>,
    files: &mut FileCache<'_>,
    from: &ArchSymbol,
    to: &ArchSymbol,
) -> Vec<Diagnostic> {
    let (Some(from_files), Some(to_files)) = (files.of(from), files.of(to)) else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for file in from_files.files() {
        for edge in cx.imports.imports_of(file) {
            if !to_files.contains(&edge.target) {
                continue;
            }
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::ForbiddenDependency,
                format!(
                    "Forbidden dependency: {} \u{2192} {} ({} \u{2192} {})",
                    from.name(),
                    to.name(),
                    file.display(),
                    edge.target.display()
                ),
                file.clone(),
                edge.line,
                edge.column,
            ));
        }
    }
    diagnostics
}
