use super::{CheckContext, FileCache};
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::symbol::ArchSymbol;

/// Every exported interface of `ports` needs a class in `adapters` that
/// lists it in `implements`.
pub(super) fn check(
    cx: &CheckContext<'_>,
    files: &mut FileCache<'_>,
    ports: &ArchSymbol,
    adapters: &ArchSymbol,
) -> Vec<Diagnostic> {
    let (Some(port_files), Some(adapter_files)) = (files.of(ports), files.of(adapters)) else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for file in port_files.files() {
        for iface in cx.declarations.exported_interfaces(file) {
            let implemented = adapter_files
                .files()
                .iter()
                .any(|f| cx.declarations.implements(f, &iface.name));
            if implemented {
                continue;
            }
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::MissingImplementation,
                format!(
                    "Port '{}' has no corresponding adapter implementation (expected in '{}')",
                    iface.name,
                    adapter_files.location().display()
                ),
                file.clone(),
                iface.line,
                iface.column,
            ));
        }
    }
    diagnostics
}
