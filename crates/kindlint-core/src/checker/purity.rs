use super::{CheckContext, FileCache};
use crate::builtins::is_builtin;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::symbol::ArchSymbol;

/// Flags imports of platform built-ins, type-only imports included.
pub(super) fn check(
    cx: &CheckContext<'_>,
    files: &mut FileCache<'_>,
    symbol: &ArchSymbol,
) -> Vec<Diagnostic> {
    let Some(symbol_files) = files.of(symbol) else {
        return Vec::new();
    };

    symbol_files
        .files()
        .iter()
        .flat_map(|file| {
            cx.imports
                .specifiers_of(file)
                .iter()
                .filter(|s| is_builtin(&s.specifier))
                .map(move |s| {
                    Diagnostic::new(
                        DiagnosticCode::ImpureImport,
                        format!("Impure import in '{}': '{}'", symbol.name(), s.specifier),
                        file.clone(),
                        s.line,
                        s.column,
                    )
                })
        })
        .collect()
}
