//! Project-wide import graph and declaration index.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kindlint_core::paths::normalize;
use kindlint_core::ports::{DeclSite, DeclarationIndex, ImportEdge, ImportGraph, ImportSpecifier};

use crate::extractor::{DeclKind, FileAnalysis};
use crate::tsconfig::PathAliases;

/// Extensions a relative specifier may omit, in lookup order.
const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Emitted JavaScript extensions that map back to TypeScript sources.
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// Imports and declarations of every analyzed file.
///
/// Specifiers are resolved once, at build time, against the set of analyzed
/// files. Anything that does not land on one of them is external.
#[derive(Debug, Default)]
pub struct ProjectIndex {
    files: HashSet<PathBuf>,
    aliases: PathAliases,
    imports: HashMap<PathBuf, Vec<ImportEdge>>,
    specifiers: HashMap<PathBuf, Vec<ImportSpecifier>>,
    interfaces: HashMap<PathBuf, Vec<DeclSite>>,
    implementations: HashMap<PathBuf, HashSet<String>>,
}

impl ProjectIndex {
    /// Builds the index from per-file analyses.
    #[must_use]
    pub fn build(analyses: &[FileAnalysis]) -> Self {
        Self::build_with_aliases(analyses, PathAliases::default())
    }

    /// Builds the index, resolving non-relative specifiers through `aliases`.
    #[must_use]
    pub fn build_with_aliases(analyses: &[FileAnalysis], aliases: PathAliases) -> Self {
        let mut index = Self {
            files: analyses.iter().map(|a| a.file_path.clone()).collect(),
            aliases,
            ..Self::default()
        };

        for analysis in analyses {
            let file = &analysis.file_path;

            let mut edges: Vec<ImportEdge> = Vec::new();
            let mut specifiers = Vec::with_capacity(analysis.imports.len());
            for import in &analysis.imports {
                specifiers.push(ImportSpecifier {
                    specifier: import.specifier.clone(),
                    line: import.line,
                    column: import.column,
                    type_only: import.type_only,
                });
                let Some(target) = index.resolve(file, &import.specifier) else {
                    continue;
                };
                if edges.iter().any(|e| e.target == target) {
                    continue;
                }
                edges.push(ImportEdge {
                    target,
                    line: import.line,
                    column: import.column,
                    specifier: import.specifier.clone(),
                });
            }

            let mut interfaces = Vec::new();
            let mut implemented = HashSet::new();
            for decl in &analysis.declarations {
                match decl.kind {
                    DeclKind::Interface if decl.exported => interfaces.push(DeclSite {
                        name: decl.name.clone(),
                        line: decl.line,
                        column: decl.column,
                    }),
                    DeclKind::Interface => {}
                    DeclKind::Class => implemented.extend(decl.implements.iter().cloned()),
                }
            }

            tracing::trace!(
                file = %file.display(),
                edges = edges.len(),
                specifiers = specifiers.len(),
                "indexed file"
            );
            index.imports.insert(file.clone(), edges);
            index.specifiers.insert(file.clone(), specifiers);
            index.interfaces.insert(file.clone(), interfaces);
            index.implementations.insert(file.clone(), implemented);
        }
        index
    }

    /// Number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves `specifier` as written in `from` to an indexed file.
    ///
    /// Relative and absolute specifiers resolve against `from`; others go
    /// through the path aliases. Packages, `node:` builtins and `.d.ts`
    /// targets resolve to `None`.
    #[must_use]
    pub fn resolve(&self, from: &Path, specifier: &str) -> Option<PathBuf> {
        let targets = if is_path_specifier(specifier) {
            let base = from.parent().unwrap_or_else(|| Path::new("/"));
            vec![normalize(&base.join(specifier))]
        } else {
            self.aliases.expand(specifier)
        };

        targets
            .iter()
            .flat_map(|target| candidates(target))
            .find(|c| self.files.contains(c) && !is_declaration_file(c))
    }
}

impl ImportGraph for ProjectIndex {
    fn imports_of(&self, file: &Path) -> &[ImportEdge] {
        self.imports.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    fn specifiers_of(&self, file: &Path) -> &[ImportSpecifier] {
        self.specifiers.get(file).map(Vec::as_slice).unwrap_or_default()
    }
}

impl DeclarationIndex for ProjectIndex {
    fn exported_interfaces(&self, file: &Path) -> &[DeclSite] {
        self.interfaces.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    fn implements(&self, file: &Path, interface: &str) -> bool {
        self.implementations
            .get(file)
            .is_some_and(|names| names.contains(interface))
    }
}

fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
        || specifier == "."
        || specifier == ".."
}

fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"))
}

/// `x`, `x.ts`, `x.tsx`, then `x/index.ts`, `x/index.tsx`. A `.js`-style
/// extension is first swapped for its TypeScript source.
fn candidates(target: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();

    if target
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| JS_EXTENSIONS.contains(&e))
    {
        for ext in RESOLVE_EXTENSIONS {
            out.push(target.with_extension(ext));
        }
    }

    out.push(target.to_path_buf());
    for ext in RESOLVE_EXTENSIONS {
        out.push(with_suffix(target, ext));
    }
    for ext in RESOLVE_EXTENSIONS {
        out.push(target.join(format!("index.{ext}")));
    }
    out
}

/// Appends `.ext` without replacing an existing extension (`user.service`).
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
