//! Collaborators the checking engine queries.
//!
//! The engine is written against these traits only. `kindlint-ts` backs
//! them with a tree-sitter project index and the filesystem; tests back
//! them with in-memory maps.

use std::path::{Path, PathBuf};

/// Lists the concrete source files rooted at a declared location.
pub trait FileResolver {
    /// Returns every source file at or beneath `location`, sorted.
    ///
    /// A location naming a file resolves to that file; a missing location
    /// resolves to nothing.
    fn files_under(&self, location: &Path) -> Vec<PathBuf>;
}

/// A resolved import from one project file to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// Imported project file.
    pub target: PathBuf,
    /// Line of the import statement (1-indexed).
    pub line: usize,
    /// Column of the import statement (1-indexed).
    pub column: usize,
    /// Module specifier as written.
    pub specifier: String,
}

/// A raw import specifier, resolved or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// Module specifier as written.
    pub specifier: String,
    /// Line of the import statement (1-indexed).
    pub line: usize,
    /// Column of the import statement (1-indexed).
    pub column: usize,
    /// Whether the import is `import type`.
    pub type_only: bool,
}

/// The directed file-to-file import relation of a project.
pub trait ImportGraph {
    /// Project files imported by `file`, one edge per distinct target, in
    /// source order. External and declaration-only modules are excluded.
    fn imports_of(&self, file: &Path) -> &[ImportEdge];

    /// Every import specifier in `file`, including external ones.
    fn specifiers_of(&self, file: &Path) -> &[ImportSpecifier];
}

/// Where a declaration sits in its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclSite {
    /// Declared name.
    pub name: String,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (1-indexed).
    pub column: usize,
}

/// Type declarations per file.
pub trait DeclarationIndex {
    /// Exported interfaces declared in `file`.
    fn exported_interfaces(&self, file: &Path) -> &[DeclSite];

    /// Whether a class in `file` lists `interface` in its `implements` clause.
    fn implements(&self, file: &Path, interface: &str) -> bool;
}
