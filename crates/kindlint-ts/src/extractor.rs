//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for front ends. An extractor
//! turns raw source text into a [`FileAnalysis`]: the [`SourceView`] the
//! classifier reads, plus the imports and type declarations the project
//! index needs.

use std::path::{Path, PathBuf};

use kindlint_core::SourceView;

/// A single import specifier extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Module specifier as written, quotes removed.
    pub specifier: String,
    /// `import type ...` or `export type ... from`.
    pub type_only: bool,
}

/// Kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `class Foo`
    Class,
    /// `interface Foo`
    Interface,
}

/// A type declaration extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Identifier name.
    pub name: String,
    /// Kind of declaration.
    pub kind: DeclKind,
    /// Declared with `export`.
    pub exported: bool,
    /// Interfaces named in `implements`, by simple name. Empty for interfaces.
    pub implements: Vec<String>,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    /// Absolute path of the file.
    pub file_path: PathBuf,
    /// Statements for the classifier.
    pub view: SourceView,
    /// All import specifiers, in source order.
    pub imports: Vec<ImportInfo>,
    /// Top-level interfaces and classes.
    pub declarations: Vec<DeclInfo>,
}

impl FileAnalysis {
    /// Creates an empty analysis for `path`.
    #[must_use]
    pub fn empty(path: &Path) -> Self {
        Self {
            file_path: path.to_path_buf(),
            view: SourceView::new(path),
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }
}

/// Errors raised while extracting a file.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The parser produced no tree.
    #[error("failed to parse {path}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
    },
}

/// Trait for language-specific Tree-sitter extraction.
///
/// Implement this to add support for a new language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".ts", ".tsx"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts statements, imports and declarations from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing fails.
    fn analyze(&self, path: &Path, source: &str) -> Result<FileAnalysis, ExtractError>;

    /// Whether `path` has one of [`Self::extensions`].
    fn handles(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        self.extensions().iter().any(|ext| name.ends_with(ext))
    }
}
