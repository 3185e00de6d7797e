//! Whole-project runs: discover, extract, index, classify, check.

use std::path::{Component, Path, PathBuf};

use kindlint_core::{
    AnalyzerConfig, CheckContext, CheckReport, Classification, Classifier, Config,
    ContractChecker, SourceView,
};
use tracing::{debug, info, warn};

use crate::error::ProjectError;
use crate::extractor::{FileAnalysis, LanguageExtractor};
use crate::index::ProjectIndex;
use crate::patterns::PathPatterns;
use crate::resolver::{is_source_file, FsFileResolver};
use crate::tsconfig::PathAliases;
use crate::typescript::TypeScriptExtractor;

/// An analyzed project, ready to classify and check.
pub struct Project {
    root: PathBuf,
    analyses: Vec<FileAnalysis>,
    index: ProjectIndex,
    resolver: FsFileResolver,
    definitions: PathPatterns,
}

impl Project {
    /// Discovers and analyzes every source file under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is inaccessible, a pattern is invalid,
    /// the walk fails or the grammar cannot be loaded. Unreadable files are
    /// skipped with a warning.
    pub fn load(root: &Path, config: &AnalyzerConfig) -> Result<Self, ProjectError> {
        let root = std::fs::canonicalize(root).map_err(|e| ProjectError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        let exclude = PathPatterns::new(&config.exclude)?;
        let definitions = PathPatterns::new(&config.definitions)?;

        let files = discover_files(&root, &exclude, config.respect_gitignore)?;
        info!("Analyzing {} file(s) under {}", files.len(), root.display());

        let extractor = TypeScriptExtractor::new();
        let mut analyses = Vec::with_capacity(files.len());
        for file in &files {
            let source = match std::fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    warn!("Skipping {}: {e}", file.display());
                    continue;
                }
            };
            let analysis = extractor.analyze(file, &source)?;
            debug!(
                file = %file.display(),
                statements = analysis.view.statements.len(),
                imports = analysis.imports.len(),
                "Analyzed file"
            );
            analyses.push(analysis);
        }

        let aliases = match PathAliases::load(&root) {
            Ok(aliases) => aliases.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring path aliases: {e}");
                PathAliases::default()
            }
        };
        if !aliases.is_empty() {
            debug!("Resolving imports with tsconfig path aliases");
        }
        let index = ProjectIndex::build_with_aliases(&analyses, aliases);
        let resolver = FsFileResolver::new(&root, exclude);
        Ok(Self {
            root,
            analyses,
            index,
            resolver,
            definitions,
        })
    }

    /// Canonical project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of analyzed files.
    #[must_use]
    pub fn files_analyzed(&self) -> usize {
        self.analyses.len()
    }

    /// The import graph and declaration index.
    #[must_use]
    pub fn index(&self) -> &ProjectIndex {
        &self.index
    }

    /// Views of the files scanned for declarations.
    #[must_use]
    pub fn definition_views(&self) -> Vec<SourceView> {
        self.analyses
            .iter()
            .filter(|a| {
                self.definitions.is_empty() || self.definitions.matches(&a.file_path, &self.root)
            })
            .map(|a| a.view.clone())
            .collect()
    }

    /// Classifies the definition files.
    #[must_use]
    pub fn classify(&self) -> Classification {
        Classifier::new(&self.root).classify(&self.definition_views())
    }

    /// Checks the contracts of `classification`.
    #[must_use]
    pub fn check(&self, classification: &Classification, config: &Config) -> CheckReport {
        let cx = CheckContext {
            files: &self.resolver,
            imports: &self.index,
            declarations: &self.index,
        };
        ContractChecker::new(cx)
            .with_config(config)
            .check(&classification.symbols, &classification.contracts)
    }
}

/// Result of [`check_project`].
#[derive(Debug)]
pub struct ProjectReport {
    /// Canonical project root.
    pub root: PathBuf,
    /// Symbols, contracts and classification errors.
    pub classification: Classification,
    /// Contract diagnostics.
    pub report: CheckReport,
    /// Number of analyzed files.
    pub files_analyzed: usize,
}

impl ProjectReport {
    /// Whether the run found classification errors or diagnostics.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.classification.has_errors() || self.report.has_violations()
    }
}

/// Loads, classifies and checks the project at `root`.
///
/// # Errors
///
/// See [`Project::load`].
pub fn check_project(root: &Path, config: &Config) -> Result<ProjectReport, ProjectError> {
    let project = Project::load(root, &config.analyzer)?;
    let classification = project.classify();
    let report = project.check(&classification, config);
    info!(
        "Found {} diagnostic(s) and {} classification error(s)",
        report.diagnostics.len(),
        classification.errors.len()
    );
    Ok(ProjectReport {
        root: project.root,
        classification,
        report,
        files_analyzed: project.analyses.len(),
    })
}

fn discover_files(
    root: &Path,
    exclude: &PathPatterns,
    respect_gitignore: bool,
) -> Result<Vec<PathBuf>, ProjectError> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !is_source_file(path) {
            continue;
        }
        if in_node_modules(path, root) || exclude.matches(path, root) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn in_node_modules(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name == "node_modules"))
}
