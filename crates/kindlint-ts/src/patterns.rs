//! Glob patterns over project-relative paths.

use std::path::Path;

use crate::error::ProjectError;

/// A compiled glob pattern matched against project-relative paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    compiled: glob::Pattern,
}

impl PathPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Glob`] if the pattern is empty or malformed.
    pub fn new(pattern: &str) -> Result<Self, ProjectError> {
        if pattern.is_empty() {
            return Err(ProjectError::Glob {
                pattern: String::new(),
                reason: "empty pattern".into(),
            });
        }
        let compiled = glob::Pattern::new(pattern).map_err(|e| ProjectError::Glob {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests a project-relative path.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        if self.compiled.matches(&path_str) {
            return true;
        }
        // `dir/**` also matches by prefix at a separator boundary.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let prefix = prefix.trim_start_matches("**/").trim_end_matches('/');
            if prefix.is_empty() {
                return false;
            }
            let starts_at_boundary = |s: &str| {
                s.starts_with(prefix) && s.as_bytes().get(prefix.len()) == Some(&b'/')
            };
            return starts_at_boundary(&path_str)
                || (self.raw.starts_with("**/")
                    && path_str
                        .match_indices('/')
                        .any(|(i, _)| starts_at_boundary(&path_str[i + 1..])));
        }
        false
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A list of patterns; a path matches if any pattern does.
#[derive(Debug, Clone, Default)]
pub struct PathPatterns {
    patterns: Vec<PathPattern>,
}

impl PathPatterns {
    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ProjectError> {
        let patterns = patterns
            .iter()
            .map(|p| PathPattern::new(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether no patterns were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Tests `path` relative to `root`. Paths outside `root` are tested as is.
    #[must_use]
    pub fn matches(&self, path: &Path, root: &Path) -> bool {
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.patterns.iter().any(|p| p.matches(rel))
    }
}
