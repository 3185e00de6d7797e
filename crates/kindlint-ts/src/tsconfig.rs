//! Path aliases from `tsconfig.json` (`compilerOptions.baseUrl` and `paths`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kindlint_core::paths::normalize;
use serde::Deserialize;

use crate::error::ProjectError;

/// File name looked up at the project root.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// A `paths` key: exact, or one `*` between a prefix and a suffix.
#[derive(Debug, Clone)]
struct AliasPattern {
    prefix: String,
    suffix: Option<String>,
    targets: Vec<String>,
}

impl AliasPattern {
    fn new(key: &str, targets: Vec<String>) -> Self {
        match key.split_once('*') {
            Some((prefix, suffix)) => Self {
                prefix: prefix.to_owned(),
                suffix: Some(suffix.to_owned()),
                targets,
            },
            None => Self {
                prefix: key.to_owned(),
                suffix: None,
                targets,
            },
        }
    }

    /// Returns the text matched by `*` (empty for exact keys).
    fn capture<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match &self.suffix {
            None => (specifier == self.prefix).then_some(""),
            Some(suffix) => specifier
                .strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str())),
        }
    }
}

/// Non-relative specifier mappings of a project.
///
/// Exact keys win over wildcard keys; among wildcards the longest prefix
/// wins. `baseUrl` is tried after any `paths` targets.
#[derive(Debug, Clone, Default)]
pub struct PathAliases {
    base_url: Option<PathBuf>,
    paths_base: PathBuf,
    patterns: Vec<AliasPattern>,
}

impl PathAliases {
    /// Reads `tsconfig.json` from `root`. Returns `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON
    /// (comments and trailing commas are accepted).
    pub fn load(root: &Path) -> Result<Option<Self>, ProjectError> {
        let path = root.join(TSCONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ProjectError::Io {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(root, &text)
            .map(Some)
            .map_err(|source| ProjectError::TsConfig { path, source })
    }

    /// Parses tsconfig text whose relative paths are anchored at `dir`.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed input.
    pub fn parse(dir: &Path, text: &str) -> Result<Self, serde_json::Error> {
        let file: TsConfigFile = serde_json::from_str(&strip_jsonc(text))?;
        let options = file.compiler_options;
        let base_url = options.base_url.map(|b| normalize(&dir.join(b)));
        let paths_base = base_url.clone().unwrap_or_else(|| normalize(dir));
        let patterns = options
            .paths
            .into_iter()
            .map(|(key, targets)| AliasPattern::new(&key, targets))
            .collect();
        Ok(Self {
            base_url,
            paths_base,
            patterns,
        })
    }

    /// Whether no alias applies to any specifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.patterns.is_empty()
    }

    /// Candidate paths for a non-relative `specifier`, in lookup order.
    ///
    /// Extensions and `index` files are not expanded here.
    #[must_use]
    pub fn expand(&self, specifier: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();

        let best = self
            .patterns
            .iter()
            .filter_map(|p| p.capture(specifier).map(|captured| (p, captured)))
            .max_by_key(|(p, _)| (p.suffix.is_none(), p.prefix.len()));
        if let Some((pattern, captured)) = best {
            for target in &pattern.targets {
                let target = target.replacen('*', captured, 1);
                out.push(normalize(&self.paths_base.join(target)));
            }
        }

        if let Some(base_url) = &self.base_url {
            out.push(normalize(&base_url.join(specifier)));
        }
        out
    }
}

/// Drops `//` and `/* */` comments and trailing commas outside strings.
fn strip_jsonc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    drop_trailing_commas(&out)
}

fn drop_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' && text[i + 1..].trim_start().starts_with(['}', ']']) {
            continue;
        }
        out.push(c);
    }
    out
}
