//! Locating and loading `kindlint.toml`.
//!
//! `--config` wins over a config file in the analyzed directory, which wins
//! over the user-wide `config.toml` in `$KINDLINT_CONFIG_DIR` (or
//! `~/.kindlint/`). When none exists the defaults apply.
//!
//! The source also decides what a relative `[analyzer] root` means: it is
//! read from the config file's directory for explicit and project configs,
//! and from the analyzed directory otherwise.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kindlint_core::Config;

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["kindlint.toml", ".kindlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "KINDLINT_CONFIG_DIR";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; need not exist until loaded.
    Explicit(PathBuf),
    /// Found in the analyzed directory.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Directory a relative `[analyzer] root` is joined to.
    fn anchor<'a>(&'a self, project_dir: &'a Path) -> &'a Path {
        match self {
            Self::Explicit(p) | Self::Project(p) => p
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
            Self::Global(_) | Self::Default => project_dir,
        }
    }

    /// Resolves the declared analyzer root for this source.
    fn project_root(&self, project_dir: &Path, root: &Path) -> PathBuf {
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            self.anchor(project_dir).join(root)
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "--config {}", p.display()),
            Self::Project(p) => write!(f, "project config {}", p.display()),
            Self::Global(p) => write!(f, "global config {}", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// A loaded configuration and the project root it points at.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Where the configuration came from.
    pub source: ConfigSource,
    /// Parsed configuration.
    pub config: Config,
    /// Project root to analyze.
    pub root: PathBuf,
}

/// One lookup for the directory being analyzed.
#[derive(Debug)]
struct ConfigSearch<'a> {
    project_dir: &'a Path,
    explicit: Option<&'a Path>,
    global_dir: Option<PathBuf>,
}

impl<'a> ConfigSearch<'a> {
    fn new(project_dir: &'a Path, explicit: Option<&'a Path>) -> Self {
        Self {
            project_dir,
            explicit,
            global_dir: global_config_dir(),
        }
    }

    fn locate(&self) -> ConfigSource {
        if let Some(path) = self.explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.project_dir.join(name))
            .find(|candidate| candidate.is_file())
            .map(ConfigSource::Project)
            .or_else(|| {
                self.global_dir
                    .as_ref()
                    .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
                    .filter(|candidate| candidate.is_file())
                    .map(ConfigSource::Global)
            })
            .unwrap_or(ConfigSource::Default)
    }

    fn load(&self) -> Result<ResolvedConfig> {
        let source = self.locate();
        tracing::debug!("Using {source}");
        let config = match source.path() {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };
        let root = source.project_root(self.project_dir, &config.analyzer.root);
        Ok(ResolvedConfig {
            source,
            config,
            root,
        })
    }
}

/// Locates and parses the configuration for `project_dir`, then derives the
/// project root.
///
/// # Errors
///
/// Returns an error if the located file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    ConfigSearch::new(project_dir, explicit).load()
}

fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".kindlint")))
}
