//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# kindlint configuration

[analyzer]
# Project root, relative to this file (default: this directory)
# root = "."

# Glob patterns to exclude from analysis, relative to the root
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# Files scanned for Kind definitions, locate() and defineContracts().
# Empty scans every analyzed file.
# definitions = ["architecture.ts", "src/**/*.arch.ts"]

# Respect .gitignore files
respect_gitignore = true

# Contract types can be switched off without editing the declarations

[contracts.noDependency]
enabled = true

[contracts.mustImplement]
enabled = true

[contracts.purity]
enabled = true

[contracts.noCycles]
enabled = true

[contracts.colocated]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Declare Kinds, locate() and defineContracts() in architecture.ts");
    println!("  2. Run: kindlint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join("kindlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
