//! Contract checking engine.
//!
//! Evaluates classified [`Contract`]s against an [`ImportGraph`], a
//! [`DeclarationIndex`] and a [`FileResolver`], producing a
//! [`CheckReport`]. One submodule per contract type.

mod colocated;
mod must_implement;
mod no_cycles;
mod no_dependency;
mod purity;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::contract::{Contract, ContractType};
use crate::diagnostic::{CheckReport, Diagnostic, DiagnosticCode};
use crate::paths;
use crate::ports::{DeclarationIndex, FileResolver, ImportGraph};
use crate::symbol::ArchSymbol;

/// The collaborators a checking run reads from.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    /// Lists files per location.
    pub files: &'a dyn FileResolver,
    /// Resolved imports per file.
    pub imports: &'a dyn ImportGraph,
    /// Interfaces and classes per file.
    pub declarations: &'a dyn DeclarationIndex,
}

/// Evaluates contracts.
pub struct ContractChecker<'a> {
    cx: CheckContext<'a>,
    config: Option<&'a Config>,
}

impl<'a> ContractChecker<'a> {
    /// Creates a checker over the given collaborators.
    #[must_use]
    pub fn new(cx: CheckContext<'a>) -> Self {
        Self { cx, config: None }
    }

    /// Skips contract types disabled in `config`.
    #[must_use]
    pub fn with_config(mut self, config: &'a Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Checks every enabled contract.
    ///
    /// Never fails: malformed contracts become [`DiagnosticCode::InvalidContract`]
    /// diagnostics and the remaining contracts are still evaluated.
    #[must_use]
    pub fn check(&self, symbols: &[Arc<ArchSymbol>], contracts: &[Contract]) -> CheckReport {
        info!(
            "Checking {} contract(s) over {} symbol(s)",
            contracts.len(),
            symbols.len()
        );
        let mut files = FileCache::new(self.cx.files);
        let mut report = CheckReport::default();

        for contract in contracts {
            if !self.is_enabled(contract.contract_type) {
                debug!(contract = %contract.label, "Skipping disabled contract");
                continue;
            }
            let found = self.check_contract(contract, &mut files);
            debug!(contract = %contract.label, violations = found.len(), "Checked contract");
            report.contracts_checked += 1;
            report
                .diagnostics
                .extend(found.into_iter().map(|d| d.with_contract(&contract.label)));
        }

        report.violations_found = report.diagnostics.len();
        info!(
            "Found {} violation(s) in {} contract(s)",
            report.violations_found, report.contracts_checked
        );
        report
    }

    fn is_enabled(&self, contract_type: ContractType) -> bool {
        self.config
            .map_or(true, |c| c.is_contract_enabled(contract_type))
    }

    fn check_contract(&self, contract: &Contract, files: &mut FileCache<'_>) -> Vec<Diagnostic> {
        if let Err(reason) = contract.validate() {
            return vec![Diagnostic::at_file_start(
                DiagnosticCode::InvalidContract,
                format!("Invalid contract '{}': {reason}", contract.label),
                contract.source_file.clone(),
            )];
        }

        // Collective contracts tolerate unlocated members; the others need
        // every argument on disk.
        if contract.contract_type != ContractType::NoCycles
            && contract.args.iter().any(|a| a.location().is_none())
        {
            debug!(contract = %contract.label, "Skipping contract with unlocated symbol");
            return Vec::new();
        }

        let args = &contract.args;
        match contract.contract_type {
            ContractType::NoDependency => {
                no_dependency::check(&self.cx, files, &args[0], &args[1])
            }
            ContractType::MustImplement => {
                must_implement::check(&self.cx, files, &args[0], &args[1])
            }
            ContractType::Purity => purity::check(&self.cx, files, &args[0]),
            ContractType::NoCycles => no_cycles::check(&self.cx, files, args),
            ContractType::Colocated => colocated::check(files, &args[0], &args[1]),
        }
    }
}

/// Files of a symbol, cached per location for one run.
pub(crate) struct FileCache<'a> {
    resolver: &'a dyn FileResolver,
    cache: HashMap<PathBuf, Rc<SymbolFiles>>,
}

/// The resolved files of one location.
pub(crate) struct SymbolFiles {
    location: PathBuf,
    files: Vec<PathBuf>,
    set: HashSet<PathBuf>,
}

impl SymbolFiles {
    /// Files in resolver order.
    pub(crate) fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The location the files were resolved from.
    pub(crate) fn location(&self) -> &Path {
        &self.location
    }

    /// Whether `file` belongs to this location.
    pub(crate) fn contains(&self, file: &Path) -> bool {
        self.set.contains(file) || paths::is_in_location(file, &self.location)
    }
}

impl<'a> FileCache<'a> {
    fn new(resolver: &'a dyn FileResolver) -> Self {
        Self {
            resolver,
            cache: HashMap::new(),
        }
    }

    /// Resolves a symbol's files. `None` when the symbol has no location.
    pub(crate) fn of(&mut self, symbol: &ArchSymbol) -> Option<Rc<SymbolFiles>> {
        let location = symbol.location()?;
        if let Some(hit) = self.cache.get(location) {
            return Some(Rc::clone(hit));
        }
        let files = self.resolver.files_under(location);
        debug!(location = %location.display(), files = files.len(), "Resolved files");
        let entry = Rc::new(SymbolFiles {
            location: location.to_path_buf(),
            set: files.iter().cloned().collect(),
            files,
        });
        self.cache.insert(location.to_path_buf(), Rc::clone(&entry));
        Some(entry)
    }
}
