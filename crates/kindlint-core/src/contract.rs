//! Declared contracts and their types.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostic::DiagnosticCode;
use crate::symbol::ArchSymbol;

/// The fixed set of rules a contract can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    /// Files of `from` must not import files of `to`.
    NoDependency,
    /// Every exported interface in `from` needs an implementing class in `to`.
    MustImplement,
    /// Files of the symbol must not import platform built-ins.
    Purity,
    /// The listed symbols must not form an import cycle.
    NoCycles,
    /// Every file of `from` needs a counterpart in `to`.
    Colocated,
}

/// How the entries of a contract type are written and grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractShape {
    /// `[["a", "b"], ...]`, one contract per pair.
    Pairwise,
    /// `["a", ...]`, one contract per entry.
    Individual,
    /// `["a", "b", ...]`, a single contract over all entries.
    Collective,
}

impl ContractType {
    /// All contract types in declaration order.
    pub const ALL: [Self; 5] = [
        Self::NoDependency,
        Self::MustImplement,
        Self::Purity,
        Self::NoCycles,
        Self::Colocated,
    ];

    /// Maps a `defineContracts` property name to a type.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "noDependency" => Some(Self::NoDependency),
            "mustImplement" => Some(Self::MustImplement),
            "purity" => Some(Self::Purity),
            "noCycles" => Some(Self::NoCycles),
            "colocated" => Some(Self::Colocated),
            _ => None,
        }
    }

    /// The property name used in `defineContracts`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::NoDependency => "noDependency",
            Self::MustImplement => "mustImplement",
            Self::Purity => "purity",
            Self::NoCycles => "noCycles",
            Self::Colocated => "colocated",
        }
    }

    /// Entry shape for this type.
    #[must_use]
    pub fn shape(self) -> ContractShape {
        match self {
            Self::NoDependency | Self::MustImplement | Self::Colocated => ContractShape::Pairwise,
            Self::Purity => ContractShape::Individual,
            Self::NoCycles => ContractShape::Collective,
        }
    }

    /// Diagnostic code reported for violations of this type.
    #[must_use]
    pub fn code(self) -> DiagnosticCode {
        match self {
            Self::NoDependency => DiagnosticCode::ForbiddenDependency,
            Self::MustImplement => DiagnosticCode::MissingImplementation,
            Self::Purity => DiagnosticCode::ImpureImport,
            Self::NoCycles => DiagnosticCode::CircularDependency,
            Self::Colocated => DiagnosticCode::MissingCounterpart,
        }
    }

    /// One-line description, used by `list-contracts`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NoDependency => "files of the first symbol must not import files of the second",
            Self::MustImplement => {
                "every exported interface of the first symbol needs an implementing class in the second"
            }
            Self::Purity => "files of the symbol must not import platform built-in modules",
            Self::NoCycles => "the listed symbols must not depend on each other in a cycle",
            Self::Colocated => "every file of the first symbol needs a counterpart in the second",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for ContractShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pairwise => write!(f, "pairwise"),
            Self::Individual => write!(f, "individual"),
            Self::Collective => write!(f, "collective"),
        }
    }
}

/// One declared rule instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    /// The rule this contract declares.
    pub contract_type: ContractType,
    /// Rendered description, e.g. `noDependency(domain -> infrastructure)`.
    pub label: String,
    /// Symbols the rule applies to, in declaration order.
    pub args: Vec<Arc<ArchSymbol>>,
    /// File holding the `defineContracts` call.
    pub source_file: PathBuf,
}

impl Contract {
    /// Creates a contract, rendering its label from the argument references.
    #[must_use]
    pub fn new(
        contract_type: ContractType,
        arg_refs: &[&str],
        args: Vec<Arc<ArchSymbol>>,
        source_file: PathBuf,
    ) -> Self {
        let label = match contract_type.shape() {
            ContractShape::Pairwise => format!("{contract_type}({})", arg_refs.join(" -> ")),
            ContractShape::Individual | ContractShape::Collective => {
                format!("{contract_type}({})", arg_refs.join(", "))
            }
        };
        Self {
            contract_type,
            label,
            args,
            source_file,
        }
    }

    /// Checks the argument count against the type's shape.
    ///
    /// # Errors
    ///
    /// Returns a description of the arity mismatch.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.args.len();
        let expected = match self.contract_type {
            ContractType::NoDependency if n != 2 => "exactly 2 arguments (from, to)",
            ContractType::MustImplement if n != 2 => {
                "exactly 2 arguments (interface, implementation)"
            }
            ContractType::Colocated if n != 2 => "exactly 2 arguments (primary, related)",
            ContractType::Purity if n != 1 => "exactly 1 argument (symbol)",
            ContractType::NoCycles if n < 1 => "at least 1 argument",
            _ => return Ok(()),
        };
        Err(format!(
            "{} requires {expected}, got {n}",
            self.contract_type
        ))
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
