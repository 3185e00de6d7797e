//! # kindlint-core
//!
//! Architecture contracts declared in source, checked against the real
//! import graph.
//!
//! A project describes its architecture in its own TypeScript files:
//!
//! ```text
//! interface App extends Kind<"App"> { domain: Domain; infra: Infra }
//! export const app = locate<App>("src", { domain: {}, infra: { path: "infrastructure" } });
//! export default defineContracts<App>({ noDependency: [["domain", "infra"]] });
//! ```
//!
//! This crate holds everything that does not depend on a parser:
//!
//! - [`SourceView`] is the parsed-file shape front ends produce
//! - [`Classifier`] turns views into [`ArchSymbol`]s and [`Contract`]s
//! - [`ContractChecker`] evaluates contracts into [`Diagnostic`]s through
//!   the [`ports`] traits
//! - [`Config`] is the `kindlint.toml` model
//!
//! ## Example
//!
//! ```ignore
//! use kindlint_core::{CheckContext, Classifier, ContractChecker};
//!
//! let classification = Classifier::new(root).classify(&views);
//! let report = ContractChecker::new(CheckContext {
//!     files: &resolver,
//!     imports: &index,
//!     declarations: &index,
//! })
//! .check(&classification.symbols, &classification.contracts);
//! print!("{}", report.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builtins;
mod checker;
mod classifier;
mod config;
mod contract;
mod diagnostic;
mod symbol;

pub mod paths;
pub mod ports;
pub mod view;

pub use builtins::{is_builtin, NODE_BUILTINS};
pub use checker::{CheckContext, ContractChecker};
pub use classifier::{
    Classification, ClassifyError, ClassifyIssue, Classifier, DEFINE_CONTRACTS, KIND_MARKER,
    LOCATE,
};
pub use config::{AnalyzerConfig, Config, ConfigError, ContractConfig};
pub use contract::{Contract, ContractShape, ContractType};
pub use diagnostic::{CheckReport, Diagnostic, DiagnosticCode};
pub use symbol::{ArchSymbol, SymbolKind};
pub use view::SourceView;
