//! # kindlint-ts
//!
//! Tree-sitter TypeScript front end for kindlint.
//!
//! Backs the `kindlint-core` engine with real projects:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`TypeScriptExtractor`] lowers `.ts`/`.tsx` into source views, imports
//!   and declarations
//! - [`ProjectIndex`] resolves relative and `tsconfig.json`-aliased imports
//!   into the project import graph and indexes interfaces and `implements`
//!   clauses
//! - [`FsFileResolver`] lists the source files under a location
//! - [`check_project`] runs the whole pipeline

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

pub mod extractor;
pub mod index;
pub mod patterns;
pub mod pipeline;
pub mod resolver;
pub mod tsconfig;
pub mod typescript;

pub use error::ProjectError;
pub use extractor::{ExtractError, FileAnalysis, LanguageExtractor};
pub use index::ProjectIndex;
pub use patterns::{PathPattern, PathPatterns};
pub use pipeline::{check_project, Project, ProjectReport};
pub use resolver::FsFileResolver;
pub use tsconfig::PathAliases;
pub use typescript::TypeScriptExtractor;
