//! Turns parsed source views into symbols and contracts.
//!
//! Classification runs in three passes over every input file:
//!
//! 1. `interface X extends Kind<"x"> { ... }` records Kind definitions.
//! 2. `locate<X>(root, members)` builds an Instance tree from X's members.
//! 3. `defineContracts<X>({ ... })` binds contracts to X's Instance.
//!
//! Each pass sees the results of the previous one from all files, so
//! declarations may be split across files in any order. Malformed
//! declarations are collected as [`ClassifyIssue`]s; classification never
//! fails as a whole.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::contract::{Contract, ContractShape, ContractType};
use crate::paths;
use crate::symbol::{ArchSymbol, SymbolKind};
use crate::view::{find_property, CallExpr, Expr, Property, SourceView, TypeArg};

/// Name of the marker type Kind interfaces extend.
pub const KIND_MARKER: &str = "Kind";
/// Callee that declares an Instance.
pub const LOCATE: &str = "locate";
/// Callee that declares contracts.
pub const DEFINE_CONTRACTS: &str = "defineContracts";

/// Property of a member object that overrides its path segment.
const PATH_OVERRIDE: &str = "path";

/// A malformed declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// `locate(...)` or `defineContracts(...)` without a generic argument.
    #[error("{call} call has no type argument. Expected {call}<KindName>(...).")]
    MissingTypeArgument {
        /// Callee name.
        call: &'static str,
    },
    /// `locate<X>` where no Kind `X` is defined.
    #[error("locate<{kind}>: no Kind named '{kind}' is defined.")]
    UnknownKind {
        /// Generic argument.
        kind: String,
    },
    /// `locate<X>` with fewer than two arguments.
    #[error("locate<{kind}>: expected 2 arguments (root, members), got {got}.")]
    LocateArity {
        /// Generic argument.
        kind: String,
        /// Number of arguments passed.
        got: usize,
    },
    /// First `locate` argument is not a string literal.
    #[error("locate<{kind}>: root must be a string literal.")]
    RootNotString {
        /// Generic argument.
        kind: String,
    },
    /// Second `locate` argument is not an object literal.
    #[error("locate<{kind}>: members must be an object literal.")]
    MembersNotObject {
        /// Generic argument.
        kind: String,
    },
    /// A member value names a variable that is not declared in the file.
    #[error("locate<{kind}>: member '{member}' references unknown variable '{identifier}'.")]
    UnresolvedIdentifier {
        /// Generic argument.
        kind: String,
        /// Member whose value is the identifier.
        member: String,
        /// The identifier.
        identifier: String,
    },
    /// A member value refers back to a variable already being expanded.
    #[error("locate<{kind}>: member '{member}' refers to '{identifier}' recursively.")]
    RecursiveReference {
        /// Generic argument.
        kind: String,
        /// Member whose value is the identifier.
        member: String,
        /// The identifier.
        identifier: String,
    },
    /// `defineContracts<X>` with no Instance of `X`.
    #[error("defineContracts<{kind}>: no matching instance found for kind '{kind}'.")]
    NoInstance {
        /// Generic argument.
        kind: String,
    },
    /// `defineContracts<X>` whose argument is not an object literal.
    #[error("defineContracts<{kind}>: expected an object literal argument.")]
    ConfigNotObject {
        /// Generic argument.
        kind: String,
    },
    /// Property name that is not a contract type.
    #[error("defineContracts<{kind}>: unknown contract type '{key}'.")]
    UnknownContractType {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
    },
    /// Contract property whose value is not an array.
    #[error("defineContracts<{kind}>: '{key}' value must be an array.")]
    NotAnArray {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
    },
    /// Pairwise entry that is not an array.
    #[error("defineContracts<{kind}>: each '{key}' entry must be a [from, to] tuple.")]
    NotATuple {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
    },
    /// Pairwise entry with the wrong number of elements.
    #[error("defineContracts<{kind}>: {key} entry must have exactly 2 elements, got {got}.")]
    TupleArity {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
        /// Elements found.
        got: usize,
    },
    /// Pairwise entry with a non-string element.
    #[error("defineContracts<{kind}>: {key} entry elements must be string literals.")]
    TupleElementNotString {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
    },
    /// Individual or collective entry that is not a string literal.
    #[error("defineContracts<{kind}>: each '{key}' entry must be a string literal.")]
    EntryNotString {
        /// Generic argument.
        kind: String,
        /// Property name.
        key: String,
    },
    /// Reference that does not resolve inside the Instance.
    #[error("defineContracts<{kind}>: member '{member}' not found in instance '{instance}'.")]
    MemberNotFound {
        /// Generic argument.
        kind: String,
        /// Reference as written.
        member: String,
        /// Instance searched.
        instance: String,
    },
}

/// A [`ClassifyError`] together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyIssue {
    /// File holding the declaration.
    pub file: PathBuf,
    /// Line of the enclosing call (1-indexed).
    pub line: usize,
    /// Column of the enclosing call (1-indexed).
    pub column: usize,
    /// What went wrong.
    pub error: ClassifyError,
}

impl fmt::Display for ClassifyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.error
        )
    }
}

/// Output of a classification run.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Instances in discovery order, followed by one `Kind` symbol per Kind.
    pub symbols: Vec<Arc<ArchSymbol>>,
    /// Contracts in declaration order.
    pub contracts: Vec<Contract>,
    /// Malformed declarations.
    pub errors: Vec<ClassifyIssue>,
}

impl Classification {
    /// Returns the Instance symbols.
    pub fn instances(&self) -> impl Iterator<Item = &Arc<ArchSymbol>> {
        self.symbols
            .iter()
            .filter(|s| s.symbol_kind() == SymbolKind::Instance)
    }

    /// Returns true if any declaration was malformed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ────────────────────────────────────────────────────────────
// Kind definitions
// ────────────────────────────────────────────────────────────

#[derive(Debug)]
struct KindDef {
    name: String,
    /// First generic argument of `Kind<...>`, defaulting to `name`.
    literal: String,
    members: Vec<KindMember>,
}

#[derive(Debug)]
struct KindMember {
    name: String,
    kind_name: Option<String>,
}

/// Kinds by name, remembering first-declaration order.
#[derive(Debug, Default)]
struct KindTable {
    order: Vec<String>,
    defs: HashMap<String, KindDef>,
}

impl KindTable {
    fn insert(&mut self, def: KindDef) {
        if !self.defs.contains_key(&def.name) {
            self.order.push(def.name.clone());
        }
        self.defs.insert(def.name.clone(), def);
    }

    fn get(&self, name: &str) -> Option<&KindDef> {
        self.defs.get(name)
    }
}

/// Per-file variable initializers, used to substitute bare identifiers.
type VarMap<'a> = HashMap<&'a str, &'a Expr>;

fn var_map(view: &SourceView) -> VarMap<'_> {
    view.variables()
        .filter_map(|v| v.init.as_ref().map(|init| (v.name.as_str(), init)))
        .collect()
}

/// Classifies parsed views into symbols, contracts and errors.
#[derive(Debug, Clone)]
pub struct Classifier {
    project_root: PathBuf,
}

impl Classifier {
    /// Creates a classifier resolving relative roots against `project_root`.
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Runs all three passes over `views`.
    #[must_use]
    pub fn classify(&self, views: &[SourceView]) -> Classification {
        info!("Classifying {} definition file(s)", views.len());
        let mut out = Classification::default();

        let kinds = Self::collect_kinds(views);
        debug!("Found {} Kind definition(s)", kinds.order.len());

        let instances = self.collect_instances(views, &kinds, &mut out);
        debug!("Found {} instance(s)", instances.len());

        Self::collect_contracts(views, &instances, &mut out);
        debug!("Found {} contract(s)", out.contracts.len());

        for def in kinds.order.iter().filter_map(|name| kinds.get(name)) {
            debug!(kind = %def.name, literal = %def.literal, members = def.members.len(), "Kind symbol");
            out.symbols.push(Arc::new(ArchSymbol::kind(def.name.as_str())));
        }

        info!(
            "Classified {} symbol(s), {} contract(s), {} error(s)",
            out.symbols.len(),
            out.contracts.len(),
            out.errors.len()
        );
        out
    }

    // ── pass 1 ──────────────────────────────────────────────

    fn collect_kinds(views: &[SourceView]) -> KindTable {
        let mut table = KindTable::default();
        for view in views {
            for decl in view.interfaces() {
                let Some(marker) = decl.extends_marker(KIND_MARKER) else {
                    continue;
                };
                let literal = match marker.args.first() {
                    Some(TypeArg::StringLiteral(lit)) => lit.clone(),
                    _ => decl.name.clone(),
                };
                let members = decl
                    .members
                    .iter()
                    .map(|m| KindMember {
                        name: m.name.clone(),
                        kind_name: m.type_name.clone(),
                    })
                    .collect();
                debug!(kind = %decl.name, file = %view.file.display(), "Kind definition");
                table.insert(KindDef {
                    name: decl.name.clone(),
                    literal,
                    members,
                });
            }
        }
        table
    }

    // ── pass 2 ──────────────────────────────────────────────

    fn collect_instances(
        &self,
        views: &[SourceView],
        kinds: &KindTable,
        out: &mut Classification,
    ) -> HashMap<String, Arc<ArchSymbol>> {
        let mut by_kind = HashMap::new();
        for view in views {
            let vars = var_map(view);
            for (var_name, call) in view.calls() {
                if call.callee_name() != LOCATE {
                    continue;
                }
                let mut cx = FileCx {
                    file: &view.file,
                    call,
                    vars: &vars,
                    errors: &mut out.errors,
                };
                if let Some((kind_name, instance)) = self.locate(&mut cx, var_name, kinds) {
                    let instance = Arc::new(instance);
                    out.symbols.push(Arc::clone(&instance));
                    by_kind.insert(kind_name, instance);
                }
            }
        }
        by_kind
    }

    fn locate(
        &self,
        cx: &mut FileCx<'_, '_>,
        var_name: Option<&str>,
        kinds: &KindTable,
    ) -> Option<(String, ArchSymbol)> {
        let call = cx.call;
        let Some(kind_name) = call.type_args.first() else {
            cx.push(ClassifyError::MissingTypeArgument { call: LOCATE });
            return None;
        };
        let Some(kind) = kinds.get(kind_name) else {
            cx.push(ClassifyError::UnknownKind {
                kind: kind_name.clone(),
            });
            return None;
        };
        if call.args.len() < 2 {
            cx.push(ClassifyError::LocateArity {
                kind: kind_name.clone(),
                got: call.args.len(),
            });
            return None;
        }
        let Some(root) = call.args[0].as_str() else {
            cx.push(ClassifyError::RootNotString {
                kind: kind_name.clone(),
            });
            return None;
        };
        let Some(members) = cx.resolve(&call.args[1]).and_then(Expr::as_object) else {
            cx.push(ClassifyError::MembersNotObject {
                kind: kind_name.clone(),
            });
            return None;
        };

        let location = paths::resolve_root(&self.project_root, root);
        let mut builder = MemberBuilder {
            kinds,
            kind_name,
            expanding: Vec::new(),
        };
        let children = builder.build(cx, kind, &location, members);
        let name = var_name.unwrap_or(kind_name);
        debug!(instance = name, kind = %kind_name, location = %location.display(), "Instance");

        Some((
            kind_name.clone(),
            ArchSymbol::instance(name, location, kind_name.as_str(), children),
        ))
    }

    // ── pass 3 ──────────────────────────────────────────────

    fn collect_contracts(
        views: &[SourceView],
        instances: &HashMap<String, Arc<ArchSymbol>>,
        out: &mut Classification,
    ) {
        for view in views {
            let vars = var_map(view);
            for (_, call) in view.calls() {
                if call.callee_name() != DEFINE_CONTRACTS {
                    continue;
                }
                let mut cx = FileCx {
                    file: &view.file,
                    call,
                    vars: &vars,
                    errors: &mut out.errors,
                };
                Self::define_contracts(&mut cx, instances, &mut out.contracts);
            }
        }
    }

    fn define_contracts(
        cx: &mut FileCx<'_, '_>,
        instances: &HashMap<String, Arc<ArchSymbol>>,
        contracts: &mut Vec<Contract>,
    ) {
        let call = cx.call;
        let Some(kind_name) = call.type_args.first() else {
            cx.push(ClassifyError::MissingTypeArgument {
                call: DEFINE_CONTRACTS,
            });
            return;
        };
        let Some(instance) = instances.get(kind_name) else {
            cx.push(ClassifyError::NoInstance {
                kind: kind_name.clone(),
            });
            return;
        };
        let Some(config) = call
            .args
            .first()
            .and_then(|a| cx.resolve(a))
            .and_then(Expr::as_object)
        else {
            cx.push(ClassifyError::ConfigNotObject {
                kind: kind_name.clone(),
            });
            return;
        };

        let binder = ContractBinder {
            kind: kind_name,
            instance,
            source_file: cx.file,
        };
        for prop in config {
            binder.bind(cx, prop, contracts);
        }
    }
}

/// Per-call state shared by passes 2 and 3.
struct FileCx<'v, 'e> {
    file: &'v Path,
    call: &'v CallExpr,
    vars: &'v VarMap<'v>,
    errors: &'e mut Vec<ClassifyIssue>,
}

impl<'v> FileCx<'v, '_> {
    fn push(&mut self, error: ClassifyError) {
        self.errors.push(ClassifyIssue {
            file: self.file.to_path_buf(),
            line: self.call.line,
            column: self.call.column,
            error,
        });
    }

    /// Substitutes a bare identifier with its same-file initializer.
    fn resolve(&self, expr: &'v Expr) -> Option<&'v Expr> {
        match expr {
            Expr::Identifier(id) => self.vars.get(id.as_str()).copied(),
            other => Some(other),
        }
    }
}

// ────────────────────────────────────────────────────────────
// Member derivation
// ────────────────────────────────────────────────────────────

struct MemberBuilder<'k> {
    kinds: &'k KindTable,
    kind_name: &'k str,
    expanding: Vec<String>,
}

impl MemberBuilder<'_> {
    /// Derives one child per member of `kind`, located under `parent`.
    fn build<'v>(
        &mut self,
        cx: &mut FileCx<'v, '_>,
        kind: &KindDef,
        parent: &Path,
        values: &'v [Property],
    ) -> Vec<Arc<ArchSymbol>> {
        kind.members
            .iter()
            .map(|member| Arc::new(self.member(cx, member, parent, values)))
            .collect()
    }

    fn member<'v>(
        &mut self,
        cx: &mut FileCx<'v, '_>,
        member: &KindMember,
        parent: &Path,
        values: &'v [Property],
    ) -> ArchSymbol {
        let raw = find_property(values, &member.name);
        let mut expanded = false;
        let value = match raw {
            Some(Expr::Identifier(id)) if self.expanding.iter().any(|e| e == id) => {
                cx.push(ClassifyError::RecursiveReference {
                    kind: self.kind_name.to_owned(),
                    member: member.name.clone(),
                    identifier: id.clone(),
                });
                None
            }
            Some(expr @ Expr::Identifier(id)) => match cx.resolve(expr) {
                Some(resolved) => {
                    self.expanding.push(id.clone());
                    expanded = true;
                    Some(resolved)
                }
                None => {
                    cx.push(ClassifyError::UnresolvedIdentifier {
                        kind: self.kind_name.to_owned(),
                        member: member.name.clone(),
                        identifier: id.clone(),
                    });
                    None
                }
            },
            other => other,
        };
        let object = value.and_then(Expr::as_object);

        let segment = object
            .and_then(|props| find_property(props, PATH_OVERRIDE))
            .and_then(Expr::as_str)
            .unwrap_or(&member.name);
        let location = paths::join_location(parent, segment);

        let kinds = self.kinds;
        let child_kind = member.kind_name.as_deref().and_then(move |k| kinds.get(k));
        let children = match (child_kind, object) {
            (Some(child_kind), Some(props)) if !child_kind.members.is_empty() => {
                self.build(cx, child_kind, &location, props)
            }
            _ => Vec::new(),
        };

        if expanded {
            self.expanding.pop();
        }
        ArchSymbol::member(
            member.name.as_str(),
            location,
            member.kind_name.clone(),
            children,
        )
    }
}

// ────────────────────────────────────────────────────────────
// Contract binding
// ────────────────────────────────────────────────────────────

struct ContractBinder<'a> {
    kind: &'a str,
    instance: &'a Arc<ArchSymbol>,
    source_file: &'a Path,
}

impl ContractBinder<'_> {
    fn bind<'v>(&self, cx: &mut FileCx<'v, '_>, prop: &'v Property, out: &mut Vec<Contract>) {
        let Some(contract_type) = ContractType::from_key(&prop.name) else {
            cx.push(ClassifyError::UnknownContractType {
                kind: self.kind.to_owned(),
                key: prop.name.clone(),
            });
            return;
        };
        let Some(entries) = cx.resolve(&prop.value).and_then(Expr::as_array) else {
            cx.push(ClassifyError::NotAnArray {
                kind: self.kind.to_owned(),
                key: prop.name.clone(),
            });
            return;
        };

        match contract_type.shape() {
            ContractShape::Pairwise => self.pairwise(cx, contract_type, entries, out),
            ContractShape::Individual => self.individual(cx, contract_type, entries, out),
            ContractShape::Collective => self.collective(cx, contract_type, entries, out),
        }
    }

    fn pairwise(
        &self,
        cx: &mut FileCx<'_, '_>,
        contract_type: ContractType,
        entries: &[Expr],
        out: &mut Vec<Contract>,
    ) {
        let key = contract_type.key();
        for entry in entries {
            let Some(tuple) = entry.as_array() else {
                cx.push(ClassifyError::NotATuple {
                    kind: self.kind.to_owned(),
                    key: key.to_owned(),
                });
                continue;
            };
            if tuple.len() != 2 {
                cx.push(ClassifyError::TupleArity {
                    kind: self.kind.to_owned(),
                    key: key.to_owned(),
                    got: tuple.len(),
                });
                continue;
            }
            let (Some(from), Some(to)) = (tuple[0].as_str(), tuple[1].as_str()) else {
                cx.push(ClassifyError::TupleElementNotString {
                    kind: self.kind.to_owned(),
                    key: key.to_owned(),
                });
                continue;
            };
            // At most one missing member is reported per pair.
            let Some(from_sym) = self.lookup(cx, from) else {
                continue;
            };
            let Some(to_sym) = self.lookup(cx, to) else {
                continue;
            };
            out.push(Contract::new(
                contract_type,
                &[from, to],
                vec![from_sym, to_sym],
                self.source_file.to_path_buf(),
            ));
        }
    }

    fn individual(
        &self,
        cx: &mut FileCx<'_, '_>,
        contract_type: ContractType,
        entries: &[Expr],
        out: &mut Vec<Contract>,
    ) {
        for entry in entries {
            let Some(reference) = self.entry_str(cx, contract_type, entry) else {
                continue;
            };
            if let Some(symbol) = self.lookup(cx, reference) {
                out.push(Contract::new(
                    contract_type,
                    &[reference],
                    vec![symbol],
                    self.source_file.to_path_buf(),
                ));
            }
        }
    }

    fn collective(
        &self,
        cx: &mut FileCx<'_, '_>,
        contract_type: ContractType,
        entries: &[Expr],
        out: &mut Vec<Contract>,
    ) {
        let mut refs = Vec::new();
        let mut args = Vec::new();
        for entry in entries {
            let Some(reference) = self.entry_str(cx, contract_type, entry) else {
                continue;
            };
            if let Some(symbol) = self.lookup(cx, reference) {
                refs.push(reference);
                args.push(symbol);
            }
        }
        if !args.is_empty() {
            out.push(Contract::new(
                contract_type,
                &refs,
                args,
                self.source_file.to_path_buf(),
            ));
        }
    }

    fn entry_str<'e>(
        &self,
        cx: &mut FileCx<'_, '_>,
        contract_type: ContractType,
        entry: &'e Expr,
    ) -> Option<&'e str> {
        let s = entry.as_str();
        if s.is_none() {
            cx.push(ClassifyError::EntryNotString {
                kind: self.kind.to_owned(),
                key: contract_type.key().to_owned(),
            });
        }
        s
    }

    fn lookup(&self, cx: &mut FileCx<'_, '_>, reference: &str) -> Option<Arc<ArchSymbol>> {
        let found = self.instance.find_by_path(reference);
        if found.is_none() {
            cx.push(ClassifyError::MemberNotFound {
                kind: self.kind.to_owned(),
                member: reference.to_owned(),
                instance: self.instance.name().to_owned(),
            });
        }
        found
    }
}
