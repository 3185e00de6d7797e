//! Integration test: classification and checking end-to-end over an
//! in-memory project.
//!
//! Source views are built by hand and the import graph, declaration index
//! and file resolver are backed by maps, so every property here is
//! independent of any parser or filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kindlint_core::ports::{
    DeclSite, DeclarationIndex, FileResolver, ImportEdge, ImportGraph, ImportSpecifier,
};
use kindlint_core::view::{
    CallExpr, Expr, InterfaceDecl, Property, PropertySig, SourceView, Statement, TypeArg, TypeRef,
    VariableDecl,
};
use kindlint_core::{
    ArchSymbol, CheckContext, CheckReport, Classification, Classifier, Config, Contract,
    ContractChecker, ContractType, DiagnosticCode, SymbolKind,
};

const ROOT: &str = "/project";

// ── Fake collaborators ──

#[derive(Default)]
struct FakeProject {
    files: Vec<PathBuf>,
    imports: HashMap<PathBuf, Vec<ImportEdge>>,
    specifiers: HashMap<PathBuf, Vec<ImportSpecifier>>,
    interfaces: HashMap<PathBuf, Vec<DeclSite>>,
    implementations: HashMap<PathBuf, Vec<String>>,
}

impl FakeProject {
    fn file(mut self, path: &str) -> Self {
        self.files.push(PathBuf::from(path));
        self
    }

    fn import(mut self, from: &str, to: &str, line: usize) -> Self {
        let specifier = format!("./{}", Path::new(to).file_stem().unwrap().to_string_lossy());
        self.imports
            .entry(PathBuf::from(from))
            .or_default()
            .push(ImportEdge {
                target: PathBuf::from(to),
                line,
                column: 1,
                specifier: specifier.clone(),
            });
        self.specifier(from, &specifier, line)
    }

    fn specifier(mut self, from: &str, specifier: &str, line: usize) -> Self {
        self.specifiers
            .entry(PathBuf::from(from))
            .or_default()
            .push(ImportSpecifier {
                specifier: specifier.to_string(),
                line,
                column: 1,
                type_only: false,
            });
        self
    }

    fn interface(mut self, file: &str, name: &str, line: usize) -> Self {
        self.interfaces
            .entry(PathBuf::from(file))
            .or_default()
            .push(DeclSite {
                name: name.to_string(),
                line,
                column: 1,
            });
        self
    }

    fn implementation(mut self, file: &str, interface: &str) -> Self {
        self.implementations
            .entry(PathBuf::from(file))
            .or_default()
            .push(interface.to_string());
        self
    }

    fn check(&self, classification: &Classification) -> CheckReport {
        self.check_with(classification, &Config::default())
    }

    fn check_with(&self, classification: &Classification, config: &Config) -> CheckReport {
        ContractChecker::new(CheckContext {
            files: self,
            imports: self,
            declarations: self,
        })
        .with_config(config)
        .check(&classification.symbols, &classification.contracts)
    }
}

impl FileResolver for FakeProject {
    fn files_under(&self, location: &Path) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .files
            .iter()
            .filter(|f| f.starts_with(location))
            .cloned()
            .collect();
        files.sort();
        files
    }
}

impl ImportGraph for FakeProject {
    fn imports_of(&self, file: &Path) -> &[ImportEdge] {
        self.imports.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    fn specifiers_of(&self, file: &Path) -> &[ImportSpecifier] {
        self.specifiers.get(file).map(Vec::as_slice).unwrap_or_default()
    }
}

impl DeclarationIndex for FakeProject {
    fn exported_interfaces(&self, file: &Path) -> &[DeclSite] {
        self.interfaces.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    fn implements(&self, file: &Path, interface: &str) -> bool {
        self.implementations
            .get(file)
            .is_some_and(|names| names.iter().any(|n| n == interface))
    }
}

// ── Source view builders ──

fn kind(name: &str, members: &[(&str, &str)]) -> Statement {
    Statement::Interface(InterfaceDecl {
        name: name.to_string(),
        extends: vec![TypeRef {
            name: "Kind".to_string(),
            args: vec![TypeArg::StringLiteral(name.to_string())],
        }],
        members: members
            .iter()
            .map(|(n, t)| PropertySig::new(*n, Some(*t)))
            .collect(),
        line: 1,
    })
}

fn obj(props: Vec<(&str, Expr)>) -> Expr {
    Expr::Object(
        props
            .into_iter()
            .map(|(n, v)| Property::new(n, v))
            .collect(),
    )
}

fn strs(items: &[&str]) -> Expr {
    Expr::Array(items.iter().map(|s| Expr::string(*s)).collect())
}

fn pairs(items: &[(&str, &str)]) -> Expr {
    Expr::Array(items.iter().map(|(a, b)| strs(&[*a, *b])).collect())
}

fn call(callee: &str, kind: &str, args: Vec<Expr>, line: usize) -> CallExpr {
    CallExpr {
        callee: callee.to_string(),
        type_args: vec![kind.to_string()],
        args,
        line,
        column: 1,
    }
}

fn locate(var: &str, kind: &str, root: &str, members: Expr) -> Statement {
    Statement::Variable(VariableDecl {
        name: var.to_string(),
        type_name: None,
        init: Some(Expr::Call(call("locate", kind, vec![Expr::string(root), members], 10))),
    })
}

fn define_contracts(kind: &str, config: Expr) -> Statement {
    Statement::Expression(Expr::Call(call("defineContracts", kind, vec![config], 20)))
}

fn classify(views: &[SourceView]) -> Classification {
    Classifier::new(ROOT).classify(views)
}

/// `App { domain, infrastructure }` located at `src` plus the given contracts.
fn layered(contracts: Expr) -> Classification {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind(
            "App",
            &[("domain", "DomainLayer"), ("infrastructure", "InfraLayer")],
        ))
        .with(locate(
            "app",
            "App",
            "src",
            obj(vec![("domain", obj(vec![])), ("infrastructure", obj(vec![]))]),
        ))
        .with(define_contracts("App", contracts));
    classify(&[view])
}

fn layered_project() -> FakeProject {
    FakeProject::default()
        .file("/project/src/domain/service.ts")
        .file("/project/src/domain/user.ts")
        .file("/project/src/infrastructure/db.ts")
}

// ── Classification ──

#[test]
fn round_trip_counts() {
    let result = layered(obj(vec![(
        "noDependency",
        pairs(&[("domain", "infrastructure")]),
    )]));

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let kinds: Vec<_> = result
        .symbols
        .iter()
        .filter(|s| s.symbol_kind() == SymbolKind::Kind)
        .collect();
    assert_eq!(kinds.len(), 1);
    assert_eq!(kinds[0].name(), "App");

    let instances: Vec<_> = result.instances().collect();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].children().len(), 2);
    assert_eq!(instances[0].declared_kind(), Some("App"));

    assert_eq!(result.contracts.len(), 1);
    assert_eq!(result.contracts[0].contract_type, ContractType::NoDependency);
    assert_eq!(
        result.contracts[0].label,
        "noDependency(domain -> infrastructure)"
    );
    assert_eq!(
        result.contracts[0].source_file,
        PathBuf::from("/project/architecture.ts")
    );
}

#[test]
fn path_derivation_with_override() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind(
            "App",
            &[("domain", "DomainLayer"), ("infrastructure", "InfraLayer")],
        ))
        .with(locate(
            "app",
            "App",
            "src",
            obj(vec![
                ("domain", obj(vec![])),
                (
                    "infrastructure",
                    obj(vec![("path", Expr::string("infra"))]),
                ),
            ]),
        ));
    let result = classify(&[view]);
    let app = result.instances().next().expect("instance");

    assert_eq!(app.location(), Some(Path::new("/project/src")));
    let domain = app.child("domain").expect("domain");
    assert_eq!(domain.location(), Some(Path::new("/project/src/domain")));
    assert!(domain.is_location_derived());
    assert_eq!(domain.declared_kind(), Some("DomainLayer"));
    let infra = app.child("infrastructure").expect("infrastructure");
    assert_eq!(infra.location(), Some(Path::new("/project/src/infra")));
}

#[test]
fn override_cannot_escape_parent() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind(
            "App",
            &[("domain", "DomainLayer"), ("infrastructure", "InfraLayer")],
        ))
        .with(locate(
            "app",
            "App",
            "src",
            obj(vec![
                ("domain", obj(vec![("path", Expr::string("../../core"))])),
                (
                    "infrastructure",
                    obj(vec![("path", Expr::string("/infra"))]),
                ),
            ]),
        ));
    let result = classify(&[view]);
    let app = result.instances().next().expect("instance");
    let parent = app.location().expect("root location");

    for child in app.children() {
        let location = child.location().expect("member location");
        assert!(location.starts_with(parent), "{} escaped", location.display());
    }
    let infra = app.child("infrastructure").expect("infrastructure");
    assert_eq!(infra.location(), Some(Path::new("/project/src/infra")));
    let domain = app.child("domain").expect("domain");
    assert_eq!(domain.location(), Some(Path::new("/project/src/core")));
}

#[test]
fn nested_members_and_variable_substitution() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("Ctx", &[("domain", "DomainLayer"), ("infra", "InfraLayer")]))
        .with(kind(
            "DomainLayer",
            &[("entities", "EntitiesModule"), ("valueObjects", "VoModule")],
        ))
        .with(Statement::Variable(VariableDecl {
            name: "domain".to_string(),
            type_name: Some("DomainLayer".to_string()),
            init: Some(obj(vec![
                ("entities", obj(vec![])),
                (
                    "valueObjects",
                    obj(vec![("path", Expr::string("value-objects"))]),
                ),
            ])),
        }))
        .with(locate(
            "app",
            "Ctx",
            "src",
            obj(vec![
                ("domain", Expr::Identifier("domain".to_string())),
                ("infra", obj(vec![])),
            ]),
        ));
    let result = classify(&[view]);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let app = result.instances().next().expect("instance");
    let entities = app.find_by_path("domain/entities").expect("entities");
    assert_eq!(
        entities.location(),
        Some(Path::new("/project/src/domain/entities"))
    );
    assert_eq!(entities.declared_kind(), Some("EntitiesModule"));
    let vo = app.find_by_path("domain.valueObjects").expect("valueObjects");
    assert_eq!(
        vo.location(),
        Some(Path::new("/project/src/domain/value-objects"))
    );
    assert!(app.find_by_path("infra").expect("infra").is_leaf());
}

#[test]
fn no_recursion_without_object_literal() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("Ctx", &[("domain", "DomainLayer")]))
        .with(kind("DomainLayer", &[("entities", "EntitiesModule")]))
        .with(locate(
            "app",
            "Ctx",
            "src",
            obj(vec![("domain", Expr::string("ignored"))]),
        ));
    let result = classify(&[view]);
    let app = result.instances().next().expect("instance");
    assert!(app.child("domain").expect("domain").is_leaf());
}

#[test]
fn declarations_split_across_files_in_any_order() {
    let contracts = SourceView::new("/project/contracts.ts").with(define_contracts(
        "App",
        obj(vec![("noDependency", pairs(&[("domain", "infrastructure")]))]),
    ));
    let instance = SourceView::new("/project/architecture.ts").with(locate(
        "app",
        "App",
        "src",
        obj(vec![]),
    ));
    let kinds = SourceView::new("/project/kinds.ts").with(kind(
        "App",
        &[("domain", "DomainLayer"), ("infrastructure", "InfraLayer")],
    ));

    let result = classify(&[contracts, instance, kinds]);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.contracts.len(), 1);
    assert_eq!(result.contracts[0].args[0].name(), "domain");
    assert_eq!(result.contracts[0].args[1].name(), "infrastructure");
    assert_eq!(
        result.contracts[0].source_file,
        PathBuf::from("/project/contracts.ts")
    );
}

#[test]
fn define_contracts_without_instance_is_an_error() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("App", &[]))
        .with(define_contracts("App", obj(vec![])));
    let result = classify(&[view]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].error.to_string(),
        "defineContracts<App>: no matching instance found for kind 'App'."
    );
    assert_eq!(result.errors[0].line, 20);
}

#[test]
fn error_isolation() {
    let result = layered(obj(vec![
        ("noDependency", pairs(&[("domain", "infrastructure")])),
        ("noSuchRule", strs(&["domain"])),
        ("purity", strs(&["domain", "missing", "infrastructure"])),
    ]));

    let messages: Vec<String> = result.errors.iter().map(|e| e.error.to_string()).collect();
    assert_eq!(
        messages,
        [
            "defineContracts<App>: unknown contract type 'noSuchRule'.",
            "defineContracts<App>: member 'missing' not found in instance 'app'.",
        ]
    );
    let labels: Vec<_> = result.contracts.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "noDependency(domain -> infrastructure)",
            "purity(domain)",
            "purity(infrastructure)",
        ]
    );
}

#[test]
fn collective_contract_skips_unresolved_entries() {
    let result = layered(obj(vec![(
        "noCycles",
        strs(&["domain", "ghost", "infrastructure"]),
    )]));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.contracts.len(), 1);
    assert_eq!(result.contracts[0].args.len(), 2);
    assert_eq!(result.contracts[0].label, "noCycles(domain, infrastructure)");
}

// ── Checking ──

#[test]
fn dependency_violation() {
    let classification = layered(obj(vec![(
        "noDependency",
        pairs(&[("domain", "infrastructure")]),
    )]));
    let project = layered_project().import(
        "/project/src/domain/service.ts",
        "/project/src/infrastructure/db.ts",
        3,
    );

    let report = project.check(&classification);
    assert_eq!(report.contracts_checked, 1);
    assert_eq!(report.violations_found, 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::ForbiddenDependency);
    assert_eq!(d.file, PathBuf::from("/project/src/domain/service.ts"));
    assert_eq!((d.line, d.column), (3, 1));
    assert!(d.message.contains("domain"));
    assert!(d.message.contains("infrastructure"));
    assert_eq!(
        d.contract.as_deref(),
        Some("noDependency(domain -> infrastructure)")
    );
}

#[test]
fn dependency_report_text() {
    let classification = layered(obj(vec![(
        "noDependency",
        pairs(&[("domain", "infrastructure")]),
    )]));
    let project = layered_project().import(
        "/project/src/domain/service.ts",
        "/project/src/infrastructure/db.ts",
        3,
    );

    let report = project.check(&classification);
    insta::assert_snapshot!(report.format_report().trim_end(), @r"
    KS70001 forbidden-dependency at /project/src/domain/service.ts:3:1
      error: Forbidden dependency: domain → infrastructure (/project/src/domain/service.ts → /project/src/infrastructure/db.ts)
      = contract: noDependency(domain -> infrastructure)

    Found 1 violation(s) in 1 contract(s)
    ");
}

#[test]
fn reverse_dependency_is_allowed() {
    let classification = layered(obj(vec![(
        "noDependency",
        pairs(&[("domain", "infrastructure")]),
    )]));
    let project = layered_project()
        .import(
            "/project/src/infrastructure/db.ts",
            "/project/src/domain/user.ts",
            1,
        )
        .import("/project/src/domain/service.ts", "/project/src/domain/user.ts", 1);

    let report = project.check(&classification);
    assert_eq!(report.violations_found, 0);
    assert_eq!(report.contracts_checked, 1);
    assert!(!report.has_violations());
}

#[test]
fn purity_flags_builtins_only() {
    let classification = layered(obj(vec![("purity", strs(&["domain"]))]));
    let project = layered_project()
        .specifier("/project/src/domain/service.ts", "node:fs", 2)
        .specifier("/project/src/domain/service.ts", "lodash", 3)
        .specifier("/project/src/domain/user.ts", "path", 1)
        .specifier("/project/src/infrastructure/db.ts", "crypto", 1);

    let report = project.check(&classification);
    let impure = report.by_code(DiagnosticCode::ImpureImport);
    assert_eq!(impure.len(), 2);
    assert_eq!(impure[0].message, "Impure import in 'domain': 'node:fs'");
    assert_eq!(impure[0].line, 2);
    assert_eq!(impure[1].file, PathBuf::from("/project/src/domain/user.ts"));
}

#[test]
fn purity_clean() {
    let classification = layered(obj(vec![("purity", strs(&["domain"]))]));
    let project = layered_project().specifier("/project/src/domain/user.ts", "./service", 1);
    let report = project.check(&classification);
    assert_eq!(report.violations_found, 0);
}

fn three_layers(contracts: Expr) -> Classification {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("App", &[("a", "A"), ("b", "B"), ("c", "C")]))
        .with(locate("app", "App", "src", obj(vec![])))
        .with(define_contracts("App", contracts));
    classify(&[view])
}

fn cyclic_project(close_cycle: bool) -> FakeProject {
    let project = FakeProject::default()
        .file("/project/src/a/a.ts")
        .file("/project/src/b/b.ts")
        .file("/project/src/c/c.ts")
        .import("/project/src/a/a.ts", "/project/src/b/b.ts", 1)
        .import("/project/src/b/b.ts", "/project/src/c/c.ts", 2);
    if close_cycle {
        project.import("/project/src/c/c.ts", "/project/src/a/a.ts", 3)
    } else {
        project
    }
}

#[test]
fn cycle_detection() {
    let classification = three_layers(obj(vec![("noCycles", strs(&["a", "b", "c"]))]));
    let report = cyclic_project(true).check(&classification);

    assert!(report.violations_found >= 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::CircularDependency);
    assert_eq!(d.message, "Circular dependency detected: a → b → c → a");
    assert_eq!(d.file, PathBuf::from("/project/src/a/a.ts"));
    assert_eq!(d.line, 1);
}

#[test]
fn breaking_one_edge_removes_the_cycle() {
    let classification = three_layers(obj(vec![("noCycles", strs(&["a", "b", "c"]))]));
    let report = cyclic_project(false).check(&classification);
    assert_eq!(report.violations_found, 0);
    assert_eq!(report.contracts_checked, 1);
}

#[test]
fn cycle_outside_the_listed_symbols_is_ignored() {
    let classification = three_layers(obj(vec![("noCycles", strs(&["a", "b"]))]));
    let report = cyclic_project(true).check(&classification);
    assert_eq!(report.violations_found, 0);
}

#[test]
fn repeated_symbol_is_not_a_cycle() {
    let classification = three_layers(obj(vec![("noCycles", strs(&["a", "a"]))]));
    let project = FakeProject::default()
        .file("/project/src/a/x.ts")
        .file("/project/src/a/y.ts")
        .import("/project/src/a/x.ts", "/project/src/a/y.ts", 1)
        .import("/project/src/a/y.ts", "/project/src/a/x.ts", 1);

    let report = project.check(&classification);
    assert_eq!(report.violations_found, 0);
    assert_eq!(report.contracts_checked, 1);
}

#[test]
fn must_implement() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("App", &[("ports", "Ports"), ("adapters", "Adapters")]))
        .with(locate("app", "App", "src", obj(vec![])))
        .with(define_contracts(
            "App",
            obj(vec![("mustImplement", pairs(&[("ports", "adapters")]))]),
        ));
    let classification = classify(&[view]);
    let project = FakeProject::default()
        .file("/project/src/ports/repo.ts")
        .file("/project/src/adapters/pg-repo.ts")
        .interface("/project/src/ports/repo.ts", "UserRepository", 1)
        .interface("/project/src/ports/repo.ts", "Clock", 5)
        .implementation("/project/src/adapters/pg-repo.ts", "UserRepository");

    let report = project.check(&classification);
    assert_eq!(report.violations_found, 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::MissingImplementation);
    assert_eq!(d.line, 5);
    assert_eq!(
        d.message,
        "Port 'Clock' has no corresponding adapter implementation (expected in '/project/src/adapters')"
    );
}

#[test]
fn colocated() {
    let view = SourceView::new("/project/architecture.ts")
        .with(kind("App", &[("ui", "Ui"), ("tests", "Tests")]))
        .with(locate("app", "App", "src", obj(vec![])))
        .with(define_contracts(
            "App",
            obj(vec![("colocated", pairs(&[("ui", "tests")]))]),
        ));
    let classification = classify(&[view]);
    let project = FakeProject::default()
        .file("/project/src/ui/forms/login.tsx")
        .file("/project/src/ui/form.ts")
        .file("/project/src/tests/forms/login.ts");

    let report = project.check(&classification);
    assert_eq!(report.violations_found, 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::MissingCounterpart);
    assert_eq!(d.file, PathBuf::from("/project/src/ui/form.ts"));
    assert_eq!((d.line, d.column), (1, 1));
    assert_eq!(
        d.message,
        "File '/project/src/ui/form.ts' has no counterpart at '/project/src/tests/form'"
    );
}

#[test]
fn malformed_contract_is_reported_and_counted() {
    let domain = Arc::new(ArchSymbol::member(
        "domain",
        PathBuf::from("/project/src/domain"),
        None,
        vec![],
    ));
    let classification = Classification {
        symbols: vec![],
        contracts: vec![
            Contract::new(
                ContractType::NoDependency,
                &["domain"],
                vec![Arc::clone(&domain)],
                PathBuf::from("/project/architecture.ts"),
            ),
            Contract::new(
                ContractType::Purity,
                &["domain"],
                vec![domain],
                PathBuf::from("/project/architecture.ts"),
            ),
        ],
        errors: vec![],
    };
    let project = layered_project().specifier("/project/src/domain/user.ts", "fs", 1);

    let report = project.check(&classification);
    assert_eq!(report.contracts_checked, 2);
    assert_eq!(report.violations_found, 2);
    assert_eq!(report.diagnostics[0].code, DiagnosticCode::InvalidContract);
    assert_eq!(
        report.diagnostics[0].message,
        "Invalid contract 'noDependency(domain)': noDependency requires exactly 2 arguments (from, to), got 1"
    );
    assert_eq!(report.diagnostics[0].file, PathBuf::from("/project/architecture.ts"));
    assert_eq!(report.diagnostics[1].code, DiagnosticCode::ImpureImport);
}

#[test]
fn unlocated_symbol_produces_nothing() {
    let classification = Classification {
        symbols: vec![],
        contracts: vec![Contract::new(
            ContractType::Purity,
            &["App"],
            vec![Arc::new(ArchSymbol::kind("App"))],
            PathBuf::from("/project/architecture.ts"),
        )],
        errors: vec![],
    };
    let project = layered_project().specifier("/project/src/domain/user.ts", "fs", 1);
    let report = project.check(&classification);
    assert_eq!(report.contracts_checked, 1);
    assert_eq!(report.violations_found, 0);
}

#[test]
fn disabled_contract_types_are_skipped() {
    let classification = layered(obj(vec![
        ("noDependency", pairs(&[("domain", "infrastructure")])),
        ("purity", strs(&["domain"])),
    ]));
    let project = layered_project()
        .import(
            "/project/src/domain/service.ts",
            "/project/src/infrastructure/db.ts",
            3,
        )
        .specifier("/project/src/domain/user.ts", "fs", 1);
    let config = Config::parse("[contracts.purity]\nenabled = false\n").expect("config");

    let report = project.check_with(&classification, &config);
    assert_eq!(report.contracts_checked, 1);
    assert_eq!(report.violations_found, 1);
    assert_eq!(report.diagnostics[0].code, DiagnosticCode::ForbiddenDependency);
}

#[test]
fn errors_do_not_suppress_diagnostics() {
    let classification = layered(obj(vec![
        ("noDependency", pairs(&[("domain", "nowhere"), ("domain", "infrastructure")])),
    ]));
    assert_eq!(classification.errors.len(), 1);
    let project = layered_project().import(
        "/project/src/domain/service.ts",
        "/project/src/infrastructure/db.ts",
        3,
    );
    let report = project.check(&classification);
    assert_eq!(report.violations_found, 1);
}
