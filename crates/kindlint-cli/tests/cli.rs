//! Integration test: the `kindlint` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn kindlint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kindlint"))
        .args(args)
        .current_dir(dir)
        .env("KINDLINT_CONFIG_DIR", dir.join("no-global"))
        .env_remove("KINDLINT_CONFIG")
        .output()
        .unwrap()
}

fn project(domain_source: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "architecture.ts",
        r#"
interface Domain extends Kind<"Domain"> {}
interface Infra extends Kind<"Infra"> {}
interface App extends Kind<"App"> { domain: Domain; infra: Infra; }
export const app = locate<App>("src", { domain: {}, infra: {} });
export default defineContracts<App>({ noDependency: [["domain", "infra"]] });
"#,
    );
    write(tmp.path(), "src/domain/order.ts", domain_source);
    write(tmp.path(), "src/infra/db.ts", "export const db = {};\n");
    tmp
}

#[test]
fn check_passes_on_clean_project() {
    let tmp = project("export const order = 1;\n");
    let out = kindlint(tmp.path(), &["check", "--format", "compact"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn check_fails_with_diagnostics() {
    let tmp = project("import { db } from \"../infra/db\";\n");
    let out = kindlint(tmp.path(), &["check", "--format", "compact"]);
    assert_eq!(out.status.code(), Some(1));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("src/domain/order.ts:1:1: error [KS70001] Forbidden dependency: domain"));
}

#[test]
fn check_json_output() {
    let tmp = project("import { db } from \"../infra/db\";\n");
    let out = kindlint(tmp.path(), &["check", "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["files_analyzed"], 3);
    assert_eq!(value["diagnostics"][0]["code"], 70001);
}

#[test]
fn check_honours_project_config() {
    let tmp = project("import { db } from \"../infra/db\";\n");
    write(
        tmp.path(),
        "kindlint.toml",
        "[contracts.noDependency]\nenabled = false\n",
    );
    let out = kindlint(tmp.path(), &["check"]);
    assert!(out.status.success());
}

#[test]
fn symbols_prints_tree() {
    let tmp = project("export const order = 1;\n");
    let out = kindlint(tmp.path(), &["symbols"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("instance app (App) @ src\n"));
    assert!(stdout.contains("  member domain (Domain) @ src/domain\n"));
    assert!(stdout.contains("noDependency(domain -> infra)"));
}

#[test]
fn list_contracts_names_every_type() {
    let tmp = TempDir::new().unwrap();
    let out = kindlint(tmp.path(), &["list-contracts"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    for key in ["noDependency", "mustImplement", "purity", "noCycles", "colocated"] {
        assert!(stdout.contains(key), "missing {key}");
    }
}

#[test]
fn init_writes_config_once() {
    let tmp = TempDir::new().unwrap();
    assert!(kindlint(tmp.path(), &["init"]).status.success());
    assert!(tmp.path().join("kindlint.toml").exists());
    assert!(!kindlint(tmp.path(), &["init"]).status.success());
    assert!(kindlint(tmp.path(), &["init", "--force"]).status.success());
}
