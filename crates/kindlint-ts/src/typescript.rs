//! TypeScript language extractor using Tree-sitter.

use std::path::Path;

use kindlint_core::view::{
    CallExpr, Expr, InterfaceDecl, Property, PropertySig, Statement, TypeArg, TypeRef,
    VariableDecl,
};
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{
    DeclInfo, DeclKind, ExtractError, FileAnalysis, ImportInfo, LanguageExtractor,
};

/// Lowers `.ts` and `.tsx` sources into source views, imports and
/// declarations.
pub struct TypeScriptExtractor {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptExtractor {
    /// Creates a new TypeScript extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn language_for(&self, path: &Path) -> &Language {
        if path.extension().is_some_and(|ext| ext == "tsx") {
            &self.tsx
        } else {
            &self.typescript
        }
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".ts", ".tsx"]
    }

    fn analyze(&self, path: &Path, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(self.language_for(path))?;
        let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Parse {
            path: path.to_path_buf(),
        })?;

        let src = source.as_bytes();
        let mut analysis = FileAnalysis::empty(path);
        for node in named_children(&tree.root_node()) {
            lower_statement(&node, src, false, &mut analysis);
        }
        Ok(analysis)
    }
}

// ── Statements ──

fn lower_statement(node: &Node<'_>, src: &[u8], exported: bool, out: &mut FileAnalysis) {
    match node.kind() {
        "import_statement" => {
            if let Some(import) = import_of(node, src) {
                out.imports.push(import);
            }
            out.view.statements.push(Statement::Other);
        }
        "export_statement" => lower_export(node, src, out),
        "interface_declaration" => match interface_of(node, src) {
            Some(decl) => {
                let (line, column) = position(node);
                out.declarations.push(DeclInfo {
                    line,
                    column,
                    name: decl.name.clone(),
                    kind: DeclKind::Interface,
                    exported,
                    implements: Vec::new(),
                });
                out.view.statements.push(Statement::Interface(decl));
            }
            None => out.view.statements.push(Statement::Other),
        },
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(class) = class_of(node, src, exported) {
                out.declarations.push(class);
            }
            out.view.statements.push(Statement::Other);
        }
        "lexical_declaration" | "variable_declaration" => {
            for declarator in named_children(node) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                match variable_of(&declarator, src) {
                    Some(var) => out.view.statements.push(Statement::Variable(var)),
                    None => out.view.statements.push(Statement::Other),
                }
            }
        }
        "expression_statement" => {
            let expr = named_children(node)
                .first()
                .map_or(Expr::Other, |e| lower_expr(e, src));
            out.view.statements.push(Statement::Expression(expr));
        }
        _ => out.view.statements.push(Statement::Other),
    }
}

fn lower_export(node: &Node<'_>, src: &[u8], out: &mut FileAnalysis) {
    // export { x } from "./y"
    if let Some(source) = node.child_by_field_name("source") {
        let (line, column) = position(node);
        out.imports.push(ImportInfo {
            line,
            column,
            specifier: unquote(text(&source, src)).to_owned(),
            type_only: has_type_keyword(node),
        });
    }

    if let Some(decl) = node.child_by_field_name("declaration") {
        lower_statement(&decl, src, true, out);
    } else if let Some(value) = node.child_by_field_name("value") {
        out.view
            .statements
            .push(Statement::Expression(lower_expr(&value, src)));
    } else {
        out.view.statements.push(Statement::Other);
    }
}

fn import_of(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
    let source = node.child_by_field_name("source")?;
    let (line, column) = position(node);
    Some(ImportInfo {
        line,
        column,
        specifier: unquote(text(&source, src)).to_owned(),
        type_only: has_type_keyword(node),
    })
}

/// `import type` / `export type` put an anonymous `type` token directly
/// under the statement.
fn has_type_keyword(node: &Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "type");
    found
}

// ── Declarations ──

fn interface_of(node: &Node<'_>, src: &[u8]) -> Option<InterfaceDecl> {
    let name = text(&node.child_by_field_name("name")?, src).to_owned();

    let mut extends = Vec::new();
    for child in named_children(node) {
        if child.kind() == "extends_type_clause" {
            extends.extend(
                named_children(&child)
                    .iter()
                    .filter_map(|ty| type_ref(ty, src)),
            );
        }
    }

    let members = node
        .child_by_field_name("body")
        .map(|body| property_signatures(&body, src))
        .unwrap_or_default();

    Some(InterfaceDecl {
        name,
        extends,
        members,
        line: node.start_position().row + 1,
    })
}

fn property_signatures(body: &Node<'_>, src: &[u8]) -> Vec<PropertySig> {
    named_children(body)
        .iter()
        .filter(|child| child.kind() == "property_signature")
        .filter_map(|sig| {
            let name = property_key(&sig.child_by_field_name("name")?, src)?;
            let type_name = sig
                .child_by_field_name("type")
                .and_then(|annotation| annotated_type(&annotation, src));
            Some(PropertySig { name, type_name })
        })
        .collect()
}

fn class_of(node: &Node<'_>, src: &[u8], exported: bool) -> Option<DeclInfo> {
    let name = text(&node.child_by_field_name("name")?, src).to_owned();

    let mut implements = Vec::new();
    for heritage in named_children(node) {
        if heritage.kind() != "class_heritage" {
            continue;
        }
        for clause in named_children(&heritage) {
            if clause.kind() == "implements_clause" {
                implements.extend(
                    named_children(&clause)
                        .iter()
                        .filter_map(|ty| type_ref(ty, src))
                        .map(|t| t.simple_name().to_owned()),
                );
            }
        }
    }

    let (line, column) = position(node);
    Some(DeclInfo {
        line,
        column,
        name,
        kind: DeclKind::Class,
        exported,
        implements,
    })
}

fn variable_of(declarator: &Node<'_>, src: &[u8]) -> Option<VariableDecl> {
    let name = declarator.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }
    Some(VariableDecl {
        name: text(&name, src).to_owned(),
        type_name: declarator
            .child_by_field_name("type")
            .and_then(|annotation| annotated_type(&annotation, src)),
        init: declarator
            .child_by_field_name("value")
            .map(|value| lower_expr(&value, src)),
    })
}

// ── Types ──

fn type_ref(node: &Node<'_>, src: &[u8]) -> Option<TypeRef> {
    match node.kind() {
        "type_identifier" | "nested_type_identifier" => Some(TypeRef::named(text(node, src))),
        "generic_type" => {
            let name = text(&node.child_by_field_name("name")?, src);
            let args = node
                .child_by_field_name("type_arguments")
                .map(|args| {
                    named_children(&args)
                        .iter()
                        .map(|arg| type_arg(arg, src))
                        .collect()
                })
                .unwrap_or_default();
            Some(TypeRef {
                name: name.to_owned(),
                args,
            })
        }
        _ => None,
    }
}

fn type_arg(node: &Node<'_>, src: &[u8]) -> TypeArg {
    match node.kind() {
        "literal_type" => match named_children(node).first() {
            Some(lit) if lit.kind() == "string" => {
                TypeArg::StringLiteral(unquote(text(lit, src)).to_owned())
            }
            _ => TypeArg::Other,
        },
        "string" => TypeArg::StringLiteral(unquote(text(node, src)).to_owned()),
        _ => type_name(node, src).map_or(TypeArg::Other, TypeArg::Named),
    }
}

/// Name of a plain type reference; `None` for builtins, unions and the like.
fn type_name(node: &Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" | "nested_type_identifier" => Some(text(node, src).to_owned()),
        "generic_type" => node
            .child_by_field_name("name")
            .map(|name| text(&name, src).to_owned()),
        _ => None,
    }
}

/// Unwraps a `type_annotation` (`: T`).
fn annotated_type(annotation: &Node<'_>, src: &[u8]) -> Option<String> {
    if annotation.kind() == "type_annotation" {
        type_name(named_children(annotation).first()?, src)
    } else {
        type_name(annotation, src)
    }
}

// ── Expressions ──

fn lower_expr(node: &Node<'_>, src: &[u8]) -> Expr {
    match node.kind() {
        "string" => Expr::String(unquote(text(node, src)).to_owned()),
        "template_string" => {
            if named_children(node)
                .iter()
                .any(|c| c.kind() == "template_substitution")
            {
                Expr::Other
            } else {
                Expr::String(unquote(text(node, src)).to_owned())
            }
        }
        "identifier" => Expr::Identifier(text(node, src).to_owned()),
        "object" => Expr::Object(properties(node, src)),
        "array" => Expr::Array(
            named_children(node)
                .iter()
                .map(|item| lower_expr(item, src))
                .collect(),
        ),
        "call_expression" => call_of(node, src).map_or(Expr::Other, Expr::Call),
        "as_expression" | "satisfies_expression" | "parenthesized_expression"
        | "non_null_expression" => named_children(node)
            .first()
            .map_or(Expr::Other, |inner| lower_expr(inner, src)),
        _ => Expr::Other,
    }
}

fn properties(object: &Node<'_>, src: &[u8]) -> Vec<Property> {
    let mut props = Vec::new();
    for child in named_children(object) {
        match child.kind() {
            "pair" => {
                let key = child
                    .child_by_field_name("key")
                    .and_then(|key| property_key(&key, src));
                let value = child.child_by_field_name("value");
                if let (Some(key), Some(value)) = (key, value) {
                    props.push(Property::new(key, lower_expr(&value, src)));
                }
            }
            "shorthand_property_identifier" => {
                let name = text(&child, src);
                props.push(Property::new(name, Expr::Identifier(name.to_owned())));
            }
            _ => {}
        }
    }
    props
}

fn property_key(key: &Node<'_>, src: &[u8]) -> Option<String> {
    match key.kind() {
        "property_identifier" | "identifier" | "number" => Some(text(key, src).to_owned()),
        "string" => Some(unquote(text(key, src)).to_owned()),
        _ => None,
    }
}

fn call_of(node: &Node<'_>, src: &[u8]) -> Option<CallExpr> {
    let callee = text(&node.child_by_field_name("function")?, src).to_owned();
    let type_args = node
        .child_by_field_name("type_arguments")
        .map(|args| {
            named_children(&args)
                .iter()
                .map(|ty| type_name(ty, src).unwrap_or_else(|| text(ty, src).to_owned()))
                .collect()
        })
        .unwrap_or_default();
    let args = node
        .child_by_field_name("arguments")
        .filter(|args| args.kind() == "arguments")
        .map(|args| {
            named_children(&args)
                .iter()
                .map(|arg| lower_expr(arg, src))
                .collect()
        })
        .unwrap_or_default();

    let (line, column) = position(node);
    Some(CallExpr {
        callee,
        type_args,
        args,
        line,
        column,
    })
}

// ── Helpers ──

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

/// Named children without comments.
fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

fn position(node: &Node<'_>) -> (usize, usize) {
    let start = node.start_position();
    (start.row + 1, start.column + 1)
}

fn unquote(raw: &str) -> &str {
    raw.strip_prefix(['"', '\'', '`'])
        .and_then(|s| s.strip_suffix(['"', '\'', '`']))
        .unwrap_or(raw)
}
