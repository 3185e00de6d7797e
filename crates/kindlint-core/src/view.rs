//! Language-neutral view of a parsed source file.
//!
//! Front ends lower their syntax trees into these types; the classifier
//! only ever reads a [`SourceView`]. Anything the classifier has no use
//! for is collapsed into an `Other` variant.

use std::path::PathBuf;

/// The statements of one parsed file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceView {
    /// Absolute path of the file.
    pub file: PathBuf,
    /// Top-level statements.
    pub statements: Vec<Statement>,
}

impl SourceView {
    /// Creates an empty view for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            statements: Vec::new(),
        }
    }

    /// Appends a statement, builder style.
    #[must_use]
    pub fn with(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    /// Interface declarations in source order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Interface(i) => Some(i),
            _ => None,
        })
    }

    /// Variable declarations in source order.
    pub fn variables(&self) -> impl Iterator<Item = &VariableDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Variable(v) => Some(v),
            _ => None,
        })
    }

    /// Top-level calls, paired with the variable they initialize if any.
    ///
    /// Covers `const x = f(...)` and bare `f(...)` / `export default f(...)`.
    pub fn calls(&self) -> impl Iterator<Item = (Option<&str>, &CallExpr)> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Variable(VariableDecl {
                name,
                init: Some(Expr::Call(call)),
                ..
            }) => Some((Some(name.as_str()), call)),
            Statement::Expression(Expr::Call(call)) => Some((None, call)),
            _ => None,
        })
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `interface X extends Y<...> { ... }`
    Interface(InterfaceDecl),
    /// One declarator of a `const`/`let`/`var` statement.
    Variable(VariableDecl),
    /// An expression statement, including `export default <expr>`.
    Expression(Expr),
    /// Anything else.
    Other,
}

/// A structural type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Declared name.
    pub name: String,
    /// Types listed in the `extends` clause.
    pub extends: Vec<TypeRef>,
    /// Property signatures in the body.
    pub members: Vec<PropertySig>,
    /// Line of the declaration (1-indexed).
    pub line: usize,
}

impl InterfaceDecl {
    /// Finds an `extends` entry whose last name segment is `marker`.
    #[must_use]
    pub fn extends_marker(&self, marker: &str) -> Option<&TypeRef> {
        self.extends.iter().find(|t| t.simple_name() == marker)
    }
}

/// A reference to a named type with generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Name as written, possibly qualified (`ns.Kind`).
    pub name: String,
    /// Generic arguments.
    pub args: Vec<TypeArg>,
}

impl TypeRef {
    /// Creates a type reference without generic arguments.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// The last segment of a qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        last_segment(&self.name)
    }
}

/// A generic argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    /// A string literal type, `"domain"`.
    StringLiteral(String),
    /// A named type.
    Named(String),
    /// Anything else.
    Other,
}

/// A property signature inside an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySig {
    /// Property name.
    pub name: String,
    /// Referenced type name, when the annotation is a plain type reference.
    pub type_name: Option<String>,
}

impl PropertySig {
    /// Creates a property signature.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: Option<&str>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.map(str::to_owned),
        }
    }
}

/// A variable declarator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    /// Bound name. Destructuring patterns are not represented.
    pub name: String,
    /// Type annotation name, if any.
    pub type_name: Option<String>,
    /// Initializer expression.
    pub init: Option<Expr>,
}

/// Expression forms the classifier inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A string literal with quotes removed.
    String(String),
    /// A bare identifier.
    Identifier(String),
    /// An object literal.
    Object(Vec<Property>),
    /// An array literal.
    Array(Vec<Expr>),
    /// A call expression.
    Call(CallExpr),
    /// Anything else.
    Other,
}

impl Expr {
    /// Returns the string literal value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the identifier name.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object literal properties.
    #[must_use]
    pub fn as_object(&self) -> Option<&[Property]> {
        match self {
            Self::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Returns the array literal elements.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Expr]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the call expression.
    #[must_use]
    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Shorthand for an object literal expression.
    #[must_use]
    pub fn object(props: Vec<Property>) -> Self {
        Self::Object(props)
    }

    /// Shorthand for a string literal expression.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Key, with quotes removed for string keys.
    pub name: String,
    /// Value. Shorthand `{ x }` is lowered to `x: x`.
    pub value: Expr,
}

impl Property {
    /// Creates a property.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Finds a property by key.
#[must_use]
pub fn find_property<'a>(props: &'a [Property], name: &str) -> Option<&'a Expr> {
    props.iter().find(|p| p.name == name).map(|p| &p.value)
}

/// A call-like expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// Callee as written (`locate`, `ks.locate`).
    pub callee: String,
    /// Generic argument type names.
    pub type_args: Vec<String>,
    /// Call arguments.
    pub args: Vec<Expr>,
    /// Line of the call (1-indexed).
    pub line: usize,
    /// Column of the call (1-indexed).
    pub column: usize,
}

impl CallExpr {
    /// The last segment of the callee, so `ks.locate` reads as `locate`.
    #[must_use]
    pub fn callee_name(&self) -> &str {
        last_segment(&self.callee)
    }
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
