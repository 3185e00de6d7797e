//! Architectural symbols: Kinds, Instances and their Members.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What an [`ArchSymbol`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A type-level definition. Has no location.
    Kind,
    /// A located root declaration (`locate<K>(...)`).
    Instance,
    /// A child of an instance or of another member.
    Member,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind => write!(f, "kind"),
            Self::Instance => write!(f, "instance"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// A node in the architecture tree.
///
/// Symbols are built top-down by the classifier and never mutated
/// afterwards. Children are shared through [`Arc`] so that contracts can
/// point at any node of the tree without owning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchSymbol {
    name: String,
    kind: SymbolKind,
    location: Option<PathBuf>,
    children: Vec<Arc<ArchSymbol>>,
    declared_kind: Option<String>,
    location_derived: bool,
}

impl ArchSymbol {
    /// Creates a `Kind` symbol. Kinds carry no location and no children.
    #[must_use]
    pub fn kind(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Kind,
            location: None,
            children: Vec::new(),
            declared_kind: None,
            location_derived: false,
        }
    }

    /// Creates an `Instance` rooted at an explicitly stated location.
    #[must_use]
    pub fn instance(
        name: impl Into<String>,
        location: PathBuf,
        declared_kind: impl Into<String>,
        children: Vec<Arc<ArchSymbol>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Instance,
            location: Some(location),
            children,
            declared_kind: Some(declared_kind.into()),
            location_derived: false,
        }
    }

    /// Creates a `Member` whose location was derived by joining paths.
    #[must_use]
    pub fn member(
        name: impl Into<String>,
        location: PathBuf,
        declared_kind: Option<String>,
        children: Vec<Arc<ArchSymbol>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Member,
            location: Some(location),
            children,
            declared_kind,
            location_derived: true,
        }
    }

    /// Returns the symbol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns what this symbol stands for.
    #[must_use]
    pub fn symbol_kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the declared location, absent for `Kind` symbols.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Returns the children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Arc<ArchSymbol>] {
        &self.children
    }

    /// Returns the name of the Kind this symbol was declared against.
    #[must_use]
    pub fn declared_kind(&self) -> Option<&str> {
        self.declared_kind.as_deref()
    }

    /// Whether the location was computed by path-joining.
    #[must_use]
    pub fn is_location_derived(&self) -> bool {
        self.location_derived
    }

    /// Returns `true` when the symbol has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Arc<ArchSymbol>> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Resolves a relative reference such as `"domain/entities"` or
    /// `"domain.entities"` by walking children by name.
    ///
    /// Returns `None` for an empty path or when any segment is missing.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<Arc<ArchSymbol>> {
        let mut segments = path
            .split(['.', '/'])
            .filter(|s| !s.is_empty())
            .peekable();
        segments.peek()?;

        let first = segments.next()?;
        let mut current = Arc::clone(self.child(first)?);
        for segment in segments {
            let next = Arc::clone(current.child(segment)?);
            current = next;
        }
        Some(current)
    }

    /// Iterates over every descendant, depth first, parents before children.
    pub fn descendants(&self) -> impl Iterator<Item = &ArchSymbol> + '_ {
        let mut stack: Vec<&ArchSymbol> = self.children.iter().rev().map(AsRef::as_ref).collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev().map(AsRef::as_ref));
            Some(next)
        })
    }
}

impl fmt::Display for ArchSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)?;
        if let Some(location) = &self.location {
            write!(f, " @ {}", location.display())?;
        }
        Ok(())
    }
}
