/// Data types shared across the resolution pipeline.
///
/// Everything here is a plain value: built fresh for each definition
/// request and dropped when the request finishes.

/// A (line, column) pair in a text document.
///
/// Both fields are zero-based.  The column counts `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Syntactic kind of an import's module specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// A bare module name, e.g. `vue` or an alias like `@/components/Foo`.
    Package,
    /// Starts with `./` or `../` (or is exactly `.` / `..`).
    Relative,
    /// Starts with `/` and is taken as relative to the project root.
    Absolute,
}

impl SpecifierKind {
    /// Classify a raw specifier string.  Every input maps to exactly one kind.
    pub fn classify(value: &str) -> Self {
        if value.starts_with('/') {
            SpecifierKind::Absolute
        } else if value == "."
            || value == ".."
            || value.starts_with("./")
            || value.starts_with("../")
        {
            SpecifierKind::Relative
        } else {
            SpecifierKind::Package
        }
    }
}

/// The `from "..."` part of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    pub kind: SpecifierKind,
    pub value: String,
}

impl ModuleSpecifier {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind: SpecifierKind::classify(&value),
            value,
        }
    }
}

/// One entry of a `{ ... }` import list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBinding {
    /// The exported name (`Foo` in `{ Foo as Bar }`).
    pub specifier: String,
    /// The local name (`Bar` in `{ Foo as Bar }`, or `Foo` without `as`).
    pub binding: String,
}

/// The names an import declaration introduces into scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBinding {
    /// `Foo` in `import Foo from "..."`.
    pub default_name: Option<String>,
    /// `Ns` in `import * as Ns from "..."`.
    pub namespace_name: Option<String>,
    /// Entries of `import { A, B as C } from "..."`, in source order.
    pub named_bindings: Vec<NamedBinding>,
}

/// A parsed import declaration: its bindings and where they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub binding: ImportBinding,
    pub specifier: ModuleSpecifier,
}
