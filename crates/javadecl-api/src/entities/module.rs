use super::class::TypeDecl;
use serde::{Deserialize, Serialize};

/// One `import` statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Import {
    /// Dotted path, without the trailing `.*` of a wildcard import
    pub path: String,

    /// `import static ...`
    pub is_static: bool,

    /// `import a.b.*;`
    pub is_wildcard: bool,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: false,
            is_wildcard: false,
        }
    }

    pub fn static_import(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.is_wildcard = true;
        self
    }

    /// Last segment of the path (`java.util.List` → `List`)
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

/// One Java compilation unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Package name, empty for the default package
    pub package: String,

    /// Imports in source order, duplicates preserved
    pub imports: Vec<Import>,

    /// Top-level public types
    pub types: Vec<TypeDecl>,
}

impl SourceFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_imports(mut self, imports: Vec<Import>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_types(mut self, types: Vec<TypeDecl>) -> Self {
        self.types = types;
        self
    }

    /// No top-level public type was found; the file produces no output
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Dotted path of the single-type import whose simple name is `name`.
    ///
    /// Static and wildcard imports never match. The last matching import wins.
    pub fn resolve_import(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .rev()
            .filter(|i| !i.is_static && !i.is_wildcard)
            .find(|i| i.simple_name() == name)
            .map(|i| i.path.as_str())
    }

    /// Dotted path a simple name declared in this package would have
    pub fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    /// Total declarations, nested ones included
    pub fn type_count(&self) -> usize {
        self.types.iter().map(TypeDecl::type_count).sum()
    }

    /// Total methods, nested types included
    pub fn method_count(&self) -> usize {
        self.types.iter().map(TypeDecl::method_count).sum()
    }
}
