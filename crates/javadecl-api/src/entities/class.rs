use super::function::Method;
use crate::syntax;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a Java type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Interface,
    Class,
}

impl TypeKind {
    /// Parse the Java declaration keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "interface" => Some(TypeKind::Interface),
            "class" => Some(TypeKind::Class),
            _ => None,
        }
    }

    /// Declaration keyword, identical in Java and TypeScript
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Interface => "interface",
            TypeKind::Class => "class",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Represents a class field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Raw Java type text
    pub type_name: String,

    /// Javadoc block, verbatim
    pub doc_comment: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            doc_comment: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }
}

/// Represents an interface or class declaration, top-level or nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple type name
    pub name: String,

    /// Interface or class
    pub kind: TypeKind,

    /// Declared `abstract`
    pub is_abstract: bool,

    /// Raw type-parameter text including the angle brackets, e.g. `<T extends Foo>`
    pub type_parameters: Option<String>,

    /// Raw `extends` clause text (without the keyword)
    pub extends: Option<String>,

    /// Raw `implements` clause text (without the keyword)
    pub implements: Option<String>,

    /// Javadoc block, verbatim
    pub doc_comment: Option<String>,

    /// Methods in declaration order
    pub methods: Vec<Method>,

    /// Fields in declaration order (classes only)
    pub fields: Vec<Field>,

    /// Nested types in declaration order
    pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_abstract: false,
            type_parameters: None,
            extends: None,
            implements: None,
            doc_comment: None,
            methods: Vec::new(),
            fields: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_type_parameters(mut self, params: impl Into<String>) -> Self {
        self.type_parameters = Some(params.into());
        self
    }

    pub fn with_extends(mut self, extends: impl Into<String>) -> Self {
        self.extends = Some(extends.into());
        self
    }

    pub fn with_implements(mut self, implements: impl Into<String>) -> Self {
        self.implements = Some(implements.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// Set fields. Ignored for interfaces, which never carry fields.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        if self.is_class() {
            self.fields = fields;
        }
        self
    }

    pub fn with_nested(mut self, nested: Vec<TypeDecl>) -> Self {
        self.nested = nested;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// An empty declaration that only extends something, e.g.
    /// `interface Started extends ServerEvent {}`.
    pub fn is_marker(&self) -> bool {
        self.methods.is_empty()
            && self.fields.is_empty()
            && self.nested.is_empty()
            && self.extends.is_some()
    }

    /// Each reference listed in the `extends` clause
    pub fn extends_list(&self) -> Vec<&str> {
        self.extends
            .as_deref()
            .map(|e| syntax::split_top_level(e, ','))
            .unwrap_or_default()
    }

    /// Names of the declared type parameters (`<K, V>` gives `["K", "V"]`)
    pub fn type_parameter_names(&self) -> Vec<String> {
        self.type_parameters
            .as_deref()
            .map(syntax::type_parameter_names)
            .unwrap_or_default()
    }

    /// Number of declarations in this subtree, this one included
    pub fn type_count(&self) -> usize {
        1 + self.nested.iter().map(TypeDecl::type_count).sum::<usize>()
    }

    /// Number of methods in this subtree
    pub fn method_count(&self) -> usize {
        self.methods.len() + self.nested.iter().map(TypeDecl::method_count).sum::<usize>()
    }
}
