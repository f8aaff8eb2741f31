use crate::syntax;
use serde::{Deserialize, Serialize};

/// Represents a method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Raw Java type text; varargs are normalized to an array (`String...` → `String[]`)
    pub type_name: String,

    /// Declared with `...`
    pub is_varargs: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_varargs: false,
        }
    }

    pub fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }
}

/// Represents one method signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method name
    pub name: String,

    /// Raw Java return type text
    pub return_type: String,

    /// Raw generic prefix including the angle brackets, e.g. `<T>` in `<T> T get()`
    pub type_parameters: Option<String>,

    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,

    /// Javadoc block, verbatim
    pub doc_comment: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            type_parameters: None,
            parameters: Vec::new(),
            doc_comment: None,
        }
    }

    pub fn with_type_parameters(mut self, params: impl Into<String>) -> Self {
        self.type_parameters = Some(params.into());
        self
    }

    pub fn with_parameters(mut self, params: Vec<Parameter>) -> Self {
        self.parameters = params;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    pub fn type_parameter_names(&self) -> Vec<String> {
        self.type_parameters
            .as_deref()
            .map(syntax::type_parameter_names)
            .unwrap_or_default()
    }
}
