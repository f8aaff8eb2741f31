//! Structural extraction for Java source code

use javadecl_api::{ParserConfig, SourceFile};
use std::path::Path;
use tracing::debug;

use crate::visitor::JavaVisitor;

/// Extract the package, imports and public type declarations of one file.
///
/// Extraction never fails: text the patterns do not recognise simply yields
/// no entities.
pub fn extract(source: &str, file_path: &Path, config: &ParserConfig) -> SourceFile {
    let mut visitor = JavaVisitor::new(source, config.clone());
    visitor.visit_file();

    let file = SourceFile::new(visitor.package)
        .with_imports(visitor.imports)
        .with_types(visitor.types);

    debug!(
        path = %file_path.display(),
        package = %file.package,
        imports = file.imports.len(),
        types = file.type_count(),
        "extracted declarations"
    );

    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_interface() {
        let source = r#"
package com.example.api;

import java.util.List;

public interface Inventory {
    List<Item> getItems();
    int size();
}
"#;
        let file = extract(source, Path::new("Inventory.java"), &ParserConfig::default());

        assert_eq!(file.package, "com.example.api");
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.types.len(), 1);
        assert_eq!(file.types[0].name, "Inventory");
        assert_eq!(file.method_count(), 2);
    }

    #[test]
    fn test_extract_garbage_yields_nothing() {
        let file = extract(
            "}}} not java {{{ \"unterminated",
            Path::new("Garbage.java"),
            &ParserConfig::default(),
        );

        assert_eq!(file.package, "");
        assert!(file.is_empty());
    }
}
