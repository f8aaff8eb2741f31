//! Java type text to TypeScript type text
//!
//! [`TypeConverter`] carries everything needed to resolve a name seen in one
//! source file: its package and imports, the declarations of the file itself,
//! the generic parameters in scope and the configured API packages.

use javadecl_api::{syntax, SourceFile, TypeDecl};
use std::collections::HashMap;

use crate::paths;

/// Simple names of `java.lang` types that need no import
const JAVA_LANG: &[&str] = &[
    "AutoCloseable",
    "CharSequence",
    "Class",
    "Cloneable",
    "Comparable",
    "Enum",
    "Error",
    "Exception",
    "Iterable",
    "Number",
    "Record",
    "Runnable",
    "RuntimeException",
    "StringBuilder",
    "Thread",
    "Throwable",
    "Void",
];

fn primitive(name: &str) -> Option<&'static str> {
    let converted = match name {
        "byte" | "short" | "int" | "long" | "float" | "double" | "Byte" | "Short" | "Integer"
        | "Long" | "Float" | "Double" => "number",
        "boolean" | "Boolean" => "boolean",
        "char" | "Character" | "String" => "string",
        "Object" => "any",
        "void" => "void",
        _ => return None,
    };
    Some(converted)
}

/// Map each declared type name in `types` to its in-file qualified name
/// (`Outer.Inner`). The outermost declaration of a name wins.
pub fn local_type_names(types: &[TypeDecl]) -> HashMap<String, String> {
    fn collect(types: &[TypeDecl], prefix: &str, out: &mut HashMap<String, String>) {
        for decl in types {
            let qualified = if prefix.is_empty() {
                decl.name.clone()
            } else {
                format!("{prefix}.{}", decl.name)
            };
            out.entry(decl.name.clone())
                .or_insert_with(|| qualified.clone());
            collect(&decl.nested, &qualified, out);
        }
    }

    let mut names = HashMap::new();
    // Top-level names first so `Outer.Inner` never shadows a top-level `Inner`
    for decl in types {
        names.insert(decl.name.clone(), decl.name.clone());
    }
    collect(types, "", &mut names);
    names
}

/// Converts Java type text as seen from one declaration file
#[derive(Debug, Clone)]
pub struct TypeConverter<'a> {
    file: &'a SourceFile,
    output_path: &'a str,
    api_packages: &'a [String],
    local_types: &'a HashMap<String, String>,
    generics: Vec<String>,
}

impl<'a> TypeConverter<'a> {
    pub fn new(
        file: &'a SourceFile,
        output_path: &'a str,
        api_packages: &'a [String],
        local_types: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            file,
            output_path,
            api_packages,
            local_types,
            generics: Vec::new(),
        }
    }

    /// A converter with additional generic parameter names in scope
    pub fn with_generics<I>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut scoped = self.clone();
        scoped.generics.extend(names);
        scoped
    }

    /// Convert raw Java type text to TypeScript type text
    pub fn convert(&self, raw: &str) -> String {
        let text = raw.trim();
        if text.is_empty() || text == "?" {
            return "any".to_string();
        }
        if let Some(converted) = primitive(text) {
            return converted.to_string();
        }

        if let Some(bound) = text
            .strip_prefix("? extends ")
            .or_else(|| text.strip_prefix("? super "))
        {
            return self.convert(bound);
        }

        if let Some(element) = text.strip_suffix("[]") {
            return array_of(self.convert(element));
        }
        if let Some(element) = text.strip_suffix("...") {
            return array_of(self.convert(element));
        }

        if text.ends_with('>') {
            if let Some(open) = text.find('<') {
                let base = text[..open].trim();
                let args = syntax::split_top_level(&text[open + 1..text.len() - 1], ',');
                return self.convert_generic(base, &args);
            }
        }

        self.resolve(text)
    }

    fn convert_generic(&self, base: &str, args: &[&str]) -> String {
        let converted: Vec<String> = args.iter().map(|a| self.convert(a)).collect();
        let arg = |i: usize| converted.get(i).cloned().unwrap_or_else(|| "any".to_string());

        match well_known_base(base) {
            Some("List" | "ArrayList" | "LinkedList" | "Collection" | "Set" | "HashSet"
            | "Queue") => array_of(arg(0)),
            Some("Map" | "HashMap" | "LinkedHashMap") => match converted.as_slice() {
                [key, value] => format!("Record<{key}, {value}>"),
                _ => "Record<any, any>".to_string(),
            },
            Some("Optional") => format!("{} | null", arg(0)),
            Some("Consumer") => format!("(arg0: {}) => void", arg(0)),
            Some("Supplier") => format!("() => {}", arg(0)),
            Some("Predicate") => format!("(arg0: {}) => boolean", arg(0)),
            Some("Function") => match converted.as_slice() {
                [a, b] => format!("(arg0: {a}) => {b}"),
                _ => "(arg0: any) => any".to_string(),
            },
            Some("BiConsumer") => match converted.as_slice() {
                [a, b] => format!("(arg0: {a}, arg1: {b}) => void"),
                _ => "(arg0: any, arg1: any) => void".to_string(),
            },
            Some("BiFunction") => match converted.as_slice() {
                [a, b, c] => format!("(arg0: {a}, arg1: {b}) => {c}"),
                _ => "(arg0: any, arg1: any) => any".to_string(),
            },
            _ => {
                let converted_base = self.resolve(base);
                if converted_base.starts_with("import(") || converted.is_empty() {
                    // An import type cannot carry trailing type arguments here
                    converted_base
                } else {
                    format!("{converted_base}<{}>", converted.join(", "))
                }
            }
        }
    }

    /// Resolve a possibly dotted type name
    fn resolve(&self, name: &str) -> String {
        if self.generics.iter().any(|g| g == name) {
            return name.to_string();
        }

        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };

        if let Some(local) = self.local_types.get(head) {
            return match rest {
                Some(rest) => format!("{local}.{rest}"),
                None => local.clone(),
            };
        }

        let resolved = self.qualify(head, rest);
        if self.is_api(&resolved) {
            if let Some(reference) = self.cross_file_reference(&resolved) {
                return reference;
            }
        }
        if resolved.starts_with("java.") {
            return format!("Java.{resolved}");
        }
        name.to_string()
    }

    /// Fully qualified dotted path of a name as written in this file
    fn qualify(&self, head: &str, rest: Option<&str>) -> String {
        let with_rest = |base: &str| match rest {
            Some(rest) => format!("{base}.{rest}"),
            None => base.to_string(),
        };

        if let Some(path) = self.file.resolve_import(head) {
            return with_rest(path);
        }
        if rest.is_some() && head.starts_with(|c: char| c.is_lowercase()) {
            // Already a qualified name such as `java.util.UUID`
            return with_rest(head);
        }
        if rest.is_none() && JAVA_LANG.contains(&head) {
            return format!("java.lang.{head}");
        }
        with_rest(&self.file.qualify(head))
    }

    fn is_api(&self, resolved: &str) -> bool {
        self.api_packages.iter().any(|package| {
            let package = package.trim_end_matches('.');
            resolved
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// `import("<relative module>").<Qualifier>` for a dotted type path. The
    /// first upper-case segment names the file; later segments qualify
    /// inside it.
    fn cross_file_reference(&self, resolved: &str) -> Option<String> {
        let segments: Vec<&str> = resolved.split('.').collect();
        let type_index = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))?;

        let target = paths::output_path_for(&segments[..=type_index].join("."));
        let module = paths::relative_module(self.output_path, &target);
        let qualifier = segments[type_index..].join(".");

        Some(format!("import(\"{module}\").{qualifier}"))
    }
}

/// The dispatch name of a generic base, accepting `java.util` qualification
fn well_known_base(base: &str) -> Option<&str> {
    match base.rsplit_once('.') {
        None => Some(base),
        Some((package, name)) if package.starts_with("java.") => Some(name),
        Some(_) => None,
    }
}

fn array_of(element: String) -> String {
    if element.contains(" | ") || element.contains("=>") {
        format!("({element})[]")
    } else {
        format!("{element}[]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javadecl_api::Import;

    fn file() -> SourceFile {
        SourceFile::new("com.example.api.event").with_imports(vec![
            Import::new("com.example.api.Server"),
            Import::new("com.example.api.entity.Player"),
            Import::new("java.util.UUID"),
            Import::new("org.slf4j.Logger"),
        ])
    }

    fn api() -> Vec<String> {
        vec!["com.example.api".to_string()]
    }

    fn convert(raw: &str) -> String {
        let file = file();
        let api = api();
        let locals = HashMap::new();
        let converter = TypeConverter::new(&file, "com/example/api/event/ServerEvent.d.ts", &api, &locals);
        converter.convert(raw)
    }

    #[test]
    fn test_primitives_and_wrappers() {
        for (java, ts) in [
            ("byte", "number"),
            ("short", "number"),
            ("int", "number"),
            ("long", "number"),
            ("float", "number"),
            ("double", "number"),
            ("Byte", "number"),
            ("Short", "number"),
            ("Integer", "number"),
            ("Long", "number"),
            ("Float", "number"),
            ("Double", "number"),
            ("boolean", "boolean"),
            ("Boolean", "boolean"),
            ("char", "string"),
            ("Character", "string"),
            ("String", "string"),
            ("Object", "any"),
            ("void", "void"),
        ] {
            assert_eq!(convert(java), ts, "converting {java}");
        }
    }

    #[test]
    fn test_arrays() {
        assert_eq!(convert("int[]"), "number[]");
        assert_eq!(convert("String[][]"), "string[][]");
        assert_eq!(convert("Optional<String>[]"), "(string | null)[]");
    }

    #[test]
    fn test_collections() {
        assert_eq!(convert("List<String>"), "string[]");
        assert_eq!(convert("Set<Integer>"), "number[]");
        assert_eq!(convert("Collection<Boolean>"), "boolean[]");
        assert_eq!(convert("List<List<String>>"), "string[][]");
        assert_eq!(convert("java.util.List<String>"), "string[]");
        assert_eq!(convert("Queue<Supplier<String>>"), "(() => string)[]");
    }

    #[test]
    fn test_maps() {
        assert_eq!(convert("Map<String, Integer>"), "Record<string, number>");
        assert_eq!(
            convert("HashMap<String, List<Long>>"),
            "Record<string, number[]>"
        );
        assert_eq!(convert("Map<String>"), "Record<any, any>");
    }

    #[test]
    fn test_optional_and_functions() {
        assert_eq!(convert("Optional<String>"), "string | null");
        assert_eq!(convert("Consumer<String>"), "(arg0: string) => void");
        assert_eq!(convert("Supplier<Integer>"), "() => number");
        assert_eq!(convert("Predicate<String>"), "(arg0: string) => boolean");
        assert_eq!(convert("Function<String, Integer>"), "(arg0: string) => number");
        assert_eq!(convert("Function<String>"), "(arg0: any) => any");
        assert_eq!(
            convert("BiConsumer<String, Integer>"),
            "(arg0: string, arg1: number) => void"
        );
        assert_eq!(
            convert("BiFunction<String, Integer, Boolean>"),
            "(arg0: string, arg1: number) => boolean"
        );
        assert_eq!(convert("BiFunction<String>"), "(arg0: any, arg1: any) => any");
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(convert("List<? extends String>"), "string[]");
        assert_eq!(convert("Consumer<? super Integer>"), "(arg0: number) => void");
        assert_eq!(convert("List<?>"), "any[]");
    }

    #[test]
    fn test_cross_file_references() {
        assert_eq!(convert("Server"), "import(\"../Server\").Server");
        assert_eq!(convert("Player"), "import(\"../entity/Player\").Player");
        // Unimported names live in the current package
        assert_eq!(convert("ServerTick"), "import(\"./ServerTick\").ServerTick");
        assert_eq!(
            convert("com.example.api.world.World.Chunk"),
            "import(\"../world/World\").World.Chunk"
        );
        assert_eq!(convert("Player[]"), "import(\"../entity/Player\").Player[]");
    }

    #[test]
    fn test_import_reference_drops_type_arguments() {
        assert_eq!(convert("Server<String>"), "import(\"../Server\").Server");
    }

    #[test]
    fn test_java_placeholders() {
        assert_eq!(convert("UUID"), "Java.java.util.UUID");
        assert_eq!(convert("java.io.File"), "Java.java.io.File");
        assert_eq!(convert("Runnable"), "Java.java.lang.Runnable");
        assert_eq!(convert("Iterable<String>"), "Java.java.lang.Iterable<string>");
    }

    #[test]
    fn test_bare_fallback() {
        assert_eq!(convert("Logger"), "Logger");
        assert_eq!(convert("org.example.Thing"), "org.example.Thing");
    }

    #[test]
    fn test_api_prefix_respects_segments() {
        let file = SourceFile::new("com.example.apiextra");
        let api = api();
        let locals = HashMap::new();
        let converter = TypeConverter::new(&file, "com/example/apiextra/Foo.d.ts", &api, &locals);

        assert_eq!(converter.convert("Bar"), "Bar");
    }

    #[test]
    fn test_generics_and_local_types() {
        let file = file();
        let api = api();
        let decls = vec![javadecl_api::TypeDecl::interface("ServerEvent")
            .with_nested(vec![javadecl_api::TypeDecl::interface("Started")])];
        let locals = local_type_names(&decls);
        let converter = TypeConverter::new(&file, "com/example/api/event/ServerEvent.d.ts", &api, &locals)
            .with_generics(vec!["T".to_string()]);

        assert_eq!(converter.convert("T"), "T");
        assert_eq!(converter.convert("List<T>"), "T[]");
        assert_eq!(converter.convert("Started"), "ServerEvent.Started");
        assert_eq!(converter.convert("ServerEvent"), "ServerEvent");
        assert_eq!(converter.convert("ServerEvent.Started"), "ServerEvent.Started");

        let unscoped = TypeConverter::new(&file, "com/example/api/event/ServerEvent.d.ts", &api, &locals);
        assert_eq!(unscoped.convert("T"), "import(\"./T\").T");
    }

    #[test]
    fn test_local_type_names_prefers_outermost() {
        let decls = vec![
            javadecl_api::TypeDecl::class("Outer")
                .with_nested(vec![javadecl_api::TypeDecl::class("Builder")]),
            javadecl_api::TypeDecl::class("Builder"),
        ];
        let names = local_type_names(&decls);

        assert_eq!(names["Outer"], "Outer");
        assert_eq!(names["Builder"], "Builder");
    }
}
