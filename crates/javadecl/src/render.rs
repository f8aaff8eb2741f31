//! Declaration file rendering

use javadecl_api::{syntax, Field, Method, SourceFile, TypeDecl, TypeKind};
use std::fmt::Write as _;

use crate::convert::TypeConverter;

const INDENT: &str = "    ";

/// Second header line of every generated file
pub const GENERATED_NOTICE: &str = "// Generated by javadecl from Java sources. Do not edit.";

/// TypeScript words that cannot name a parameter or a function
const RESERVED_WORDS: &[&str] = &[
    "arguments",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Whether `word` is reserved in TypeScript
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Reindent a raw `/** ... */` block to `indent`.
///
/// The opening line goes at `indent`; every continuation line is trimmed and
/// placed at `indent` plus one space, so the leading `*` lines up under the
/// first `*` of `/**`.
pub fn reindent_doc(doc: &str, indent: &str) -> String {
    let mut out = String::new();
    for (i, line) in doc.trim().lines().enumerate() {
        let line = line.trim();
        if i == 0 {
            let _ = writeln!(out, "{indent}{line}");
        } else if line.starts_with('*') {
            let _ = writeln!(out, "{indent} {line}");
        } else if line.is_empty() {
            let _ = writeln!(out, "{indent} *");
        } else {
            let _ = writeln!(out, "{indent} * {line}");
        }
    }
    out
}

/// Render the declaration file for one parsed source file
pub fn render_file(file: &SourceFile, converter: &TypeConverter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// Type definitions for {}", file.package);
    let _ = writeln!(out, "{GENERATED_NOTICE}");

    for decl in &file.types {
        out.push('\n');
        render_type(&mut out, decl, converter, "", None);
    }
    out
}

/// Render one declaration, followed by its nested namespace if any.
///
/// `enclosing` is the simple name of the parent declaration for nested types.
fn render_type(
    out: &mut String,
    decl: &TypeDecl,
    converter: &TypeConverter,
    indent: &str,
    enclosing: Option<&str>,
) {
    // Outer type parameters stay visible to inner classes
    let scope = converter.with_generics(decl.type_parameter_names());
    let type_params = decl.type_parameters.as_deref().unwrap_or("");

    if let Some(doc) = &decl.doc_comment {
        out.push_str(&reindent_doc(doc, indent));
    }

    if enclosing.is_some() && decl.is_marker() {
        let aliased: Vec<String> = decl
            .extends_list()
            .into_iter()
            .map(|r| convert_supertype(r, &scope, enclosing))
            .collect();
        let _ = writeln!(
            out,
            "{indent}export type {}{type_params} = {};",
            decl.name,
            aliased.join(" & ")
        );
        return;
    }

    let supertypes: Vec<String> = match decl.kind {
        TypeKind::Interface => decl
            .extends_list()
            .into_iter()
            .map(|r| convert_supertype(r, &scope, enclosing))
            .collect(),
        // A class extends at most one type; `implements` is not rendered
        TypeKind::Class => decl
            .extends_list()
            .into_iter()
            .take(1)
            .map(|r| convert_supertype(r, &scope, enclosing))
            .collect(),
    };
    let extends = if supertypes.is_empty() {
        String::new()
    } else {
        format!(" extends {}", supertypes.join(", "))
    };

    let _ = writeln!(
        out,
        "{indent}export {} {}{type_params}{extends} {{",
        decl.kind.keyword(),
        decl.name
    );

    let member_indent = format!("{indent}{INDENT}");
    if decl.kind == TypeKind::Class {
        for field in &decl.fields {
            render_field(out, field, &scope, &member_indent);
        }
    }
    for method in &decl.methods {
        render_method(out, method, &scope, &member_indent);
    }
    let _ = writeln!(out, "{indent}}}");

    if !decl.nested.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{indent}export namespace {} {{", decl.name);
        for (i, nested) in decl.nested.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_type(out, nested, &scope, &member_indent, Some(&decl.name));
        }
        let _ = writeln!(out, "{indent}}}");
    }
}

/// A supertype reference naming the enclosing declaration stays a direct
/// name; anything else goes through normal conversion.
fn convert_supertype(reference: &str, converter: &TypeConverter, enclosing: Option<&str>) -> String {
    let Some(enclosing) = enclosing else {
        return converter.convert(reference);
    };

    let (base, args) = match reference.split_once('<') {
        Some((base, args)) => (base.trim(), args.strip_suffix('>')),
        None => (reference.trim(), None),
    };
    if base != enclosing {
        return converter.convert(reference);
    }

    match args {
        Some(args) => {
            let converted: Vec<String> = syntax::split_top_level(args, ',')
                .into_iter()
                .map(|a| converter.convert(a))
                .collect();
            format!("{enclosing}<{}>", converted.join(", "))
        }
        None => enclosing.to_string(),
    }
}

fn render_field(out: &mut String, field: &Field, converter: &TypeConverter, indent: &str) {
    if let Some(doc) = &field.doc_comment {
        out.push_str(&reindent_doc(doc, indent));
    }
    let _ = writeln!(
        out,
        "{indent}{}: {};",
        field.name,
        converter.convert(&field.type_name)
    );
}

fn render_method(out: &mut String, method: &Method, converter: &TypeConverter, indent: &str) {
    let scope = converter.with_generics(method.type_parameter_names());

    if let Some(doc) = &method.doc_comment {
        out.push_str(&reindent_doc(doc, indent));
    }

    let params: Vec<String> = method
        .parameters
        .iter()
        .map(|p| {
            let spread = if p.is_varargs { "..." } else { "" };
            format!(
                "{spread}{}: {}",
                parameter_name(&p.name),
                scope.convert(&p.type_name)
            )
        })
        .collect();

    let _ = writeln!(
        out,
        "{indent}{}{}({}): {};",
        method.name,
        method.type_parameters.as_deref().unwrap_or(""),
        params.join(", "),
        scope.convert(&method.return_type)
    );
}

fn parameter_name(name: &str) -> String {
    if is_reserved_word(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}
