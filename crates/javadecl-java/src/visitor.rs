//! Declaration visitor extracting the structural tree of one Java file

use javadecl_api::{
    syntax, Field, Import, Method, Parameter, ParserConfig, TypeDecl, TypeKind,
};
use regex::Captures;
use std::ops::Range;

use crate::patterns::{self, DECLARATION_KEYWORDS, MODIFIER_KEYWORDS, STATEMENT_KEYWORDS};
use crate::scanner;

pub struct JavaVisitor<'a> {
    pub source: &'a str,
    pub config: ParserConfig,
    pub package: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
}

impl<'a> JavaVisitor<'a> {
    pub fn new(source: &'a str, config: ParserConfig) -> Self {
        Self {
            source,
            config,
            package: String::new(),
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Visit the whole file: package, imports, then public top-level types
    pub fn visit_file(&mut self) {
        let masked = scanner::mask(self.source);
        self.visit_package(&masked.text);
        self.visit_imports(&masked.text);

        self.types = self
            .visit_types(self.source, true)
            .into_iter()
            .map(|(decl, _)| decl)
            .collect();
    }

    fn visit_package(&mut self, masked: &str) {
        if let Some(caps) = patterns::PACKAGE.captures(masked) {
            self.package = caps[1].to_string();
        }
    }

    fn visit_imports(&mut self, masked: &str) {
        for caps in patterns::IMPORT.captures_iter(masked) {
            let mut import = Import::new(&caps["path"]);
            if caps.name("static").is_some() {
                import = import.static_import();
            }
            if caps.name("wildcard").is_some() {
                import = import.wildcard();
            }
            self.imports.push(import);
        }
    }

    /// Find the type declarations at brace depth 0 of `text`.
    ///
    /// Each declaration comes with its span in `text`, doc block through
    /// closing brace, so the caller can excise it.
    fn visit_types(&self, text: &str, require_public: bool) -> Vec<(TypeDecl, Range<usize>)> {
        let masked = scanner::mask(text);
        let mut found = Vec::new();

        for caps in patterns::TYPE_HEADER.captures_iter(&masked.text) {
            let (Some(whole), Some(kind), Some(name)) =
                (caps.get(0), caps.name("kind"), caps.name("name"))
            else {
                continue;
            };

            // Prose inside Javadoc, or an `@interface` annotation type
            if masked.in_doc(kind.start()) || masked.text[..kind.start()].ends_with('@') {
                continue;
            }

            let mods = caps.name("mods").map_or("", |m| m.as_str());
            if require_public && !has_modifier(mods, "public") {
                continue;
            }

            let Some(kind) = TypeKind::from_keyword(kind.as_str()) else {
                continue;
            };
            let Some(tail) = patterns::parse_header_tail(&masked.text, name.end()) else {
                continue;
            };

            let mut decl = TypeDecl::new(name.as_str(), kind);
            decl.is_abstract = has_modifier(mods, "abstract");
            decl.type_parameters = tail.type_parameters;
            decl.extends = tail.extends;
            decl.implements = tail.implements;
            decl.doc_comment = self.extract_doc_comment(&caps);

            let end = match scanner::find_block_end(text, tail.open_brace) {
                Some(close) => {
                    self.visit_body(&mut decl, &text[tail.open_brace + 1..close]);
                    close + 1
                }
                // Unbalanced: no members, and nothing after it is visible
                None => text.len(),
            };

            found.push((decl, whole.start()..end));
        }

        found
    }

    /// Populate members and nested types from the text between the braces
    fn visit_body(&self, decl: &mut TypeDecl, body: &str) {
        let nested = self.visit_types(body, false);
        let spans: Vec<Range<usize>> = nested.iter().map(|(_, span)| span.clone()).collect();

        let masked = scanner::mask(body);
        let members = scanner::blank(&masked.text, &spans);

        decl.methods = self.extract_methods(&members);
        if decl.kind == TypeKind::Class {
            decl.fields = self.extract_fields(&members);
        }
        decl.nested = nested.into_iter().map(|(nested, _)| nested).collect();
    }

    fn extract_methods(&self, members: &str) -> Vec<Method> {
        patterns::METHOD
            .captures_iter(members)
            .filter_map(|caps| {
                let return_type = patterns::compact(&caps["ret"]);
                // `public Foo(...)` reads as return type `public`
                if is_keyword(&return_type)
                    || DECLARATION_KEYWORDS.contains(&return_type.as_str())
                {
                    return None;
                }
                // `= Collections.<String> emptyList();` is an initializer call
                if in_initializer(members, caps.get(0).map_or(0, |m| m.start())) {
                    return None;
                }

                let mut method = Method::new(&caps["name"], return_type)
                    .with_parameters(extract_parameters(&caps["params"]));
                if let Some(generics) = caps.name("generics") {
                    method = method.with_type_parameters(patterns::compact(generics.as_str()));
                }
                method.doc_comment = self.extract_doc_comment(&caps);
                Some(method)
            })
            .collect()
    }

    fn extract_fields(&self, members: &str) -> Vec<Field> {
        let mut fields = Vec::new();

        for caps in patterns::FIELD.captures_iter(members) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let base_type = patterns::compact(&caps["ty"]);
            if STATEMENT_KEYWORDS.contains(&base_type.as_str()) {
                continue;
            }

            let doc = self.extract_doc_comment(&caps);
            let mut field = Field::new(&caps["name"], with_dims(&base_type, &caps["dims"]));
            field.doc_comment = doc.clone();
            fields.push(field);

            // `public int x, y;` declares more than one field
            if whole.as_str().ends_with(';') {
                continue;
            }
            let rest = &members[whole.end()..];
            let rest = &rest[..rest.find(';').unwrap_or(rest.len())];
            let skip_initializer = usize::from(whole.as_str().ends_with('='));

            for declarator in syntax::split_top_level(rest, ',')
                .into_iter()
                .skip(skip_initializer)
            {
                let Some(more) = patterns::DECLARATOR.captures(declarator) else {
                    continue;
                };
                let mut field = Field::new(&more["name"], with_dims(&base_type, &more["dims"]));
                field.doc_comment = doc.clone();
                fields.push(field);
            }
        }

        fields
    }

    fn extract_doc_comment(&self, caps: &Captures) -> Option<String> {
        if !self.config.include_docs {
            return None;
        }
        caps.name("doc").map(|doc| doc.as_str().trim_end().to_string())
    }
}

fn with_dims(base_type: &str, dims: &str) -> String {
    let mut type_name = base_type.to_string();
    for _ in dims.matches('[') {
        type_name.push_str("[]");
    }
    type_name
}

/// Whether the statement holding `offset` already passed an `=`
fn in_initializer(members: &str, offset: usize) -> bool {
    let statement_start = members[..offset]
        .rfind(|c| matches!(c, ';' | '{' | '}'))
        .map_or(0, |p| p + 1);
    members[statement_start..offset].contains('=')
}

fn has_modifier(mods: &str, modifier: &str) -> bool {
    mods.split_whitespace().any(|m| m == modifier)
}

fn is_keyword(word: &str) -> bool {
    MODIFIER_KEYWORDS.contains(&word) || STATEMENT_KEYWORDS.contains(&word)
}

/// Parse a raw parameter list such as `@Nullable final String name, int... ids`
pub fn extract_parameters(raw: &str) -> Vec<Parameter> {
    syntax::split_top_level(raw, ',')
        .into_iter()
        .filter_map(|param| {
            let cleaned = patterns::ANNOTATION.replace_all(param, "");
            let tokens: Vec<&str> = cleaned
                .split_whitespace()
                .filter(|t| *t != "final")
                .collect();
            let joined = tokens.join(" ");

            // The name is the last token outside angle brackets
            let split_at = last_top_level_space(&joined)?;
            let mut type_name = patterns::compact(&joined[..split_at]);
            let mut name = joined[split_at + 1..].to_string();
            let mut is_varargs = false;

            if let Some(stripped) = name.strip_prefix("...") {
                // `String ...args`
                name = stripped.to_string();
                type_name.push_str("...");
            }
            if let Some(stripped) = type_name.strip_suffix("...") {
                type_name = format!("{}[]", stripped.trim_end());
                is_varargs = true;
            }
            while let Some(stripped) = name.strip_suffix("[]") {
                name = stripped.to_string();
                type_name.push_str("[]");
            }

            if name.is_empty() || name == "this" || type_name.is_empty() {
                return None;
            }

            let parameter = Parameter::new(name, type_name);
            Some(if is_varargs {
                parameter.varargs()
            } else {
                parameter
            })
        })
        .collect()
}

fn last_top_level_space(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut last = None;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ' ' if depth == 0 => last = Some(idx),
            _ => {}
        }
    }
    last
}
