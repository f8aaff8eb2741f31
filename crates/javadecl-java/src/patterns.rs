//! Declaration patterns matched against masked Java text
//!
//! All patterns run on text produced by [`crate::scanner::mask`], so method
//! bodies, literals and ordinary comments are already spaces.

use regex::Regex;
use std::sync::LazyLock;

/// Optional Javadoc block plus trailing whitespace, captured as `doc`
macro_rules! doc_prefix {
    () => {
        r"(?P<doc>/\*\*(?:[^*]|\*+[^*/])*\*+/\s*)?"
    };
}

/// Any number of annotations, arguments included
macro_rules! annotations {
    () => {
        r"(?:@[\w.]+(?:\s*\((?:[^()]|\([^()]*\))*\))?\s*)*"
    };
}

pub static PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").unwrap());

/// `import [static] a.b.C;` and `import a.b.*;`
pub static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?P<static>static\s+)?(?P<path>[\w.]+?)(?P<wildcard>\.\*)?\s*;")
        .unwrap()
});

/// Start of an interface or class header, up to and including the name.
/// Type parameters and supertypes are read by [`parse_header_tail`].
pub static TYPE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        doc_prefix!(),
        annotations!(),
        r"(?P<mods>(?:\b(?:public|protected|private|abstract|static|final|sealed|non-sealed|strictfp)\s+)*)",
        r"\b(?P<kind>interface|class)\s+(?P<name>[A-Za-z_$][\w$]*)",
    ))
    .unwrap()
});

pub static METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        doc_prefix!(),
        annotations!(),
        r"(?P<mods>(?:\b(?:public|protected|private|abstract|static|final|synchronized|native|strictfp|default)\s+)*)",
        r"(?:(?P<generics><[^(){};=]*>)\s*)?",
        r"\b(?P<ret>[\w$.]+(?:\s*<[^(){};=]*>)?(?:\s*\[\s*\])*)\s+",
        r"(?P<name>[A-Za-z_$][\w$]*)\s*",
        r"\((?P<params>(?:[^()]|\([^()]*\))*)\)\s*",
        r"(?:\[\s*\]\s*)*",
        r"(?:throws\s+[^{};]+?)?\s*(?:\{|;)",
    ))
    .unwrap()
});

pub static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        doc_prefix!(),
        annotations!(),
        r"(?:\b(?:static|final|transient|volatile)\s+)*",
        r"\b(?P<vis>public|protected|private)\s+",
        r"(?:(?:static|final|transient|volatile)\s+)*",
        r"(?P<ty>[\w$.]+(?:\s*<[^(){};=]*>)?(?:\s*\[\s*\])*)\s+",
        r"(?P<name>[A-Za-z_$][\w$]*)\s*",
        r"(?P<dims>(?:\[\s*\]\s*)*)",
        r"(?:=|;|,)",
    ))
    .unwrap()
});

/// One further declarator of a multi-variable field, e.g. `y` or `z[] = {}`
/// in `public int x, y, z[] = {};`
pub static DECLARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z_$][\w$]*)\s*(?P<dims>(?:\[\s*\]\s*)*)(?:=|$)").unwrap()
});

/// A single annotation, used to strip annotations from parameters
pub static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@[\w.]+(?:\s*\((?:[^()]|\([^()]*\))*\))?\s*").unwrap()
});

/// Modifiers that can never be a return type; a method match whose return
/// type is one of these is really a constructor.
pub const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "synchronized",
    "native",
    "strictfp",
];

/// Contextual keywords opening declarations that are never emitted. A
/// method match returning one of these is really a `record` header.
pub const DECLARATION_KEYWORDS: &[&str] = &["record", "enum"];

/// Statement keywords that look like a type to the member patterns
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "if", "else", "for", "while", "switch", "case", "break", "continue", "throw", "try",
    "catch", "finally", "new", "this", "super",
];

/// Type parameters and supertypes following a type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTail {
    pub type_parameters: Option<String>,
    pub extends: Option<String>,
    pub implements: Option<String>,
    /// Offset of the `{` opening the body
    pub open_brace: usize,
}

/// Read the rest of a type header starting right after the type name.
///
/// Returns `None` when no `{` follows (a `;`, `(` or `=` first means the
/// match was not a declaration).
pub fn parse_header_tail(masked: &str, from: usize) -> Option<HeaderTail> {
    let bytes = masked.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    let mut tail = HeaderTail::default();
    if bytes.get(i) == Some(&b'<') {
        let close = matching_angle(bytes, i)?;
        tail.type_parameters = Some(compact(&masked[i..=close]));
        i = close + 1;
    }

    let clause_start = i;
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b'{' if depth == 0 => break,
            b';' | b'(' | b')' | b'=' | b'}' => return None,
            _ => {}
        }
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }

    tail.open_brace = i;
    for (keyword, text) in split_clauses(&masked[clause_start..i]) {
        match keyword {
            "extends" => tail.extends = Some(text),
            "implements" => tail.implements = Some(text),
            _ => {}
        }
    }
    Some(tail)
}

fn matching_angle(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            b'{' | b';' => return None,
            _ => {}
        }
    }
    None
}

const CLAUSE_KEYWORDS: &[&str] = &["extends", "implements", "permits"];

/// Split `extends A<B> implements C, D` into keyword/text pairs. Keywords
/// inside angle brackets (`? extends T`) are left alone.
fn split_clauses(text: &str) -> Vec<(&'static str, String)> {
    let bytes = text.as_bytes();
    let mut clauses: Vec<(&'static str, usize, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            _ if depth == 0 && (i == 0 || bytes[i - 1].is_ascii_whitespace()) => {
                let found = CLAUSE_KEYWORDS.iter().find(|kw| {
                    bytes[i..].starts_with(kw.as_bytes())
                        && bytes
                            .get(i + kw.len())
                            .map_or(true, |b| b.is_ascii_whitespace())
                });
                if let Some(kw) = found {
                    if let Some(last) = clauses.last_mut() {
                        last.2 = i;
                    }
                    clauses.push((*kw, i + kw.len(), text.len()));
                    i += kw.len();
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    clauses
        .into_iter()
        .map(|(kw, start, end)| (kw, compact(&text[start..end])))
        .filter(|(_, clause)| !clause.is_empty())
        .collect()
}

/// Collapse whitespace inside a type expression: `List <String []>` becomes
/// `List<String[]>`. Spacing after commas is kept as written.
pub fn compact(text: &str) -> String {
    let normalized = javadecl_api::syntax::normalize_whitespace(text);
    normalized
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" [", "[")
        .replace("[ ", "[")
        .replace(" ]", "]")
}
