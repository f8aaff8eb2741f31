//! Literal- and comment-aware text scanning for Java source
//!
//! The declaration patterns in [`crate::patterns`] are plain regular
//! expressions. They only stay reliable when they see the text of a single
//! brace level, with string literals and ordinary comments out of the way.
//! This module produces such *masked* views. A masked view always has the
//! same byte length as its input, so match offsets map straight back to the
//! original text.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trivia {
    /// `/** ... */`
    DocComment,
    /// `// ...` or `/* ... */`
    Comment,
    /// String, text block or char literal
    Literal,
}

/// A masked view of Java text
#[derive(Debug, Clone)]
pub struct Masked {
    /// Same length as the input. Literals, ordinary comments and the interior
    /// of every brace block are replaced by spaces (newlines survive). Javadoc
    /// blocks at depth 0 and the braces delimiting depth-0 blocks are kept.
    pub text: String,

    /// Byte ranges of the Javadoc blocks kept in `text`
    pub docs: Vec<Range<usize>>,
}

impl Masked {
    /// Whether `offset` falls inside a kept Javadoc block
    pub fn in_doc(&self, offset: usize) -> bool {
        // `docs` is in source order and never overlaps
        let idx = self.docs.partition_point(|r| r.end <= offset);
        self.docs.get(idx).is_some_and(|r| r.contains(&offset))
    }
}

/// If a comment or literal starts at `i`, return its kind and end offset.
fn trivia_at(bytes: &[u8], i: usize) -> Option<(Trivia, usize)> {
    match bytes[i] {
        b'/' if bytes.get(i + 1) == Some(&b'/') => {
            let end = bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| i + p);
            Some((Trivia::Comment, end))
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
            let end = find_subslice(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2);
            // `/**/` is an empty ordinary comment, not a doc block
            let is_doc = bytes.get(i + 2) == Some(&b'*') && bytes.get(i + 3) != Some(&b'/');
            let kind = if is_doc {
                Trivia::DocComment
            } else {
                Trivia::Comment
            };
            Some((kind, end))
        }
        b'"' if bytes.get(i + 1) == Some(&b'"') && bytes.get(i + 2) == Some(&b'"') => {
            Some((Trivia::Literal, text_block_end(bytes, i + 3)))
        }
        b'"' | b'\'' => Some((Trivia::Literal, quoted_end(bytes, i))),
        _ => None,
    }
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

/// End of a `"..."` or `'...'` literal starting at `start`. Unterminated
/// literals stop at the end of the line.
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a `"""` text block whose content starts at `from`
fn text_block_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i..].starts_with(b"\"\"\"") {
            return i + 3;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Replace every character inside `ranges` with spaces of equal byte length.
/// Newlines are kept so line structure survives. Ranges may come in any
/// order and may overlap.
pub fn blank(text: &str, ranges: &[Range<usize>]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let ranges = merge(ranges.to_vec());
    let mut pending = ranges.iter().peekable();
    let mut out = String::with_capacity(text.len());

    for (idx, ch) in text.char_indices() {
        while pending.next_if(|r| r.end <= idx).is_some() {}
        let inside = pending.peek().is_some_and(|r| r.start <= idx);

        if inside && ch != '\n' {
            out.extend(std::iter::repeat(' ').take(ch.len_utf8()));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Build the masked view of `source`.
pub fn mask(source: &str) -> Masked {
    let bytes = source.as_bytes();
    let mut blanked: Vec<Range<usize>> = Vec::new();
    let mut docs = Vec::new();
    let mut depth = 0usize;
    let mut block_start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if let Some((kind, end)) = trivia_at(bytes, i) {
            if depth == 0 {
                if kind == Trivia::DocComment {
                    docs.push(i..end);
                } else {
                    blanked.push(i..end);
                }
            }
            i = end;
            continue;
        }

        match bytes[i] {
            b'{' => {
                if depth == 0 {
                    block_start = i + 1;
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blanked.push(block_start..i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    if depth > 0 {
        // Unbalanced: everything after the last depth-0 brace is body text
        blanked.push(block_start..bytes.len());
    }

    Masked {
        text: blank(source, &blanked),
        docs,
    }
}

/// Sort ranges by start and merge the overlapping ones.
fn merge(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| r.start < r.end);
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

/// Offset of the `}` matching the `{` at `open`, skipping braces inside
/// literals and comments. `None` when the block is never closed.
pub fn find_block_end(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some((_, end)) = trivia_at(bytes, i) {
            i = end;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_length() {
        let source = "class A { String s = \"{\"; /* } */ }\nclass B {}";
        let masked = mask(source);
        assert_eq!(masked.text.len(), source.len());
    }

    #[test]
    fn test_mask_blanks_block_interiors() {
        let source = "public class A { int x; }";
        let masked = mask(source);
        let interior = " int x; ".len();
        assert_eq!(masked.text, format!("public class A {{{}}}", " ".repeat(interior)));
    }

    #[test]
    fn test_mask_keeps_depth_zero_doc() {
        let source = "/** Doc {@link B} */\npublic interface A { /** inner */ void f(); }";
        let masked = mask(source);
        assert!(masked.text.starts_with("/** Doc {@link B} */"));
        assert!(!masked.text.contains("inner"));
        assert_eq!(masked.docs, vec![0..20]);
        assert!(masked.in_doc(5));
        assert!(!masked.in_doc(25));
    }

    #[test]
    fn test_mask_blanks_comments_and_literals() {
        let source = "// public class X {\nString s = \"class Y {\"; char c = '{';";
        let masked = mask(source);
        assert!(!masked.text.contains("class"));
        assert!(!masked.text.contains('{'));
        assert!(masked.text.contains("String s ="));
    }

    #[test]
    fn test_mask_multibyte_literal() {
        let source = "String s = \"héllo\"; int x;";
        let masked = mask(source);
        assert_eq!(masked.text.len(), source.len());
        assert!(masked.text.ends_with("int x;"));
    }

    #[test]
    fn test_mask_unbalanced() {
        let source = "public class A { void f() {";
        let masked = mask(source);
        assert_eq!(masked.text.trim_end(), "public class A {");
    }

    #[test]
    fn test_find_block_end_nested() {
        let source = "{ a { b } c }";
        assert_eq!(find_block_end(source, 0), Some(12));
        assert_eq!(find_block_end(source, 4), Some(8));
    }

    #[test]
    fn test_find_block_end_ignores_literals_and_comments() {
        let source = "{ String s = \"}\"; char c = '}'; // }\n /* } */ }";
        assert_eq!(find_block_end(source, 0), Some(source.len() - 1));
    }

    #[test]
    fn test_find_block_end_text_block() {
        let source = "{ String s = \"\"\"\n  }\n  \"\"\"; }";
        assert_eq!(find_block_end(source, 0), Some(source.len() - 1));
    }

    #[test]
    fn test_find_block_end_unbalanced() {
        assert_eq!(find_block_end("{ { }", 0), None);
        assert_eq!(find_block_end("x", 0), None);
    }

    #[test]
    fn test_blank_preserves_newlines() {
        assert_eq!(blank("ab\ncd", &[0..5]), "  \n  ");
        assert_eq!(blank("abc", &[]), "abc");
    }

    #[test]
    fn test_blank_unsorted_overlapping_ranges() {
        assert_eq!(blank("abcdefgh", &[5..7, 0..2, 1..3]), "   de  h");
        assert_eq!(blank("héllo", &[1..3]), "h  llo");
    }

    #[test]
    fn test_mask_many_blocks() {
        let methods = 20_000;
        let mut source = String::from("public class Big {\n");
        let mut body = String::new();
        for i in 0..methods {
            body.push_str(&format!("    public int get{i}() {{ return {i}; }}\n"));
        }
        source.push_str(&body);
        source.push_str("}\n");

        // Every method body of the class body is a depth-0 block here
        let masked = mask(&body);
        assert_eq!(masked.text.len(), body.len());
        assert_eq!(masked.text.matches("{ ").count(), methods);
        assert!(!masked.text.contains("return"));

        let outer = mask(&source);
        assert!(outer.text.starts_with("public class Big {"));
        assert!(!outer.text.contains("get1"));
    }

    #[test]
    fn test_in_doc_many_docs() {
        let mut source = String::new();
        for i in 0..5_000 {
            source.push_str(&format!("/** doc {i} */ void m{i}();\n"));
        }
        let masked = mask(&source);
        assert_eq!(masked.docs.len(), 5_000);
        let last = masked.docs.last().unwrap().clone();
        assert!(masked.in_doc(last.start + 4));
        assert!(!masked.in_doc(last.end + 1));
        assert!(!masked.in_doc(source.len()));
    }
}
