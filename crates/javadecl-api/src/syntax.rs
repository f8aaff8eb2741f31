//! Small helpers over raw Java type text shared by the parser and the emitter.

/// Split `text` on `separator` occurrences that are not nested inside
/// `<...>`, `(...)` or `[...]`.
///
/// Pieces are trimmed; empty pieces are dropped.
///
/// ```
/// use javadecl_api::syntax::split_top_level;
///
/// assert_eq!(
///     split_top_level("Map<K, V> map, int n", ','),
///     vec!["Map<K, V> map", "int n"]
/// );
/// ```
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = (depth - 1).max(0),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Names declared by a raw type-parameter list such as
/// `<K extends Comparable<K>, V>`, in declaration order.
pub fn type_parameter_names(raw: &str) -> Vec<String> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('<').unwrap_or(inner);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    split_top_level(inner, ',')
        .into_iter()
        .filter_map(|param| {
            param
                .split(|c: char| c.is_whitespace() || c == '<')
                .find(|s| !s.is_empty() && !s.starts_with('@'))
                .map(str::to_string)
        })
        .collect()
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_generics() {
        assert_eq!(
            split_top_level("Map<String, List<Integer>> a, BiFunction<A, B, C> f", ','),
            vec!["Map<String, List<Integer>> a", "BiFunction<A, B, C> f"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_top_level("", ',').is_empty());
        assert!(split_top_level("   ", ',').is_empty());
    }

    #[test]
    fn test_type_parameter_names() {
        assert_eq!(type_parameter_names("<T>"), vec!["T"]);
        assert_eq!(
            type_parameter_names("<K extends Comparable<K>, V>"),
            vec!["K", "V"]
        );
        assert!(type_parameter_names("<>").is_empty());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("Map<K,\n   V>"), "Map<K, V>");
    }
}
