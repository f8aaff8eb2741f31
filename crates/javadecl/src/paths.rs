//! Output path algebra
//!
//! Declaration files are addressed by `/`-separated paths relative to the
//! output root, e.g. `com/example/api/Server.d.ts`. Nothing here touches the
//! filesystem.

use std::path::{Component, Path};

/// Extension of generated declaration files
pub const DECLARATION_EXTENSION: &str = ".d.ts";

const JAVA_EXTENSION: &str = ".java";

/// Module specifier for importing `to` from a file at `from`.
///
/// Both are output-relative declaration paths. The result never carries the
/// declaration extension and always starts with `./` or `../`.
///
/// ```
/// use javadecl::paths::relative_module;
///
/// assert_eq!(relative_module("a/b/X.d.ts", "a/c/Y.d.ts"), "../c/Y");
/// ```
pub fn relative_module(from: &str, to: &str) -> String {
    let from_dirs: Vec<&str> = {
        let mut segments: Vec<&str> = segments(from).collect();
        segments.pop();
        segments
    };
    let target = to.strip_suffix(DECLARATION_EXTENSION).unwrap_or(to);
    let to_segments: Vec<&str> = segments(target).collect();
    let to_dirs = &to_segments[..to_segments.len().saturating_sub(1)];

    let common = from_dirs
        .iter()
        .zip(to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dirs.len() - common;
    let prefix = if ups == 0 {
        "./".to_string()
    } else {
        "../".repeat(ups)
    };

    format!("{prefix}{}", to_segments[common..].join("/"))
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// Declaration path of a dotted type path: `a.b.Foo` becomes `a/b/Foo.d.ts`.
pub fn output_path_for(dotted: &str) -> String {
    format!("{}{DECLARATION_EXTENSION}", dotted.replace('.', "/"))
}

/// Declaration path for a source file given relative to its source root:
/// `com/example/Foo.java` becomes `com/example/Foo.d.ts`.
pub fn declaration_path(relative_source: &Path) -> String {
    let joined = relative_source
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    match joined.strip_suffix(JAVA_EXTENSION) {
        Some(stem) => format!("{stem}{DECLARATION_EXTENSION}"),
        None => format!("{joined}{DECLARATION_EXTENSION}"),
    }
}
