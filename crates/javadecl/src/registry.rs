//! Cross-file registries accumulated while emitting and flushed at the end
//! of a run into the index and hooks files.

use javadecl_api::TypeKind;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::paths::relative_module;
use crate::render::is_reserved_word;

/// Suffix marking an interface whose nested types become hooks
pub const EVENT_SUFFIX: &str = "Event";

/// One emitted declaration, top-level or nested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTypeRecord {
    /// `Foo`, or `Foo.Bar` for nested declarations
    pub name: String,
    pub package: String,
    /// Output-relative path of the declaration file
    pub file_path: String,
    pub kind: TypeKind,
    pub is_nested: bool,
}

/// One nested type of an `*Event` interface exposed as a global hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRecord {
    pub hook_name: String,
    /// In-file name of the event interface, e.g. `ServerEvent` or `Outer.ServerEvent`
    pub event_name: String,
    pub sub_type: String,
    /// Fully qualified dotted reference, e.g. `com.example.ServerEvent.Started`
    pub reference: String,
    pub package: String,
    /// Output-relative path of the declaring file
    pub file_path: String,
}

/// Derive the hook function name for a nested event type.
///
/// `Started` gives `started`, `ChatEvent` gives `chat`. A stem that lowers
/// to a reserved word keeps its case behind an `on` prefix: `Break` gives
/// `onBreak`. An empty stem yields no hook.
pub fn hook_name(sub_type: &str) -> Option<String> {
    let stem = sub_type.strip_suffix(EVENT_SUFFIX).unwrap_or(sub_type);
    let mut chars = stem.chars();
    let first = chars.next()?;

    let lowered: String = first.to_lowercase().chain(chars).collect();
    if is_reserved_word(&lowered) {
        Some(format!("on{stem}"))
    } else {
        Some(lowered)
    }
}

/// Registry of every emitted declaration
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    records: Vec<GeneratedTypeRecord>,
}

impl TypeRegistry {
    pub fn push(&mut self, record: GeneratedTypeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GeneratedTypeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct top-level names and their declaration files, sorted by name.
    /// A name declared in several packages maps to the smallest path.
    pub fn index_entries(&self) -> BTreeMap<&str, &str> {
        let mut entries: BTreeMap<&str, &str> = BTreeMap::new();
        for record in self.records.iter().filter(|r| !r.is_nested) {
            entries
                .entry(record.name.as_str())
                .and_modify(|path| {
                    if record.file_path.as_str() < *path {
                        *path = record.file_path.as_str();
                    }
                })
                .or_insert(record.file_path.as_str());
        }
        entries
    }

    /// Contents of the global index file located at `index_path`
    pub fn render_index(&self, index_path: &str) -> String {
        let mut out = String::from("declare global {\n");
        for (name, file_path) in self.index_entries() {
            let module = relative_module(index_path, file_path);
            let _ = writeln!(out, "    type {name} = import(\"{module}\").{name};");
        }
        out.push_str("}\n\nexport {};\n");
        out
    }
}

/// Registry of hook functions; repeated names accumulate as overloads
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    records: Vec<HookRecord>,
}

impl HookRegistry {
    pub fn push(&mut self, record: HookRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contents of the hooks file located at `hooks_path`.
    ///
    /// `references` are output-relative files pulled in with triple-slash
    /// directives. Records are stably sorted by hook name, so overloads keep
    /// their accumulation order.
    pub fn render_hooks(&self, hooks_path: &str, references: &[String]) -> String {
        let mut out = String::new();
        for reference in references {
            let module = relative_module(hooks_path, reference);
            let _ = writeln!(out, "/// <reference path=\"{module}.d.ts\" />");
        }
        if !references.is_empty() {
            out.push('\n');
        }

        let mut records: Vec<&HookRecord> = self.records.iter().collect();
        records.sort_by(|a, b| a.hook_name.cmp(&b.hook_name));

        out.push_str("declare global {\n");
        for record in records {
            let module = relative_module(hooks_path, &record.file_path);
            let _ = writeln!(
                out,
                "    function {}(event: import(\"{module}\").{}.{}): void;",
                record.hook_name, record.event_name, record.sub_type
            );
        }
        out.push_str("}\n\nexport {};\n");
        out
    }
}
