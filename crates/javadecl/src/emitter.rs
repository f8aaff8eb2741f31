//! Per-file emission plus the registries flushed after the last file

use javadecl_api::{GeneratorConfig, SourceFile, TypeDecl, TypeKind};
use tracing::debug;

use crate::convert::{local_type_names, TypeConverter};
use crate::registry::{
    hook_name, GeneratedTypeRecord, HookRecord, HookRegistry, TypeRegistry, EVENT_SUFFIX,
};
use crate::render;

/// One output file, addressed relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: String,
    pub contents: String,
}

/// Turns parsed source files into declaration files.
///
/// Files must be fed in a stable order; the registries record declarations
/// in feed order and [`Emitter::finish`] renders them once all files are in.
#[derive(Debug, Clone)]
pub struct Emitter {
    api_packages: Vec<String>,
    index_file: String,
    hooks_file: String,
    hook_references: Vec<String>,
    types: TypeRegistry,
    hooks: HookRegistry,
}

impl Emitter {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            api_packages: config.api_packages.clone(),
            index_file: config.index_file.clone(),
            hooks_file: config.hooks_file.clone(),
            hook_references: config.hook_references.clone(),
            types: TypeRegistry::default(),
            hooks: HookRegistry::default(),
        }
    }

    /// Render the declaration file for `file` at `output_path` and record its
    /// declarations. Files without types produce nothing.
    pub fn emit_file(&mut self, file: &SourceFile, output_path: &str) -> Option<EmittedFile> {
        if file.is_empty() {
            return None;
        }

        let local_types = local_type_names(&file.types);
        let converter = TypeConverter::new(file, output_path, &self.api_packages, &local_types);
        let contents = render::render_file(file, &converter);

        for decl in &file.types {
            self.record(file, decl, output_path, None);
        }
        debug!(
            path = output_path,
            types = file.type_count(),
            "emitted declaration file"
        );

        Some(EmittedFile {
            path: output_path.to_string(),
            contents,
        })
    }

    fn record(&mut self, file: &SourceFile, decl: &TypeDecl, output_path: &str, parent: Option<&str>) {
        let display = match parent {
            Some(parent) => format!("{parent}.{}", decl.name),
            None => decl.name.clone(),
        };

        self.types.push(GeneratedTypeRecord {
            name: display.clone(),
            package: file.package.clone(),
            file_path: output_path.to_string(),
            kind: decl.kind,
            is_nested: parent.is_some(),
        });

        if decl.kind == TypeKind::Interface && decl.name.ends_with(EVENT_SUFFIX) {
            for sub in &decl.nested {
                let Some(hook) = hook_name(&sub.name) else {
                    continue;
                };
                self.hooks.push(HookRecord {
                    hook_name: hook,
                    event_name: display.clone(),
                    sub_type: sub.name.clone(),
                    reference: file.qualify(&format!("{display}.{}", sub.name)),
                    package: file.package.clone(),
                    file_path: output_path.to_string(),
                });
            }
        }

        for nested in &decl.nested {
            self.record(file, nested, output_path, Some(&display));
        }
    }

    pub fn type_registry(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn hook_registry(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn render_index(&self) -> EmittedFile {
        EmittedFile {
            path: self.index_file.clone(),
            contents: self.types.render_index(&self.index_file),
        }
    }

    pub fn render_hooks(&self) -> EmittedFile {
        EmittedFile {
            path: self.hooks_file.clone(),
            contents: self
                .hooks
                .render_hooks(&self.hooks_file, &self.hook_references),
        }
    }

    /// The index and hooks files for everything emitted so far
    pub fn finish(&self) -> Vec<EmittedFile> {
        vec![self.render_index(), self.render_hooks()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javadecl_api::Method;

    fn emitter() -> Emitter {
        let mut config = GeneratorConfig::default().with_api_package("com.example");
        config.hook_references.clear();
        Emitter::new(&config)
    }

    fn event_file() -> SourceFile {
        SourceFile::new("com.example.event").with_types(vec![TypeDecl::interface("FooEvent")
            .with_nested(vec![
                TypeDecl::interface("Bar").with_extends("FooEvent"),
                TypeDecl::interface("Break").with_extends("FooEvent"),
            ])])
    }

    #[test]
    fn test_empty_file_emits_nothing() {
        let mut emitter = emitter();
        assert!(emitter
            .emit_file(&SourceFile::new("a"), "a/Nothing.d.ts")
            .is_none());
        assert!(emitter.type_registry().is_empty());
    }

    #[test]
    fn test_records_nested_types() {
        let mut emitter = emitter();
        let emitted = emitter
            .emit_file(&event_file(), "com/example/event/FooEvent.d.ts")
            .unwrap();

        assert_eq!(emitted.path, "com/example/event/FooEvent.d.ts");
        assert!(emitted.contents.contains("export type Bar = FooEvent;"));

        let names: Vec<_> = emitter
            .type_registry()
            .records()
            .iter()
            .map(|r| (r.name.as_str(), r.is_nested))
            .collect();
        assert_eq!(
            names,
            vec![("FooEvent", false), ("FooEvent.Bar", true), ("FooEvent.Break", true)]
        );
    }

    #[test]
    fn test_event_hooks() {
        let mut emitter = emitter();
        emitter.emit_file(&event_file(), "com/example/event/FooEvent.d.ts");

        let hooks = emitter.hook_registry().records();
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].hook_name, "bar");
        assert_eq!(hooks[0].reference, "com.example.event.FooEvent.Bar");
        assert_eq!(hooks[1].hook_name, "onBreak");

        let hooks_file = emitter.render_hooks();
        assert_eq!(hooks_file.path, "hooks.d.ts");
        assert!(hooks_file.contents.contains(
            "    function bar(event: import(\"./com/example/event/FooEvent\").FooEvent.Bar): void;"
        ));
    }

    #[test]
    fn test_nested_event_interface() {
        let file = SourceFile::new("x").with_types(vec![TypeDecl::class("Events").with_nested(
            vec![TypeDecl::interface("ChatEvent")
                .with_nested(vec![TypeDecl::class("Sent")
                    .with_methods(vec![Method::new("message", "String")])])],
        )]);

        let mut emitter = emitter();
        emitter.emit_file(&file, "x/Events.d.ts");

        let hooks = emitter.hook_registry().records();
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].hook_name, "sent");
        assert_eq!(hooks[0].event_name, "Events.ChatEvent");
        assert_eq!(hooks[0].reference, "x.Events.ChatEvent.Sent");
    }

    #[test]
    fn test_class_named_event_is_not_hooked() {
        let file = SourceFile::new("x").with_types(vec![TypeDecl::class("TickEvent")
            .with_nested(vec![TypeDecl::class("Pre").with_extends("TickEvent")])]);

        let mut emitter = emitter();
        emitter.emit_file(&file, "x/TickEvent.d.ts");
        assert!(emitter.hook_registry().is_empty());
    }

    #[test]
    fn test_finish() {
        let mut emitter = emitter();
        emitter.emit_file(&event_file(), "com/example/event/FooEvent.d.ts");

        let files = emitter.finish();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "index.d.ts");
        assert_eq!(
            files[0].contents,
            "declare global {\n    type FooEvent = import(\"./com/example/event/FooEvent\").FooEvent;\n}\n\nexport {};\n"
        );
        assert!(files[1].contents.starts_with("declare global {\n"));
    }
}
