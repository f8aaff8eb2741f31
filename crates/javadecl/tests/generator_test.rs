//! End-to-end generator tests over a small Java source tree

use javadecl::{Generator, GeneratorConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SERVER: &str = r#"package com.example.api;

import java.util.List;
import java.util.Optional;
import java.util.UUID;
import java.util.function.Consumer;

/**
 * The running server.
 */
public interface Server {
    String getName();

    List<String> getMotd();

    Optional<Player> findPlayer(UUID id);

    void broadcast(String message, Consumer<Player> callback);
}
"#;

const SERVER_EVENT: &str = r#"package com.example.api.event;

import com.example.api.Server;

/** Fired around the server lifecycle. */
public interface ServerEvent {
    Server getServer();

    interface Started extends ServerEvent {}

    interface Break extends ServerEvent {}
}
"#;

const LEVEL_EVENT: &str = r#"package com.example.api.event;

public interface LevelEvent {
    interface Started extends LevelEvent {}
}
"#;

const HIDDEN: &str = r#"package com.example.internal;

class Hidden {
    public void run() {}
}
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn source_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "com/example/api/Server.java", SERVER);
    write(dir.path(), "com/example/api/event/ServerEvent.java", SERVER_EVENT);
    write(dir.path(), "com/example/api/event/LevelEvent.java", LEVEL_EVENT);
    write(dir.path(), "com/example/internal/Hidden.java", HIDDEN);
    write(
        dir.path(),
        "com/example/api/package-info.java",
        "/** API. */\npackage com.example.api;\n",
    );
    dir
}

fn config(src: &Path, out: &Path) -> GeneratorConfig {
    GeneratorConfig::new(out)
        .with_source_dir(src)
        .with_api_package("com.example.api")
        .with_clean_output(true)
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_generates_declaration_files() {
    let src = source_tree();
    let out = TempDir::new().unwrap();

    let report = Generator::new(config(src.path(), out.path()))
        .unwrap()
        .run()
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.files_parsed, 4);
    assert_eq!(report.files_written, 3);
    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.types_emitted, 6);
    assert_eq!(report.hooks_emitted, 3);
    assert!(!out.path().join("com/example/internal").exists());

    assert_eq!(
        read(out.path(), "com/example/api/event/ServerEvent.d.ts"),
        r#"// Type definitions for com.example.api.event
// Generated by javadecl from Java sources. Do not edit.

/** Fired around the server lifecycle. */
export interface ServerEvent {
    getServer(): import("../Server").Server;
}

export namespace ServerEvent {
    export type Started = ServerEvent;

    export type Break = ServerEvent;
}
"#
    );
}

#[test]
fn test_type_conversion_in_output() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    Generator::new(config(src.path(), out.path()))
        .unwrap()
        .run()
        .unwrap();

    let server = read(out.path(), "com/example/api/Server.d.ts");
    assert!(server.contains("/**\n * The running server.\n */\nexport interface Server {\n"));
    assert!(server.contains("    getName(): string;\n"));
    assert!(server.contains("    getMotd(): string[];\n"));
    assert!(server
        .contains("    findPlayer(id: Java.java.util.UUID): import(\"./Player\").Player | null;\n"));
    assert!(server.contains(
        "    broadcast(message: string, callback: (arg0: import(\"./Player\").Player) => void): void;\n"
    ));
}

#[test]
fn test_index_file() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    Generator::new(config(src.path(), out.path()))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(
        read(out.path(), "index.d.ts"),
        r#"declare global {
    type LevelEvent = import("./com/example/api/event/LevelEvent").LevelEvent;
    type Server = import("./com/example/api/Server").Server;
    type ServerEvent = import("./com/example/api/event/ServerEvent").ServerEvent;
}

export {};
"#
    );
}

#[test]
fn test_hooks_file_with_overloads() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    Generator::new(config(src.path(), out.path()))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(
        read(out.path(), "hooks.d.ts"),
        r#"/// <reference path="./minecraft-raw.d.ts" />
/// <reference path="./forge-events-raw.d.ts" />

declare global {
    function onBreak(event: import("./com/example/api/event/ServerEvent").ServerEvent.Break): void;
    function started(event: import("./com/example/api/event/LevelEvent").LevelEvent.Started): void;
    function started(event: import("./com/example/api/event/ServerEvent").ServerEvent.Started): void;
}

export {};
"#
    );
}

#[test]
fn test_clean_runs_are_idempotent() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    let generator = Generator::new(config(src.path(), out.path())).unwrap();

    generator.run().unwrap();
    let first = snapshot(out.path());

    let report = generator.run().unwrap();
    assert_eq!(report.files_cleaned, 5);
    assert_eq!(snapshot(out.path()), first);
}

#[test]
fn test_clean_removes_stale_outputs() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    write(out.path(), "com/example/api/Removed.d.ts", "stale");
    write(out.path(), "forge-events-raw.d.ts", "// hand written");

    Generator::new(config(src.path(), out.path()))
        .unwrap()
        .run()
        .unwrap();

    assert!(!out.path().join("com/example/api/Removed.d.ts").exists());
    assert_eq!(read(out.path(), "forge-events-raw.d.ts"), "// hand written");
}

#[test]
fn test_without_clean_keeps_stale_outputs() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    write(out.path(), "Stale.d.ts", "stale");

    let config = config(src.path(), out.path()).with_clean_output(false);
    let report = Generator::new(config).unwrap().run().unwrap();

    assert_eq!(report.files_cleaned, 0);
    assert!(out.path().join("Stale.d.ts").exists());
}

#[test]
fn test_patches_are_copied() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    let patches = TempDir::new().unwrap();
    write(patches.path(), "server.d.ts", "// server patch");
    write(patches.path(), "extra/world.d.ts", "// world patch");
    write(out.path(), "patches/old.d.ts.bak", "old");

    let config = config(src.path(), out.path()).with_patch_dir(patches.path());
    let report = Generator::new(config).unwrap().run().unwrap();

    assert_eq!(report.patches_copied, 2);
    assert_eq!(read(out.path(), "patches/server.d.ts"), "// server patch");
    assert_eq!(read(out.path(), "patches/extra/world.d.ts"), "// world patch");
    assert!(!out.path().join("patches/old.d.ts.bak").exists());
}

#[test]
fn test_parallel_output_matches_sequential() {
    let src = source_tree();
    let sequential = TempDir::new().unwrap();
    let parallel = TempDir::new().unwrap();

    Generator::new(config(src.path(), sequential.path()))
        .unwrap()
        .run()
        .unwrap();

    let mut parallel_config = config(src.path(), parallel.path());
    parallel_config.parser.parallel = true;
    parallel_config.parser.parallel_workers = Some(3);
    Generator::new(parallel_config).unwrap().run().unwrap();

    assert_eq!(snapshot(sequential.path()), snapshot(parallel.path()));
}

#[test]
fn test_config_from_json() {
    let src = source_tree();
    let out = TempDir::new().unwrap();
    let json = serde_json::json!({
        "source_dirs": [src.path()],
        "output_dir": out.path(),
        "api_packages": ["com.example.api"],
        "hook_references": [],
        "index_file": "globals.d.ts"
    });

    let config = GeneratorConfig::from_json_str(&json.to_string()).unwrap();
    Generator::new(config).unwrap().run().unwrap();

    assert!(out.path().join("globals.d.ts").exists());
    assert!(read(out.path(), "hooks.d.ts").starts_with("declare global {\n"));
}

/// Every file under `root` with its contents, sorted by path
fn snapshot(root: &Path) -> Vec<(String, String)> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap();
            (
                rel.to_string_lossy().into_owned(),
                fs::read_to_string(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}
