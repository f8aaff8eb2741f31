//! # javadecl
//!
//! Generates TypeScript ambient declaration files (`.d.ts`) from the Java
//! sources of an API, so editors and script runtimes can type-check against
//! it without a Java toolchain.
//!
//! ## Architecture
//!
//! ```text
//! Generator (discover, clean, write, patches)
//!     ↓
//! JavaParser (javadecl-java)   → SourceFile per file
//!     ↓
//! Emitter (convert, render)    → one .d.ts per file
//!     ↓
//! Registries                   → index.d.ts, hooks.d.ts
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use javadecl::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("build/typings")
//!     .with_source_dir("src/main/java")
//!     .with_api_package("com.example.api")
//!     .with_clean_output(true);
//!
//! let report = Generator::new(config)?.run()?;
//! println!("wrote {} declaration files", report.files_written);
//! # Ok::<(), javadecl::GeneratorError>(())
//! ```

#![deny(unsafe_code)]

pub mod convert;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod paths;
pub mod registry;
pub mod render;

// Re-export main types
pub use convert::TypeConverter;
pub use emitter::{EmittedFile, Emitter};
pub use error::{GeneratorError, Result};
pub use generator::{GenerationReport, Generator};
pub use javadecl_api::{GeneratorConfig, ParserConfig, SourceFile, TypeDecl};
pub use registry::{GeneratedTypeRecord, HookRecord, HookRegistry, TypeRegistry};
