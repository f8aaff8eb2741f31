//! javadecl Parser API
//!
//! Shared model and traits for the javadecl Java-to-TypeScript declaration
//! generator.
//!
//! This crate defines:
//!
//! - **SourceParser trait**: the interface the Java parser implements
//! - **Entity types**: the structural tree extracted from one Java file
//!   ([`SourceFile`], [`TypeDecl`], [`Method`], [`Field`], [`Parameter`])
//! - **Configuration**: parser and generator settings, loadable from JSON
//! - **Metrics**: parse success and timing counters
//! - **Error handling**: parser and configuration errors
//!
//! # Example
//!
//! ```rust,ignore
//! use javadecl_api::{SourceParser, ParserConfig, ParserError, FileInfo};
//! use std::path::Path;
//!
//! fn dump(parser: &dyn SourceParser) -> Result<(), ParserError> {
//!     let info = parser.parse_file(Path::new("src/main/java/com/example/Api.java"))?;
//!     for decl in &info.source.types {
//!         println!("{} {}", decl.kind.keyword(), decl.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entities;
pub mod errors;
pub mod metrics;
pub mod syntax;
pub mod traits;


// Re-export commonly used types
pub use config::{GeneratorConfig, ParserConfig};
pub use entities::{Field, Import, Method, Parameter, SourceFile, TypeDecl, TypeKind};
pub use errors::{ConfigError, ParserError, ParserResult};
pub use metrics::ParserMetrics;
pub use traits::{parse_files_sequential, FileInfo, ProjectInfo, SourceParser};
