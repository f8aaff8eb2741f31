//! # javadecl-java
//!
//! Java source parser for javadecl - extracts packages, imports, interfaces,
//! classes, nested types, methods, fields and Javadoc from Java source files.
//!
//! ## Features
//!
//! - Lightweight pattern matching over a literal- and comment-aware masked
//!   view of the source; no compiler front end
//! - Unbounded nesting: nested types are excised from their parent's member
//!   text and parsed recursively
//! - Best-effort: malformed input yields fewer declarations, never an error
//! - Optional parallel batch parsing with rayon
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use javadecl_java::JavaParser;
//! use javadecl_api::SourceParser;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = JavaParser::new();
//!
//! let info = parser.parse_file(Path::new("src/main/java/com/example/Api.java"))?;
//! println!("Parsed {} types", info.type_count());
//! # Ok(())
//! # }
//! ```

mod extractor;
mod parser_impl;
mod patterns;
mod scanner;
mod visitor;

// Re-export parser-api types for convenience
pub use javadecl_api::{
    FileInfo, ParserConfig, ParserError, ParserMetrics, ProjectInfo, SourceFile, SourceParser,
};

pub use extractor::extract;
pub use parser_impl::JavaParser;
