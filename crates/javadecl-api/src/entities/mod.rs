pub mod class;
pub mod function;
pub mod module;

pub use class::{Field, TypeDecl, TypeKind};
pub use function::{Method, Parameter};
pub use module::{Import, SourceFile};
