pub mod ast;
pub mod compile;
pub mod error;
pub mod resolve;
pub mod text;

pub use ast::{Document, Value};
pub use compile::{CompileOptions, Compiler, PlatformTag};
pub use error::SigilError;
