pub mod ast;
pub mod document;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;

pub use ast::{Document, Mapping, Value, MAX_DEPTH};
pub use error::AsonError;
