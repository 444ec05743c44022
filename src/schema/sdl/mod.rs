//! Reads a [Schema](crate::schema::Schema) from GraphQL SDL source text using [ParseSdl].

mod finalizers;
mod parse_ast;


pub mod error;
pub mod parser;

pub use error::SchemaError;
pub use parser::ParseSdl;
