//! # Using Schema Definitions
//!
//! The `graphql_validator::schema` module contains the type system model that documents are
//! validated against, a parser that reads it from GraphQL SDL, and [TypeInfo], which tracks the
//! schema definitions that apply at each node during a traversal.
//!
//! ```
//! use graphql_validator::{ast::ASTContext, schema::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { user(id: ID!): String }").unwrap();
//!
//! let user = schema.query_type().and_then(|query| query.get_field("user")).unwrap();
//! assert_eq!(user.arguments[0].input_type.to_string(), "ID!");
//! ```
//!
//! [More information on the Schema struct.](Schema)

#[allow(clippy::module_inception)]
pub mod schema;
pub mod sdl;
mod type_info;

pub use schema::*;
pub use sdl::{ParseSdl, SchemaError};
pub use type_info::TypeInfo;
