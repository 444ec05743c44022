//! `graphql_validator`
//! =========
//!
//! _Single-pass, rule-based static validation of GraphQL documents._
//!
//! The **`graphql_validator`** library checks GraphQL Query Language documents against a schema
//! before they're executed. It follows two goals:
//!
//! - To report every problem in a document in one pass, in a stable order
//! - To be fast enough to run in front of every request an intermediary GraphQL layer handles
//!
//! Documents and schemas are parsed into ASTs that are allocated in an arena, which is owned by an
//! [`ASTContext`](ast::ASTContext). A document is then visited once, while all validation rules
//! run side by side and a [`TypeInfo`](schema::TypeInfo) stack tracks which schema definitions
//! apply to the current node.
//!
//! ```
//! use graphql_validator::{ast::*, schema::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { user(id: ID!): String }").unwrap();
//! let document = Document::parse(&ctx, "{ user }").unwrap();
//!
//! let outcome = Validator::new(schema).validate::<AllRules>(&ctx, document);
//! assert!(!outcome.is_valid());
//! ```
//!
//! This crate doesn't execute requests, coerce variables or print documents. It only decides
//! whether a document is valid and why it isn't.
//!
//! [A good place to start learning more about this crate is the `validate` module...](validate)

pub mod ast;
pub mod error;
pub mod schema;
pub mod validate;
pub mod visit;

pub use bumpalo;
