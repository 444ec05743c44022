//! # GraphQL Query Language AST
//!
//! The `graphql_validator::ast` module contains the AST of executable GraphQL documents and the
//! parser that produces it. Validation only ever reads this AST, so it has no printer and no
//! execution helpers.
//! [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! Its main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - [`ParseNode`], a trait using which AST Nodes are parsed from source text
//!
//! ```
//! use graphql_validator::ast::*;
//!
//! let ctx = ASTContext::new();
//! let ast = Document::parse(&ctx, "{ field(id: 1) }").unwrap();
//! assert_eq!(ast.definitions.len(), 1);
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_kind;
mod default_in;
pub(crate) mod lexer;
pub(crate) mod parser;

pub use ast::*;
pub use ast_kind::ASTKind;
pub use parser::ParseNode;
