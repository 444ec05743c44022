//! # Visiting GraphQL ASTs
//!
//! The `graphql_validator::visit` module walks a document in depth-first order and calls back into
//! a [Visitor] for every operation, fragment, selection, directive and argument it passes.
//!
//! - The [Visitor] trait has an `enter_` and a `leave_` callback per node kind, each returning a
//!   [`VisitFlow`] that continues, skips over a node or stops the traversal.
//! - The [`VisitNode`] trait is implemented by the AST nodes a traversal can start at, most
//!   commonly with `document.visit(&mut ctx, &mut visitor)`.
//! - The [`ComposedVisitor`] runs several visitors in a single traversal, calling them in the order
//!   they were composed in. Validation uses it to run all rules in one pass.
//! - Every callback receives a [`VisitInfo`] with the [Path] of the current node.
//!
//! A visitor collecting the names of all operations in a document may look like this:
//!
//! ```
//! use graphql_validator::{ast::*, visit::*};
//!
//! #[derive(Default)]
//! struct OperationNames<'a> {
//!     names: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for OperationNames<'a> {
//!     fn enter_operation(
//!         &mut self,
//!         _ctx: &mut (),
//!         operation: &'a OperationDefinition<'a>,
//!         _info: &VisitInfo,
//!     ) -> VisitFlow {
//!         if let Some(name) = operation.name {
//!             self.names.push(name.name);
//!         }
//!         // The selections of an operation don't matter here
//!         VisitFlow::Skip
//!     }
//! }
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse(&ctx, "query A { a } { b } mutation B { c }").unwrap();
//! let mut visitor = OperationNames::default();
//! document.visit(&mut (), &mut visitor);
//! assert_eq!(visitor.names, ["A", "B"]);
//! ```

mod compose;
mod path;
mod visitor;

pub use compose::ComposedVisitor;
pub use path::*;
pub use visitor::*;
