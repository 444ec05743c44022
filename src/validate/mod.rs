//! # Validation Rules for GraphQL ASTs
//!
//! This module validates GraphQL Query Language documents against a [Schema](crate::schema::Schema).
//! Validation runs a set of rules over a document in a single traversal and collects every error
//! they report, instead of stopping at the first one.
//!
//! The rules this module already comes with are grouped into [`DefaultRules`](rules::DefaultRules),
//! which only look at the document, and [`SchemaRules`](rules::SchemaRules), which look definitions
//! up in the schema. [`AllRules`](rules::AllRules) runs both:
//!
//! - [`rules::LoneAnonymousOperation`]: validates that a document only contains a single anonymous operation
//! - [`rules::UniqueOperationNames`]: checks that no operations share the same name
//! - [`rules::UniqueFragmentNames`]: checks that no fragments share the same name
//! - [`rules::KnownFragmentNames`]: validates that all spread fragments are defined
//! - [`rules::UniqueArgumentNames`]: checks for arguments that are used to not contain duplicates
//! - [`rules::UniqueVariableNames`]: checks that no variables share the same name
//! - [`rules::NoUndefinedVariables`]: checks that all used variables are defined per operation
//! - [`rules::FieldsOnCorrectType`]: checks that all selected fields exist on their parent type
//! - [`rules::KnownArgumentNames`]: checks that all passed arguments are defined
//! - [`rules::KnownDirectives`]: checks that directives are defined and used at allowed locations
//! - [`rules::ProvidedNonNullArguments`]: checks that all non-null arguments are passed
//!
//! The [visit](crate::visit) module is used to actually execute validation rules.
//! The [`ValidationRule`] trait is simply defined to implement the [Visitor](crate::visit::Visitor) trait
//! and to accept the [`ValidationContext`], which tracks the schema types of the current node and
//! collects validation errors. Rules are composed using the
//! [`ComposedVisitor`](crate::visit::ComposedVisitor) utility and are called in the order they
//! were composed in.
//!
//! The [Validator] runs a rule on a document and returns a [`ValidationOutcome`] with all errors:
//!
//! ```
//! use graphql_validator::{ast::*, schema::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { field(x: String!, y: Int): String }").unwrap();
//! let document = Document::parse(&ctx, "{ field(y: 1) @skip }").unwrap();
//!
//! let outcome = Validator::new(schema).validate::<AllRules>(&ctx, document);
//! let messages: Vec<_> = outcome.errors().iter().map(|error| error.to_string()).collect();
//! assert_eq!(
//!     messages,
//!     [
//!         r#"Directive "skip" argument "if" of type "Boolean!" is required but not provided."#,
//!         r#"Field "field" argument "x" of type "String!" is required but not provided."#,
//!     ]
//! );
//! ```
//!
//! Another way is to utilize the [`ValidateNode`] trait instead to run validation starting from an
//! AST Node rather from the rule itself:
//!
//! ```
//! use graphql_validator::{ast::*, schema::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let schema = Schema::parse(&ctx, "type Query { field: String }").unwrap();
//! let document = Document::parse(&ctx, "{ field }").unwrap();
//!
//! document.validate::<AllRules>(&ctx, schema).unwrap()
//! ```

#[allow(clippy::module_inception)]
mod validate;

mod context;
mod error;
mod type_info_visitor;

pub mod rules;
pub use context::ValidationContext;
pub use error::ValidationError;
pub use rules::{AllRules, DefaultRules, SchemaRules};
pub use type_info_visitor::TypeInfoVisitor;
pub use validate::*;
