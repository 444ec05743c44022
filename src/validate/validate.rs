use super::context::{errors_to_result, ValidationContext};
use super::error::ValidationError;
use super::type_info_visitor::TypeInfoVisitor;
use crate::ast::{ASTContext, DefaultIn, Document};
use crate::error::Result;
use crate::schema::Schema;
use crate::visit::{ComposedVisitor, VisitNode, Visitor};
use std::borrow::Borrow;

/// Trait for a `ValidationRule` that checks a given GraphQL document against a schema using a
/// visitor.
///
/// A rule always implements a visitor and accepts the [`ValidationContext`] structure as
/// its passed context. Rules report problems with [`ValidationContext::report_error`] and keep
/// going, so that a single pass finds every error in a document.
///
/// Rules implement the [`DefaultIn`] trait, which allows them to be instantiated in the arena of
/// the document they validate. Rules carry no state between runs.
pub trait ValidationRule<'a>: Visitor<'a, ValidationContext<'a>> + DefaultIn<'a> {
    /// Run this `ValidationRule` against the given document and return a result which errors if
    /// the rule fails on the document.
    #[inline]
    fn validate(
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
        document: &'a Document<'a>,
    ) -> Result<()> {
        Validator::new(schema)
            .validate::<Self>(ctx, document)
            .into_result()
    }
}

impl<'a, A, B> DefaultIn<'a> for ComposedVisitor<'a, ValidationContext<'a>, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
    #[inline]
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        ComposedVisitor::new(A::default_in(arena), B::default_in(arena))
    }
}

impl<'a, A, B> ValidationRule<'a> for ComposedVisitor<'a, ValidationContext<'a>, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
}

/// Options for a [Validator].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Stop validating once this many errors were reported. Unlimited by default.
    pub max_errors: Option<usize>,
}

impl ValidationOptions {
    #[inline]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }
}

/// The verdict of a validation run and every error it found, in the order they were reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<ValidationError>,
    aborted: bool,
}

impl ValidationOutcome {
    /// A document is valid when no rule reported an error.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether validation stopped early because the error limit was reached.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    #[inline]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Converts the outcome into a result that carries all error messages if validation failed.
    pub fn into_result(self) -> Result<()> {
        errors_to_result(&self.errors)
    }

    /// Serializes the errors as a GraphQL response's `errors` list.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.errors)
    }
}

/// Validates documents against a schema.
///
/// A validator only borrows the schema, so one schema can be shared by any number of validators.
/// Each run visits the document once, calling all rules in the order they were composed in.
///
/// ```
/// use graphql_validator::{ast::*, schema::*, validate::*};
///
/// let ctx = ASTContext::new();
/// let schema = Schema::parse(&ctx, "type Query { user(id: ID!): String }").unwrap();
/// let document = Document::parse(&ctx, "{ user }").unwrap();
///
/// let outcome = Validator::new(schema).validate::<AllRules>(&ctx, document);
/// assert!(!outcome.is_valid());
/// assert_eq!(
///     outcome.errors()[0].message,
///     r#"Field "user" argument "id" of type "ID!" is required but not provided."#
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    schema: &'a Schema<'a>,
    options: ValidationOptions,
}

impl<'a> Validator<'a> {
    #[inline]
    pub fn new(schema: &'a Schema<'a>) -> Self {
        Validator {
            schema,
            options: ValidationOptions::default(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn schema(&self) -> &'a Schema<'a> {
        self.schema
    }

    /// Runs a freshly created rule on a document.
    pub fn validate<R: ValidationRule<'a>>(
        &self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> ValidationOutcome {
        let mut rule = R::default_in(&ctx.arena);
        self.validate_with(ctx, document, &mut rule)
    }

    /// Runs the given rule on a document. The rule keeps whatever state the run left in it.
    pub fn validate_with<R: Visitor<'a, ValidationContext<'a>>>(
        &self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
        rule: &mut R,
    ) -> ValidationOutcome {
        let span = tracing::debug_span!(
            "validate",
            definitions = document.definitions.len(),
            max_errors = ?self.options.max_errors,
        );
        let _guard = span.enter();

        let mut validation =
            ValidationContext::new(ctx, self.schema).with_max_errors(self.options.max_errors);
        document.visit(&mut validation, &mut TypeInfoVisitor::new(rule));

        let outcome = ValidationOutcome {
            aborted: validation.is_aborted(),
            errors: validation.into_errors(),
        };
        tracing::debug!(
            errors = outcome.errors.len(),
            valid = outcome.is_valid(),
            aborted = outcome.aborted,
            "validated document"
        );
        outcome
    }

    /// Runs a freshly created rule on a document from async code.
    ///
    /// Validation never waits on anything, so the returned future completes on its first poll
    /// with the same outcome [`Validator::validate`] returns.
    pub async fn validate_async<R: ValidationRule<'a>>(
        &self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> ValidationOutcome {
        self.validate::<R>(ctx, document)
    }
}

/// Trait to run a [`ValidationRule`] on a given GraphQL Document node.
pub trait ValidateNode<'a>
where
    Self: Borrow<Document<'a>>,
{
    /// Run the generic validation rule on the document node and return a result which errors if
    /// the validation rule fails on the current document.
    ///
    /// `document.validate::<YourValidationRule>(&ctx, schema)`
    #[inline]
    fn validate<Rule: ValidationRule<'a>>(
        &'a self,
        ctx: &'a ASTContext,
        schema: &'a Schema<'a>,
    ) -> Result<()> {
        Rule::validate(ctx, schema, self.borrow())
    }
}

impl<'a> ValidateNode<'a> for Document<'a> {}

#[cfg(test)]
mod tests {
    use super::super::rules::*;
    use super::*;
    use crate::ast::ParseNode;
    use crate::schema::ParseSdl;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        type Query {
          user(id: ID!): User
          users(first: Int!, after: String): [User]
        }

        type User {
          name: String
        }
    "};

    const INVALID: &str = indoc! {"
        query {
          user { name unknown }
          users { name }
        }
    "};

    #[test]
    fn reports_all_errors() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, INVALID).unwrap();

        let outcome = Validator::new(schema).validate::<AllRules>(&ctx, document);
        assert!(!outcome.is_valid());
        assert!(!outcome.is_aborted());
        let messages: Vec<_> = outcome.errors().iter().map(|x| x.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                r#"Cannot query field "unknown" on type "User"."#,
                r#"Field "user" argument "id" of type "ID!" is required but not provided."#,
                r#"Field "users" argument "first" of type "Int!" is required but not provided."#,
            ]
        );
    }

    #[test]
    fn valid_document() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, "{ user(id: 1) { name } }").unwrap();

        let outcome = Validator::new(schema).validate::<AllRules>(&ctx, document);
        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
        outcome.into_result().unwrap();
        document.validate::<AllRules>(&ctx, schema).unwrap();
    }

    #[test]
    fn max_errors() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, INVALID).unwrap();

        let outcome = Validator::new(schema)
            .with_options(ValidationOptions::default().with_max_errors(1))
            .validate::<AllRules>(&ctx, document);
        assert!(outcome.is_aborted());
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn into_result() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, "{ users { name } }").unwrap();

        let error = ProvidedNonNullArguments::validate(&ctx, schema, document).unwrap_err();
        assert_eq!(
            error.print(true),
            "GraphQL Error: Document failed validation\n\
             - Field \"users\" argument \"first\" of type \"Int!\" is required but not provided."
        );
    }

    #[test]
    fn validate_with_keeps_rule_state() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, "{ user(id: 1) { name } }").unwrap();

        let mut rule = AllRules::default_in(&ctx.arena);
        let validator = Validator::new(schema);
        let first = validator.validate_with(&ctx, document, &mut rule);
        let second = validator.validate_with(&ctx, document, &mut rule);
        assert_eq!(first, second);
    }

    #[test]
    fn validate_with_after_abort() {
        let ctx = ASTContext::new();
        let sdl = "type Query { user(id: ID!): String other: String }";
        let schema = Schema::parse(&ctx, sdl).unwrap();
        let document = Document::parse(&ctx, "{ user other @skip } { other }").unwrap();

        let mut rule = AllRules::default_in(&ctx.arena);
        let validator =
            Validator::new(schema).with_options(ValidationOptions::default().with_max_errors(2));
        let first = validator.validate_with(&ctx, document, &mut rule);
        let second = validator.validate_with(&ctx, document, &mut rule);
        assert!(first.is_aborted());
        assert_eq!(first.errors()[0].code, "5.1.2.1");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn validate_async() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, INVALID).unwrap();

        let validator = Validator::new(schema);
        let outcome = validator.validate_async::<AllRules>(&ctx, document).await;
        assert_eq!(outcome, validator.validate::<AllRules>(&ctx, document));
        assert_eq!(outcome.errors().len(), 3);
    }

    #[cfg(feature = "json")]
    #[test]
    fn to_json() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, SCHEMA).unwrap();
        let document = Document::parse(&ctx, "{ users { name } }").unwrap();

        let outcome = Validator::new(schema).validate::<ProvidedNonNullArguments>(&ctx, document);
        assert_eq!(
            outcome.to_json().unwrap(),
            serde_json::json!([{
                "message": "Field \"users\" argument \"first\" of type \"Int!\" is required but not provided.",
                "path": "0.selectionSet.0",
                "extensions": { "code": "5.3.3.2", "kind": "Field" }
            }])
        );
    }
}
