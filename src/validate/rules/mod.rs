use crate::visit::ComposedVisitor;

mod fields_on_correct_type;
mod known_argument_names;
mod known_directives;
mod known_fragment_names;
mod lone_anonymous_operation;
mod no_undefined_variables;
mod provided_non_null_arguments;
mod unique_argument_names;
mod unique_fragment_names;
mod unique_operation_names;
mod unique_variable_names;

pub use super::context::ValidationContext;
pub use fields_on_correct_type::*;
pub use known_argument_names::*;
pub use known_directives::*;
pub use known_fragment_names::*;
pub use lone_anonymous_operation::*;
pub use no_undefined_variables::*;
pub use provided_non_null_arguments::*;
pub use unique_argument_names::*;
pub use unique_fragment_names::*;
pub use unique_operation_names::*;
pub use unique_variable_names::*;

/// All of GraphQL's validation rules which don't require a schema to be run combined into one
/// `ValidationRule`.
///
/// See: [`ComposedVisitor`]
pub type DefaultRules<'a> = ComposedVisitor<
    'a,
    ValidationContext<'a>,
    ComposedVisitor<
        'a,
        ValidationContext<'a>,
        ComposedVisitor<'a, ValidationContext<'a>, LoneAnonymousOperation, UniqueOperationNames<'a>>,
        ComposedVisitor<
            'a,
            ValidationContext<'a>,
            UniqueFragmentNames<'a>,
            KnownFragmentNames<'a>,
        >,
    >,
    ComposedVisitor<
        'a,
        ValidationContext<'a>,
        ComposedVisitor<'a, ValidationContext<'a>, UniqueArgumentNames<'a>, UniqueVariableNames<'a>>,
        NoUndefinedVariables<'a>,
    >,
>;

/// The validation rules that look definitions up in the schema, combined into one
/// `ValidationRule`.
///
/// See: [`ComposedVisitor`]
pub type SchemaRules<'a> = ComposedVisitor<
    'a,
    ValidationContext<'a>,
    ComposedVisitor<'a, ValidationContext<'a>, FieldsOnCorrectType, KnownArgumentNames>,
    ComposedVisitor<'a, ValidationContext<'a>, KnownDirectives<'a>, ProvidedNonNullArguments>,
>;

/// Every validation rule this crate implements, [`DefaultRules`] followed by [`SchemaRules`].
pub type AllRules<'a> = ComposedVisitor<'a, ValidationContext<'a>, DefaultRules<'a>, SchemaRules<'a>>;

/// Validates a query against a schema with a single rule.
#[cfg(test)]
pub(crate) fn validate_rule<'a, R: super::ValidationRule<'a>>(
    ctx: &'a crate::ast::ASTContext,
    schema: &'a str,
    query: &'a str,
) -> super::ValidationOutcome {
    use crate::{ast::*, schema::*};
    let schema = Schema::parse(ctx, schema).unwrap();
    let document = Document::parse(ctx, query).unwrap();
    super::Validator::new(schema).validate::<R>(ctx, document)
}

/// Validates a query with a single rule that doesn't need more than a query type.
#[cfg(test)]
pub(crate) fn validate_document<'a, R: super::ValidationRule<'a>>(
    ctx: &'a crate::ast::ASTContext,
    query: &'a str,
) -> super::ValidationOutcome {
    validate_rule::<R>(ctx, "type Query { a(x: Int): Int b(x: Int): Int }", query)
}

#[cfg(test)]
pub(crate) fn messages(outcome: &super::ValidationOutcome) -> Vec<String> {
    outcome
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect()
}
