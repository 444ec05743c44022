use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, schema::SchemaInputField, visit::*};

/// Validates that every argument of a non-null type is passed to the fields and directives that
/// declare it.
///
/// Arguments are checked in the order the schema declares them, so missing arguments are reported
/// in declaration order. Only the argument's type is considered: a non-null argument is required
/// even when the schema gives it a default value. Fields and directives the schema doesn't know
/// are left to other rules.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Required-Arguments)
#[derive(Default, Clone, Copy, Debug)]
pub struct ProvidedNonNullArguments;

impl<'a> ValidationRule<'a> for ProvidedNonNullArguments {}

const CODE: &str = "5.3.3.2";

/// Yields the non-null argument definitions that have no argument of the same name.
fn missing_arguments<'a, 'b>(
    definitions: &'b [SchemaInputField<'a>],
    arguments: &'b Arguments<'a>,
) -> impl Iterator<Item = &'b SchemaInputField<'a>> {
    definitions.iter().filter(move |definition| {
        definition.input_type.is_non_null() && arguments.get(definition.name).is_none()
    })
}

impl<'a> Visitor<'a, ValidationContext<'a>> for ProvidedNonNullArguments {
    fn leave_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        let Some(definition) = ctx.type_info().field_def() else {
            return VisitFlow::Next;
        };
        for argument in missing_arguments(&definition.arguments, &field.arguments) {
            let message = format!(
                "Field \"{}\" argument \"{}\" of type \"{}\" is required but not provided.",
                field.name,
                argument.name,
                ctx.print_type(argument.input_type)
            );
            ctx.report_error(CODE, message, ASTKind::Field, info);
        }
        VisitFlow::Next
    }

    fn leave_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        let Some(definition) = ctx.type_info().directive_def() else {
            return VisitFlow::Next;
        };
        for argument in missing_arguments(&definition.arguments, &directive.arguments) {
            let message = format!(
                "Directive \"{}\" argument \"{}\" of type \"{}\" is required but not provided.",
                directive.name,
                argument.name,
                ctx.print_type(argument.input_type)
            );
            ctx.report_error(CODE, message, ASTKind::Directive, info);
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::super::{messages, validate_rule, AllRules};
    use super::*;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        directive @cached(ttl: Int!, scope: String = \"public\") on FIELD | QUERY

        type Query {
          field(x: String!, y: Int): String
          range(from: Int!, to: Int!, step: Int): [Int]
          limited(first: Int! = 10): [Int]
          node(id: ID!): Node
        }

        type Node {
          id: ID!
          child(id: ID!): Node
        }
    "};

    fn run<'a>(ctx: &'a ASTContext, query: &'a str) -> Vec<String> {
        messages(&validate_rule::<ProvidedNonNullArguments>(ctx, SCHEMA, query))
    }

    #[test]
    fn missing_field_argument() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<ProvidedNonNullArguments>(&ctx, SCHEMA, "{ field(y: 1) }");
        assert_eq!(
            messages(&outcome),
            [r#"Field "field" argument "x" of type "String!" is required but not provided."#]
        );
        let error = &outcome.errors()[0];
        assert_eq!(error.code, "5.3.3.2");
        assert_eq!(error.kind, ASTKind::Field);
        assert_eq!(error.path.to_string(), "0.selectionSet.0");
    }

    #[test]
    fn provided_arguments() {
        let ctx = ASTContext::new();
        assert!(run(&ctx, r#"{ field(x: "a", y: 1) }"#).is_empty());
        assert!(run(&ctx, r#"{ field(x: "a") }"#).is_empty());
        assert!(run(&ctx, "query ($id: ID!) { node(id: $id) { child(id: $id) { id } } }").is_empty());
    }

    #[test]
    fn null_literal_counts_as_provided() {
        let ctx = ASTContext::new();
        assert!(run(&ctx, "{ field(x: null) }").is_empty());
    }

    #[test]
    fn missing_directive_argument() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<ProvidedNonNullArguments>(&ctx, SCHEMA, "{ field(x: \"a\") @skip }");
        assert_eq!(
            messages(&outcome),
            [r#"Directive "skip" argument "if" of type "Boolean!" is required but not provided."#]
        );
        let error = &outcome.errors()[0];
        assert_eq!(error.kind, ASTKind::Directive);
        assert_eq!(error.path.to_string(), "0.selectionSet.0.directives.0");

        assert_eq!(
            run(&ctx, "query @cached { field(x: \"a\") @cached(scope: \"private\") }"),
            [
                r#"Directive "cached" argument "ttl" of type "Int!" is required but not provided."#,
                r#"Directive "cached" argument "ttl" of type "Int!" is required but not provided."#,
            ]
        );
    }

    #[test]
    fn unknown_definitions_are_ignored() {
        let ctx = ASTContext::new();
        assert!(run(&ctx, "{ unknownField }").is_empty());
        assert!(run(&ctx, "{ unknownField(x: 1) { field } }").is_empty());
        assert!(run(&ctx, "{ field(x: \"a\") @unknown }").is_empty());
    }

    #[test]
    fn reports_each_missing_argument_in_declaration_order() {
        let ctx = ASTContext::new();
        assert_eq!(
            run(&ctx, "{ range(step: 2) }"),
            [
                r#"Field "range" argument "from" of type "Int!" is required but not provided."#,
                r#"Field "range" argument "to" of type "Int!" is required but not provided."#,
            ]
        );
        assert_eq!(
            run(&ctx, "{ range(to: 2, step: 1) }"),
            [r#"Field "range" argument "from" of type "Int!" is required but not provided."#]
        );
    }

    #[test]
    fn repeated_argument_names() {
        let ctx = ASTContext::new();
        assert_eq!(
            run(&ctx, "{ range(from: 1, from: 2) }"),
            [r#"Field "range" argument "to" of type "Int!" is required but not provided."#]
        );
        assert!(run(&ctx, "{ range(to: 1, from: 2, from: null) }").is_empty());
    }

    #[test]
    fn defaults_do_not_make_arguments_optional() {
        let ctx = ASTContext::new();
        assert_eq!(
            run(&ctx, "{ limited }"),
            [r#"Field "limited" argument "first" of type "Int!" is required but not provided."#]
        );
    }

    #[test]
    fn reports_nested_fields_when_leaving_them() {
        let ctx = ASTContext::new();
        let outcome =
            validate_rule::<ProvidedNonNullArguments>(&ctx, SCHEMA, "{ node { child { id } } }");
        assert_eq!(
            messages(&outcome),
            [
                r#"Field "child" argument "id" of type "ID!" is required but not provided."#,
                r#"Field "node" argument "id" of type "ID!" is required but not provided."#,
            ]
        );
        assert_eq!(outcome.errors()[0].path.to_string(), "0.selectionSet.0.selectionSet.0");
    }

    #[test]
    fn fragments_and_inline_fragments() {
        let ctx = ASTContext::new();
        assert_eq!(
            run(&ctx, "{ ...F ... on Query { limited } } fragment F on Query { node { id } }"),
            [
                r#"Field "limited" argument "first" of type "Int!" is required but not provided."#,
                r#"Field "node" argument "id" of type "ID!" is required but not provided."#,
            ]
        );
    }

    #[test]
    fn repeated_runs_report_the_same_errors() {
        let ctx = ASTContext::new();
        let query = "{ range @skip node { child { id } } }";
        assert_eq!(run(&ctx, query), run(&ctx, query));
    }

    #[test]
    fn same_errors_when_composed() {
        let ctx = ASTContext::new();
        let query = "{ range @skip node { child { id } } }";
        let alone = validate_rule::<ProvidedNonNullArguments>(&ctx, SCHEMA, query);
        let composed = validate_rule::<AllRules>(&ctx, SCHEMA, query);
        let composed: Vec<_> = composed
            .errors()
            .iter()
            .filter(|error| error.code == CODE)
            .cloned()
            .collect();
        assert_eq!(alone.errors().to_vec(), composed);
        assert_eq!(alone.errors().len(), 5);
    }
}
