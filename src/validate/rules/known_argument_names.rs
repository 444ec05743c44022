use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every argument passed to a field or a directive is defined on it.
///
/// Errors are reported on the unknown argument. Fields and directives the schema doesn't know are
/// left to other rules.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Argument-Names)
#[derive(Default, Clone, Copy, Debug)]
pub struct KnownArgumentNames;

impl<'a> ValidationRule<'a> for KnownArgumentNames {}

const CODE: &str = "5.3.1";

/// Calls `report` with the path of every argument that `is_known` rejects.
fn unknown_arguments<'a>(
    arguments: &'a Arguments<'a>,
    info: &VisitInfo,
    is_known: impl Fn(&str) -> bool,
    mut report: impl FnMut(&'a Argument<'a>, &VisitInfo),
) {
    let mut info = info.clone();
    info.path.push(PathSegment::Arguments);
    for (index, argument) in arguments.children.iter().enumerate() {
        if !is_known(argument.name) {
            info.path.push(PathSegment::Index(index));
            report(argument, &info);
            info.path.pop();
        }
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownArgumentNames {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        let type_info = ctx.type_info();
        let (Some(definition), Some(parent_type)) = (type_info.field_def(), type_info.parent_type())
        else {
            return VisitFlow::Next;
        };
        unknown_arguments(
            &field.arguments,
            info,
            |name| definition.get_argument(name).is_some(),
            |argument, info| {
                let message = format!(
                    "Unknown argument \"{}\" on field \"{}\" of type \"{}\".",
                    argument.name,
                    field.name,
                    parent_type.name()
                );
                ctx.report_error(CODE, message, ASTKind::Argument, info);
            },
        );
        VisitFlow::Next
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        let Some(definition) = ctx.type_info().directive_def() else {
            return VisitFlow::Next;
        };
        unknown_arguments(
            &directive.arguments,
            info,
            |name| definition.get_argument(name).is_some(),
            |argument, info| {
                let message = format!(
                    "Unknown argument \"{}\" on directive \"@{}\".",
                    argument.name, directive.name
                );
                ctx.report_error(CODE, message, ASTKind::Argument, info);
            },
        );
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::super::{messages, validate_rule};
    use super::*;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        directive @cached(ttl: Int) on FIELD

        type Query {
          user(id: ID!): User
        }

        type User {
          name(short: Boolean): String
        }
    "};

    #[test]
    fn known_arguments() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<KnownArgumentNames>(
            &ctx,
            SCHEMA,
            "{ user(id: 1) @cached(ttl: 10) { name(short: true) @skip(if: false) } }",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn unknown_arguments() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<KnownArgumentNames>(
            &ctx,
            SCHEMA,
            "{ user(id: 1, first: 2) @cached(ttl: 1, scope: PUBLIC) { name(long: true) } }",
        );
        assert_eq!(
            messages(&outcome),
            [
                r#"Unknown argument "first" on field "user" of type "Query"."#,
                r#"Unknown argument "scope" on directive "@cached"."#,
                r#"Unknown argument "long" on field "name" of type "User"."#,
            ]
        );
        assert_eq!(outcome.errors()[0].path.to_string(), "0.selectionSet.0.arguments.1");
        assert_eq!(
            outcome.errors()[1].path.to_string(),
            "0.selectionSet.0.directives.0.arguments.1"
        );
    }

    #[test]
    fn unknown_owners_are_ignored() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<KnownArgumentNames>(
            &ctx,
            SCHEMA,
            "{ missing(x: 1) @unknown(y: 2) { name(z: 3) } }",
        );
        assert!(outcome.is_valid());
    }
}
