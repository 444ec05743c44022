use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that every selected field is defined on the type it's selected on.
///
/// Introspection fields starting with `__` are accepted anywhere. Fields below a field or
/// fragment whose type is unknown aren't checked again.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Field-Selections)
#[derive(Default, Clone, Copy, Debug)]
pub struct FieldsOnCorrectType;

impl<'a> ValidationRule<'a> for FieldsOnCorrectType {}

impl<'a> Visitor<'a, ValidationContext<'a>> for FieldsOnCorrectType {
    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a Field<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if field.name.starts_with("__") {
            return VisitFlow::Next;
        }
        let type_info = ctx.type_info();
        if let (Some(parent_type), None) = (type_info.parent_type(), type_info.field_def()) {
            ctx.report_error(
                "5.2.1",
                format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    field.name,
                    parent_type.name()
                ),
                ASTKind::Field,
                info,
            );
        }
        VisitFlow::Next
    }
}

#[cfg(test)]
mod tests {
    use super::super::{messages, validate_rule};
    use super::*;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        interface Node {
          id: ID!
        }

        type User implements Node {
          id: ID!
          name: String
          best: User
        }

        union Result = User

        type Query {
          node: Node
          user: User
          search: [Result]
        }
    "};

    #[test]
    fn known_fields() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<FieldsOnCorrectType>(
            &ctx,
            SCHEMA,
            "{ __typename node { id ... on User { name } } search { __typename ... on User { id } } }",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn unknown_fields() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<FieldsOnCorrectType>(
            &ctx,
            SCHEMA,
            "{ node { name } search { id } user { best { age } } }",
        );
        assert_eq!(
            messages(&outcome),
            [
                r#"Cannot query field "name" on type "Node"."#,
                r#"Cannot query field "id" on type "Result"."#,
                r#"Cannot query field "age" on type "User"."#,
            ]
        );
        assert_eq!(outcome.errors()[0].path.to_string(), "0.selectionSet.0.selectionSet.0");
    }

    #[test]
    fn reported_once_per_unknown_field() {
        let ctx = ASTContext::new();
        let outcome = validate_rule::<FieldsOnCorrectType>(
            &ctx,
            SCHEMA,
            "{ unknown { deeper { deepest } } ...F } fragment F on Missing { anything }",
        );
        assert_eq!(
            messages(&outcome),
            [r#"Cannot query field "unknown" on type "Query"."#]
        );
    }
}
