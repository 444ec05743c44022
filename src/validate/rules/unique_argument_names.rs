use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no field or directive is passed the same argument twice.
///
/// Each repetition is reported on the repeated argument.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Argument-Uniqueness)
pub struct UniqueArgumentNames<'a> {
    used_argument_names: Vec<'a, &'a str>,
}

impl<'a> DefaultIn<'a> for UniqueArgumentNames<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            used_argument_names: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for UniqueArgumentNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueArgumentNames<'a> {
    fn enter_field(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _field: &'a Field<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.used_argument_names.clear();
        VisitFlow::Next
    }

    fn enter_directive(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _directive: &'a Directive<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.used_argument_names.clear();
        VisitFlow::Next
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if self.used_argument_names.contains(&argument.name) {
            ctx.report_error(
                "5.3.2",
                format!("There can be only one argument named \"{}\".", argument.name),
                ASTKind::Argument,
                info,
            );
        } else {
            self.used_argument_names.push(argument.name);
        }
        VisitFlow::Skip
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::super::{messages, validate_document};
    use super::*;

    #[test]
    fn valid_args() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<UniqueArgumentNames>(
            &ctx,
            "{ a(field: 1) @include(if: true) { b(field: 2) } b(field: 3) }",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn overlapping_args() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<UniqueArgumentNames>(
            &ctx,
            "{ a(field: 1, field: 2) @skip(if: true, if: false) }",
        );
        assert_eq!(
            messages(&outcome),
            [
                r#"There can be only one argument named "field"."#,
                r#"There can be only one argument named "if"."#,
            ]
        );
        let error = &outcome.errors()[0];
        assert_eq!(error.kind, ASTKind::Argument);
        assert_eq!(error.path.to_string(), "0.selectionSet.0.arguments.1");
    }
}
