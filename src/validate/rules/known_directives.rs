use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, schema::DirectiveLocation, visit::*};

/// Validates that every directive is defined by the schema and used at a location its definition
/// allows.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Directives-Are-Defined)
pub struct KnownDirectives<'a> {
    locations: Vec<'a, DirectiveLocation>,
}

impl<'a> DefaultIn<'a> for KnownDirectives<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            locations: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for KnownDirectives<'a> {}

const CODE: &str = "5.6.1";

macro_rules! location {
    ($($ty:ty => $enter:ident, $leave:ident, |$node:ident| $location:expr;)*) => {
        $(
            fn $enter(
                &mut self,
                _ctx: &mut ValidationContext<'a>,
                $node: &'a $ty,
                _info: &VisitInfo,
            ) -> VisitFlow {
                self.locations.push($location);
                VisitFlow::Next
            }

            fn $leave(
                &mut self,
                _ctx: &mut ValidationContext<'a>,
                _node: &'a $ty,
                _info: &VisitInfo,
            ) -> VisitFlow {
                self.locations.pop();
                VisitFlow::Next
            }
        )*
    };
}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownDirectives<'a> {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.locations.clear();
        VisitFlow::Next
    }

    location! {
        OperationDefinition<'a> => enter_operation, leave_operation,
            |operation| operation.operation.into();
        FragmentDefinition<'a> => enter_fragment, leave_fragment,
            |_fragment| DirectiveLocation::FragmentDefinition;
        VariableDefinition<'a> => enter_variable_definition, leave_variable_definition,
            |_var_def| DirectiveLocation::VariableDefinition;
        FragmentSpread<'a> => enter_fragment_spread, leave_fragment_spread,
            |_spread| DirectiveLocation::FragmentSpread;
        InlineFragment<'a> => enter_inline_fragment, leave_inline_fragment,
            |_fragment| DirectiveLocation::InlineFragment;
        Field<'a> => enter_field, leave_field,
            |_field| DirectiveLocation::Field;
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a Directive<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        match ctx.type_info().directive_def() {
            None => ctx.report_error(
                CODE,
                format!("Unknown directive \"@{}\".", directive.name),
                ASTKind::Directive,
                info,
            ),
            Some(definition) => {
                if let Some(location) = self.locations.last().copied() {
                    if !definition.has_location(location) {
                        ctx.report_error(
                            CODE,
                            format!(
                                "Directive \"@{}\" may not be used on {}.",
                                directive.name, location
                            ),
                            ASTKind::Directive,
                            info,
                        );
                    }
                }
            }
        }
        VisitFlow::Skip
    }
}
