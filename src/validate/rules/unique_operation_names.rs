use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no operation the document defines have duplicate names.
/// Note: Operations and Fragments are allowed to share names.
///
/// Every repeated operation is reported, the first one carrying a name is not.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Operation-Name-Uniqueness)
pub struct UniqueOperationNames<'a> {
    used_operation_names: Vec<'a, &'a str>,
}

impl<'a> DefaultIn<'a> for UniqueOperationNames<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            used_operation_names: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for UniqueOperationNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueOperationNames<'a> {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.used_operation_names.clear();
        VisitFlow::Next
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if let Some(name) = operation.name {
            if self.used_operation_names.contains(&name.name) {
                ctx.report_error(
                    "5.1.1.1",
                    format!("There can be only one operation named \"{}\".", name.name),
                    ASTKind::OperationDefinition,
                    info,
                );
            } else {
                self.used_operation_names.push(name.name);
            }
        }
        VisitFlow::Skip
    }

    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}
