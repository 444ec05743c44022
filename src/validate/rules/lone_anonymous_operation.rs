use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validate a document to only contain one anonymous operation or multiple named operations.
///
/// Each anonymous operation of a document with more than one operation is reported.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Lone-Anonymous-Operation)
#[derive(Default)]
pub struct LoneAnonymousOperation {
    operations: usize,
}

impl<'a> ValidationRule<'a> for LoneAnonymousOperation {}

impl<'a> Visitor<'a, ValidationContext<'a>> for LoneAnonymousOperation {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.operations = document.operations().count();
        VisitFlow::Next
    }

    fn enter_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if operation.name.is_none() && self.operations > 1 {
            ctx.report_error(
                "5.1.2.1",
                "This anonymous operation must be the only defined operation.",
                ASTKind::OperationDefinition,
                info,
            );
        }
        VisitFlow::Skip
    }
}
