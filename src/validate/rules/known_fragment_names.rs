use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validate a document for all fragment names in spreads to be defined in the same document.
///
/// Each spread of an unknown fragment is reported where it occurs.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-spread-target-defined)
pub struct KnownFragmentNames<'a> {
    fragment_names: Vec<'a, &'a str>,
}

impl<'a> DefaultIn<'a> for KnownFragmentNames<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            fragment_names: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for KnownFragmentNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for KnownFragmentNames<'a> {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.fragment_names.clear();
        self.fragment_names
            .extend(document.fragments().map(|fragment| fragment.name.name));
        VisitFlow::Next
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        spread: &'a FragmentSpread<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if !self.fragment_names.contains(&spread.name.name) {
            ctx.report_error(
                "5.4.2.1",
                format!("Unknown fragment \"{}\".", spread.name.name),
                ASTKind::FragmentSpread,
                info,
            );
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

    fn enter_argument(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _argument: &'a Argument,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_directive(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _directive: &'a Directive,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }
}
