use bumpalo::collections::Vec;

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

/// Validates that no fragments the document defines have duplicate names.
/// Note: Operations and Fragments are allowed to share names.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-Fragment-Name-Uniqueness)
pub struct UniqueFragmentNames<'a> {
    used_fragment_names: Vec<'a, &'a str>,
}

impl<'a> DefaultIn<'a> for UniqueFragmentNames<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            used_fragment_names: Vec::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for UniqueFragmentNames<'a> {}

impl<'a> Visitor<'a, ValidationContext<'a>> for UniqueFragmentNames<'a> {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.used_fragment_names.clear();
        VisitFlow::Next
    }

    fn enter_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if self.used_fragment_names.contains(&fragment.name.name) {
            ctx.report_error(
                "5.4.1.1",
                format!("There can be only one fragment named \"{}\".", fragment.name.name),
                ASTKind::FragmentDefinition,
                info,
            );
        } else {
            self.used_fragment_names.push(fragment.name.name);
        }
        VisitFlow::Skip
    }

    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _operation: &'a OperationDefinition,
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
    fn valid_fragment_names() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<UniqueFragmentNames>(
            &ctx,
            "query Root { ...Root ...Other } fragment Root on Query { a } fragment Other on Query { a }",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn overlapping_fragment_names() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<UniqueFragmentNames>(
            &ctx,
            "{ ...Root } fragment Root on Query { a } fragment Root on Query { b }",
        );
        assert_eq!(
            messages(&outcome),
            [r#"There can be only one fragment named "Root"."#]
        );
        assert_eq!(outcome.errors()[0].kind, ASTKind::FragmentDefinition);
        assert_eq!(outcome.errors()[0].path.to_string(), "2");
    }
}
