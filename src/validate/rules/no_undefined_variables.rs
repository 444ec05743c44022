use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

use super::super::{ValidationContext, ValidationRule};
use crate::{ast::*, visit::*};

const CODE: &str = "5.7.4";

/// The variables a fragment uses directly and the fragments it spreads.
struct FragmentEdge<'a> {
    used_vars: Vec<'a, (&'a str, Path)>,
    used_fragments: Vec<'a, &'a str>,
}

/// An operation and the fragments it spreads directly.
struct OperationEdge<'a> {
    operation: &'a OperationDefinition<'a>,
    used_fragments: Vec<'a, &'a str>,
}

/// Validate that a document defines all the variables it uses per operation
///
/// Variables used directly in an operation are checked when they're visited. Variables used in
/// fragments are checked once the whole document was visited, against every operation the
/// fragment is reachable from, and are reported at the place they're used in the fragment.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#sec-All-Variable-Uses-Defined)
pub struct NoUndefinedVariables<'a> {
    arena: &'a Bump,
    operation: Option<&'a OperationDefinition<'a>>,
    used_vars: Vec<'a, (&'a str, Path)>,
    used_fragments: Vec<'a, &'a str>,
    operation_edges: Vec<'a, OperationEdge<'a>>,
    fragment_edges: HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for NoUndefinedVariables<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Self {
            arena,
            operation: None,
            used_vars: Vec::new_in(arena),
            used_fragments: Vec::new_in(arena),
            operation_edges: Vec::new_in(arena),
            fragment_edges: HashMap::new_in(arena),
        }
    }
}

impl<'a> ValidationRule<'a> for NoUndefinedVariables<'a> {}

fn undefined_message(name: &str, operation: &OperationDefinition<'_>) -> String {
    match operation.name {
        Some(operation_name) => format!(
            "Variable \"${}\" is not defined by operation \"{}\".",
            name, operation_name.name
        ),
        None => format!("Variable \"${}\" is not defined.", name),
    }
}

impl<'a> Visitor<'a, ValidationContext<'a>> for NoUndefinedVariables<'a> {
    fn enter_document(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.operation = None;
        self.used_vars.clear();
        self.used_fragments.clear();
        self.operation_edges.clear();
        self.fragment_edges.clear();
        VisitFlow::Next
    }

    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.operation = Some(operation);
        VisitFlow::Next
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _var_def: &'a VariableDefinition<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Skip
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        argument: &'a Argument<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        match self.operation {
            Some(operation) => argument.value.for_each_variable(&mut |var| {
                if !operation.variable_definitions.contains(var.name) {
                    ctx.report_error(
                        CODE,
                        undefined_message(var.name, operation),
                        ASTKind::Argument,
                        info,
                    );
                }
            }),
            None => {
                let used_vars = &mut self.used_vars;
                argument
                    .value
                    .for_each_variable(&mut |var| used_vars.push((var.name, info.path.clone())));
            }
        }
        VisitFlow::Skip
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        spread: &'a FragmentSpread<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        self.used_fragments.push(spread.name.name);
        VisitFlow::Skip
    }

    fn leave_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a OperationDefinition<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        let used_fragments =
            std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena));
        self.operation_edges.push(OperationEdge {
            operation,
            used_fragments,
        });
        self.operation = None;
        VisitFlow::Next
    }

    fn leave_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        fragment: &'a FragmentDefinition<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        let edge = FragmentEdge {
            used_vars: std::mem::replace(&mut self.used_vars, Vec::new_in(self.arena)),
            used_fragments: std::mem::replace(&mut self.used_fragments, Vec::new_in(self.arena)),
        };
        // Spreads of a repeated fragment name resolve to the first definition
        self.fragment_edges.entry(fragment.name.name).or_insert(edge);
        VisitFlow::Next
    }

    fn leave_document(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        _document: &'a Document<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        let mut visited: Vec<'a, &'a str> = Vec::new_in(self.arena);
        for operation_edge in self.operation_edges.iter() {
            visited.clear();
            report_undefined_vars(
                ctx,
                &mut visited,
                &self.fragment_edges,
                operation_edge.operation,
                &operation_edge.used_fragments,
            );
        }
        VisitFlow::Next
    }
}

fn report_undefined_vars<'a>(
    ctx: &mut ValidationContext<'a>,
    visited: &mut Vec<'a, &'a str>,
    fragment_edges: &HashMap<&'a str, FragmentEdge<'a>, DefaultHashBuilder, &'a Bump>,
    operation: &'a OperationDefinition<'a>,
    used_fragments: &[&'a str],
) {
    for fragment_name in used_fragments {
        if visited.contains(fragment_name) {
            continue;
        }
        visited.push(*fragment_name);
        let Some(edge) = fragment_edges.get(fragment_name) else {
            continue;
        };
        for (name, path) in edge.used_vars.iter() {
            if !operation.variable_definitions.contains(name) {
                let info = VisitInfo { path: path.clone() };
                ctx.report_error(
                    CODE,
                    undefined_message(name, operation),
                    ASTKind::Argument,
                    &info,
                );
            }
        }
        report_undefined_vars(ctx, visited, fragment_edges, operation, &edge.used_fragments);
    }
}

#[cfg(test)]
mod tests {
    use super::super::{messages, validate_document};
    use super::*;

    #[test]
    fn defined_vars() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<NoUndefinedVariables>(
            &ctx,
            "query($var: Int) { a(x: $var) @skip(if: $var) ...Frag } fragment Frag on Query { b(x: [{ y: $var }]) }",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn undefined_vars_on_operation() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<NoUndefinedVariables>(
            &ctx,
            "query Named { a(x: $var) } query ($other: Int) { a(x: { y: [$var] }) }",
        );
        assert_eq!(
            messages(&outcome),
            [
                r#"Variable "$var" is not defined by operation "Named"."#,
                r#"Variable "$var" is not defined."#,
            ]
        );
        assert_eq!(outcome.errors()[0].path.to_string(), "0.selectionSet.0.arguments.0");
    }

    #[test]
    fn undefined_vars_on_fragments() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<NoUndefinedVariables>(
            &ctx,
            "query A { ...Frag } query B($var: Int) { ...Frag } fragment Frag on Query { a(x: $var) }",
        );
        assert_eq!(
            messages(&outcome),
            [r#"Variable "$var" is not defined by operation "A"."#]
        );
        assert_eq!(outcome.errors()[0].path.to_string(), "2.selectionSet.0.arguments.0");
    }

    #[test]
    fn nested_and_cyclic_fragments() {
        let ctx = ASTContext::new();
        let outcome = validate_document::<NoUndefinedVariables>(
            &ctx,
            "query { ...A } fragment A on Query { ...B } fragment B on Query { a(x: $var) ...A }",
        );
        assert_eq!(messages(&outcome), [r#"Variable "$var" is not defined."#]);
    }
}
