use super::context::ValidationContext;
use crate::{ast::*, schema::TypeInfo, visit::*};

/// Wraps a rule (usually a [`ComposedVisitor`] of many rules) and keeps the [`TypeInfo`] of the
/// [`ValidationContext`] in sync with the traversal.
///
/// Type information is entered before the rule's `enter_` callback and left after the rule's
/// `leave_` callback, so both callbacks see the definitions of the node they're called for. When
/// the rule skips a node, its `leave_` callback never runs and the type information is left right
/// away instead. Rules therefore can't unbalance the stack.
///
/// The traversal is stopped as soon as the context reached its error limit.
pub struct TypeInfoVisitor<'r, R> {
    rule: &'r mut R,
}

impl<'r, R> TypeInfoVisitor<'r, R> {
    #[inline]
    pub fn new(rule: &'r mut R) -> Self {
        TypeInfoVisitor { rule }
    }
}

#[inline]
fn entered(ctx: &mut ValidationContext<'_>, flow: VisitFlow) -> VisitFlow {
    if flow != VisitFlow::Next {
        ctx.type_info_mut().leave();
    }
    checked(ctx, flow)
}

#[inline]
fn left(ctx: &mut ValidationContext<'_>, flow: VisitFlow) -> VisitFlow {
    ctx.type_info_mut().leave();
    checked(ctx, flow)
}

#[inline]
fn checked(ctx: &ValidationContext<'_>, flow: VisitFlow) -> VisitFlow {
    if ctx.is_aborted() {
        VisitFlow::Break
    } else {
        flow
    }
}

/// Callbacks for nodes that don't change the type information.
macro_rules! pass_through {
    ($($ty:ty => $enter:ident, $leave:ident;)*) => {
        $(
            #[inline]
            fn $enter(
                &mut self,
                ctx: &mut ValidationContext<'a>,
                node: &'a $ty,
                info: &VisitInfo,
            ) -> VisitFlow {
                let flow = self.rule.$enter(ctx, node, info);
                checked(ctx, flow)
            }

            #[inline]
            fn $leave(
                &mut self,
                ctx: &mut ValidationContext<'a>,
                node: &'a $ty,
                info: &VisitInfo,
            ) -> VisitFlow {
                let flow = self.rule.$leave(ctx, node, info);
                checked(ctx, flow)
            }
        )*
    };
}

/// Callbacks for nodes that push a frame onto the type information.
macro_rules! tracked {
    ($($ty:ty => $enter:ident, $leave:ident, |$type_info:ident, $node:ident| $push:expr;)*) => {
        $(
            #[inline]
            fn $enter(
                &mut self,
                ctx: &mut ValidationContext<'a>,
                $node: &'a $ty,
                info: &VisitInfo,
            ) -> VisitFlow {
                let $type_info: &mut TypeInfo<'a> = ctx.type_info_mut();
                $push;
                let flow = self.rule.$enter(ctx, $node, info);
                entered(ctx, flow)
            }

            #[inline]
            fn $leave(
                &mut self,
                ctx: &mut ValidationContext<'a>,
                $node: &'a $ty,
                info: &VisitInfo,
            ) -> VisitFlow {
                let flow = self.rule.$leave(ctx, $node, info);
                left(ctx, flow)
            }
        )*
    };
}

impl<'a, 'r, R: Visitor<'a, ValidationContext<'a>>> Visitor<'a, ValidationContext<'a>>
    for TypeInfoVisitor<'r, R>
{
    pass_through! {
        Document<'a> => enter_document, leave_document;
        VariableDefinition<'a> => enter_variable_definition, leave_variable_definition;
        SelectionSet<'a> => enter_selection_set, leave_selection_set;
        FragmentSpread<'a> => enter_fragment_spread, leave_fragment_spread;
    }

    tracked! {
        OperationDefinition<'a> => enter_operation, leave_operation,
            |type_info, operation| type_info.enter_operation(operation.operation);
        FragmentDefinition<'a> => enter_fragment, leave_fragment,
            |type_info, fragment| type_info.enter_fragment(fragment.type_condition.name);
        InlineFragment<'a> => enter_inline_fragment, leave_inline_fragment,
            |type_info, fragment| {
                type_info.enter_inline_fragment(fragment.type_condition.map(|x| x.name))
            };
        Field<'a> => enter_field, leave_field,
            |type_info, field| type_info.enter_field(field.name);
        Directive<'a> => enter_directive, leave_directive,
            |type_info, directive| type_info.enter_directive(directive.name);
        Argument<'a> => enter_argument, leave_argument,
            |type_info, argument| type_info.enter_argument(argument.name);
    }
}
