use super::visitor::*;
use crate::ast::*;

/// Marks a visitor that takes part in every callback.
const ACTIVE: usize = usize::MAX;
/// Marks a visitor that returned `Break` and is never called again.
const BROKEN: usize = 0;

/// A [Visitor] running two child visitors side by side during a single traversal.
///
/// For every node, the callback of `a` is called before the callback of `b`, on `enter_` as well
/// as on `leave_`. Each child's [`VisitFlow`] is tracked separately:
///
/// - a child that returns `Skip` isn't called again until the skipped node was left, while the
///   other child still descends into it;
/// - a child that returns `Break` isn't called again at all.
///
/// The composed visitor itself only skips a node when both children skip it and only breaks once
/// both children broke. Any number of visitors can be composed by nesting, as long as they share
/// a `Context` type. The order of registration is the order in which they're called.
pub struct ComposedVisitor<'a, Context, A: Visitor<'a, Context>, B: Visitor<'a, Context>> {
    _marker: std::marker::PhantomData<&'a Context>,
    depth: usize,
    skip_a: usize,
    skip_b: usize,
    pub a: A,
    pub b: B,
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> ComposedVisitor<'a, C, A, B> {
    /// Composes two visitors into one.
    #[inline]
    pub fn new(a: A, b: B) -> ComposedVisitor<'a, C, A, B> {
        ComposedVisitor {
            _marker: std::marker::PhantomData,
            depth: 1,
            skip_a: ACTIVE,
            skip_b: ACTIVE,
            a,
            b,
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.depth = 1;
        self.skip_a = ACTIVE;
        self.skip_b = ACTIVE;
    }

    /// Splits the composed visitor back into its children.
    #[inline]
    pub fn into_inner(self) -> (A, B) {
        (self.a, self.b)
    }
}

/// The outcome of calling one child on `enter_`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Entered {
    Next,
    Skip,
    Break,
}

/// Calls a child's `enter_` callback unless it's skipping or broke, and updates its skip marker.
#[inline(always)]
fn enter_child<V>(
    skip: &mut usize,
    depth: usize,
    child: &mut V,
    callback: impl FnOnce(&mut V) -> VisitFlow,
) -> Entered {
    if *skip == BROKEN {
        return Entered::Break;
    } else if *skip != ACTIVE && *skip != depth {
        return Entered::Skip;
    }
    *skip = ACTIVE;
    match callback(child) {
        VisitFlow::Next => Entered::Next,
        VisitFlow::Skip => {
            *skip = depth;
            Entered::Skip
        }
        VisitFlow::Break => {
            *skip = BROKEN;
            Entered::Break
        }
    }
}

/// Calls a child's `leave_` callback if it's active. Returns whether the child is broken.
#[inline(always)]
fn leave_child<V>(
    skip: &mut usize,
    depth: usize,
    child: &mut V,
    callback: impl FnOnce(&mut V) -> VisitFlow,
) -> bool {
    if *skip == ACTIVE {
        if callback(child) == VisitFlow::Break {
            *skip = BROKEN;
        }
    } else if *skip == depth {
        *skip = ACTIVE;
    }
    *skip == BROKEN
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> ComposedVisitor<'a, C, A, B> {
    #[inline(always)]
    fn compose_flow_enter(
        &mut self,
        ctx: &mut C,
        fn_a: impl FnOnce(&mut A, &mut C) -> VisitFlow,
        fn_b: impl FnOnce(&mut B, &mut C) -> VisitFlow,
    ) -> VisitFlow {
        let depth = self.depth;
        let a = enter_child(&mut self.skip_a, depth, &mut self.a, |a| fn_a(a, ctx));
        let b = enter_child(&mut self.skip_b, depth, &mut self.b, |b| fn_b(b, ctx));

        match (a, b) {
            (Entered::Break, Entered::Break) => VisitFlow::Break,
            (Entered::Next, _) | (_, Entered::Next) => {
                self.depth += 1;
                VisitFlow::Next
            }
            _ => {
                // Neither child descends, so the node is skipped as a whole and never left
                if self.skip_a == depth {
                    self.skip_a = ACTIVE;
                }
                if self.skip_b == depth {
                    self.skip_b = ACTIVE;
                }
                VisitFlow::Skip
            }
        }
    }

    #[inline(always)]
    fn compose_flow_leave(
        &mut self,
        ctx: &mut C,
        fn_a: impl FnOnce(&mut A, &mut C) -> VisitFlow,
        fn_b: impl FnOnce(&mut B, &mut C) -> VisitFlow,
    ) -> VisitFlow {
        self.depth -= 1;
        let depth = self.depth;
        let a_broken = leave_child(&mut self.skip_a, depth, &mut self.a, |a| fn_a(a, ctx));
        let b_broken = leave_child(&mut self.skip_b, depth, &mut self.b, |b| fn_b(b, ctx));
        if a_broken && b_broken {
            VisitFlow::Break
        } else {
            VisitFlow::Next
        }
    }
}

macro_rules! compose_callbacks {
    ($($ty:ty => $enter:ident, $leave:ident;)*) => {
        impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> Visitor<'a, C>
            for ComposedVisitor<'a, C, A, B>
        {
            /// Starts every traversal with both children active, even when a previous one was
            /// stopped before its `leave_` callbacks ran.
            #[inline]
            fn enter_document(
                &mut self,
                ctx: &mut C,
                document: &'a Document<'a>,
                info: &VisitInfo,
            ) -> VisitFlow {
                self.reset();
                self.compose_flow_enter(
                    ctx,
                    |a, ctx| a.enter_document(ctx, document, info),
                    |b, ctx| b.enter_document(ctx, document, info),
                )
            }

            #[inline]
            fn leave_document(
                &mut self,
                ctx: &mut C,
                document: &'a Document<'a>,
                info: &VisitInfo,
            ) -> VisitFlow {
                self.compose_flow_leave(
                    ctx,
                    |a, ctx| a.leave_document(ctx, document, info),
                    |b, ctx| b.leave_document(ctx, document, info),
                )
            }

            $(
                #[inline]
                fn $enter(&mut self, ctx: &mut C, node: &'a $ty, info: &VisitInfo) -> VisitFlow {
                    self.compose_flow_enter(
                        ctx,
                        |a, ctx| a.$enter(ctx, node, info),
                        |b, ctx| b.$enter(ctx, node, info),
                    )
                }

                #[inline]
                fn $leave(&mut self, ctx: &mut C, node: &'a $ty, info: &VisitInfo) -> VisitFlow {
                    self.compose_flow_leave(
                        ctx,
                        |a, ctx| a.$leave(ctx, node, info),
                        |b, ctx| b.$leave(ctx, node, info),
                    )
                }
            )*
        }
    };
}

compose_callbacks! {
    OperationDefinition<'a> => enter_operation, leave_operation;
    FragmentDefinition<'a> => enter_fragment, leave_fragment;
    VariableDefinition<'a> => enter_variable_definition, leave_variable_definition;
    SelectionSet<'a> => enter_selection_set, leave_selection_set;
    FragmentSpread<'a> => enter_fragment_spread, leave_fragment_spread;
    InlineFragment<'a> => enter_inline_fragment, leave_inline_fragment;
    Field<'a> => enter_field, leave_field;
    Directive<'a> => enter_directive, leave_directive;
    Argument<'a> => enter_argument, leave_argument;
}
