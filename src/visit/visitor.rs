use super::{compose::ComposedVisitor, path::Path, PathSegment};
use crate::ast::*;

pub(crate) mod private {
    use super::{VisitFlow, VisitInfo, Visitor};

    pub trait VisitNodeWithInfo<'a>: Sized {
        fn visit_with_info<'b, C, V: Visitor<'a, C>>(
            &'a self,
            ctx: &'b mut C,
            visitor: &'b mut V,
            info: &mut VisitInfo,
        ) -> VisitFlow;
    }
}

use private::VisitNodeWithInfo;

/// A signal returned from [Visitor] callbacks that steers the traversal.
///
/// `Skip` only has an effect when it's returned from an `enter_` callback. The node's children
/// and its `leave_` callback are then passed over.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VisitFlow {
    /// Continue with the next node in depth-first order.
    Next,
    /// Stop the traversal. No further callbacks are called.
    Break,
    /// Don't descend into the current node.
    Skip,
}

/// Information about the node a [Visitor] callback is called for.
#[derive(Debug, Default, Clone)]
pub struct VisitInfo {
    /// The node's location relative to the node the traversal started at.
    pub path: Path,
}

macro_rules! callbacks {
    ($($node:ident: $ty:ty => $enter:ident, $leave:ident;)*) => {
        $(
            #[doc = concat!("Called for a [`", stringify!($node), "`] before its children are visited.")]
            #[inline]
            fn $enter(&mut self, _ctx: &mut Context, _node: &'a $ty, _info: &VisitInfo) -> VisitFlow {
                VisitFlow::Next
            }

            #[doc = concat!("Called for a [`", stringify!($node), "`] after its children were visited.")]
            #[inline]
            fn $leave(&mut self, _ctx: &mut Context, _node: &'a $ty, _info: &VisitInfo) -> VisitFlow {
                VisitFlow::Next
            }
        )*
    };
}

/// A set of callbacks that are called while an AST is traversed in depth-first order.
///
/// Every kind of node the traversal stops at has an `enter_` callback, called on the way down
/// before any of the node's children, and a `leave_` callback, called on the way back up. All
/// callbacks default to a no-op returning [`VisitFlow::Next`], so a visitor only implements the
/// ones for the nodes it's interested in.
///
/// The `Context` is passed mutably to every callback and is the place where a visitor's results
/// are collected. It defaults to `()`.
///
/// Children are visited in source order. A [Field] visits its arguments, then its directives and
/// then its selection set. Values, types and names aren't visited separately.
pub trait Visitor<'a, Context = ()>: Sized {
    /// Runs this visitor and `other` side by side in a single traversal.
    ///
    /// Callbacks on `self` are always called before the same callbacks on `other`.
    #[inline]
    fn compose<V: Visitor<'a, Context>>(self, other: V) -> ComposedVisitor<'a, Context, Self, V> {
        ComposedVisitor::new(self, other)
    }

    callbacks! {
        Document: Document<'a> => enter_document, leave_document;
        OperationDefinition: OperationDefinition<'a> => enter_operation, leave_operation;
        FragmentDefinition: FragmentDefinition<'a> => enter_fragment, leave_fragment;
        VariableDefinition: VariableDefinition<'a> => enter_variable_definition, leave_variable_definition;
        SelectionSet: SelectionSet<'a> => enter_selection_set, leave_selection_set;
        FragmentSpread: FragmentSpread<'a> => enter_fragment_spread, leave_fragment_spread;
        InlineFragment: InlineFragment<'a> => enter_inline_fragment, leave_inline_fragment;
        Field: Field<'a> => enter_field, leave_field;
        Directive: Directive<'a> => enter_directive, leave_directive;
        Argument: Argument<'a> => enter_argument, leave_argument;
    }
}

/// Trait for AST nodes a [Visitor] can be run on.
///
/// ```
/// use graphql_validator::{ast::*, visit::*};
///
/// #[derive(Default)]
/// struct CountFields(usize);
///
/// impl<'a> Visitor<'a> for CountFields {
///     fn enter_field(&mut self, _ctx: &mut (), _field: &'a Field<'a>, _info: &VisitInfo) -> VisitFlow {
///         self.0 += 1;
///         VisitFlow::Next
///     }
/// }
///
/// let ctx = ASTContext::new();
/// let document = Document::parse(&ctx, "{ user { name } }").unwrap();
/// let mut visitor = CountFields::default();
/// document.visit(&mut (), &mut visitor);
/// assert_eq!(visitor.0, 2);
/// ```
pub trait VisitNode<'a>: Sized + VisitNodeWithInfo<'a> {
    /// Visits this node and its descendants with the given visitor and context.
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        let mut info = VisitInfo::default();
        self.visit_with_info(ctx, visitor, &mut info)
    }
}

impl<'a, T: VisitNodeWithInfo<'a>> VisitNode<'a> for T {}

/// Visits a child node below a path segment and bails out of the calling function on `Break`.
macro_rules! visit_child {
    ($child:expr, $segment:expr, $ctx:expr, $visitor:expr, $info:expr) => {
        $info.path.push($segment);
        if $child.visit_with_info($ctx, $visitor, $info) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        $info.path.pop();
    };
}

/// Visits every node of a list, each below its index.
#[inline]
fn visit_list<'a, C, V: Visitor<'a, C>, T: VisitNodeWithInfo<'a>>(
    children: &'a [T],
    ctx: &mut C,
    visitor: &mut V,
    info: &mut VisitInfo,
) -> VisitFlow {
    for (index, child) in children.iter().enumerate() {
        visit_child!(child, PathSegment::Index(index), ctx, visitor, info);
    }
    VisitFlow::Next
}

/// Calls `enter`, visits the children when it returned `Next` and finally calls `leave`.
macro_rules! visit_node {
    ($node:expr, $ctx:expr, $visitor:expr, $info:expr, $enter:ident, $leave:ident, $children:block) => {{
        match $visitor.$enter($ctx, $node, $info) {
            VisitFlow::Next => {
                $children;
                $visitor.$leave($ctx, $node, $info)
            }
            flow => flow,
        }
    }};
}

impl<'a> VisitNodeWithInfo<'a> for Argument<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_argument, leave_argument, {})
    }
}

impl<'a> VisitNodeWithInfo<'a> for Arguments<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_list(&self.children, ctx, visitor, info)
    }
}

impl<'a> VisitNodeWithInfo<'a> for Directive<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_directive, leave_directive, {
            visit_child!(self.arguments, PathSegment::Arguments, ctx, visitor, info);
        })
    }
}

impl<'a> VisitNodeWithInfo<'a> for Directives<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_list(&self.children, ctx, visitor, info)
    }
}

impl<'a> VisitNodeWithInfo<'a> for VariableDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(
            self,
            ctx,
            visitor,
            info,
            enter_variable_definition,
            leave_variable_definition,
            {
                visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
            }
        )
    }
}

impl<'a> VisitNodeWithInfo<'a> for VariableDefinitions<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_list(&self.children, ctx, visitor, info)
    }
}

impl<'a> VisitNodeWithInfo<'a> for Field<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_field, leave_field, {
            visit_child!(self.arguments, PathSegment::Arguments, ctx, visitor, info);
            visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
            visit_child!(self.selection_set, PathSegment::SelectionSet, ctx, visitor, info);
        })
    }
}

impl<'a> VisitNodeWithInfo<'a> for FragmentSpread<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(
            self,
            ctx,
            visitor,
            info,
            enter_fragment_spread,
            leave_fragment_spread,
            {
                visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
            }
        )
    }
}

impl<'a> VisitNodeWithInfo<'a> for InlineFragment<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(
            self,
            ctx,
            visitor,
            info,
            enter_inline_fragment,
            leave_inline_fragment,
            {
                visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
                visit_child!(self.selection_set, PathSegment::SelectionSet, ctx, visitor, info);
            }
        )
    }
}

impl<'a> VisitNodeWithInfo<'a> for Selection<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        match self {
            Selection::Field(field) => field.visit_with_info(ctx, visitor, info),
            Selection::FragmentSpread(spread) => spread.visit_with_info(ctx, visitor, info),
            Selection::InlineFragment(fragment) => fragment.visit_with_info(ctx, visitor, info),
        }
    }
}

impl<'a> VisitNodeWithInfo<'a> for SelectionSet<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(
            self,
            ctx,
            visitor,
            info,
            enter_selection_set,
            leave_selection_set,
            {
                if visit_list(&self.selections, ctx, visitor, info) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
        )
    }
}

impl<'a> VisitNodeWithInfo<'a> for FragmentDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_fragment, leave_fragment, {
            visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
            visit_child!(self.selection_set, PathSegment::SelectionSet, ctx, visitor, info);
        })
    }
}

impl<'a> VisitNodeWithInfo<'a> for OperationDefinition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_operation, leave_operation, {
            visit_child!(
                self.variable_definitions,
                PathSegment::VariableDefinitions,
                ctx,
                visitor,
                info
            );
            visit_child!(self.directives, PathSegment::Directives, ctx, visitor, info);
            visit_child!(self.selection_set, PathSegment::SelectionSet, ctx, visitor, info);
        })
    }
}

impl<'a> VisitNodeWithInfo<'a> for Definition<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        match self {
            Definition::Operation(operation) => operation.visit_with_info(ctx, visitor, info),
            Definition::Fragment(fragment) => fragment.visit_with_info(ctx, visitor, info),
        }
    }
}

impl<'a> VisitNodeWithInfo<'a> for Document<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_node!(self, ctx, visitor, info, enter_document, leave_document, {
            if visit_list(&self.definitions, ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Counts how often each callback was called.
    #[derive(Debug, PartialEq, Eq, Default)]
    pub(crate) struct CountVisitor {
        pub(crate) document: (usize, usize),
        pub(crate) operation: (usize, usize),
        pub(crate) fragment: (usize, usize),
        pub(crate) variable_definition: (usize, usize),
        pub(crate) selection_set: (usize, usize),
        pub(crate) fragment_spread: (usize, usize),
        pub(crate) inline_fragment: (usize, usize),
        pub(crate) field: (usize, usize),
        pub(crate) directive: (usize, usize),
        pub(crate) argument: (usize, usize),
    }

    macro_rules! count {
        ($($counter:ident: $ty:ty => $enter:ident, $leave:ident;)*) => {
            impl<'a, C> Visitor<'a, C> for CountVisitor {
                $(
                    fn $enter(&mut self, _: &mut C, _: &'a $ty, _: &VisitInfo) -> VisitFlow {
                        self.$counter.0 += 1;
                        VisitFlow::Next
                    }
                    fn $leave(&mut self, _: &mut C, _: &'a $ty, _: &VisitInfo) -> VisitFlow {
                        self.$counter.1 += 1;
                        VisitFlow::Next
                    }
                )*
            }
        };
    }

    count! {
        document: Document<'a> => enter_document, leave_document;
        operation: OperationDefinition<'a> => enter_operation, leave_operation;
        fragment: FragmentDefinition<'a> => enter_fragment, leave_fragment;
        variable_definition: VariableDefinition<'a> => enter_variable_definition, leave_variable_definition;
        selection_set: SelectionSet<'a> => enter_selection_set, leave_selection_set;
        fragment_spread: FragmentSpread<'a> => enter_fragment_spread, leave_fragment_spread;
        inline_fragment: InlineFragment<'a> => enter_inline_fragment, leave_inline_fragment;
        field: Field<'a> => enter_field, leave_field;
        directive: Directive<'a> => enter_directive, leave_directive;
        argument: Argument<'a> => enter_argument, leave_argument;
    }

    /// The number of callbacks the kitchen sink fixture triggers.
    pub(crate) fn kitchen_sink_counts() -> CountVisitor {
        CountVisitor {
            document: (1, 1),
            operation: (4, 4),
            fragment: (1, 1),
            variable_definition: (3, 3),
            selection_set: (24, 24),
            fragment_spread: (1, 1),
            inline_fragment: (2, 2),
            field: (17, 17),
            directive: (11, 11),
            argument: (13, 13),
        }
    }

    #[test]
    fn kitchen_sink() {
        let ctx = ASTContext::new();
        let query = include_str!("../../fixture/kitchen_sink.graphql");
        let document = Document::parse(&ctx, query).unwrap();

        let mut visitor = CountVisitor::default();
        assert_eq!(document.visit(&mut (), &mut visitor), VisitFlow::Next);
        assert_eq!(visitor, kitchen_sink_counts());
    }

    #[derive(Default)]
    struct PathVisitor {
        spreads: Vec<String>,
        arguments: Vec<String>,
    }

    impl<'a> Visitor<'a> for PathVisitor {
        fn enter_fragment_spread(
            &mut self,
            _ctx: &mut (),
            _spread: &'a FragmentSpread<'a>,
            info: &VisitInfo,
        ) -> VisitFlow {
            self.spreads.push(info.path.to_string());
            VisitFlow::Next
        }

        fn enter_argument(
            &mut self,
            _ctx: &mut (),
            _argument: &'a Argument<'a>,
            info: &VisitInfo,
        ) -> VisitFlow {
            self.arguments.push(info.path.to_string());
            VisitFlow::Next
        }
    }

    #[test]
    fn visit_info_path() {
        let ctx = ASTContext::new();
        let query = include_str!("../../fixture/kitchen_sink.graphql");
        let document = Document::parse(&ctx, query).unwrap();

        let mut visitor = PathVisitor::default();
        document.visit(&mut (), &mut visitor);
        assert_eq!(
            visitor.spreads,
            ["0.selectionSet.0.selectionSet.1.selectionSet.0.selectionSet.1.selectionSet.1"]
        );
        assert_eq!(visitor.arguments[0], "0.selectionSet.0.arguments.0");
        assert_eq!(
            visitor.arguments[3],
            "0.selectionSet.0.selectionSet.1.selectionSet.0.selectionSet.1.directives.0.arguments.0"
        );
    }

    struct SkipFields;

    impl<'a> Visitor<'a> for SkipFields {
        fn enter_field(&mut self, _: &mut (), _: &'a Field<'a>, _: &VisitInfo) -> VisitFlow {
            VisitFlow::Skip
        }

        fn leave_field(&mut self, _: &mut (), _: &'a Field<'a>, _: &VisitInfo) -> VisitFlow {
            panic!("skipped fields must not be left")
        }
    }

    #[test]
    fn skip_passes_over_children() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ a { b } c(x: 1) }").unwrap();
        let mut visitor = SkipFields.compose(CountVisitor::default());
        assert_eq!(document.visit(&mut (), &mut visitor), VisitFlow::Next);
        assert_eq!(visitor.b.field, (3, 3));
    }

    struct BreakOnArgument(usize);

    impl<'a> Visitor<'a> for BreakOnArgument {
        fn enter_argument(&mut self, _: &mut (), _: &'a Argument<'a>, _: &VisitInfo) -> VisitFlow {
            self.0 += 1;
            VisitFlow::Break
        }
    }

    #[test]
    fn break_stops_the_traversal() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ a(x: 1) b(y: 2) }").unwrap();
        let mut visitor = BreakOnArgument(0);
        assert_eq!(document.visit(&mut (), &mut visitor), VisitFlow::Break);
        assert_eq!(visitor.0, 1);
    }
}
