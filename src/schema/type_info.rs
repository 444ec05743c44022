use bumpalo::{collections::Vec, Bump};

use super::{Schema, SchemaDirective, SchemaField, SchemaInputField, SchemaType, TypeRef};
use crate::ast::OperationKind;

/// One entry of the [TypeInfo] stack.
#[derive(Debug, Clone, Copy, Default)]
struct Frame<'a> {
    parent_type: Option<SchemaType<'a>>,
    output_type: Option<SchemaType<'a>>,
    field: Option<&'a SchemaField<'a>>,
    directive: Option<&'a SchemaDirective<'a>>,
    in_directive: bool,
    argument: Option<&'a SchemaInputField<'a>>,
}

/// Type Info
///
/// A stateful companion to a document traversal that tracks which schema types and definitions
/// the current AST node refers to. Every entered operation, fragment, field, directive and
/// argument pushes a frame and leaving it pops that frame again, so reading the current state is
/// always a read of the topmost frame.
///
/// Definitions that can't be resolved, like unknown fields or directives, are tracked as `None`
/// and everything below them stays unresolved as well.
#[derive(Debug, Clone)]
pub struct TypeInfo<'a> {
    schema: &'a Schema<'a>,
    frames: Vec<'a, Frame<'a>>,
}

impl<'a> TypeInfo<'a> {
    /// Creates type info for a schema, positioned at the document root. Its stack lives in the
    /// given arena.
    #[inline]
    pub fn new(arena: &'a Bump, schema: &'a Schema<'a>) -> Self {
        let mut frames = Vec::with_capacity_in(32, arena);
        frames.push(Frame::default());
        TypeInfo { schema, frames }
    }

    #[inline]
    pub fn schema(&self) -> &'a Schema<'a> {
        self.schema
    }

    #[inline(always)]
    fn top(&self) -> Frame<'a> {
        self.frames.last().copied().unwrap_or_default()
    }

    /// The number of frames above the document root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// The composite type owning the current field.
    #[inline]
    pub fn parent_type(&self) -> Option<SchemaType<'a>> {
        self.top().parent_type
    }

    /// The named output type of the current selection scope.
    #[inline]
    pub fn output_type(&self) -> Option<SchemaType<'a>> {
        self.top().output_type
    }

    /// The definition of the innermost field being visited.
    #[inline]
    pub fn field_def(&self) -> Option<&'a SchemaField<'a>> {
        self.top().field
    }

    /// The definition of the directive being visited.
    #[inline]
    pub fn directive_def(&self) -> Option<&'a SchemaDirective<'a>> {
        self.top().directive
    }

    /// The definition of the argument being visited.
    #[inline]
    pub fn argument_def(&self) -> Option<&'a SchemaInputField<'a>> {
        self.top().argument
    }

    /// The declared type of the argument being visited.
    #[inline]
    pub fn input_type(&self) -> Option<&'a TypeRef<'a>> {
        self.top().argument.map(|argument| argument.input_type)
    }

    /// Enters an operation, whose selections apply to the root type of its kind.
    pub fn enter_operation(&mut self, operation: OperationKind) {
        let output_type = self
            .schema
            .get_root_type(operation)
            .map(SchemaType::Object);
        self.frames.push(Frame {
            output_type,
            ..Frame::default()
        });
    }

    /// Enters a fragment definition, whose selections apply to its type condition.
    pub fn enter_fragment(&mut self, type_condition: &str) {
        let output_type = self.composite_type(type_condition);
        self.frames.push(Frame {
            output_type,
            ..Frame::default()
        });
    }

    /// Enters an inline fragment. Without a type condition the enclosing type carries over.
    pub fn enter_inline_fragment(&mut self, type_condition: Option<&str>) {
        let top = self.top();
        let output_type = match type_condition {
            Some(type_condition) => self.composite_type(type_condition),
            None => top.output_type,
        };
        self.frames.push(Frame {
            output_type,
            directive: None,
            in_directive: false,
            argument: None,
            ..top
        });
    }

    /// Enters a field selected on the current output type.
    pub fn enter_field(&mut self, name: &str) {
        let parent_type = self.top().output_type.filter(SchemaType::is_composite);
        let field = parent_type.and_then(|parent| parent.get_field(name));
        let output_type = field
            .and_then(|field| field.output_type.of_type(self.schema))
            .copied();
        self.frames.push(Frame {
            parent_type,
            output_type,
            field,
            directive: None,
            in_directive: false,
            argument: None,
        });
    }

    /// Enters a directive, looked up by its name without the leading `@`.
    pub fn enter_directive(&mut self, name: &str) {
        let top = self.top();
        self.frames.push(Frame {
            directive: self.schema.get_directive(name),
            in_directive: true,
            argument: None,
            ..top
        });
    }

    /// Enters an argument of the current directive, or of the current field outside directives.
    pub fn enter_argument(&mut self, name: &str) {
        let top = self.top();
        let argument = if top.in_directive {
            top.directive
                .and_then(|directive| directive.get_argument(name))
        } else {
            top.field.and_then(|field| field.get_argument(name))
        };
        self.frames.push(Frame { argument, ..top });
    }

    /// Leaves the node entered last. The document root is never left.
    #[inline]
    pub fn leave(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    #[inline]
    fn composite_type(&self, name: &str) -> Option<SchemaType<'a>> {
        self.schema
            .get_type(name)
            .copied()
            .filter(SchemaType::is_composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::ASTContext, schema::ParseSdl};
    use indoc::indoc;

    fn schema(ctx: &ASTContext) -> &Schema<'_> {
        let source = indoc! {"
            type Query {
              user(id: ID!): User
              search(term: String!, first: Int = 10): [User!]!
            }

            type User {
              name: String
              friends(first: Int!): [User]
            }
        "};
        Schema::parse(ctx, source).unwrap()
    }

    #[test]
    fn tracks_fields() {
        let ctx = ASTContext::new();
        let mut type_info = TypeInfo::new(&ctx.arena, schema(&ctx));

        type_info.enter_operation(OperationKind::Query);
        assert_eq!(type_info.output_type().map(|x| x.name()), Some("Query"));
        assert!(type_info.field_def().is_none());

        type_info.enter_field("search");
        assert_eq!(type_info.parent_type().map(|x| x.name()), Some("Query"));
        assert_eq!(type_info.field_def().map(|x| x.name), Some("search"));
        assert_eq!(type_info.output_type().map(|x| x.name()), Some("User"));

        type_info.enter_field("friends");
        assert_eq!(type_info.parent_type().map(|x| x.name()), Some("User"));
        assert_eq!(type_info.field_def().map(|x| x.name), Some("friends"));

        type_info.leave();
        assert_eq!(type_info.field_def().map(|x| x.name), Some("search"));
        type_info.leave();
        type_info.leave();
        assert_eq!(type_info.depth(), 0);
    }

    #[test]
    fn unknown_fields_stay_unresolved() {
        let ctx = ASTContext::new();
        let mut type_info = TypeInfo::new(&ctx.arena, schema(&ctx));

        type_info.enter_operation(OperationKind::Query);
        type_info.enter_field("unknown");
        assert!(type_info.field_def().is_none());
        assert_eq!(type_info.parent_type().map(|x| x.name()), Some("Query"));

        type_info.enter_field("name");
        assert!(type_info.parent_type().is_none());
        assert!(type_info.field_def().is_none());
        assert_eq!(type_info.depth(), 3);
    }

    #[test]
    fn tracks_arguments() {
        let ctx = ASTContext::new();
        let mut type_info = TypeInfo::new(&ctx.arena, schema(&ctx));

        type_info.enter_operation(OperationKind::Query);
        type_info.enter_field("user");
        type_info.enter_argument("id");
        assert_eq!(type_info.argument_def().map(|x| x.name), Some("id"));
        assert_eq!(type_info.input_type().map(|x| x.to_string()).as_deref(), Some("ID!"));
        type_info.leave();

        type_info.enter_directive("include");
        assert_eq!(type_info.directive_def().map(|x| x.name), Some("include"));
        type_info.enter_argument("if");
        assert_eq!(
            type_info.input_type().map(|x| x.to_string()).as_deref(),
            Some("Boolean!")
        );
        type_info.leave();
        type_info.enter_argument("id");
        assert!(type_info.argument_def().is_none());
        type_info.leave();
        type_info.leave();

        type_info.enter_directive("unknown");
        assert!(type_info.directive_def().is_none());
        type_info.enter_argument("id");
        assert!(type_info.argument_def().is_none());
    }

    #[test]
    fn tracks_fragments() {
        let ctx = ASTContext::new();
        let mut type_info = TypeInfo::new(&ctx.arena, schema(&ctx));

        type_info.enter_fragment("User");
        assert_eq!(type_info.output_type().map(|x| x.name()), Some("User"));
        type_info.enter_inline_fragment(None);
        assert_eq!(type_info.output_type().map(|x| x.name()), Some("User"));
        type_info.enter_inline_fragment(Some("String"));
        assert!(type_info.output_type().is_none());
        type_info.leave();
        type_info.leave();
        type_info.leave();

        type_info.enter_fragment("Missing");
        assert!(type_info.output_type().is_none());
    }

    #[test]
    fn never_leaves_the_root() {
        let ctx = ASTContext::new();
        let mut type_info = TypeInfo::new(&ctx.arena, schema(&ctx));
        type_info.leave();
        type_info.leave();
        assert_eq!(type_info.depth(), 0);
        type_info.enter_operation(OperationKind::Mutation);
        assert!(type_info.output_type().is_none());
        assert_eq!(type_info.depth(), 1);
    }
}
