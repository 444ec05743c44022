use super::ast::*;
use super::ast_kind::ASTKind;
use super::lexer::{Extras, Token};
use crate::error::{Error, Result};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos, Span};

type ParseResult<T> = std::result::Result<T, ASTKind>;

pub(crate) mod private {
    use super::{ASTContext, ASTKind, Extras, Lexer, Logos, ParseResult, Span, Token, Vec};

    /// Parser state: the AST context, its arena, and a [Lexer] with one token of lookahead.
    ///
    /// The schema definition parser drives the same context, so that both languages share one
    /// lexer and schema default values are parsed as regular [`Value`](super::Value) nodes.
    pub struct ParserContext<'a> {
        pub(crate) ast_ctx: &'a ASTContext,
        pub(crate) arena: &'a bumpalo::Bump,
        pub(crate) peek: Option<Token<'a>>,
        pub(crate) iter: Lexer<'a, Token<'a>>,
        /// Set while parsing a default value, which must be constant.
        pub(crate) in_var_def: bool,
    }

    impl<'a> ParserContext<'a> {
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
            ParserContext {
                ast_ctx: ctx,
                arena: &ctx.arena,
                peek: None,
                iter: Token::lexer_with_extras(source, Extras { arena: &ctx.arena }),
                in_var_def: false,
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            self.peek
                .take()
                .unwrap_or_else(|| self.iter.next().unwrap_or(Token::End))
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            let iter = &mut self.iter;
            self.peek
                .get_or_insert_with(|| iter.next().unwrap_or(Token::End))
        }

        /// Consumes the next token if it equals `token`.
        #[inline]
        pub(crate) fn eat(&mut self, token: &Token<'a>) -> bool {
            let found = self.peek() == token;
            if found {
                self.peek = None;
            }
            found
        }

        /// Consumes the next token and fails with `kind` unless it equals `token`.
        #[inline]
        pub(crate) fn expect(&mut self, token: &Token<'a>, kind: ASTKind) -> ParseResult<()> {
            if self.next() == *token {
                Ok(())
            } else {
                Err(kind)
            }
        }

        /// Consumes a name token and fails with `kind` for anything else.
        #[inline]
        pub(crate) fn name(&mut self, kind: ASTKind) -> ParseResult<&'a str> {
            match self.next() {
                Token::Name(name) => Ok(name),
                _ => Err(kind),
            }
        }

        /// Parses items between `open` and `close` into an arena vector. Nothing is consumed and
        /// the vector is empty when the next token isn't `open`.
        pub(crate) fn delimited<T>(
            &mut self,
            open: Token<'a>,
            close: Token<'a>,
            mut item: impl FnMut(&mut Self) -> ParseResult<T>,
        ) -> ParseResult<Vec<'a, T>> {
            let mut items = Vec::new_in(self.arena);
            if self.eat(&open) {
                while !self.eat(&close) {
                    items.push(item(self)?);
                }
            }
            Ok(items)
        }

        #[inline]
        pub(crate) fn source(&self) -> &str {
            self.iter.source()
        }

        #[inline]
        pub(crate) fn span(&self) -> Span {
            self.iter.span()
        }
    }

    /// (Private) Trait for parsing AST Nodes from a Parser Context.
    /// The [`super::ParseNode`] trait implements the public `parse` method instead.
    pub trait ParseNode<'a>: Sized {
        fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

use private::{ParseNode as _, ParserContext};

/// Trait for parsing AST Nodes from source texts using recursive descent and a lexer.
///
/// Every AST Node implements it, so any part of the query language can be parsed on its own,
/// although most callers will use `Document::parse`.
pub trait ParseNode<'a>: private::ParseNode<'a> {
    /// Parse an input source text into the implementor's AST Node structure and allocate the
    /// resulting AST into the current AST Context's arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source);
        match Self::new_with_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(kind) => Err(Error::syntax(
                format!("Invalid {kind}"),
                parser_ctx.source(),
                parser_ctx.span(),
            )),
        }
    }
}

impl<'a, T: private::ParseNode<'a>> ParseNode<'a> for T {}

/// Implements parsing for nodes that consist of a single token.
macro_rules! scalar_nodes {
    ($lt:lifetime; $($node:ty => |$ctx:ident| $body:expr;)+) => {
        $(
            impl<$lt> private::ParseNode<$lt> for $node {
                #[inline]
                fn new_with_ctx($ctx: &mut ParserContext<$lt>) -> ParseResult<Self> {
                    $body
                }
            }
        )+
    };
}

scalar_nodes! {
    'a;
    BooleanValue => |ctx| match ctx.next() {
        Token::Name("true") => Ok(BooleanValue { value: true }),
        Token::Name("false") => Ok(BooleanValue { value: false }),
        _ => Err(ASTKind::Boolean),
    };
    EnumValue<'a> => |ctx| match ctx.next() {
        Token::Name("true" | "false" | "null") => Err(ASTKind::Enum),
        Token::Name(value) => Ok(EnumValue { value }),
        _ => Err(ASTKind::Enum),
    };
    FloatValue<'a> => |ctx| match ctx.next() {
        Token::Float(value) => Ok(FloatValue { value }),
        _ => Err(ASTKind::Float),
    };
    IntValue<'a> => |ctx| match ctx.next() {
        Token::Integer(value) => Ok(IntValue { value }),
        _ => Err(ASTKind::Int),
    };
    StringValue<'a> => |ctx| match ctx.next() {
        Token::String(value) => Ok(StringValue { value }),
        _ => Err(ASTKind::String),
    };
    Variable<'a> => |ctx| match ctx.next() {
        Token::VariableName(name) => Ok(Variable { name }),
        _ => Err(ASTKind::Variable),
    };
    NamedType<'a> => |ctx| ctx.name(ASTKind::NamedType).map(|name| NamedType { name });
    OperationKind => |ctx| match ctx.next() {
        Token::Name("query") => Ok(OperationKind::Query),
        Token::Name("mutation") => Ok(OperationKind::Mutation),
        Token::Name("subscription") => Ok(OperationKind::Subscription),
        _ => Err(ASTKind::OperationKind),
    };
}

impl<'a> private::ParseNode<'a> for Value<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Value<'a>> {
        let constant = ctx.in_var_def;
        match ctx.peek() {
            Token::Name("null") => {
                ctx.next();
                Ok(Value::Null)
            }
            Token::VariableName(_) if constant => Err(ASTKind::VariableDefinition),
            Token::VariableName(_) => Variable::new_with_ctx(ctx).map(Value::Variable),
            Token::Name("true" | "false") => BooleanValue::new_with_ctx(ctx).map(Value::Boolean),
            Token::Name(_) => EnumValue::new_with_ctx(ctx).map(Value::Enum),
            Token::Float(_) => FloatValue::new_with_ctx(ctx).map(Value::Float),
            Token::Integer(_) => IntValue::new_with_ctx(ctx).map(Value::Int),
            Token::String(_) => StringValue::new_with_ctx(ctx).map(Value::String),
            Token::BracketOpen => ListValue::new_with_ctx(ctx).map(Value::List),
            Token::BraceOpen => ObjectValue::new_with_ctx(ctx).map(Value::Object),
            _ => Err(ASTKind::Value),
        }
    }
}

/// Parses `name: value`, the shape shared by arguments and object fields.
fn name_and_value<'a>(
    ctx: &mut ParserContext<'a>,
    kind: ASTKind,
) -> ParseResult<(&'a str, Value<'a>)> {
    let name = ctx.name(kind)?;
    ctx.expect(&Token::Colon, kind)?;
    Ok((name, Value::new_with_ctx(ctx)?))
}

impl<'a> private::ParseNode<'a> for ObjectField<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<ObjectField<'a>> {
        let (name, value) = name_and_value(ctx, ASTKind::ObjectField)?;
        Ok(ObjectField { name, value })
    }
}

impl<'a> private::ParseNode<'a> for ObjectValue<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<ObjectValue<'a>> {
        if ctx.peek() != &Token::BraceOpen {
            return Err(ASTKind::Object);
        }
        let children =
            ctx.delimited(Token::BraceOpen, Token::BraceClose, ObjectField::new_with_ctx)?;
        Ok(ObjectValue { children })
    }
}

impl<'a> private::ParseNode<'a> for ListValue<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<ListValue<'a>> {
        if ctx.peek() != &Token::BracketOpen {
            return Err(ASTKind::List);
        }
        let children =
            ctx.delimited(Token::BracketOpen, Token::BracketClose, Value::new_with_ctx)?;
        Ok(ListValue { children })
    }
}

impl<'a> private::ParseNode<'a> for Argument<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Argument<'a>> {
        let (name, value) = name_and_value(ctx, ASTKind::Argument)?;
        Ok(Argument { name, value })
    }
}

impl<'a> private::ParseNode<'a> for Arguments<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Arguments<'a>> {
        let children =
            ctx.delimited(Token::ParenOpen, Token::ParenClose, Argument::new_with_ctx)?;
        Ok(Arguments { children })
    }
}

impl<'a> private::ParseNode<'a> for Directive<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Directive<'a>> {
        let Token::DirectiveName(name) = ctx.next() else {
            return Err(ASTKind::Directive);
        };
        let arguments = Arguments::new_with_ctx(ctx)?;
        Ok(Directive { name, arguments })
    }
}

impl<'a> private::ParseNode<'a> for Directives<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Directives<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        while matches!(ctx.peek(), Token::DirectiveName(_)) {
            children.push(Directive::new_with_ctx(ctx)?);
        }
        Ok(Directives { children })
    }
}

impl<'a> private::ParseNode<'a> for Field<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Field<'a>> {
        let first = ctx.name(ASTKind::Field)?;
        let (alias, name) = if ctx.eat(&Token::Colon) {
            (Some(first), ctx.name(ASTKind::Field)?)
        } else {
            (None, first)
        };
        Ok(Field {
            alias,
            name,
            arguments: Arguments::new_with_ctx(ctx)?,
            directives: Directives::new_with_ctx(ctx)?,
            selection_set: SelectionSet::new_with_ctx(ctx)?,
        })
    }
}

impl<'a> private::ParseNode<'a> for FragmentSpread<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<FragmentSpread<'a>> {
        ctx.eat(&Token::Ellipsis);
        match ctx.peek() {
            Token::Name("on") => Err(ASTKind::FragmentSpread),
            Token::Name(_) => Ok(FragmentSpread {
                name: NamedType::new_with_ctx(ctx)?,
                directives: Directives::new_with_ctx(ctx)?,
            }),
            _ => Err(ASTKind::FragmentSpread),
        }
    }
}

impl<'a> private::ParseNode<'a> for InlineFragment<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<InlineFragment<'a>> {
        ctx.eat(&Token::Ellipsis);
        let type_condition = if ctx.eat(&Token::Name("on")) {
            Some(NamedType::new_with_ctx(ctx)?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = required_selection_set(ctx, ASTKind::InlineFragment)?;
        Ok(InlineFragment {
            type_condition,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for Selection<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Selection<'a>> {
        if let Token::Name(_) = ctx.peek() {
            return Field::new_with_ctx(ctx).map(Selection::Field);
        }
        ctx.expect(&Token::Ellipsis, ASTKind::Selection)?;
        match ctx.peek() {
            Token::Name("on") | Token::DirectiveName(_) | Token::BraceOpen => {
                InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
            }
            Token::Name(_) => FragmentSpread::new_with_ctx(ctx).map(Selection::FragmentSpread),
            _ => Err(ASTKind::Selection),
        }
    }
}

impl<'a> private::ParseNode<'a> for SelectionSet<'a> {
    /// Parses an optional selection set. A selection set that is present may not be empty.
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<SelectionSet<'a>> {
        let present = ctx.peek() == &Token::BraceOpen;
        let selections =
            ctx.delimited(Token::BraceOpen, Token::BraceClose, Selection::new_with_ctx)?;
        if present && selections.is_empty() {
            Err(ASTKind::SelectionSet)
        } else {
            Ok(SelectionSet { selections })
        }
    }
}

/// Parses a selection set that must be present, failing with `kind` otherwise.
fn required_selection_set<'a>(
    ctx: &mut ParserContext<'a>,
    kind: ASTKind,
) -> ParseResult<SelectionSet<'a>> {
    if ctx.peek() == &Token::BraceOpen {
        SelectionSet::new_with_ctx(ctx)
    } else {
        Err(kind)
    }
}

impl<'a> private::ParseNode<'a> for Type<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Type<'a>> {
        let of_type = match ctx.next() {
            Token::Name(name) => Type::NamedType(NamedType { name }),
            Token::BracketOpen => {
                let inner = Type::new_with_ctx(ctx)?;
                ctx.expect(&Token::BracketClose, ASTKind::ListType)?;
                Type::ListType(ctx.arena.alloc(inner))
            }
            _ => return Err(ASTKind::Type),
        };
        if ctx.eat(&Token::Exclam) {
            Ok(Type::NonNullType(ctx.arena.alloc(of_type)))
        } else {
            Ok(of_type)
        }
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<VariableDefinition<'a>> {
        let variable = Variable::new_with_ctx(ctx)?;
        ctx.expect(&Token::Colon, ASTKind::VariableDefinition)?;
        let of_type = Type::new_with_ctx(ctx)?;
        let default_value = if ctx.eat(&Token::Equal) {
            ctx.in_var_def = true;
            let value = Value::new_with_ctx(ctx);
            ctx.in_var_def = false;
            value?
        } else {
            Value::Null
        };
        Ok(VariableDefinition {
            variable,
            of_type,
            default_value,
            directives: Directives::new_with_ctx(ctx)?,
        })
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinitions<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<VariableDefinitions<'a>> {
        let present = ctx.peek() == &Token::ParenOpen;
        let children = ctx.delimited(
            Token::ParenOpen,
            Token::ParenClose,
            VariableDefinition::new_with_ctx,
        )?;
        if present && children.is_empty() {
            Err(ASTKind::VariableDefinitions)
        } else {
            Ok(VariableDefinitions { children })
        }
    }
}

impl<'a> private::ParseNode<'a> for FragmentDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<FragmentDefinition<'a>> {
        let kind = ASTKind::FragmentDefinition;
        ctx.expect(&Token::Name("fragment"), kind)?;
        let name = NamedType::new_with_ctx(ctx)?;
        ctx.expect(&Token::Name("on"), kind)?;
        Ok(FragmentDefinition {
            name,
            type_condition: NamedType::new_with_ctx(ctx)?,
            directives: Directives::new_with_ctx(ctx)?,
            selection_set: required_selection_set(ctx, kind)?,
        })
    }
}

impl<'a> private::ParseNode<'a> for OperationDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<OperationDefinition<'a>> {
        let kind = ASTKind::OperationDefinition;
        if ctx.peek() == &Token::BraceOpen {
            return Ok(OperationDefinition {
                operation: OperationKind::Query,
                name: None,
                variable_definitions: VariableDefinitions::default_in(ctx.arena),
                directives: Directives::default_in(ctx.arena),
                selection_set: SelectionSet::new_with_ctx(ctx)?,
            });
        }
        let operation = OperationKind::new_with_ctx(ctx).map_err(|_| kind)?;
        let name = match ctx.peek() {
            Token::Name(_) => Some(NamedType::new_with_ctx(ctx)?),
            _ => None,
        };
        Ok(OperationDefinition {
            operation,
            name,
            variable_definitions: VariableDefinitions::new_with_ctx(ctx)?,
            directives: Directives::new_with_ctx(ctx)?,
            selection_set: required_selection_set(ctx, kind)?,
        })
    }
}

impl<'a> private::ParseNode<'a> for Document<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Document<'a>> {
        let mut definitions = Vec::new_in(ctx.arena);
        loop {
            let definition = match ctx.peek() {
                Token::End => break,
                Token::Name("fragment") => {
                    FragmentDefinition::new_with_ctx(ctx).map(Definition::Fragment)?
                }
                Token::BraceOpen | Token::Name("query" | "mutation" | "subscription") => {
                    OperationDefinition::new_with_ctx(ctx).map(Definition::Operation)?
                }
                _ => return Err(ASTKind::Document),
            };
            definitions.push(definition);
        }
        Ok(Document { definitions })
    }
}
