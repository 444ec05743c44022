use super::error::{syntax_err, validation, SchemaError};
use super::finalizers::build_schema;
use super::parse_ast::*;
use crate::ast::lexer::Token;
use crate::ast::parser::private::{ParseNode as ParseAstNode, ParserContext};
use crate::ast::{ASTContext, ASTKind, Directives, Value};
use crate::error::{Error, ErrorType, Result};
use crate::schema::{
    DirectiveLocation, Schema, SchemaDirective, SchemaEnum, SchemaField, SchemaFields,
    SchemaInputField, SchemaInputObject, SchemaInterface, SchemaInterfaces, SchemaObject,
    SchemaPossibleTypes, SchemaScalar, SchemaUnion, TypeRef,
};
use bumpalo::collections::Vec;

pub(crate) type ParseResult<T> = std::result::Result<T, SchemaError>;

pub(crate) mod private {
    use super::{ParseResult, ParserContext};

    /// (Private) Trait for parsing schema definitions from a Parser Context.
    /// The [`super::ParseSdl`] trait implements the public `parse` method instead.
    pub trait ParseFromCtx<'a>: Sized {
        fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

/// Trait for parsing a [Schema] from GraphQL SDL source text using recursive descent.
///
/// The SDL shares its lexer with the query language, so descriptions, comments, and commas are
/// treated the same way in both. Descriptions and directives applied to definitions are read but
/// not kept.
pub trait ParseSdl<'a>: private::ParseFromCtx<'a> {
    /// Parse an input source text into a schema and allocate it into the AST Context's arena.
    ///
    /// Syntax errors carry the location at which the parser stopped. Errors found while linking
    /// the parsed definitions don't have a location.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source);
        match Self::parse_from_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error @ SchemaError::SyntaxError(_)) => Err(Error::syntax(
                error.to_string(),
                parser_ctx.source(),
                parser_ctx.span(),
            )),
            Err(error @ SchemaError::ValidationError(_)) => {
                Err(Error::new(error.to_string(), Some(ErrorType::GraphQL)))
            }
        }
    }
}

impl<'a, T: private::ParseFromCtx<'a>> ParseSdl<'a> for T {}

#[inline]
fn invalid(kind: ASTKind) -> SchemaError {
    SchemaError::SyntaxError(format!("Invalid {}", kind))
}

#[inline]
fn expect<'a>(ctx: &mut ParserContext<'a>, token: Token<'a>) -> ParseResult<()> {
    match ctx.next() {
        next if next == token => Ok(()),
        next => syntax_err!("Expected {:?}, got {:?}", token, next),
    }
}

#[inline]
fn parse_name<'a>(ctx: &mut ParserContext<'a>, what: &str) -> ParseResult<&'a str> {
    match ctx.next() {
        Token::Name(name) => Ok(name),
        t => syntax_err!("Expected {} name, got {:?}", what, t),
    }
}

/// Skips a description string, if one is present.
#[inline]
fn skip_description(ctx: &mut ParserContext<'_>) {
    if let Token::String(_) = ctx.peek() {
        ctx.next();
    }
}

/// Reads and discards directives applied to a definition.
#[inline]
fn skip_directives(ctx: &mut ParserContext<'_>) -> ParseResult<()> {
    Directives::new_with_ctx(ctx).map_err(invalid)?;
    Ok(())
}

fn parse_type_ref<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<&'a TypeRef<'a>> {
    let type_ref = match ctx.next() {
        Token::Name(name) => TypeRef::Type(name),
        Token::BracketOpen => {
            let of_type = parse_type_ref(ctx)?;
            if ctx.next() != Token::BracketClose {
                return syntax_err!("Unterminated list type");
            }
            TypeRef::ListType(of_type)
        }
        t => return syntax_err!("Expected type name or list type start `[`, got {:?}", t),
    };

    let type_ref = ctx.ast_ctx.alloc(type_ref);
    if let Token::Exclam = ctx.peek() {
        ctx.next();
        Ok(ctx.ast_ctx.alloc(TypeRef::NonNullType(type_ref)))
    } else {
        Ok(type_ref)
    }
}

/// Parses an argument or input field definition, like `first: Int = 10`.
fn parse_input_value<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaInputField<'a>> {
    skip_description(ctx);
    let name = parse_name(ctx, "input value")?;
    expect(ctx, Token::Colon)?;
    let input_type = parse_type_ref(ctx)?;

    let mut input_field = SchemaInputField::new(name, input_type);
    if let Token::Equal = ctx.peek() {
        ctx.next();
        ctx.in_var_def = true;
        let default_value = Value::new_with_ctx(ctx);
        ctx.in_var_def = false;
        let default_value = default_value.map_err(invalid)?;
        input_field = input_field.with_default_value(ctx.ast_ctx.alloc(default_value));
    }

    skip_directives(ctx)?;
    Ok(input_field)
}

/// Parses a list of input values enclosed by `open` and `close`.
fn parse_input_values<'a>(
    ctx: &mut ParserContext<'a>,
    open: Token<'a>,
    close: Token<'a>,
) -> ParseResult<Vec<'a, SchemaInputField<'a>>> {
    let mut input_fields = Vec::new_in(ctx.arena);
    if ctx.peek() != &open {
        return Ok(input_fields);
    }

    ctx.next();
    while ctx.peek() != &close {
        if let Token::End = ctx.peek() {
            return syntax_err!("Expected {:?}, got end of input", close);
        }
        let input_field = parse_input_value(ctx)?;
        if input_fields
            .iter()
            .any(|existing: &SchemaInputField| existing.name == input_field.name)
        {
            return Err(validation!(
                "Input value `{}` must not be defined more than once.",
                input_field.name
            ));
        }
        input_fields.push(input_field);
    }
    ctx.next();
    Ok(input_fields)
}

fn parse_field<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaField<'a>> {
    skip_description(ctx);
    let name = parse_name(ctx, "field")?;
    let arguments = parse_input_values(ctx, Token::ParenOpen, Token::ParenClose)?;
    expect(ctx, Token::Colon)?;
    let output_type = parse_type_ref(ctx)?;
    skip_directives(ctx)?;
    Ok(SchemaField {
        name,
        arguments,
        output_type,
    })
}

/// Parses the optional fields block of an object or interface type.
fn parse_fields<'a, T: SchemaFields<'a>>(
    ctx: &mut ParserContext<'a>,
    schema_type: &mut T,
) -> ParseResult<()> {
    if let Token::BraceOpen = ctx.peek() {
        ctx.next();
        loop {
            match ctx.peek() {
                Token::BraceClose => {
                    ctx.next();
                    break;
                }
                Token::End => return syntax_err!("Expected `}}`, got end of input"),
                _ => {
                    let field = parse_field(ctx)?;
                    if schema_type.get_field(field.name).is_some() {
                        return Err(validation!(
                            "Field `{}` must not be defined more than once.",
                            field.name
                        ));
                    }
                    schema_type.add_field(ctx.ast_ctx, field);
                }
            }
        }
    }
    Ok(())
}

/// Parses an optional `implements A & B` clause.
fn parse_implements<'a, T: SchemaInterfaces<'a>>(
    ctx: &mut ParserContext<'a>,
    schema_type: &mut T,
) -> ParseResult<()> {
    if ctx.peek() != &Token::Name("implements") {
        return Ok(());
    }

    ctx.next();
    if let Token::Ampersand = ctx.peek() {
        ctx.next();
    }
    schema_type.add_interface(parse_name(ctx, "interface")?);
    while let Token::Ampersand = ctx.peek() {
        ctx.next();
        schema_type.add_interface(parse_name(ctx, "interface")?);
    }
    Ok(())
}

fn parse_schema_definition<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaDefinition<'a>> {
    expect(ctx, Token::Name("schema"))?;
    skip_directives(ctx)?;
    expect(ctx, Token::BraceOpen)?;

    let mut definition = SchemaDefinition::default();
    loop {
        let root_type = match ctx.next() {
            Token::BraceClose => break,
            Token::Name("query") => &mut definition.query_root_type_name,
            Token::Name("mutation") => &mut definition.mutation_root_type_name,
            Token::Name("subscription") => &mut definition.subscription_root_type_name,
            t => return syntax_err!("Expected operation type, got {:?}", t),
        };
        if root_type.is_some() {
            return Err(validation!(
                "Root operation types must not be defined more than once."
            ));
        }
        expect(ctx, Token::Colon)?;
        *root_type = Some(parse_name(ctx, "type")?);
    }

    Ok(definition)
}

fn parse_directive_definition<'a>(
    ctx: &mut ParserContext<'a>,
) -> ParseResult<SchemaDirective<'a>> {
    expect(ctx, Token::Name("directive"))?;
    let name = match ctx.next() {
        Token::DirectiveName(name) => name,
        t => return syntax_err!("Expected directive name, got {:?}", t),
    };

    let mut directive = SchemaDirective::new(ctx.ast_ctx, name);
    directive.arguments = parse_input_values(ctx, Token::ParenOpen, Token::ParenClose)?;

    if ctx.peek() == &Token::Name("repeatable") {
        ctx.next();
        directive.is_repeatable = true;
    }

    expect(ctx, Token::Name("on"))?;
    if let Token::Pipe = ctx.peek() {
        ctx.next();
    }
    loop {
        let location = match ctx.next() {
            Token::Name(location) => DirectiveLocation::from_name(location),
            _ => None,
        };
        match location {
            Some(location) => directive.add_location(location),
            None => return syntax_err!("Expected a directive location on `@{}`", name),
        }

        if let Token::Pipe = ctx.peek() {
            ctx.next();
        } else {
            break;
        }
    }

    Ok(directive)
}

fn parse_object<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaObject<'a>> {
    expect(ctx, Token::Name("type"))?;
    let mut object = SchemaObject::new(ctx.ast_ctx, parse_name(ctx, "type")?);
    parse_implements(ctx, &mut object)?;
    skip_directives(ctx)?;
    parse_fields(ctx, &mut object)?;
    Ok(object)
}

fn parse_interface<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaInterface<'a>> {
    expect(ctx, Token::Name("interface"))?;
    let mut interface = SchemaInterface::new(ctx.ast_ctx, parse_name(ctx, "interface")?);
    parse_implements(ctx, &mut interface)?;
    skip_directives(ctx)?;
    parse_fields(ctx, &mut interface)?;
    Ok(interface)
}

fn parse_union<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaUnion<'a>> {
    expect(ctx, Token::Name("union"))?;
    let mut union_type = SchemaUnion::new(ctx.ast_ctx, parse_name(ctx, "union")?);
    skip_directives(ctx)?;

    if let Token::Equal = ctx.peek() {
        ctx.next();
        if let Token::Pipe = ctx.peek() {
            ctx.next();
        }
        union_type.add_possible_type(parse_name(ctx, "type")?);
        while let Token::Pipe = ctx.peek() {
            ctx.next();
            union_type.add_possible_type(parse_name(ctx, "type")?);
        }
    }

    Ok(union_type)
}

fn parse_enum<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaEnum<'a>> {
    expect(ctx, Token::Name("enum"))?;
    let mut enum_type = SchemaEnum::new(ctx.ast_ctx, parse_name(ctx, "enum")?);
    skip_directives(ctx)?;

    if let Token::BraceOpen = ctx.peek() {
        ctx.next();
        loop {
            skip_description(ctx);
            match ctx.next() {
                Token::BraceClose => break,
                Token::Name("true" | "false" | "null") => {
                    return syntax_err!("Enum `{}` must not define a boolean or null value", enum_type.name)
                }
                Token::Name(value) => {
                    enum_type.add_value(value);
                    skip_directives(ctx)?;
                }
                t => return syntax_err!("Expected either `}}` or an enum value, got {:?}", t),
            }
        }
    }

    Ok(enum_type)
}

fn parse_input_object<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaInputObject<'a>> {
    expect(ctx, Token::Name("input"))?;
    let mut input_object = SchemaInputObject::new(ctx.ast_ctx, parse_name(ctx, "input type")?);
    skip_directives(ctx)?;
    input_object.fields = parse_input_values(ctx, Token::BraceOpen, Token::BraceClose)?;
    Ok(input_object)
}

fn parse_scalar<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<SchemaScalar<'a>> {
    expect(ctx, Token::Name("scalar"))?;
    let scalar = SchemaScalar::new(parse_name(ctx, "scalar")?);
    skip_directives(ctx)?;
    Ok(scalar)
}

fn parse_type_definition<'a>(ctx: &mut ParserContext<'a>) -> ParseResult<TypeDefinition<'a>> {
    match ctx.peek() {
        Token::Name("type") => parse_object(ctx).map(TypeDefinition::Object),
        Token::Name("interface") => parse_interface(ctx).map(TypeDefinition::Interface),
        Token::Name("union") => parse_union(ctx).map(TypeDefinition::Union),
        Token::Name("enum") => parse_enum(ctx).map(TypeDefinition::Enum),
        Token::Name("input") => parse_input_object(ctx).map(TypeDefinition::InputObject),
        Token::Name("scalar") => parse_scalar(ctx).map(TypeDefinition::Scalar),
        Token::Name("extend") => syntax_err!("Type system extensions are not supported"),
        t => syntax_err!("Expected a type definition, got {:?}", t),
    }
}

impl<'a> private::ParseFromCtx<'a> for Schema<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let mut schema_def = None;
        let mut type_defs: Vec<'a, TypeDefinition<'a>> = Vec::new_in(ctx.arena);
        let mut directive_defs: Vec<'a, SchemaDirective<'a>> = Vec::new_in(ctx.arena);

        loop {
            skip_description(ctx);
            match ctx.peek() {
                Token::End => break,
                Token::Name("schema") => {
                    if schema_def.is_some() {
                        return syntax_err!("Must not specify more than one Schema Definition.");
                    }
                    schema_def = Some(parse_schema_definition(ctx)?);
                }
                Token::Name("directive") => {
                    let directive_def = parse_directive_definition(ctx)?;
                    if directive_defs.iter().any(|x| x.name == directive_def.name) {
                        return Err(validation!(
                            "There can be only one directive named `@{}`.",
                            directive_def.name
                        ));
                    }
                    directive_defs.push(directive_def);
                }
                _ => {
                    let type_def = parse_type_definition(ctx)?;
                    if type_defs.iter().any(|x| x.name() == type_def.name()) {
                        return Err(validation!(
                            "There can be only one type named `{}`.",
                            type_def.name()
                        ));
                    }
                    type_defs.push(type_def);
                }
            }
        }

        tracing::debug!(
            types = type_defs.len(),
            directives = directive_defs.len(),
            "parsed schema definitions"
        );

        build_schema(ctx.ast_ctx, schema_def, type_defs, directive_defs)
    }
}
