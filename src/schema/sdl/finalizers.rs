use super::error::validation;
use super::parse_ast::*;
use super::parser::ParseResult;
use crate::ast::{ASTContext, DefaultIn, OperationKind};
use crate::schema::{
    Schema, SchemaDirective, SchemaField, SchemaInputField, SchemaInterfaces,
    SchemaPossibleTypes, SchemaType,
};
use bumpalo::collections::Vec;
use hashbrown::HashMap;

/// Builds a [Schema] from parsed definitions.
///
/// Interfaces are linked to the types implementing them before any definition is moved into the
/// arena. Afterwards every type reference is checked against the finished schema.
pub(super) fn build_schema<'a>(
    ctx: &'a ASTContext,
    schema_def: Option<SchemaDefinition<'a>>,
    mut type_defs: Vec<'a, TypeDefinition<'a>>,
    directive_defs: Vec<'a, SchemaDirective<'a>>,
) -> ParseResult<Schema<'a>> {
    link_possible_types(ctx, &mut type_defs);

    let mut schema = Schema::default_in(&ctx.arena);
    let mut types = Vec::with_capacity_in(type_defs.len(), &ctx.arena);
    for type_def in type_defs {
        let schema_type: &'a SchemaType<'a> = ctx.alloc(match type_def {
            TypeDefinition::Object(x) => SchemaType::Object(ctx.alloc(x)),
            TypeDefinition::InputObject(x) => SchemaType::InputObject(ctx.alloc(x)),
            TypeDefinition::Enum(x) => SchemaType::Enum(ctx.alloc(x)),
            TypeDefinition::Scalar(x) => SchemaType::Scalar(ctx.alloc(x)),
            TypeDefinition::Interface(x) => SchemaType::Interface(ctx.alloc(x)),
            TypeDefinition::Union(x) => SchemaType::Union(ctx.alloc(x)),
        });
        schema.add_type(schema_type);
        types.push(schema_type);
    }

    let mut directives = Vec::with_capacity_in(directive_defs.len(), &ctx.arena);
    for directive_def in directive_defs {
        let directive: &'a SchemaDirective<'a> = ctx.alloc(directive_def);
        schema.add_directive(directive);
        directives.push(directive);
    }

    schema.add_builtin_definitions(ctx);

    for schema_type in types.iter() {
        validate_type(&schema, schema_type)?;
    }
    for directive in directives.iter() {
        for argument in directive.arguments.iter() {
            validate_input_value(&schema, argument, "directive", directive.name)?;
        }
    }

    // Root types declared by a schema definition must exist, default names are optional
    let explicit = schema_def.is_some();
    let schema_def = schema_def.unwrap_or(SchemaDefinition {
        query_root_type_name: Some("Query"),
        mutation_root_type_name: Some("Mutation"),
        subscription_root_type_name: Some("Subscription"),
    });
    for (kind, name) in [
        (OperationKind::Query, schema_def.query_root_type_name),
        (OperationKind::Mutation, schema_def.mutation_root_type_name),
        (OperationKind::Subscription, schema_def.subscription_root_type_name),
    ] {
        let Some(name) = name else { continue };
        match schema.get_type(name) {
            Some(SchemaType::Object(object)) => schema.set_root_type(kind, object),
            Some(_) => {
                return Err(validation!(
                    "Root type `{}` must be an object type.",
                    name
                ))
            }
            None if explicit => {
                return Err(validation!("Root type `{}` does not exist.", name))
            }
            None => {}
        }
    }

    Ok(schema)
}

/// Adds every object and interface to the possible types of the interfaces it implements.
fn link_possible_types<'a>(ctx: &'a ASTContext, type_defs: &mut Vec<'a, TypeDefinition<'a>>) {
    let mut index = HashMap::with_capacity_in(type_defs.len(), &ctx.arena);
    for (position, type_def) in type_defs.iter().enumerate() {
        index.insert(type_def.name(), position);
    }

    let mut links = std::vec::Vec::new();
    for type_def in type_defs.iter() {
        let (name, interfaces) = match type_def {
            TypeDefinition::Object(object) => (object.name, object.get_interfaces()),
            TypeDefinition::Interface(interface) => (interface.name, interface.get_interfaces()),
            _ => continue,
        };
        for interface in interfaces {
            if let Some(position) = index.get(interface) {
                links.push((*position, name));
            }
        }
    }

    for (position, name) in links {
        if let Some(TypeDefinition::Interface(interface)) = type_defs.get_mut(position) {
            interface.add_possible_type(name);
        }
    }
}

fn validate_type<'a>(schema: &Schema<'a>, schema_type: &SchemaType<'a>) -> ParseResult<()> {
    match schema_type {
        SchemaType::Object(object) => {
            for field in object.fields.values() {
                validate_field(schema, field, object.name)?;
            }
            validate_interfaces(schema, object.get_interfaces(), object.name)
        }
        SchemaType::Interface(interface) => {
            for field in interface.fields.values() {
                validate_field(schema, field, interface.name)?;
            }
            validate_interfaces(schema, interface.get_interfaces(), interface.name)
        }
        SchemaType::Union(union_type) => {
            for name in union_type.get_possible_types() {
                if schema.get_type(name).and_then(|x| x.object()).is_none() {
                    return Err(validation!(
                        "Type `{}` on union `{}` must be an object type.",
                        name,
                        union_type.name
                    ));
                }
            }
            Ok(())
        }
        SchemaType::InputObject(input_object) => {
            for field in input_object.fields.iter() {
                validate_input_value(schema, field, "input type", input_object.name)?;
            }
            Ok(())
        }
        SchemaType::Scalar(_) | SchemaType::Enum(_) => Ok(()),
    }
}

fn validate_field<'a>(
    schema: &Schema<'a>,
    field: &SchemaField<'a>,
    owner: &str,
) -> ParseResult<()> {
    let output_type = field.output_type.of_type(schema);
    if !output_type.is_some_and(|x| x.is_output_type()) {
        return Err(validation!(
            "Field `{}` of type `{}` has an invalid type `{}`.",
            field.name,
            owner,
            field.output_type
        ));
    }
    for argument in field.arguments.iter() {
        validate_input_value(schema, argument, "field", field.name)?;
    }
    Ok(())
}

fn validate_input_value<'a>(
    schema: &Schema<'a>,
    input_value: &SchemaInputField<'a>,
    owner_kind: &str,
    owner: &str,
) -> ParseResult<()> {
    let input_type = input_value.input_type.of_type(schema);
    if !input_type.is_some_and(|x| x.is_input_type()) {
        return Err(validation!(
            "Input value `{}` on {} `{}` has an invalid type `{}`.",
            input_value.name,
            owner_kind,
            owner,
            input_value.input_type
        ));
    }
    Ok(())
}

fn validate_interfaces(schema: &Schema<'_>, interfaces: &[&str], owner: &str) -> ParseResult<()> {
    for name in interfaces {
        if schema.get_type(name).and_then(|x| x.interface()).is_none() {
            return Err(validation!(
                "Interface `{}` on type `{}` does not exist.",
                name,
                owner
            ));
        }
    }
    Ok(())
}
