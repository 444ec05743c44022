use crate::schema::{
    SchemaEnum, SchemaInputObject, SchemaInterface, SchemaObject, SchemaScalar, SchemaUnion,
};

/// Root operation type names as declared by a `schema { ... }` definition.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct SchemaDefinition<'a> {
    pub(super) query_root_type_name: Option<&'a str>,
    pub(super) mutation_root_type_name: Option<&'a str>,
    pub(super) subscription_root_type_name: Option<&'a str>,
}

/// A parsed type definition that hasn't been linked to the rest of the schema yet.
///
/// Interfaces only learn about their implementations once every definition has been read, so
/// definitions stay mutable here until the schema is built.
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, Clone)]
pub(super) enum TypeDefinition<'a> {
    Object(SchemaObject<'a>),
    InputObject(SchemaInputObject<'a>),
    Enum(SchemaEnum<'a>),
    Scalar(SchemaScalar<'a>),
    Interface(SchemaInterface<'a>),
    Union(SchemaUnion<'a>),
}

impl<'a> TypeDefinition<'a> {
    pub(super) fn name(&self) -> &'a str {
        match self {
            TypeDefinition::Object(obj) => obj.name,
            TypeDefinition::InputObject(obj) => obj.name,
            TypeDefinition::Enum(e) => e.name,
            TypeDefinition::Scalar(s) => s.name,
            TypeDefinition::Interface(i) => i.name,
            TypeDefinition::Union(u) => u.name,
        }
    }
}
