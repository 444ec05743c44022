use crate::ast::{ASTContext, DefaultIn, OperationKind, StringValue, Value};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::{HashMap, HashSet};
use std::fmt;

/// Names of the scalars every schema knows about, whether they're declared or not.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars.Built-in-Scalars)
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Schema Definition
///
/// A schema is created from root types for each kind of operation and is then used against
/// AST documents for validation. In this library the schema is never executable and serves only
/// for metadata and type information. It holds every named type and every directive definition.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone, PartialEq)]
pub struct Schema<'a> {
    pub(crate) query_type: Option<&'a SchemaObject<'a>>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) subscription_type: Option<&'a SchemaObject<'a>>,
    pub(crate) types: HashMap<&'a str, &'a SchemaType<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) directives: HashMap<&'a str, &'a SchemaDirective<'a>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: HashMap::new_in(arena),
            directives: HashMap::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Returns whether the schema is a default, empty schema
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.directives.is_empty()
            && self.query_type.is_none()
            && self.mutation_type.is_none()
            && self.subscription_type.is_none()
    }

    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns the root object type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.subscription_type
    }

    /// Returns the appropriate object type depending on the passed operation kind
    #[inline]
    pub fn get_root_type(&self, operation_kind: OperationKind) -> Option<&'a SchemaObject<'a>> {
        match operation_kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }

    /// Sets the root object type of the given operation kind.
    pub fn set_root_type(&mut self, operation_kind: OperationKind, object: &'a SchemaObject<'a>) {
        match operation_kind {
            OperationKind::Query => self.query_type = Some(object),
            OperationKind::Mutation => self.mutation_type = Some(object),
            OperationKind::Subscription => self.subscription_type = Some(object),
        }
    }

    /// Retrieves a named type by its name.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&'a SchemaType<'a>> {
        self.types.get(name).copied()
    }

    /// Adds a named type, replacing any type of the same name.
    pub fn add_type(&mut self, schema_type: &'a SchemaType<'a>) {
        self.types.insert(schema_type.name(), schema_type);
    }

    /// Iterates over all named types in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &'a SchemaType<'a>> + '_ {
        self.types.values().copied()
    }

    /// Retrieves a directive definition by its name, without the leading `@`.
    #[inline]
    pub fn get_directive(&self, name: &str) -> Option<&'a SchemaDirective<'a>> {
        self.directives.get(name).copied()
    }

    /// Adds a directive definition, replacing any directive of the same name.
    pub fn add_directive(&mut self, directive: &'a SchemaDirective<'a>) {
        self.directives.insert(directive.name, directive);
    }

    /// Iterates over all directive definitions in no particular order.
    pub fn directives(&self) -> impl Iterator<Item = &'a SchemaDirective<'a>> + '_ {
        self.directives.values().copied()
    }

    /// Adds the built-in scalars and directives unless a definition of the same name exists.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives.Built-in-Directives)
    pub fn add_builtin_definitions(&mut self, ctx: &'a ASTContext) {
        for name in BUILTIN_SCALARS {
            if !self.types.contains_key(name) {
                self.add_type(ctx.alloc(SchemaType::Scalar(ctx.alloc(SchemaScalar::new(name)))));
            }
        }

        let boolean = ctx.alloc(TypeRef::NonNullType(ctx.alloc(TypeRef::Type("Boolean"))));
        for name in ["skip", "include"] {
            if !self.directives.contains_key(name) {
                let mut directive = SchemaDirective::new(ctx, name);
                directive.add_argument(SchemaInputField::new("if", boolean));
                directive.add_location(DirectiveLocation::Field);
                directive.add_location(DirectiveLocation::FragmentSpread);
                directive.add_location(DirectiveLocation::InlineFragment);
                self.add_directive(ctx.alloc(directive));
            }
        }

        if !self.directives.contains_key("deprecated") {
            let mut directive = SchemaDirective::new(ctx, "deprecated");
            let reason = ctx.alloc(Value::String(StringValue {
                value: "No longer supported",
            }));
            directive.add_argument(
                SchemaInputField::new("reason", ctx.alloc(TypeRef::Type("String")))
                    .with_default_value(reason),
            );
            directive.add_location(DirectiveLocation::FieldDefinition);
            directive.add_location(DirectiveLocation::ArgumentDefinition);
            directive.add_location(DirectiveLocation::InputFieldDefinition);
            directive.add_location(DirectiveLocation::EnumValue);
            self.add_directive(ctx.alloc(directive));
        }

        if !self.directives.contains_key("specifiedBy") {
            let mut directive = SchemaDirective::new(ctx, "specifiedBy");
            let url = ctx.alloc(TypeRef::NonNullType(ctx.alloc(TypeRef::Type("String"))));
            directive.add_argument(SchemaInputField::new("url", url));
            directive.add_location(DirectiveLocation::Scalar);
            self.add_directive(ctx.alloc(directive));
        }
    }
}

/// Generic trait for any schema type that implements fields
pub trait SchemaFields<'a>: Sized {
    /// Add a new [SchemaField] to the list of fields
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>);

    /// Get a map of all fields keyed by their names
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>;

    /// Get a known field by name
    #[inline]
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.get_fields().get(name).copied()
    }
}

/// Generic trait for any schema type that implements interfaces
pub trait SchemaInterfaces<'a>: Sized {
    /// Add the name of an implemented interface
    fn add_interface(&mut self, interface: &'a str);

    /// Get the names of all implemented interfaces, in declaration order
    fn get_interfaces(&self) -> &[&'a str];

    #[inline]
    fn implements_interface(&self, name: &str) -> bool {
        self.get_interfaces().iter().any(|interface| *interface == name)
    }
}

/// Generic trait for any abstract schema type that has possible object types
pub trait SchemaPossibleTypes<'a>: Sized {
    /// Add the name of a possible object type
    fn add_possible_type(&mut self, object: &'a str);

    /// Get the names of all possible object types
    fn get_possible_types(&self) -> &[&'a str];

    #[inline]
    fn is_possible_type(&self, name: &str) -> bool {
        self.get_possible_types().iter().any(|possible| *possible == name)
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaObject {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaObject<'a> {
    fn add_interface(&mut self, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

/// An Interface type definition.
///
/// Objects and other interfaces may implement an interface. A field returning an interface may
/// return any object implementing it, which are tracked as the interface's possible types.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub(crate) fields: HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) interfaces: Vec<'a, &'a str>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInterface {
            name,
            fields: HashMap::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    fn add_field(&mut self, ctx: &'a ASTContext, field: SchemaField<'a>) {
        self.fields.insert(field.name, ctx.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &HashMap<&'a str, &'a SchemaField<'a>, DefaultHashBuilder, &'a Bump> {
        &self.fields
    }
}

impl<'a> SchemaInterfaces<'a> for SchemaInterface<'a> {
    fn add_interface(&mut self, interface: &'a str) {
        self.interfaces.push(interface);
    }

    #[inline]
    fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaInterface<'a> {
    fn add_possible_type(&mut self, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// Its arguments are kept in the order they were declared in.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, SchemaInputField<'a>>,
    pub output_type: &'a TypeRef<'a>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            arguments: Vec::new_in(&ctx.arena),
            output_type,
        }
    }

    pub fn add_argument(&mut self, argument: SchemaInputField<'a>) {
        self.arguments.push(argument);
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

/// A Directive definition.
///
/// Directives declare where they may be used and which arguments they accept, in declaration
/// order.
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDirective<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, SchemaInputField<'a>>,
    pub locations: Vec<'a, DirectiveLocation>,
    pub is_repeatable: bool,
}

impl<'a> SchemaDirective<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaDirective {
            name,
            arguments: Vec::new_in(&ctx.arena),
            locations: Vec::new_in(&ctx.arena),
            is_repeatable: false,
        }
    }

    pub fn add_argument(&mut self, argument: SchemaInputField<'a>) {
        self.arguments.push(argument);
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.arguments.iter().find(|argument| argument.name == name)
    }

    pub fn add_location(&mut self, location: DirectiveLocation) {
        if !self.locations.contains(&location) {
            self.locations.push(location);
        }
    }

    #[inline]
    pub fn has_location(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}

macro_rules! directive_locations {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A location a directive may be declared for.
        ///
        /// [Reference](https://spec.graphql.org/October2021/#DirectiveLocations)
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub enum DirectiveLocation {
            $($variant,)+
        }

        impl DirectiveLocation {
            /// Looks a location up by its SDL spelling, like `FIELD` or `INLINE_FRAGMENT`.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(DirectiveLocation::$variant),)+
                    _ => None,
                }
            }

            /// Returns the SDL spelling of this location.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(DirectiveLocation::$variant => $name,)+
                }
            }
        }
    };
}

directive_locations! {
    Query => "QUERY",
    Mutation => "MUTATION",
    Subscription => "SUBSCRIPTION",
    Field => "FIELD",
    FragmentDefinition => "FRAGMENT_DEFINITION",
    FragmentSpread => "FRAGMENT_SPREAD",
    InlineFragment => "INLINE_FRAGMENT",
    VariableDefinition => "VARIABLE_DEFINITION",
    Schema => "SCHEMA",
    Scalar => "SCALAR",
    Object => "OBJECT",
    FieldDefinition => "FIELD_DEFINITION",
    ArgumentDefinition => "ARGUMENT_DEFINITION",
    Interface => "INTERFACE",
    Union => "UNION",
    Enum => "ENUM",
    EnumValue => "ENUM_VALUE",
    InputObject => "INPUT_OBJECT",
    InputFieldDefinition => "INPUT_FIELD_DEFINITION",
}

impl From<OperationKind> for DirectiveLocation {
    #[inline]
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Query => DirectiveLocation::Query,
            OperationKind::Mutation => DirectiveLocation::Mutation,
            OperationKind::Subscription => DirectiveLocation::Subscription,
        }
    }
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Union type definition.
///
/// A union contains a list of possible object types that can be returned in its stead.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaUnion {
            name,
            possible_types: Vec::new_in(&ctx.arena),
        }
    }
}

impl<'a> SchemaPossibleTypes<'a> for SchemaUnion<'a> {
    fn add_possible_type(&mut self, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar { name }
    }
}

/// An Enum type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, PartialEq, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub values: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaEnum {
            name,
            values: HashSet::new_in(&ctx.arena),
        }
    }

    pub fn add_value(&mut self, value: &'a str) {
        self.values.insert(value);
    }
}

/// An Input Object type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub fields: Vec<'a, SchemaInputField<'a>>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            fields: Vec::new_in(&ctx.arena),
        }
    }

    pub fn add_field(&mut self, field: SchemaInputField<'a>) {
        self.fields.push(field);
    }

    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&SchemaInputField<'a>> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// An input value definition, used for field arguments, directive arguments, and input object
/// fields alike.
///
/// [Reference](https://spec.graphql.org/October2021/#InputValueDefinition)
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub input_type: &'a TypeRef<'a>,
    pub default_value: Option<&'a Value<'a>>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField {
            name,
            input_type,
            default_value: None,
        }
    }

    #[inline]
    pub fn with_default_value(self, default_value: &'a Value<'a>) -> Self {
        SchemaInputField {
            default_value: Some(default_value),
            ..self
        }
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn interface(&self) -> Option<&'a SchemaInterface<'a>> {
        match self {
            SchemaType::Interface(x) => Some(x),
            _ => None,
        }
    }

    pub fn union_type(&self) -> Option<&'a SchemaUnion<'a>> {
        match self {
            SchemaType::Union(x) => Some(x),
            _ => None,
        }
    }

    pub fn input_object(&self) -> Option<&'a SchemaInputObject<'a>> {
        match self {
            SchemaType::InputObject(x) => Some(x),
            _ => None,
        }
    }

    /// Objects, interfaces and unions may carry selection sets.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            SchemaType::Object(_) | SchemaType::Interface(_) | SchemaType::Union(_)
        )
    }

    /// Looks a field up on an object or interface type. Other types have no fields.
    #[inline]
    pub fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        match self {
            SchemaType::Object(object) => object.get_field(name),
            SchemaType::Interface(interface) => interface.get_field(name),
            _ => None,
        }
    }

    /// Whether values of this type may be passed as arguments and input fields.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#sec-Input-and-Output-Types)
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            SchemaType::Scalar(_) | SchemaType::Enum(_) | SchemaType::InputObject(_)
        )
    }

    /// Whether fields may return this type.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, SchemaType::InputObject(_))
    }
}

/// A reference to a named type, possibly wrapped in lists and non-null markers.
///
/// Named types are referred to by name and resolved against a [Schema] on demand, which keeps
/// circular type references out of the structure. It prints like it's written in SDL, for
/// instance `[ID!]!`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Whether the outermost wrapper is a non-null marker.
    #[inline]
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNullType(_))
    }

    /// Returns the name of the innermost named type.
    #[inline]
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => of_type.named_type(),
        }
    }

    /// Resolves the innermost named type against a schema.
    ///
    /// Returns `None` when the schema doesn't know the named type.
    #[inline]
    pub fn of_type(&self, schema: &Schema<'a>) -> Option<&'a SchemaType<'a>> {
        schema.get_type(self.named_type())
    }
}

impl<'a> fmt::Display for TypeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Type(name) => f.write_str(name),
            TypeRef::ListType(of_type) => write!(f, "[{}]", of_type),
            TypeRef::NonNullType(of_type) => write!(f, "{}!", of_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_printing() {
        let ctx = ASTContext::new();
        let id = ctx.alloc(TypeRef::Type("ID"));
        let non_null_id = ctx.alloc(TypeRef::NonNullType(id));
        let list = ctx.alloc(TypeRef::ListType(non_null_id));
        let non_null_list = TypeRef::NonNullType(list);

        assert_eq!(id.to_string(), "ID");
        assert_eq!(non_null_id.to_string(), "ID!");
        assert_eq!(list.to_string(), "[ID!]");
        assert_eq!(non_null_list.to_string(), "[ID!]!");

        assert!(non_null_list.is_non_null());
        assert!(!list.is_non_null());
        assert_eq!(non_null_list.named_type(), "ID");
    }

    #[test]
    fn type_ref_resolution() {
        let ctx = ASTContext::new();
        let mut schema = Schema::default_in(&ctx.arena);
        schema.add_builtin_definitions(&ctx);

        let known = TypeRef::NonNullType(ctx.alloc(TypeRef::Type("Int")));
        assert_eq!(known.of_type(&schema).map(|x| x.name()), Some("Int"));
        assert_eq!(TypeRef::Type("Missing").of_type(&schema), None);
    }

    #[test]
    fn builtin_definitions() {
        let ctx = ASTContext::new();
        let mut schema = Schema::default_in(&ctx.arena);
        assert!(schema.is_empty());
        schema.add_builtin_definitions(&ctx);

        for name in BUILTIN_SCALARS {
            assert!(matches!(schema.get_type(name), Some(SchemaType::Scalar(_))));
        }

        let skip = schema.get_directive("skip").unwrap();
        assert_eq!(skip.arguments.len(), 1);
        assert_eq!(skip.arguments[0].input_type.to_string(), "Boolean!");
        assert!(skip.has_location(DirectiveLocation::InlineFragment));
        assert!(!skip.has_location(DirectiveLocation::Query));

        let deprecated = schema.get_directive("deprecated").unwrap();
        let reason = deprecated.get_argument("reason").unwrap();
        assert!(reason.has_default());
        assert!(!reason.input_type.is_non_null());

        assert!(schema.get_directive("specifiedBy").is_some());
    }

    #[test]
    fn builtin_definitions_do_not_replace_declared_ones() {
        let ctx = ASTContext::new();
        let mut schema = Schema::default_in(&ctx.arena);
        let mut skip = SchemaDirective::new(&ctx, "skip");
        skip.add_location(DirectiveLocation::Field);
        schema.add_directive(ctx.alloc(skip));
        schema.add_builtin_definitions(&ctx);

        let skip = schema.get_directive("skip").unwrap();
        assert!(skip.arguments.is_empty());
        assert_eq!(skip.locations.as_slice(), [DirectiveLocation::Field]);
    }

    #[test]
    fn field_arguments_keep_declaration_order() {
        let ctx = ASTContext::new();
        let string = ctx.alloc(TypeRef::Type("String"));
        let mut field = SchemaField::new(&ctx, "search", string);
        for name in ["term", "after", "first"] {
            field.add_argument(SchemaInputField::new(name, string));
        }

        let names: std::vec::Vec<_> = field.arguments.iter().map(|arg| arg.name).collect();
        assert_eq!(names, ["term", "after", "first"]);
        assert_eq!(field.get_argument("after").map(|arg| arg.name), Some("after"));
        assert!(field.get_argument("last").is_none());
    }

    #[test]
    fn directive_location_names() {
        assert_eq!(
            DirectiveLocation::from_name("INLINE_FRAGMENT"),
            Some(DirectiveLocation::InlineFragment)
        );
        assert_eq!(DirectiveLocation::from_name("inline_fragment"), None);
        assert_eq!(DirectiveLocation::FragmentSpread.to_string(), "FRAGMENT_SPREAD");
        assert_eq!(
            DirectiveLocation::from(OperationKind::Mutation),
            DirectiveLocation::Mutation
        );
    }
}
