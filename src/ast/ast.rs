pub use super::default_in::DefaultIn;

/// A context for a GraphQL document which holds an arena allocator.
///
/// Parsing a document, building a schema, and validating one against the other all allocate into
/// this arena, so their results share its lifetime and are freed together once the context is
/// dropped. A context is meant to live for one unit of work, like a single incoming request,
/// rather than being reused across many of them.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with an empty arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Copy a `&str` slice of an unknown lifetime onto the arena.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Move a `String` onto the arena, tying it to this context without copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares nodes that wrap an arena vector of child nodes, like [`Arguments`] or
/// [`SelectionSet`]. Each of them can be created empty with [`DefaultIn`].
macro_rules! list_nodes {
    ($($(#[$doc:meta])* $node:ident { $field:ident: $child:ident })+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, PartialEq, Clone)]
            pub struct $node<'a> {
                pub $field: bumpalo::collections::Vec<'a, $child<'a>>,
            }

            impl<'a> $node<'a> {
                #[inline]
                pub fn is_empty(&self) -> bool {
                    self.$field.is_empty()
                }

                #[inline]
                pub fn len(&self) -> usize {
                    self.$field.len()
                }

                #[inline]
                pub fn iter(&self) -> std::slice::Iter<'_, $child<'a>> {
                    self.$field.iter()
                }
            }

            impl<'a> DefaultIn<'a> for $node<'a> {
                #[inline]
                fn default_in(arena: &'a bumpalo::Bump) -> Self {
                    $node {
                        $field: bumpalo::collections::Vec::new_in(arena),
                    }
                }
            }
        )+
    };
}

/// `true` or `false`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Boolean-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BooleanValue {
    pub value: bool,
}

/// A variable used as a value, written as `$name`. The `name` doesn't include the `$`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Variables)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Variable<'a> {
    pub name: &'a str,
}

/// [Reference](https://spec.graphql.org/October2021/#sec-Enum-Value)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EnumValue<'a> {
    pub value: &'a str,
}

/// An integer, kept as its source text.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Int)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct IntValue<'a> {
    pub value: &'a str,
}

/// A float, kept as its source text. Two floats are only equal when they're written the same way.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Float)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct FloatValue<'a> {
    pub value: &'a str,
}

/// A string or block string, with escape sequences and block indentation already resolved.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-String)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct StringValue<'a> {
    pub value: &'a str,
}

impl<'a> StringValue<'a> {
    pub fn new<S: AsRef<str>>(ctx: &'a ASTContext, str: S) -> Self {
        StringValue {
            value: ctx.alloc_str(str.as_ref()),
        }
    }
}

/// An input value, as passed to arguments or given as a default.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    Variable(Variable<'a>),
    String(StringValue<'a>),
    Float(FloatValue<'a>),
    Int(IntValue<'a>),
    Boolean(BooleanValue),
    Enum(EnumValue<'a>),
    List(ListValue<'a>),
    Object(ObjectValue<'a>),
    /// An explicit `null`, which also stands in for a missing default value.
    Null,
}

impl<'a> Value<'a> {
    /// Calls `callback` for every variable this value refers to, including those nested inside
    /// lists and objects, in source order.
    pub fn for_each_variable<F: FnMut(&Variable<'a>)>(&self, callback: &mut F) {
        match self {
            Value::Variable(variable) => callback(variable),
            Value::List(list) => list.iter().for_each(|value| value.for_each_variable(callback)),
            Value::Object(object) => object
                .iter()
                .for_each(|field| field.value.for_each_variable(callback)),
            _ => {}
        }
    }
}

/// One `name: value` entry of an [`ObjectValue`].
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// One `name: value` entry of [`Arguments`].
///
/// [Reference](https://spec.graphql.org/October2021/#Argument)
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// A directive such as `@skip(if: $hide)`. The `name` doesn't include the `@`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, PartialEq, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Arguments<'a>,
}

list_nodes! {
    /// `[value, ...]`
    ///
    /// [Reference](https://spec.graphql.org/October2021/#sec-List-Value)
    ListValue { children: Value }

    /// `{ name: value, ... }`
    ///
    /// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Values)
    ObjectValue { children: ObjectField }

    /// The arguments passed to a field or a directive, in source order. An invalid document may
    /// pass the same name twice, and nothing here removes the duplicate.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#Arguments)
    Arguments { children: Argument }

    /// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
    Directives { children: Directive }

    /// The selections made on a parent type. Leaf fields have an empty selection set.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
    SelectionSet { selections: Selection }

    /// [Reference](https://spec.graphql.org/October2021/#VariableDefinitions)
    VariableDefinitions { children: VariableDefinition }
}

impl<'a> Arguments<'a> {
    /// Looks up the value of an argument by name. With duplicates, the first one wins.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }
}

impl<'a> VariableDefinitions<'a> {
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.iter()
            .any(|definition| definition.variable.name == name)
    }
}

/// A field selection, like `alias: name(arg: 1) @directive { ... }`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
pub struct Field<'a> {
    /// [Reference](https://spec.graphql.org/October2021/#sec-Field-Alias)
    pub alias: Option<&'a str>,
    /// The name of the field on its parent type.
    pub name: &'a str,
    pub arguments: Arguments<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Field<'a> {
    /// The key this field's result is returned under.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }
}

/// `...Name`, spreading the [`FragmentDefinition`] called `Name`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentSpread<'a> {
    pub name: NamedType<'a>,
    pub directives: Directives<'a>,
}

/// `... on Type { ... }`, or `... { ... }` without a type condition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Inline-Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<NamedType<'a>>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// [Reference](https://spec.graphql.org/October2021/#Selection)
#[derive(Debug, PartialEq, Clone)]
pub enum Selection<'a> {
    Field(Field<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

impl<'a> Selection<'a> {
    #[inline]
    pub fn field(&'a self) -> Option<&'a Field<'a>> {
        match self {
            Selection::Field(field) => Some(field),
            _ => None,
        }
    }

    #[inline]
    pub fn fragment_spread(&'a self) -> Option<&'a FragmentSpread<'a>> {
        match self {
            Selection::FragmentSpread(spread) => Some(spread),
            _ => None,
        }
    }

    #[inline]
    pub fn inline_fragment(&'a self) -> Option<&'a InlineFragment<'a>> {
        match self {
            Selection::InlineFragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}

/// A bare name, used for type conditions and for fragment and operation names.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NamedType<'a> {
    pub name: &'a str,
}

/// The type of a variable, like `[ID!]!`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Type<'a> {
    NamedType(NamedType<'a>),
    ListType(&'a Type<'a>),
    NonNullType(&'a Type<'a>),
}

impl<'a> Type<'a> {
    /// Unwraps all list and non-null wrappers and returns the innermost named type.
    #[inline]
    pub fn of_type(&self) -> &NamedType<'a> {
        match self {
            Type::NamedType(of_type) => of_type,
            Type::ListType(inner) | Type::NonNullType(inner) => inner.of_type(),
        }
    }
}

/// `$name: Type = default @directive`
///
/// [Reference](https://spec.graphql.org/October2021/#VariableDefinition)
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    pub variable: Variable<'a>,
    pub of_type: Type<'a>,
    /// `Value::Null` when no default is given.
    pub default_value: Value<'a>,
    pub directives: Directives<'a>,
}

/// `fragment Name on Type { ... }`
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentDefinition<'a> {
    pub name: NamedType<'a>,
    pub type_condition: NamedType<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// The kind of an [`OperationDefinition`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// A query, mutation or subscription.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
pub struct OperationDefinition<'a> {
    pub operation: OperationKind,
    /// `None` for anonymous operations, including the `{ ... }` shorthand.
    pub name: Option<NamedType<'a>>,
    pub variable_definitions: VariableDefinitions<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// The root of a parsed query language document.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub struct Document<'a> {
    pub definitions: bumpalo::collections::Vec<'a, Definition<'a>>,
}

impl<'a> Document<'a> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over all operations of this document in source order.
    pub fn operations(&'a self) -> impl Iterator<Item = &'a OperationDefinition<'a>> {
        self.definitions.iter().filter_map(Definition::operation)
    }

    /// Iterates over all fragment definitions of this document in source order.
    pub fn fragments(&'a self) -> impl Iterator<Item = &'a FragmentDefinition<'a>> {
        self.definitions.iter().filter_map(Definition::fragment)
    }
}

/// A top-level definition of a [`Document`].
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
pub enum Definition<'a> {
    Operation(OperationDefinition<'a>),
    Fragment(FragmentDefinition<'a>),
}

impl<'a> Definition<'a> {
    #[inline]
    pub fn operation(&'a self) -> Option<&'a OperationDefinition<'a>> {
        match self {
            Definition::Operation(operation) => Some(operation),
            Definition::Fragment(_) => None,
        }
    }

    #[inline]
    pub fn fragment(&'a self) -> Option<&'a FragmentDefinition<'a>> {
        match self {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        }
    }
}
