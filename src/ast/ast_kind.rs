use std::fmt;

macro_rules! ast_kinds {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)+) => {
        /// Identifies the kind of an AST node.
        ///
        /// Parsers return it to name the node that failed to parse, and validation errors carry
        /// it to name the node they were reported on. It prints as a human readable name.
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        #[cfg_attr(feature = "json", derive(serde::Serialize))]
        pub enum ASTKind {
            $($(#[$doc])* $variant,)+
        }

        impl ASTKind {
            /// Returns the human readable name of this kind, e.g. `"Fragment Spread"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ASTKind::$variant => $name,)+
                }
            }
        }
    };
}

ast_kinds! {
    /// See: [crate::ast::Definition]
    Definition => "Definition",
    /// See: [crate::ast::Document]
    Document => "Document",
    /// See: [crate::ast::OperationDefinition]
    OperationDefinition => "Operation Definition",
    /// See: [crate::ast::OperationKind]
    OperationKind => "Operation Kind",
    /// See: [crate::ast::FragmentDefinition]
    FragmentDefinition => "Fragment Definition",
    /// See: [crate::ast::VariableDefinitions]
    VariableDefinitions => "Variable Definitions",
    /// See: [crate::ast::VariableDefinition]
    VariableDefinition => "Variable Definition",
    /// See: [crate::ast::Type]
    Type => "Type",
    /// See: [crate::ast::NamedType]
    NamedType => "Type Name",
    ListType => "List Type",
    NonNullType => "Non-null Type",
    /// See: [crate::ast::Field]
    Field => "Field",
    /// See: [crate::ast::FragmentSpread]
    FragmentSpread => "Fragment Spread",
    /// See: [crate::ast::InlineFragment]
    InlineFragment => "Inline Fragment",
    /// See: [crate::ast::SelectionSet]
    SelectionSet => "Selection Set",
    /// See: [crate::ast::Selection]
    Selection => "Selection",
    /// See: [crate::ast::Directives]
    Directives => "Directives",
    /// See: [crate::ast::Directive]
    Directive => "Directive",
    /// See: [crate::ast::Arguments]
    Arguments => "Arguments",
    /// See: [crate::ast::Argument]
    Argument => "Argument",
    /// See: [crate::ast::ObjectValue]
    Object => "Object",
    /// See: [crate::ast::ObjectField]
    ObjectField => "Object Field",
    /// See: [crate::ast::Value]
    Value => "Value",
    /// See: [crate::ast::Variable]
    Variable => "Variable",
    String => "String",
    Float => "Float",
    Int => "Integer",
    Boolean => "Boolean",
    Enum => "Enum",
    List => "List",
}

impl fmt::Display for ASTKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
