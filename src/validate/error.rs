use crate::{ast::ASTKind, visit::Path};
use thiserror::Error;

/// A single diagnostic reported by a validation rule.
///
/// The `code` names the section of the GraphQL specification the rule implements, e.g.
/// `"5.3.3.2"`. The node the error was reported on is identified by its kind and by its path
/// from the document root. Displaying the error prints only its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    pub kind: ASTKind,
    pub path: Path,
}

impl ValidationError {
    #[inline]
    pub fn new<S: Into<String>>(code: &'static str, message: S, kind: ASTKind, path: Path) -> Self {
        ValidationError {
            code,
            message: message.into(),
            kind,
            path,
        }
    }
}

/// Serializes as an entry of a GraphQL response's `errors` list.
///
/// ```json
/// { "message": "...", "path": "0.selectionSet.0", "extensions": { "code": "5.3.3.2", "kind": "Field" } }
/// ```
#[cfg(feature = "json")]
impl serde::Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        #[derive(serde::Serialize)]
        struct Extensions {
            code: &'static str,
            kind: ASTKind,
        }

        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field(
            "extensions",
            &Extensions {
                code: self.code,
                kind: self.kind,
            },
        )?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_the_message() {
        let error = ValidationError::new(
            "5.3.3.2",
            r#"Field "user" argument "id" of type "ID!" is required but not provided."#,
            ASTKind::Field,
            Path::try_from("0.selectionSet.0").unwrap(),
        );
        assert_eq!(
            error.to_string(),
            r#"Field "user" argument "id" of type "ID!" is required but not provided."#
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn serializes_as_graphql_error() {
        let error = ValidationError::new(
            "5.6.1",
            r#"Unknown directive "@hidden"."#,
            ASTKind::Directive,
            Path::try_from("0.selectionSet.0.directives.0").unwrap(),
        );
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "message": "Unknown directive \"@hidden\".",
                "path": "0.selectionSet.0.directives.0",
                "extensions": { "code": "5.6.1", "kind": "Directive" }
            })
        );
    }
}
