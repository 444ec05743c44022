use bumpalo::{collections::Vec, Bump};

use super::error::ValidationError;
use crate::ast::{ASTContext, ASTKind};
use crate::error::{Error, Result};
use crate::schema::{Schema, TypeInfo, TypeRef};
use crate::visit::VisitInfo;

/// The context shared by all validation rules during one validation run.
///
/// It carries the schema the document is validated against, the [TypeInfo] that the traversal
/// keeps in sync with the current node, and the list of errors reported so far. A context is
/// created for a single document and consumed once validation is done.
pub struct ValidationContext<'a> {
    pub arena: &'a Bump,
    schema: &'a Schema<'a>,
    type_info: TypeInfo<'a>,
    errors: Vec<'a, ValidationError>,
    max_errors: Option<usize>,
    aborted: bool,
}

impl<'a> ValidationContext<'a> {
    /// Create a new `ValidationContext` for a document allocated in the given AST Context.
    pub fn new(ctx: &'a ASTContext, schema: &'a Schema<'a>) -> Self {
        ValidationContext {
            arena: &ctx.arena,
            schema,
            type_info: TypeInfo::new(&ctx.arena, schema),
            errors: Vec::new_in(&ctx.arena),
            max_errors: None,
            aborted: false,
        }
    }

    /// Stop validation once this many errors were reported.
    #[inline]
    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    #[inline]
    pub fn schema(&self) -> &'a Schema<'a> {
        self.schema
    }

    /// The schema definitions that apply to the node that's currently visited.
    #[inline]
    pub fn type_info(&self) -> &TypeInfo<'a> {
        &self.type_info
    }

    #[inline]
    pub(crate) fn type_info_mut(&mut self) -> &mut TypeInfo<'a> {
        &mut self.type_info
    }

    /// Add an error to the list of errors in the `ValidationContext`.
    ///
    /// This is called inside of validation rules for the node they're currently visiting, which
    /// is identified by its `kind` and the path in `info`. Errors are never merged, so a rule
    /// reporting the same problem twice produces two errors. Once the error limit is reached
    /// further errors are dropped and the traversal is stopped.
    pub fn report_error<S: Into<String>>(
        &mut self,
        code: &'static str,
        message: S,
        kind: ASTKind,
        info: &VisitInfo,
    ) {
        if self.aborted {
            return;
        }

        let error = ValidationError::new(code, message, kind, info.path.clone());
        tracing::trace!(code, path = %error.path, message = %error.message, "validation error");
        self.errors.push(error);

        if self.max_errors.is_some_and(|max| self.errors.len() >= max) {
            tracing::warn!(
                errors = self.errors.len(),
                "too many validation errors, aborting validation"
            );
            self.aborted = true;
        }
    }

    /// Prints a type reference like it's written in GraphQL, for instance `[ID!]!`.
    #[inline]
    pub fn print_type(&self, type_ref: &TypeRef<'_>) -> String {
        type_ref.to_string()
    }

    /// The errors reported so far, in the order they were reported in.
    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether validation was stopped early because the error limit was reached.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Moves the reported errors out of the arena.
    #[inline]
    pub fn into_errors(self) -> std::vec::Vec<ValidationError> {
        self.errors.into_iter().collect()
    }

    /// Convert the context into a result which carries an error if validation has failed on the
    /// current document.
    ///
    /// All reported errors are listed in the error's context, one per line.
    pub fn to_result(self) -> Result<()> {
        errors_to_result(&self.errors)
    }
}

pub(super) fn errors_to_result(errors: &[ValidationError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    Err(Error::listing(
        "Document failed validation",
        errors.iter().map(|error| &error.message),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParseSdl, SchemaFields};
    use crate::visit::Path;

    fn info(path: &str) -> VisitInfo {
        VisitInfo {
            path: Path::try_from(path).unwrap(),
        }
    }

    #[test]
    fn collects_errors_in_order() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let mut validation = ValidationContext::new(&ctx, schema);

        validation.report_error("5.2.1", "first", ASTKind::Field, &info("0.selectionSet.0"));
        validation.report_error("5.2.1", "first", ASTKind::Field, &info("0.selectionSet.0"));
        validation.report_error("5.6.1", "second", ASTKind::Directive, &info("0.directives.0"));

        let errors = validation.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], errors[1]);
        assert_eq!(errors[2].code, "5.6.1");
        assert_eq!(errors[2].path.to_string(), "0.directives.0");
        assert!(!validation.is_aborted());
    }

    #[test]
    fn stops_at_max_errors() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        let mut validation = ValidationContext::new(&ctx, schema).with_max_errors(Some(2));

        for _ in 0..3 {
            validation.report_error("5.2.1", "error", ASTKind::Field, &info("0"));
        }
        assert!(validation.is_aborted());
        assert_eq!(validation.into_errors().len(), 2);
    }

    #[test]
    fn print_type() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a(ids: [[ID!]]!): Int }").unwrap();
        let validation = ValidationContext::new(&ctx, schema);
        let field = schema.query_type().unwrap().get_field("a").unwrap();
        assert_eq!(validation.print_type(field.arguments[0].input_type), "[[ID!]]!");
    }

    #[test]
    fn to_result() {
        let ctx = ASTContext::new();
        let schema = Schema::parse(&ctx, "type Query { a: Int }").unwrap();
        assert!(ValidationContext::new(&ctx, schema).to_result().is_ok());

        let mut validation = ValidationContext::new(&ctx, schema);
        validation.report_error("5.2.1", "one", ASTKind::Field, &info("0"));
        validation.report_error("5.2.1", "two", ASTKind::Field, &info("1"));
        let error = validation.to_result().unwrap_err();
        assert_eq!(error.message(), "Document failed validation");
        assert_eq!(error.print(true), "GraphQL Error: Document failed validation\n- one\n- two");
    }
}
