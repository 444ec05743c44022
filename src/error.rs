//! # Error and Result for this crate
//!
//! Parsing a document or a schema fails with a single [Error]. Validation collects
//! [`ValidationError`](crate::validate::ValidationError)s instead, which can be folded into an
//! [Error] when a caller only cares about the verdict.

use logos::Span;
use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// What produced an [Error].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// The document or schema is well-formed but not valid.
    GraphQL,
    /// The source text couldn't be parsed.
    Syntax,
}

/// A line and column in a source text. Lines start at `1`, columns at `0`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Finds the location at which a span starts.
    pub(crate) fn of_span(source: &str, span: &Span) -> Self {
        let before = &source[..span.start];
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        Location {
            line: before.matches('\n').count() + 1,
            column: span.start - line_start,
        }
    }
}

/// This crate's error structure.
///
/// An error has a message and an optional context. Syntax errors put a snippet of the source text
/// pointing at the failing span into the context, while failed validations list every error
/// message in it, one per line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

impl Error {
    /// Create an error with only a message. Errors are [`ErrorType::GraphQL`] errors by default.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Error {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Create a syntax error for the given span of a source text.
    pub(crate) fn syntax<S: Into<String>>(message: S, source: &str, span: Span) -> Self {
        Error {
            message: message.into(),
            location: Some(Location::of_span(source, &span)),
            context: Some(snippet(source, span)),
            error_type: ErrorType::Syntax,
        }
    }

    /// Create an error that lists the given messages in its context.
    pub(crate) fn listing<S, I>(message: S, messages: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let context = messages
            .into_iter()
            .map(|message| format!("- {message}"))
            .collect::<Vec<_>>()
            .join("\n");
        Error {
            context: Some(context),
            ..Error::new(message, None)
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the location in the source text the error was found at, if any.
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Returns the source snippet or the list of messages that belong to this error.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let prefix = match self.error_type {
            ErrorType::GraphQL => "GraphQL Error",
            ErrorType::Syntax => "Syntax Error",
        };
        match self.context {
            Some(ref context) if include_ctx => format!("{prefix}: {}\n{context}", self.message),
            _ => format!("{prefix}: {}", self.message),
        }
    }
}

/// Prints the line of a span and the line before it with line numbers, and underlines the span
/// when it doesn't cross lines.
fn snippet(source: &str, span: Span) -> String {
    let line_start = source[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
    let start = source[..line_start.saturating_sub(1)]
        .rfind('\n')
        .map_or(0, |idx| idx + 1);
    let end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |idx| idx + span.end);

    let first_line = source[..start].matches('\n').count() + 1;
    let lines: Vec<&str> = source[start..end].lines().collect();
    let width = (first_line + lines.len().saturating_sub(1)).to_string().len() + 1;
    let mut out: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{:>width$} | {line}", first_line + index))
        .collect();

    let spanned = &source[span.start..span.end];
    if !spanned.contains('\n') {
        let offset = span.start - line_start;
        let marker = format!("{}{}", " ".repeat(offset), "^".repeat(spanned.len().max(1)));
        out.push(format!("{:>width$} | {marker}", ""));
    }
    out.join("\n")
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(true))
    }
}

impl error::Error for Error {}
