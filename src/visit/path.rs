use crate::error::Error;
use std::fmt;

/// The location of an AST node relative to the document root.
///
/// A path is built up by the traversal in [`VisitNode`](super::VisitNode) and handed to every
/// [`Visitor`](super::Visitor) callback as part of [`VisitInfo`](super::VisitInfo). It prints as
/// a dot-separated list of segments, e.g. `0.selectionSet.1.arguments.0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    #[inline]
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this path points at the document root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl TryFrom<&str> for Path {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Path::default());
        }
        let segments = value
            .split('.')
            .map(PathSegment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single step of a [Path], either a named child of a node or an index into a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),

    Arguments,
    Directives,
    SelectionSet,
    VariableDefinitions,
}

impl PathSegment {
    fn as_name(&self) -> Option<&'static str> {
        match self {
            PathSegment::Index(_) => None,
            PathSegment::Arguments => Some("arguments"),
            PathSegment::Directives => Some("directives"),
            PathSegment::SelectionSet => Some("selectionSet"),
            PathSegment::VariableDefinitions => Some("variableDefinitions"),
        }
    }
}

impl TryFrom<&str> for PathSegment {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if let Ok(index) = value.parse::<usize>() {
            return Ok(PathSegment::Index(index));
        }
        match value {
            "arguments" => Ok(PathSegment::Arguments),
            "directives" => Ok(PathSegment::Directives),
            "selectionSet" => Ok(PathSegment::SelectionSet),
            "variableDefinitions" => Ok(PathSegment::VariableDefinitions),
            _ => Err(Error::new(format!("Invalid path segment {value}"), None)),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{index}"),
            segment => f.write_str(segment.as_name().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_print() {
        let path = Path::try_from("0.selectionSet.2.arguments.1").unwrap();
        assert_eq!(
            path.segments,
            vec![
                PathSegment::Index(0),
                PathSegment::SelectionSet,
                PathSegment::Index(2),
                PathSegment::Arguments,
                PathSegment::Index(1),
            ]
        );
        assert_eq!(path.to_string(), "0.selectionSet.2.arguments.1");
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn root_path() {
        let path = Path::try_from("").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn invalid_segment() {
        let error = Path::try_from("0.fields").unwrap_err();
        assert_eq!(error.message(), "Invalid path segment fields");
    }

    #[cfg(feature = "json")]
    #[test]
    fn serializes_as_string() {
        let path = Path::try_from("1.directives.0").unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""1.directives.0""#);
    }
}
