//! Error types for JSON parsing and source loading.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::source::{Location, DEFAULT_TAB_SIZE};

/// Result type for parsing operations. The lifetime ties the error to the
/// [`Source`](crate::Source) it points into.
pub type Result<'s, T> = std::result::Result<T, ParseError<'s>>;

/// A syntax error at a specific location.
///
/// There is one error kind; the message text distinguishes causes. The full
/// `file:line:column: message` rendering is computed once, at construction,
/// so holding or printing the error never touches the source again.
#[derive(Error, Debug)]
#[error("{rendered}")]
pub struct ParseError<'s> {
    location: Location<'s>,
    message: String,
    rendered: String,
}

impl<'s> ParseError<'s> {
    pub fn new(location: Location<'s>, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut rendered = String::new();
        location.append_to_string(&mut rendered, DEFAULT_TAB_SIZE);
        rendered.push_str(": ");
        rendered.push_str(&message);
        Self {
            location,
            message,
            rendered,
        }
    }

    /// Where the first violation was found.
    pub fn location(&self) -> Location<'s> {
        self.location
    }

    /// The cause text, without the location prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An I/O failure while loading a source from a file or standard input.
#[derive(Error, Debug)]
#[error("{path}: {source}")]
pub struct LoadError {
    path: String,
    source: io::Error,
}

impl LoadError {
    pub(crate) fn new(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// The path (or `<stdin>`) that failed to load.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_rendering_is_baked_at_construction() {
        let source = Source::from_string("conf.json", "{\n  bad\n}".to_string());
        let err = ParseError::new(Location::new(&source, 4), "invalid literal 'bad'");
        assert_eq!(err.to_string(), "conf.json:2:3: invalid literal 'bad'");
        assert_eq!(err.message(), "invalid literal 'bad'");
        assert_eq!(err.location().char_index, 4);
    }

    #[test]
    fn test_unknown_location() {
        let err = ParseError::new(Location::default(), "premature end of input");
        assert_eq!(err.to_string(), "<unknown>:1:1: premature end of input");
    }
}
