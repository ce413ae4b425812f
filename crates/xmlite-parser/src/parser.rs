//! Document parser for xmlite.
//!
//! Wraps the recursive element rule: one root element, optionally
//! surrounded by whitespace, and nothing else. Failures from the grammar
//! are resolved to a line and column in the source. A child that breaks
//! inside an unclosed parent is reported where it broke, not at the
//! parent's missing closing tag.

use xmlite_combinators::{end_of_input, left, pair, right, whitespace0, Input, Parser as _};

use crate::element::Element;
use crate::grammar::ElementParser;
use crate::ParseError;

/// xmlite document parser.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    element: ElementParser,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            element: ElementParser::new().with_nested_errors(),
        }
    }
}

impl Parser {
    /// A parser with no nesting limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that rejects documents nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            element: ElementParser::with_max_depth(max_depth).with_nested_errors(),
        }
    }

    /// Parse source code into its root element.
    ///
    /// Nesting is unbounded, so a deep enough document exhausts the stack
    /// and aborts. Prefer [`Parser::with_max_depth`] for untrusted input.
    pub fn parse(source: &str) -> Result<Element, ParseError> {
        Parser::new().parse_document(source)
    }

    /// Parse a full document with this parser's settings.
    pub fn parse_document(&self, source: &str) -> Result<Element, ParseError> {
        tracing::debug!(
            bytes = source.len(),
            max_depth = ?self.element.max_depth(),
            "parsing document"
        );

        let document = right(
            whitespace0,
            left(self.element, pair(whitespace0, end_of_input)),
        );

        match document.parse(Input::new(source)) {
            Ok((_, root)) => Ok(root),
            Err(failure) => {
                let error = ParseError::from_failure(source, failure);
                tracing::debug!(
                    kind = %error.kind,
                    line = error.line,
                    column = error.column,
                    "document rejected"
                );
                Err(error)
            }
        }
    }
}
