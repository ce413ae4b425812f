//! xmlite Parser
//!
//! Parses xmlite markup, a small XML-like language of named elements with
//! quoted attributes, into an [`Element`] tree. The grammar is written
//! entirely with the combinators from `xmlite-combinators`; the element
//! rules are mutually recursive through [`grammar::ElementParser`].
//!
//! # Example
//!
//! ```
//! use xmlite_parser::Parser;
//!
//! let root = Parser::parse("<a x=\"1\"><b/></a>").unwrap();
//! assert_eq!(root.name(), "a");
//! assert_eq!(root.attribute("x"), Some("1"));
//! assert_eq!(root.children()[0].name(), "b");
//! ```
//!
//! The element rule can also run on its own, leaving any trailing input:
//!
//! ```
//! use xmlite_parser::{ElementParser, Input, ParserExt};
//!
//! let (rest, root) = ElementParser::with_max_depth(8)
//!     .parse(Input::new("<a/><b/>"))
//!     .unwrap();
//! assert_eq!(root.name(), "a");
//! assert_eq!(rest.rest(), "<b/>");
//! ```

pub mod element;
pub mod grammar;
pub mod parser;

pub use element::{Attributes, Element};
pub use grammar::{parse_element, ElementParser};
pub use parser::Parser;
pub use xmlite_combinators::{ErrorKind, Failure, Input, ParseResult, Position};

/// The combinator parsing trait, renamed so it does not clash with the
/// document [`Parser`]. Import it to call [`ElementParser`] directly.
pub use xmlite_combinators::Parser as ParserExt;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Locate a grammar failure within `source`.
    pub fn from_failure(source: &str, failure: Failure) -> Self {
        let Position { line, column } = Position::locate(source, failure.offset);
        Self {
            kind: failure.kind,
            offset: failure.offset,
            line,
            column,
        }
    }
}
