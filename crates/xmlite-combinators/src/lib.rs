//! xmlite Combinators
//!
//! Small composable parsers over an immutable [`Input`] view.
//! Primitive matchers recognize single characters and literals; combinators
//! build larger parsers out of smaller ones (sequencing, mapping, repetition,
//! predicate guards, ordered choice and dependent binding).
//!
//! Every parser returns a [`ParseResult`]: either the remaining view plus a
//! value, or a [`Failure`]. Failures never consume input, so ordered choice
//! and repetition retry from the view they started with.
//!
//! # Example
//!
//! ```
//! use xmlite_combinators::{match_literal, right, whitespace0, Input, Parser};
//!
//! let greeting = right(whitespace0, match_literal("hello"));
//! let (rest, ()) = greeting.parse(Input::new("  hello!")).unwrap();
//! assert_eq!(rest.rest(), "!");
//! ```

pub mod combinators;
pub mod input;
pub mod parser;
pub mod primitives;

pub use combinators::{and_then, either, left, map, one_or_more, pair, pred, right, zero_or_more};
pub use input::{Input, Position};
pub use parser::{ParseResult, Parser};
pub use primitives::{
    any_char, end_of_input, match_char, match_literal, whitespace0, whitespace1, whitespace_char,
};

/// Why a parser rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("expected `{expected}`")]
    LiteralMismatch { expected: String },

    #[error("parsed value rejected by predicate")]
    PredicateMismatch,

    #[error("no alternative matched")]
    NoAlternativeMatched,

    #[error("closing tag `{found}` does not match opening tag `{expected}`")]
    TagMismatch { expected: String, found: String },

    #[error("expected end of input")]
    ExpectedEndOfInput,

    #[error("elements nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ErrorKind {
    /// Fatal failures abort the whole parse: ordered choice and repetition
    /// pass them through instead of trying the next alternative.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::NestingTooDeep { .. })
    }
}

/// A parser failure, tagged with the byte offset where the failing parser
/// was invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at byte {offset})")]
pub struct Failure {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl Failure {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// A failure located at the start of `input`.
    pub fn at(kind: ErrorKind, input: Input<'_>) -> Self {
        Self::new(kind, input.offset())
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}
