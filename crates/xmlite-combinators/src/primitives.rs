//! Atomic recognizers over single characters and literal strings.

use crate::combinators::{one_or_more, pred, zero_or_more};
use crate::input::Input;
use crate::parser::{ParseResult, Parser};
use crate::{ErrorKind, Failure};

/// Match `expected` as a prefix of the input.
///
/// Reports `UnexpectedEndOfInput` when the input runs out part-way through
/// the literal, and `LiteralMismatch` otherwise.
pub fn match_literal<'a>(expected: &'static str) -> impl Parser<'a, ()> {
    move |input: Input<'a>| {
        let rest = input.rest();
        if rest.starts_with(expected) {
            Ok((input.advance(expected.len()), ()))
        } else if expected.starts_with(rest) {
            Err(Failure::at(ErrorKind::UnexpectedEndOfInput, input))
        } else {
            Err(Failure::at(
                ErrorKind::LiteralMismatch {
                    expected: expected.to_string(),
                },
                input,
            ))
        }
    }
}

/// Match exactly one `expected` character.
pub fn match_char<'a>(expected: char) -> impl Parser<'a, char> {
    move |input: Input<'a>| match input.rest().chars().next() {
        Some(ch) if ch == expected => Ok((input.advance(ch.len_utf8()), ch)),
        Some(_) => Err(Failure::at(
            ErrorKind::LiteralMismatch {
                expected: expected.to_string(),
            },
            input,
        )),
        None => Err(Failure::at(ErrorKind::UnexpectedEndOfInput, input)),
    }
}

/// Consume any single character. Fails only at end of input.
pub fn any_char(input: Input<'_>) -> ParseResult<'_, char> {
    match input.rest().chars().next() {
        Some(ch) => Ok((input.advance(ch.len_utf8()), ch)),
        None => Err(Failure::at(ErrorKind::UnexpectedEndOfInput, input)),
    }
}

/// Succeed without consuming anything, but only on an empty view.
pub fn end_of_input(input: Input<'_>) -> ParseResult<'_, ()> {
    if input.is_empty() {
        Ok((input, ()))
    } else {
        Err(Failure::at(ErrorKind::ExpectedEndOfInput, input))
    }
}

/// One whitespace character.
pub fn whitespace_char(input: Input<'_>) -> ParseResult<'_, char> {
    pred(any_char, |c: &char| c.is_whitespace()).parse(input)
}

/// Zero or more whitespace characters.
pub fn whitespace0(input: Input<'_>) -> ParseResult<'_, Vec<char>> {
    zero_or_more(whitespace_char).parse(input)
}

/// One or more whitespace characters.
pub fn whitespace1(input: Input<'_>) -> ParseResult<'_, Vec<char>> {
    one_or_more(whitespace_char).parse(input)
}
