//! Higher-order functions that build new parsers out of existing ones.
//!
//! Each combinator takes its parsers by value and returns an opaque
//! `impl Parser`. Failures pass through unchanged except where noted:
//! [`either`] retries with its second branch, and the repetition
//! combinators turn a failed attempt into the end of the sequence.
//! Fatal failures (see [`ErrorKind::is_fatal`]) are never absorbed.

use crate::input::Input;
use crate::parser::{ParseResult, Parser};
use crate::{ErrorKind, Failure};

/// Run `parser1`, then `parser2` on what is left. Yields both values.
pub fn pair<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, (R1, R2)>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    move |input: Input<'a>| -> ParseResult<'a, (R1, R2)> {
        let (next, result1) = parser1.parse(input)?;
        let (last, result2) = parser2.parse(next)?;
        Ok((last, (result1, result2)))
    }
}

/// Transform a successful value; the remaining input passes through.
pub fn map<'a, P, F, A, B>(parser: P, map_fn: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: Fn(A) -> B,
{
    move |input: Input<'a>| -> ParseResult<'a, B> {
        parser
            .parse(input)
            .map(|(next, result)| (next, map_fn(result)))
    }
}

/// Like [`pair`], keeping only the first value.
pub fn left<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, R1>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    map(pair(parser1, parser2), |(left, _right)| left)
}

/// Like [`pair`], keeping only the second value.
pub fn right<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, R2>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    map(pair(parser1, parser2), |(_left, right)| right)
}

/// Gate a parser's value behind a predicate.
///
/// A rejected value becomes a `PredicateMismatch` located where `parser`
/// started, as if nothing had been consumed.
pub fn pred<'a, P, A, F>(parser: P, predicate: F) -> impl Parser<'a, A>
where
    P: Parser<'a, A>,
    F: Fn(&A) -> bool,
{
    move |input: Input<'a>| -> ParseResult<'a, A> {
        let (next, value) = parser.parse(input)?;
        if predicate(&value) {
            Ok((next, value))
        } else {
            Err(Failure::at(ErrorKind::PredicateMismatch, input))
        }
    }
}

/// Ordered choice. Tries `parser1`; if it fails, runs `parser2` on the
/// original input. When both fail the second failure is returned.
pub fn either<'a, P1, P2, A>(parser1: P1, parser2: P2) -> impl Parser<'a, A>
where
    P1: Parser<'a, A>,
    P2: Parser<'a, A>,
{
    move |input: Input<'a>| -> ParseResult<'a, A> {
        match parser1.parse(input) {
            Err(failure) if !failure.is_fatal() => parser2.parse(input),
            result => result,
        }
    }
}

/// Monadic bind: the value from `parser` picks the parser that runs next.
pub fn and_then<'a, P, F, NextP, A, B>(parser: P, f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    NextP: Parser<'a, B>,
    F: Fn(A) -> NextP,
{
    move |input: Input<'a>| -> ParseResult<'a, B> {
        let (next, value) = parser.parse(input)?;
        f(value).parse(next)
    }
}

/// Apply `parser` until it fails, collecting every value. Never fails
/// unless `parser` reports a fatal failure.
pub fn zero_or_more<'a, P, A>(parser: P) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
{
    move |input: Input<'a>| -> ParseResult<'a, Vec<A>> { repeat(&parser, input) }
}

/// Like [`zero_or_more`], but an empty sequence is a `NoAlternativeMatched`
/// failure.
pub fn one_or_more<'a, P, A>(parser: P) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
{
    move |input: Input<'a>| -> ParseResult<'a, Vec<A>> {
        let (next, items) = repeat(&parser, input)?;
        if items.is_empty() {
            return Err(Failure::at(ErrorKind::NoAlternativeMatched, input));
        }
        Ok((next, items))
    }
}

fn repeat<'a, P, A>(parser: &P, mut input: Input<'a>) -> ParseResult<'a, Vec<A>>
where
    P: Parser<'a, A>,
{
    let mut items = Vec::new();

    loop {
        match parser.parse(input) {
            Ok((next, item)) => {
                let progressed = next.offset() != input.offset();
                items.push(item);
                input = next;
                // A zero-width match would repeat forever
                if !progressed {
                    break;
                }
            }
            Err(failure) if failure.is_fatal() => return Err(failure),
            Err(_) => break,
        }
    }

    Ok((input, items))
}
