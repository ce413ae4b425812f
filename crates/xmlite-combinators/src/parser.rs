use crate::input::Input;
use crate::Failure;

/// Outcome of running a parser: the remaining view and the produced value,
/// or a failure that consumed nothing.
pub type ParseResult<'a, Output> = Result<(Input<'a>, Output), Failure>;

/// Anything that can turn an input view into a [`ParseResult`].
///
/// Implemented for every `Fn(Input) -> ParseResult` so plain functions and
/// closures compose directly. Types that carry their own state (such as a
/// recursion budget) implement it by hand.
pub trait Parser<'a, Output> {
    fn parse(&self, input: Input<'a>) -> ParseResult<'a, Output>;
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(Input<'a>) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: Input<'a>) -> ParseResult<'a, Output> {
        self(input)
    }
}
