//! Grammar rules for xmlite markup.
//!
//! ```text
//! element        := single_element | parent_element
//! single_element := element_start "/>"
//! parent_element := element_start ">" element* close_element
//! element_start  := "<" identifier attributes
//! attributes     := (ws* identifier "=" quoted_string ws*)*
//! close_element  := "</" identifier ">"      (name must match the opening tag)
//! identifier     := [A-Za-z] [A-Za-z0-9-]*
//! quoted_string  := '"' [^"]* '"'
//! ```
//!
//! Every rule is a plain function built from combinators, except the
//! recursive element rule, which lives in [`ElementParser`] so it can carry
//! an optional nesting limit down the tree.

use xmlite_combinators::{
    and_then, any_char, either, left, map, match_char, match_literal, pair, pred, right,
    whitespace0, zero_or_more, ErrorKind, Failure, Input, ParseResult, Parser,
};

use crate::element::{Attributes, Element};

// =============================================================================
// Lexical rules
// =============================================================================

/// A letter followed by letters, digits or hyphens. Takes the longest match.
pub fn identifier(input: Input<'_>) -> ParseResult<'_, String> {
    map(
        pair(
            pred(any_char, |c: &char| c.is_ascii_alphabetic()),
            zero_or_more(pred(any_char, |c: &char| {
                c.is_ascii_alphanumeric() || *c == '-'
            })),
        ),
        |(first, rest): (char, Vec<char>)| {
            std::iter::once(first).chain(rest).collect::<String>()
        },
    )
    .parse(input)
}

/// Double-quoted text. There is no escape for an embedded `"`.
pub fn quoted_string(input: Input<'_>) -> ParseResult<'_, String> {
    map(
        right(
            match_char('"'),
            left(
                zero_or_more(pred(any_char, |c: &char| *c != '"')),
                match_char('"'),
            ),
        ),
        |chars: Vec<char>| chars.into_iter().collect::<String>(),
    )
    .parse(input)
}

/// `name="value"`
pub fn attribute_pair(input: Input<'_>) -> ParseResult<'_, (String, String)> {
    pair(identifier, right(match_char('='), quoted_string)).parse(input)
}

/// Any number of whitespace-separated attribute pairs.
pub fn attributes(input: Input<'_>) -> ParseResult<'_, Attributes> {
    map(
        zero_or_more(right(whitespace0, left(attribute_pair, whitespace0))),
        |pairs: Vec<(String, String)>| pairs.into_iter().collect::<Attributes>(),
    )
    .parse(input)
}

// =============================================================================
// Tags
// =============================================================================

/// `<name attrs`, shared by self-closing and opening tags.
pub fn element_start(input: Input<'_>) -> ParseResult<'_, (String, Attributes)> {
    right(match_char('<'), pair(identifier, attributes)).parse(input)
}

/// `<name attrs/>`
pub fn single_element(input: Input<'_>) -> ParseResult<'_, Element> {
    map(
        left(element_start, match_literal("/>")),
        |(name, attributes): (String, Attributes)| Element::new(name).with_attributes(attributes),
    )
    .parse(input)
}

/// `<name attrs>`: an element whose children are still to come.
pub fn open_element(input: Input<'_>) -> ParseResult<'_, Element> {
    map(
        left(element_start, match_literal(">")),
        |(name, attributes): (String, Attributes)| Element::new(name).with_attributes(attributes),
    )
    .parse(input)
}

/// `</name>` where `name` must equal `expected`.
pub fn close_element<'a>(expected: String) -> impl Parser<'a, String> {
    let tag = right(match_literal("</"), left(identifier, match_char('>')));

    move |input: Input<'a>| -> ParseResult<'a, String> {
        let (next, found) = tag.parse(input)?;
        if found == expected {
            Ok((next, found))
        } else {
            Err(Failure::at(
                ErrorKind::TagMismatch {
                    expected: expected.clone(),
                    found,
                },
                input,
            ))
        }
    }
}

// =============================================================================
// Elements
// =============================================================================

/// Parse one element: self-closing or parent.
pub fn parse_element(input: Input<'_>) -> ParseResult<'_, Element> {
    ElementParser::new().parse(input)
}

/// The recursive element rule.
///
/// Each level hands a copy of itself, one level deeper, to the children it
/// parses. Without a limit the recursion is bounded only by the call stack,
/// so a few thousand levels of nesting can overflow it and abort the
/// process; use [`ElementParser::with_max_depth`] for untrusted input. With a
/// limit, an element below `max_depth` fails with the fatal
/// `NestingTooDeep`, which no enclosing choice or repetition absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementParser {
    max_depth: Option<usize>,
    depth: usize,
    nested_errors: bool,
}

impl Default for ElementParser {
    fn default() -> Self {
        Self {
            max_depth: None,
            depth: 1,
            nested_errors: false,
        }
    }
}

impl ElementParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most `max_depth` levels of elements; the root is level 1.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// When a parent's closing tag is missing because a child failed further
    /// into the input, report the child's failure instead.
    ///
    /// Only the reported failure changes; what parses is the same. A
    /// mismatched closing tag is always reported as such.
    pub fn with_nested_errors(self) -> Self {
        Self {
            nested_errors: true,
            ..self
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    fn nested(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn depth_guard<'a>(self, input: Input<'a>) -> ParseResult<'a, ()> {
        match self.max_depth {
            Some(limit) if self.depth > limit => {
                Err(Failure::at(ErrorKind::NestingTooDeep { limit }, input))
            }
            _ => Ok((input, ())),
        }
    }

    /// `<name attrs>` children `</name>`, with the closing tag chosen by
    /// the name just opened.
    fn parent_element<'a>(self, input: Input<'a>) -> ParseResult<'a, Element> {
        and_then(
            left(open_element, move |input: Input<'a>| self.depth_guard(input)),
            move |shell: Element| {
                let name = shell.name().to_string();
                map(
                    self.children_then_close(name),
                    move |nodes: Vec<Element>| {
                        tracing::trace!(
                            name = shell.name(),
                            children = nodes.len(),
                            depth = self.depth,
                            "closed parent element"
                        );
                        shell.clone().with_children(nodes)
                    },
                )
            },
        )
        .parse(input)
    }

    fn children_then_close<'a>(self, name: String) -> impl Parser<'a, Vec<Element>> {
        let children = self.nested();
        let close = close_element(name);

        move |input: Input<'a>| -> ParseResult<'a, Vec<Element>> {
            if !self.nested_errors {
                return left(zero_or_more(children), |input: Input<'a>| close.parse(input))
                    .parse(input);
            }

            let mut rest = input;
            let mut nodes = Vec::new();
            let stopped = loop {
                match children.parse(rest) {
                    Ok((next, node)) => {
                        nodes.push(node);
                        rest = next;
                    }
                    Err(failure) if failure.is_fatal() => return Err(failure),
                    Err(failure) => break failure,
                }
            };

            match close.parse(rest) {
                Ok((next, _)) => Ok((next, nodes)),
                Err(failure) => Err(deeper_failure(stopped, failure)),
            }
        }
    }
}

/// Pick between the failure that ended a parent's children and the failure
/// of its closing tag.
fn deeper_failure(child: Failure, close: Failure) -> Failure {
    let mismatch = matches!(close.kind, ErrorKind::TagMismatch { .. });
    if !mismatch && child.offset > close.offset {
        child
    } else {
        close
    }
}

impl<'a> Parser<'a, Element> for ElementParser {
    fn parse(&self, input: Input<'a>) -> ParseResult<'a, Element> {
        let this = *self;
        either(
            left(single_element, move |input: Input<'a>| this.depth_guard(input)),
            move |input: Input<'a>| this.parent_element(input),
        )
        .parse(input)
    }
}
