/// An immutable view over the unconsumed tail of a source buffer.
///
/// Parsers never mutate a view; they return a new one that starts further
/// along the same buffer. Views are `Copy`, so a failed attempt leaves the
/// caller's view untouched and ordered choice can retry from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Input<'a> {
    /// Create a view over the whole of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// The unconsumed text.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// The full original buffer.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of this view into the original buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// A new view `bytes` further along. `bytes` must land on a char boundary
    /// within the remaining text.
    pub fn advance(&self, bytes: usize) -> Self {
        debug_assert!(self.rest().is_char_boundary(bytes));
        Self {
            source: self.source,
            offset: self.offset + bytes,
        }
    }

    /// Line and column of this view's offset.
    pub fn position(&self) -> Position {
        Position::locate(self.source, self.offset)
    }
}

/// A 1-based line/column pair, with columns counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Resolve a byte offset in `source` to a line and column.
    /// Offsets past the end clamp to the end of the buffer.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (idx, ch) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_covers_whole_source() {
        let input = Input::new("<a/>");
        assert_eq!(input.rest(), "<a/>");
        assert_eq!(input.offset(), 0);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_advance_leaves_original_untouched() {
        let input = Input::new("abc");
        let next = input.advance(2);
        assert_eq!(next.rest(), "c");
        assert_eq!(next.offset(), 2);
        assert_eq!(input.rest(), "abc");
        assert_eq!(next.source(), "abc");
    }

    #[test]
    fn test_empty_view() {
        assert!(Input::new("").is_empty());
        assert!(Input::new("a").advance(1).is_empty());
    }

    #[test]
    fn test_position_first_line() {
        let pos = Input::new("<a x>").advance(3).position();
        assert_eq!(pos, Position { line: 1, column: 4 });
    }

    #[test]
    fn test_position_after_newlines() {
        let source = "<a>\n  <b/>\n</a>";
        let pos = Position::locate(source, 6);
        assert_eq!(pos, Position { line: 2, column: 3 });
    }

    #[test]
    fn test_position_counts_chars_not_bytes() {
        let source = "éé<";
        let pos = Position::locate(source, "éé".len());
        assert_eq!(pos, Position { line: 1, column: 3 });
    }
}
