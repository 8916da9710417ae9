use crate::parser::{ParseError, ParseErrorKind, QueryParser, WordComparer};

/// Char positions of the first `SELECT ... FROM` block of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSpan {
    /// start of the SELECT keyword
    pub select_start: usize,
    /// first char of the column list, after the SELECT modifiers
    pub list_start: usize,
    /// one past the last non-whitespace char of the column list
    pub list_end: usize,
    /// start of the FROM keyword
    pub from_start: usize,
    /// parentheses depth the SELECT keyword sits at
    pub depth: usize,
}

impl SelectSpan {
    /// Finds the first SELECT keyword that owns a FROM keyword at its own depth.
    ///
    /// A SELECT whose scope closes (`)` or `;`) before any FROM is skipped, so a
    /// leading `WITH x AS (SELECT 1)` does not hide the main block. Keywords inside
    /// string literals, quoted identifiers and comments are ignored.
    pub fn locate(parser: &mut QueryParser) -> Result<SelectSpan, ParseError> {
        while !parser.eof() {
            if parser.is_code() && parser.comparers.select.compare(parser) {
                let mut probe = parser.clone();
                if let Some(span) = Self::scan_from_select(&mut probe) {
                    return Ok(span);
                }
            }
            parser.advance();
        }

        ParseError::new(ParseErrorKind::MissingSelectBlock, 0, parser).err()
    }

    fn scan_from_select(parser: &mut QueryParser) -> Option<SelectSpan> {
        let select_start = parser.position;
        let depth = parser.parentheses_depth;

        parser.jump(parser.comparers.select.length);
        parser.next_non_whitespace();
        Self::skip_modifiers(parser);

        let list_start = parser.position;
        let mut list_end = list_start;
        while !parser.eof() {
            if parser.is_code() && parser.parentheses_depth == depth {
                let current = parser.current();
                if current == ')' || current == ';' {
                    return None;
                }

                if parser.comparers.from.compare(parser) {
                    if list_end == list_start {
                        return None;
                    }

                    return Some(SelectSpan {
                        select_start,
                        list_start,
                        list_end,
                        from_start: parser.position,
                        depth,
                    });
                }
            }

            // trailing comments stay out of the column list
            if parser.is_code() && !parser.current().is_whitespace() {
                list_end = parser.position + 1;
            }
            parser.advance();
        }

        None
    }

    /// Skips `DISTINCT`, `ALL` and `TOP n [PERCENT] [WITH TIES]` so they stay
    /// attached to the SELECT keyword instead of the first column.
    fn skip_modifiers(parser: &mut QueryParser) {
        if parser.comparers.distinct.compare(parser) {
            parser.jump(parser.comparers.distinct.length);
            parser.next_non_whitespace();
        } else if parser.comparers.all.compare(parser) {
            parser.jump(parser.comparers.all.length);
            parser.next_non_whitespace();
        }

        if !parser.comparers.top.compare(parser) {
            return;
        }

        let pivot = parser.position;
        let depth = parser.parentheses_depth;
        parser.jump(parser.comparers.top.length);
        parser.next_non_whitespace();

        let current = parser.current();
        if current == '(' {
            parser.advance();
            while !parser.eof() && parser.parentheses_depth > depth {
                parser.advance();
            }
        } else if current.is_ascii_digit() || current == '@' {
            parser.advance();
            while !parser.eof() && (WordComparer::is_word_char(parser.current()) || parser.current() == '.') {
                parser.advance();
            }
        } else {
            // a column named "top"
            parser.reset_to(pivot, depth);
            return;
        }
        parser.next_non_whitespace();

        if parser.comparers.percent.compare(parser) {
            parser.jump(parser.comparers.percent.length);
            parser.next_non_whitespace();
        }

        if parser.comparers.with_ties.compare(parser) {
            parser.jump(parser.comparers.with_ties.length);
            parser.next_non_whitespace();
        }
    }
}
