use crate::parser::{ParseError, ParseErrorKind, QueryParser, SelectSpan};

/// Splits a column list into trimmed column expressions.
///
/// Only commas at the depth of the SELECT keyword and outside quoted regions
/// or comments separate columns, so `CONCAT(a, b)` or `'a,b'` stay in one piece.
/// Comments are dropped from the expressions; each one collapses to a space.
pub struct ColumnSplitter;

impl ColumnSplitter {
    pub fn split(parser: &mut QueryParser, span: &SelectSpan) -> Result<Vec<String>, ParseError> {
        parser.reset_to(span.list_start, span.depth);

        let mut columns = vec![];
        let mut column = String::new();
        let mut pivot = parser.position;
        while parser.position < span.list_end {
            if parser.current() == ',' && parser.is_code() && parser.parentheses_depth == span.depth {
                columns.push(Self::column(parser, pivot, &column)?);
                column.clear();
                parser.advance();
                pivot = parser.position;
                continue;
            }

            if parser.is_comment_start() {
                column.push(' ');
            } else if !parser.is_comment() {
                column.push(parser.current());
            }
            parser.advance();
        }
        columns.push(Self::column(parser, pivot, &column)?);

        Ok(columns)
    }

    fn column(parser: &QueryParser, pivot: usize, text: &str) -> Result<String, ParseError> {
        let column = text.trim().to_string();
        if column.is_empty() {
            return ParseError::new(ParseErrorKind::EmptyColumn, pivot, parser).err();
        }

        Ok(column)
    }
}
