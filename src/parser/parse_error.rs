use std::fmt::Display;

use crate::parser::QueryParser;

/// Why a query could not be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// no SELECT keyword owns a FROM keyword at its own depth
    MissingSelectBlock,
    /// a column between two separating commas holds no expression
    EmptyColumn,
}

impl ParseErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ParseErrorKind::MissingSelectBlock => "Could not parse SELECT block",
            ParseErrorKind::EmptyColumn => "Empty column expression",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// query excerpt from `start` up to the cursor
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, pivot: usize, parser: &QueryParser) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            text: parser.text_from_range(pivot, parser.position + 1),
            start: pivot,
            end: parser.position,
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParseError: {}\n  at [{}:{}] -> '{}'",
            self.message,
            self.start,
            self.end,
            self.text
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use crate::parser::{ParseError, ParseErrorKind, QueryParser};

    #[test]
    pub fn test_parse_error_display() {
        let mut parser = QueryParser::new("SELECT a");
        parser.jump(7);

        let error = ParseError::new(ParseErrorKind::MissingSelectBlock, 0, &parser);

        assert_eq!(error.text, "SELECT a");
        assert_eq!(error.end, 7);
        assert_eq!(error.to_string(), "ParseError: Could not parse SELECT block\n  at [0:7] -> 'SELECT a'");
    }

    #[test]
    pub fn test_kind_messages() {
        assert_eq!(ParseErrorKind::EmptyColumn.message(), "Empty column expression");
        assert_ne!(ParseErrorKind::EmptyColumn, ParseErrorKind::MissingSelectBlock);
    }
}
