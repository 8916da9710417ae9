use crate::{config::IdentifierQuote, parser::QueryComparers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comment {
    /// `--`, closed by the line break
    Line,
    /// `/*`, closed by `*/`
    Block,
}

/// Character cursor over a query text.
///
/// Besides the position, the parser tracks the parentheses depth and whether the
/// cursor is inside a quoted region (string literal or quoted identifier) or a
/// comment (`-- ...` up to the line break, `/* ... */`), so callers can ask if
/// the current character is code at the top level of the query.
/// The state is only updated by [`QueryParser::advance`].
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub text: String,
    pub parentheses_depth: usize,
    /// closing character of the quoted region the cursor is in, if any
    pub quote_close: Option<char>,
    pub comment: Option<Comment>,
    pub quotes: Vec<IdentifierQuote>,

    pub comparers: QueryComparers,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        Self::with_quotes(query, &IdentifierQuote::sql_server())
    }

    pub fn with_quotes(query: &str, quotes: &[IdentifierQuote]) -> Self {
        let text_v: Vec<char> = query.chars().collect();
        Self {
            position: 0,
            length: text_v.len(),
            text_v,
            text: query.to_string(),
            quotes: quotes.to_vec(),
            comparers: QueryComparers::new(),
            ..Default::default()
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        if self.position < self.length {
            return self.text_v[self.position];
        }

        '\0'
    }

    pub fn peek(&self, ahead: usize) -> char {
        self.text_v.get(self.position + ahead).copied().unwrap_or('\0')
    }

    /// Character right before the cursor, `'\0'` at the start of the text.
    pub fn previous(&self) -> char {
        if self.position == 0 || self.position > self.length {
            return '\0';
        }

        self.text_v[self.position - 1]
    }

    pub fn is_quoted(&self) -> bool {
        self.quote_close.is_some()
    }

    pub fn is_comment(&self) -> bool {
        self.comment.is_some()
    }

    /// True when the cursor sits on a comment opener (`--` or `/*`) outside any
    /// quoted region or comment.
    pub fn is_comment_start(&self) -> bool {
        if self.is_quoted() || self.is_comment() {
            return false;
        }

        matches!((self.current(), self.peek(1)), ('-', '-') | ('/', '*'))
    }

    /// Current character is query text: not quoted, not inside or opening a comment.
    pub fn is_code(&self) -> bool {
        !self.is_quoted() && !self.is_comment() && !self.is_comment_start()
    }

    pub fn is_top_level(&self) -> bool {
        self.parentheses_depth == 0 && self.is_code()
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while !self.eof() && self.current().is_whitespace() {
            self.advance();
        }
    }

    /// Moves past `ahead` characters, keeping depth and quote state in sync.
    pub fn jump(&mut self, ahead: usize) {
        for _ in 0..ahead {
            if self.eof() {
                break;
            }
            self.advance();
        }
    }

    /// Consumes the current character and updates depth, quote and comment state.
    ///
    /// A doubled closing character inside a quoted region (`''`, `""`, `]]`) is
    /// an escape and keeps the region open. Comment openers and the `*/` closer
    /// are consumed as a whole.
    pub fn advance(&mut self) {
        let current = self.current();
        if let Some(comment) = self.comment {
            match comment {
                Comment::Line if current == '\n' => self.comment = None,
                Comment::Block if current == '*' && self.peek(1) == '/' => {
                    self.next();
                    self.comment = None;
                },
                _ => {},
            }
            self.next();
            return;
        }

        if self.is_comment_start() {
            self.comment = Some(if current == '-' { Comment::Line } else { Comment::Block });
            self.next();
            self.next();
            return;
        }

        match self.quote_close {
            Some(close) => {
                if current == close {
                    if self.peek(1) == close {
                        self.next();
                    } else {
                        self.quote_close = None;
                    }
                }
            },
            None => {
                if current == '(' {
                    self.parentheses_depth += 1;
                } else if current == ')' {
                    self.parentheses_depth = self.parentheses_depth.saturating_sub(1);
                } else if current == '\'' {
                    self.quote_close = Some('\'');
                } else if let Some(quote) = self.quotes.iter().find(|quote| quote.open == current) {
                    self.quote_close = Some(quote.close);
                }
            },
        }
        self.next();
    }

    /// Puts the cursor at `position` with a known depth, outside any quote or comment.
    pub fn reset_to(&mut self, position: usize, parentheses_depth: usize) {
        self.position = position.min(self.length);
        self.parentheses_depth = parentheses_depth;
        self.quote_close = None;
        self.comment = None;
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }
}
