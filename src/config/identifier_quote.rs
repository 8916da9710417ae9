use serde::{Deserialize, Serialize};

/// Pair of characters that delimit a quoted identifier, e.g. `[` and `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierQuote {
    pub open: char,
    pub close: char,
}

impl IdentifierQuote {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Same character on both sides, e.g. `"` or a backtick.
    pub fn symmetric(quote: char) -> Self {
        Self::new(quote, quote)
    }

    /// `[name]` and `"name"`.
    pub fn sql_server() -> Vec<Self> {
        vec![Self::new('[', ']'), Self::symmetric('"')]
    }

    /// `` `name` `` and `"name"`.
    pub fn mysql() -> Vec<Self> {
        vec![Self::symmetric('`'), Self::symmetric('"')]
    }

    /// `"name"` only.
    pub fn ansi() -> Vec<Self> {
        vec![Self::symmetric('"')]
    }

    pub fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.strip_prefix(self.open)?.strip_suffix(self.close)
    }
}
