use crate::parser::WordComparer;

#[derive(Debug, Clone)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub from: WordComparer,
    pub alias: WordComparer,
    pub distinct: WordComparer,
    pub all: WordComparer,
    pub top: WordComparer,
    pub percent: WordComparer,
    pub with_ties: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_non_word_postfix().with_word_boundary_prefix(),
            from: WordComparer::new("FROM").with_whitespace_prefix().with_non_word_postfix().with_eof(),
            alias: WordComparer::new("AS").with_whitespace_prefix().with_whitespace_postfix(),
            distinct: WordComparer::new("DISTINCT").with_whitespace_postfix(),
            all: WordComparer::new("ALL").with_whitespace_postfix(),
            top: WordComparer::new("TOP").with_whitespace_postfix().with_delimiter('('),
            percent: WordComparer::new("PERCENT").with_whitespace_postfix(),
            with_ties: WordComparer::new("WITH TIES").with_whitespace_postfix(),
        }
    }
}
