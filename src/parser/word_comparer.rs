use crate::parser::QueryParser;

/// Case-insensitive keyword matcher anchored at the parser position.
///
/// Postfix rules describe what may follow the keyword; prefix rules describe
/// what may precede it. A comparer without any rule matches the raw characters.
#[derive(Debug, Clone, Default)]
pub struct WordComparer {
    pub length: usize,
    pub word: Vec<char>,
    whitespace_postfix: bool,
    non_word_postfix: bool,
    eof: bool,
    delimiter: Option<char>,
    whitespace_prefix: bool,
    word_boundary_prefix: bool,
}

impl WordComparer {
    pub fn new(word: &str) -> Self {
        let word: Vec<char> = word.to_uppercase().chars().collect();
        Self {
            length: word.len(),
            word,
            ..Default::default()
        }
    }

    pub fn reach_eof(&self, parser: &QueryParser) -> bool {
        parser.position + self.length >= parser.length
    }

    pub fn is_block_delimiter(ch: char) -> bool {
        ch.is_whitespace()
    }

    pub fn is_word_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }

    fn compare_prefix(&self, parser: &QueryParser) -> bool {
        let previous = parser.previous();
        if self.whitespace_prefix && !Self::is_block_delimiter(previous) {
            return false;
        }

        if self.word_boundary_prefix && previous != '\0' && Self::is_word_char(previous) {
            return false;
        }

        true
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        for (offset, ch) in self.word.iter().enumerate() {
            if parser.peek(offset).to_uppercase().ne(ch.to_uppercase()) {
                return false;
            }
        }

        if !self.compare_prefix(parser) {
            return false;
        }

        if self.reach_eof(parser) {
            return self.eof;
        }

        if self.delimiter.is_none() && !self.non_word_postfix && !self.whitespace_postfix {
            return true;
        }

        let next = parser.peek(self.length);

        if let Some(delimiter) = self.delimiter {
            if next == delimiter {
                return true;
            }
        }

        if self.non_word_postfix && !Self::is_word_char(next) {
            return true;
        }

        self.whitespace_postfix && Self::is_block_delimiter(next)
    }

    pub fn with_eof(mut self) -> Self { self.eof = true; self }
    pub fn with_whitespace_postfix(mut self) -> Self { self.whitespace_postfix = true; self }
    /// Anything but a word character may follow: `FROM[dbo].[T]`, `FROM(`, `SELECT*`.
    pub fn with_non_word_postfix(mut self) -> Self { self.non_word_postfix = true; self }
    pub fn with_delimiter(mut self, delimiter: char) -> Self { self.delimiter = Some(delimiter); self }
    pub fn with_whitespace_prefix(mut self) -> Self { self.whitespace_prefix = true; self }
    pub fn with_word_boundary_prefix(mut self) -> Self { self.word_boundary_prefix = true; self }
}

#[cfg(test)]
mod tests {
    use crate::parser::{QueryParser, WordComparer};

    #[test]
    pub fn test_compare_case_insensitive() {
        let comparer = WordComparer::new("SELECT").with_whitespace_postfix();

        assert!(comparer.compare(&QueryParser::new("select a")));
        assert!(comparer.compare(&QueryParser::new("SeLeCt\na")));
        assert!(!comparer.compare(&QueryParser::new("selected a")));
    }

    #[test]
    pub fn test_compare_eof() {
        let comparer = WordComparer::new("FROM").with_whitespace_postfix();
        assert!(!comparer.compare(&QueryParser::new("FROM")));

        let comparer = comparer.with_eof();
        assert!(comparer.compare(&QueryParser::new("FROM")));
    }

    #[test]
    pub fn test_compare_word_boundary_prefix() {
        let comparer = WordComparer::new("SELECT").with_whitespace_postfix().with_word_boundary_prefix();

        let mut parser = QueryParser::new("xselect a");
        parser.next();
        assert!(!comparer.compare(&parser));

        let mut parser = QueryParser::new("(select a");
        parser.next();
        assert!(comparer.compare(&parser));
    }

    #[test]
    pub fn test_compare_whitespace_prefix() {
        let comparer = WordComparer::new("FROM").with_whitespace_prefix().with_non_word_postfix();

        let mut parser = QueryParser::new("a.from t");
        parser.jump(2);
        assert!(!comparer.compare(&parser));

        let mut parser = QueryParser::new("a from(t)");
        parser.jump(2);
        assert!(comparer.compare(&parser));
    }

    #[test]
    pub fn test_compare_non_word_postfix() {
        let comparer = WordComparer::new("FROM").with_non_word_postfix();

        assert!(comparer.compare(&QueryParser::new("FROM[dbo].[T]")));
        assert!(comparer.compare(&QueryParser::new("FROM\"t\"")));
        assert!(comparer.compare(&QueryParser::new("FROM\n  t")));
        assert!(!comparer.compare(&QueryParser::new("FROM_date")));
        assert!(!comparer.compare(&QueryParser::new("FROMAGE x")));
    }

    #[test]
    pub fn test_compare_delimiter() {
        let comparer = WordComparer::new("TOP").with_whitespace_postfix().with_delimiter('(');

        assert!(comparer.compare(&QueryParser::new("TOP(5)")));
        assert!(comparer.compare(&QueryParser::new("TOP 5")));
        assert!(!comparer.compare(&QueryParser::new("TOPS 5")));
    }
}
