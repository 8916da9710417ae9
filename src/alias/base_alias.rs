use regex::Regex;

use crate::{config::{ConfigError, DisambiguatorConfig, IdentifierQuote}, parser::QueryParser};

/// Where the base alias of a column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSource {
    /// `expr AS name`
    Explicit,
    /// `[schema.]table.column`
    Qualified,
    /// any other expression, dots replaced by `_`
    Expression,
    /// `*` or `table.*`, never aliased
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasedColumn {
    /// the column expression without any explicit alias
    pub expression: String,
    pub base_alias: Option<String>,
    pub source: AliasSource,
}

/// Derives the base alias of a single column expression.
#[derive(Debug, Clone)]
pub struct BaseAliasResolver {
    qualified: Regex,
    quotes: Vec<IdentifierQuote>,
    respect_existing_aliases: bool,
}

impl BaseAliasResolver {
    pub fn new(config: &DisambiguatorConfig) -> Result<Self, ConfigError> {
        let identifier = Self::identifier_pattern(&config.quotes);

        // the last two identifiers of the first dotted chain: schema prefixes drop out
        let qualified = Regex::new(&format!(r"(?:{identifier}\.)*({identifier})\.({identifier})"))
            .map_err(|err| ConfigError::InvalidPattern(err.to_string()))?;

        Ok(Self {
            qualified,
            quotes: config.quotes.clone(),
            respect_existing_aliases: config.respect_existing_aliases,
        })
    }

    fn identifier_pattern(quotes: &[IdentifierQuote]) -> String {
        let mut alternatives = vec![r"[^\W\d]\w*".to_string()];
        for quote in quotes {
            let open = regex::escape(&quote.open.to_string());
            let close = regex::escape(&quote.close.to_string());
            alternatives.push(format!("{open}[^{close}]+{close}"));
        }

        format!("(?:{})", alternatives.join("|"))
    }

    fn is_quoted(&self, identifier: &str) -> bool {
        self.quotes.iter().any(|quote| quote.strip(identifier).is_some())
    }

    /// Splits `expr AS alias` on the last top-level AS keyword. The alias must be
    /// a single token, either bare or quoted; `CAST(x AS int)` has no top-level AS.
    pub fn split_explicit_alias(&self, column: &str) -> Option<(String, String)> {
        let mut parser = QueryParser::with_quotes(column, &self.quotes);
        let mut keyword = None;
        while !parser.eof() {
            if parser.is_top_level() && parser.comparers.alias.compare(&parser) {
                keyword = Some(parser.position);
            }
            parser.advance();
        }

        let position = keyword?;
        let expression = parser.text_from_range(0, position).trim().to_string();
        let alias = parser.text_from_range(position + parser.comparers.alias.length, parser.length)
            .trim()
            .to_string();

        if expression.is_empty() || alias.is_empty() {
            return None;
        }

        if !self.is_quoted(&alias) && alias.contains(char::is_whitespace) {
            return None;
        }

        Some((expression, alias))
    }

    pub fn is_wildcard(column: &str) -> bool {
        column == "*" || column.ends_with(".*")
    }

    /// Strips identifier quotes and replaces non-word characters with `_`.
    pub fn unquote(&self, identifier: &str) -> String {
        let inner = self.quotes.iter()
            .find_map(|quote| quote.strip(identifier))
            .unwrap_or(identifier);

        inner.chars()
            .map(|ch| if ch.is_alphanumeric() || ch == '_' { ch } else { '_' })
            .collect()
    }

    pub fn resolve(&self, column: &str) -> AliasedColumn {
        let column = column.trim();

        if Self::is_wildcard(column) {
            return AliasedColumn {
                expression: column.to_string(),
                base_alias: None,
                source: AliasSource::Wildcard,
            };
        }

        let explicit = match self.respect_existing_aliases {
            true => self.split_explicit_alias(column),
            false => None,
        };
        let column = match explicit {
            Some((expression, alias)) => {
                // bare aliases are kept verbatim so a second rewrite reproduces them
                let base_alias = match self.is_quoted(&alias) {
                    true => self.unquote(&alias),
                    false => alias,
                };
                if !base_alias.is_empty() {
                    return AliasedColumn {
                        expression,
                        base_alias: Some(base_alias),
                        source: AliasSource::Explicit,
                    };
                }

                // `expr AS []` names nothing, the expression alone decides
                expression
            },
            None => column.to_string(),
        };

        if let Some(captures) = self.qualified.captures(&column) {
            let base_alias = format!("{}_{}", self.unquote(&captures[1]), self.unquote(&captures[2]));
            return AliasedColumn {
                expression: column,
                base_alias: Some(base_alias),
                source: AliasSource::Qualified,
            };
        }

        AliasedColumn {
            base_alias: Some(column.replace('.', "_")),
            expression: column,
            source: AliasSource::Expression,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{alias::{AliasSource, BaseAliasResolver}, config::DisambiguatorConfig};

    fn resolver() -> BaseAliasResolver {
        BaseAliasResolver::new(&DisambiguatorConfig::default()).expect("Failed to build resolver")
    }

    fn base_alias(column: &str) -> Option<String> {
        resolver().resolve(column).base_alias
    }

    #[test]
    pub fn test_schema_qualified_reference() {
        let result = resolver().resolve("dbo.Acc_AccountsKol.Name_");

        assert_eq!(result.base_alias.as_deref(), Some("Acc_AccountsKol_Name_"));
        assert_eq!(result.source, AliasSource::Qualified);
        assert_eq!(result.expression, "dbo.Acc_AccountsKol.Name_");
    }

    #[test]
    pub fn test_table_qualified_reference() {
        assert_eq!(base_alias("orders.id").as_deref(), Some("orders_id"));
    }

    #[test]
    pub fn test_database_and_schema_prefixes_are_dropped() {
        assert_eq!(base_alias("sales.dbo.orders.id").as_deref(), Some("orders_id"));
    }

    #[test]
    pub fn test_bracket_quoted_reference() {
        assert_eq!(base_alias("[dbo].[Order Lines].[Qty]").as_deref(), Some("Order_Lines_Qty"));
    }

    #[test]
    pub fn test_qualified_reference_inside_expression() {
        assert_eq!(base_alias("SUM(o.total)").as_deref(), Some("o_total"));
    }

    #[test]
    pub fn test_unqualified_expression_kept_literally() {
        let result = resolver().resolve("COUNT(*)");

        assert_eq!(result.base_alias.as_deref(), Some("COUNT(*)"));
        assert_eq!(result.source, AliasSource::Expression);
    }

    #[test]
    pub fn test_numeric_literal_dots_replaced() {
        assert_eq!(base_alias("1.5").as_deref(), Some("1_5"));
    }

    #[test]
    pub fn test_surrounding_whitespace_trimmed() {
        assert_eq!(base_alias("\n    t.name  ").as_deref(), Some("t_name"));
    }

    #[test]
    pub fn test_explicit_alias() {
        let result = resolver().resolve("CONCAT(a, b) as Full_Name");

        assert_eq!(result.expression, "CONCAT(a, b)");
        assert_eq!(result.base_alias.as_deref(), Some("Full_Name"));
        assert_eq!(result.source, AliasSource::Explicit);
    }

    #[test]
    pub fn test_explicit_quoted_alias() {
        assert_eq!(base_alias("t.a AS [Total Amount]").as_deref(), Some("Total_Amount"));
    }

    #[test]
    pub fn test_empty_quoted_alias_falls_back() {
        let result = resolver().resolve("t.a AS []");

        assert_eq!(result.expression, "t.a");
        assert_eq!(result.base_alias.as_deref(), Some("t_a"));
        assert_eq!(result.source, AliasSource::Qualified);

        let result = resolver().resolve("b AS \"\"");

        assert_eq!(result.expression, "b");
        assert_eq!(result.base_alias.as_deref(), Some("b"));
        assert_eq!(result.source, AliasSource::Expression);
    }

    #[test]
    pub fn test_cast_is_not_an_alias() {
        let result = resolver().resolve("CAST(t.x AS int)");

        assert_eq!(result.source, AliasSource::Qualified);
        assert_eq!(result.base_alias.as_deref(), Some("t_x"));
    }

    #[test]
    pub fn test_explicit_alias_ignored_when_disabled() {
        let config = DisambiguatorConfig::default().with_existing_aliases(false);
        let resolver = BaseAliasResolver::new(&config).expect("Failed to build resolver");

        let result = resolver.resolve("t.a AS total");

        assert_eq!(result.expression, "t.a AS total");
        assert_eq!(result.base_alias.as_deref(), Some("t_a"));
    }

    #[test]
    pub fn test_explicit_alias_that_is_an_expression() {
        let result = resolver().resolve("COUNT(*) AS COUNT(*)");

        assert_eq!(result.expression, "COUNT(*)");
        assert_eq!(result.base_alias.as_deref(), Some("COUNT(*)"));
    }

    #[test]
    pub fn test_as_inside_literal_is_not_an_alias() {
        let result = resolver().resolve("'a AS b'");

        assert_eq!(result.source, AliasSource::Expression);
        assert_eq!(result.base_alias.as_deref(), Some("'a AS b'"));
    }

    #[test]
    pub fn test_split_explicit_alias_rejects_multi_token_alias() {
        assert_eq!(resolver().split_explicit_alias("a AS b c"), None);
        assert_eq!(resolver().split_explicit_alias("AS b"), None);
    }

    #[test]
    pub fn test_wildcards() {
        assert_eq!(resolver().resolve("*").source, AliasSource::Wildcard);
        assert_eq!(base_alias("t.*"), None);
    }

    #[test]
    pub fn test_backtick_quotes_with_mysql_config() {
        let resolver = BaseAliasResolver::new(&DisambiguatorConfig::mysql()).expect("Failed to build resolver");

        assert_eq!(resolver.resolve("`shop`.`orders`.`id`").base_alias.as_deref(), Some("orders_id"));
    }
}
