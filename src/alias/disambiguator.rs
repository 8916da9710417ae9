use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::{
    alias::{AliasRegistry, BaseAliasResolver},
    config::{ConfigError, DisambiguatorConfig},
    parser::{ColumnSplitter, ParseError, QueryParser, SelectSpan},
};

static SHARED: Lazy<Disambiguator> = Lazy::new(|| {
    Disambiguator::new(DisambiguatorConfig::default())
        .expect("default identifier patterns always compile")
});

/// Rewrites the column list of the first `SELECT ... FROM` block so every
/// column carries a unique alias.
///
/// ```
/// use colfix::Disambiguator;
///
/// let query = "SELECT dbo.T.Name_, dbo.T.Name_ FROM dbo.T";
/// let fixed = Disambiguator::shared().disambiguate(query).unwrap();
///
/// assert_eq!(fixed, "SELECT\n    dbo.T.Name_ AS T_Name_,\n    dbo.T.Name_ AS T_Name__2\nFROM dbo.T");
/// ```
///
/// Everything before the SELECT keyword and from the FROM keyword onwards is
/// copied untouched. The alias registry lives for one call, so the same input
/// always produces the same output.
#[derive(Debug, Clone)]
pub struct Disambiguator {
    config: DisambiguatorConfig,
    resolver: BaseAliasResolver,
}

impl Disambiguator {
    pub fn new(config: DisambiguatorConfig) -> Result<Self, ConfigError> {
        let resolver = BaseAliasResolver::new(&config)?;
        Ok(Self { config, resolver })
    }

    /// Instance built from the default (SQL Server) configuration.
    pub fn shared() -> &'static Disambiguator {
        &SHARED
    }

    pub fn config(&self) -> &DisambiguatorConfig {
        &self.config
    }

    pub fn disambiguate(&self, query: &str) -> Result<String, ParseError> {
        let mut parser = QueryParser::with_quotes(query, &self.config.quotes);
        let span = SelectSpan::locate(&mut parser)?;
        let columns = ColumnSplitter::split(&mut parser, &span)?;

        let mut registry = AliasRegistry::new();
        let aliased_columns = columns.iter()
            .map(|column| {
                let column = self.resolver.resolve(column);
                match column.base_alias {
                    Some(base_alias) => format!("{} AS {}", column.expression, registry.resolve(&base_alias)),
                    None => column.expression,
                }
            })
            .collect::<Vec<String>>();

        let indent = &self.config.indent;
        let separator = format!(",\n{}", indent);
        let head = parser.text_from_range(span.select_start, span.list_start);
        let fixed = format!(
            "{}{}\n{}{}\n{}",
            parser.text_from_range(0, span.select_start),
            head.trim_end(),
            indent,
            aliased_columns.join(separator.as_str()),
            parser.text_from_range(span.from_start, parser.length),
        );

        debug!(columns = aliased_columns.len(), aliases = ?registry.aliases().collect::<Vec<_>>(), "rewrote SELECT block");
        Ok(fixed)
    }

    /// Non-fatal variant of [`Disambiguator::disambiguate`]: on a parse failure
    /// the failure is logged and `query` comes back unchanged.
    pub fn fix_duplicate_columns(&self, query: &str) -> String {
        match self.disambiguate(query) {
            Ok(fixed) => fixed,
            Err(err) => {
                warn!(error = %err, "could not parse SELECT block, query left unchanged");
                query.to_string()
            },
        }
    }
}

/// Adds unique aliases to the columns of `query` with the default configuration.
/// Returns `query` unchanged if no `SELECT ... FROM` block is found.
pub fn fix_duplicate_columns_in_query(query: &str) -> String {
    Disambiguator::shared().fix_duplicate_columns(query)
}
