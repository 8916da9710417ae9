use indexmap::{IndexMap, IndexSet};

/// Occurrence counts per base alias for a single rewrite.
///
/// The first occurrence of a base alias is emitted as-is, the k-th one as
/// `base_k`. A candidate that was already emitted (a literal column named like
/// a generated alias) pushes the counter further until the alias is unused.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    seen: IndexMap<String, usize>,
    emitted: IndexSet<String>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, base_alias: &str) -> String {
        let count = self.seen.entry(base_alias.to_string()).or_insert(0);
        *count += 1;

        let mut alias = match *count {
            1 => base_alias.to_string(),
            count => format!("{}_{}", base_alias, count),
        };
        while self.emitted.contains(&alias) {
            *count += 1;
            alias = format!("{}_{}", base_alias, count);
        }

        self.emitted.insert(alias.clone());
        alias
    }

    #[cfg(test)]
    pub fn occurrences(&self, base_alias: &str) -> usize {
        self.seen.get(base_alias).copied().unwrap_or(0)
    }

    /// Emitted aliases in emission order.
    pub fn aliases(&self) -> impl Iterator<Item = &String> {
        self.emitted.iter()
    }
}
