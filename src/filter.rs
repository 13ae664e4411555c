//! Text and type filtering that narrows the catalog to the active pool.

use crate::catalog::CatalogEntry;

/// Raw control value meaning "any type".
pub const ANY_TYPE: &str = "*";

/// Exact, case-insensitive match on an entry's type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    Any,
    Exact(String),
}

impl TypeFilter {
    /// Parse a control value; `*` and blank mean [`TypeFilter::Any`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ANY_TYPE {
            Self::Any
        } else {
            Self::Exact(value.to_string())
        }
    }

    pub fn accepts(&self, kind: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(want) => kind.to_lowercase() == want.to_lowercase(),
        }
    }

    /// The control value for this filter.
    pub fn as_value(&self) -> &str {
        match self {
            Self::Any => ANY_TYPE,
            Self::Exact(kind) => kind,
        }
    }
}

/// Free-text query combined with a type filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    pub query: String,
    pub kind: TypeFilter,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>, kind: TypeFilter) -> Self {
        Self {
            query: query.into(),
            kind,
        }
    }

    /// The query is used as typed; surrounding spaces are part of it.
    fn needle(&self) -> String {
        self.query.to_lowercase()
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether `entry` passes both the type filter and the text query.
    ///
    /// The query is a substring match over name, brand, type, style and hex.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if !self.kind.accepts(&entry.kind) {
            return false;
        }
        let needle = self.needle();
        if needle.is_empty() {
            return true;
        }
        let haystack = [
            entry.name.as_str(),
            entry.brand.as_str(),
            entry.kind.as_str(),
            entry.style.as_str(),
            entry.hex.as_str(),
        ]
        .join(" ")
        .to_lowercase();
        haystack.contains(&needle)
    }
}

/// Indices of the entries passing `filter`.
///
/// When nothing passes, the pool falls back to the whole catalog so the
/// matcher always has candidates.
pub fn active_pool(items: &[CatalogEntry], filter: &SearchFilter) -> Vec<usize> {
    let hits: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e))
        .map(|(i, _)| i)
        .collect();
    if hits.is_empty() {
        (0..items.len()).collect()
    } else {
        hits
    }
}

/// Up to `limit` pool indices to list under the search box. Empty unless a
/// query is typed.
pub fn suggestions(pool: &[usize], filter: &SearchFilter, limit: usize) -> Vec<usize> {
    if !filter.has_query() {
        return Vec::new();
    }
    pool.iter().copied().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, hex: &str, kind: &str) -> CatalogEntry {
        let mut e = CatalogEntry::with_hex(hex).unwrap();
        e.name = name.to_string();
        e.kind = kind.to_string();
        e.brand = "Acme".to_string();
        e
    }

    fn items() -> Vec<CatalogEntry> {
        vec![
            entry("Brick Red", "#b22222", "Matte"),
            entry("Sea Green", "#2e8b57", "Gloss"),
            entry("Rose", "#ff007f", "Gloss"),
        ]
    }

    #[test]
    fn type_filter_parse() {
        assert_eq!(TypeFilter::parse("*"), TypeFilter::Any);
        assert_eq!(TypeFilter::parse("  "), TypeFilter::Any);
        assert_eq!(TypeFilter::parse("Gloss"), TypeFilter::Exact("Gloss".into()));
        assert_eq!(TypeFilter::parse("Gloss").as_value(), "Gloss");
        assert_eq!(TypeFilter::Any.as_value(), "*");
    }

    #[test]
    fn type_filter_is_exact_and_case_insensitive() {
        let f = TypeFilter::parse("gloss");
        assert!(f.accepts("Gloss"));
        assert!(!f.accepts("Glossy"));
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let items = items();
        let by_name = SearchFilter::new("RED", TypeFilter::Any);
        assert_eq!(active_pool(&items, &by_name), vec![0]);
        let by_hex = SearchFilter::new("#2e8b", TypeFilter::Any);
        assert_eq!(active_pool(&items, &by_hex), vec![1]);
        let by_brand = SearchFilter::new("acme", TypeFilter::Any);
        assert_eq!(active_pool(&items, &by_brand), vec![0, 1, 2]);
    }

    #[test]
    fn query_and_type_are_a_conjunction() {
        let items = items();
        let f = SearchFilter::new("e", TypeFilter::parse("Gloss"));
        assert_eq!(active_pool(&items, &f), vec![1, 2]);
        let f = SearchFilter::new("rose", TypeFilter::parse("Gloss"));
        assert_eq!(active_pool(&items, &f), vec![2]);
    }

    #[test]
    fn no_hits_falls_back_to_everything() {
        let items = items();
        let f = SearchFilter::new("zzz", TypeFilter::Any);
        assert_eq!(active_pool(&items, &f), vec![0, 1, 2]);
        assert!(active_pool(&[], &f).is_empty());
    }

    #[test]
    fn suggestions_need_a_query() {
        let pool = vec![0, 1, 2, 3, 4];
        assert!(suggestions(&pool, &SearchFilter::default(), 10).is_empty());
        let f = SearchFilter::new("x", TypeFilter::Any);
        assert_eq!(suggestions(&pool, &f, 3), vec![0, 1, 2]);
    }

    #[test]
    fn spaces_in_the_query_are_kept() {
        let items = items();
        // "Sea Green" and "Brick Red" contain a space; the joined haystack
        // puts one between every field, so a lone space hits everything.
        let blank = SearchFilter::new(" ", TypeFilter::Any);
        assert!(blank.has_query());
        assert_eq!(active_pool(&items, &blank), vec![0, 1, 2]);
        assert_eq!(suggestions(&[0, 1, 2], &blank, 10), vec![0, 1, 2]);

        let padded = SearchFilter::new(" green", TypeFilter::Any);
        assert_eq!(active_pool(&items, &padded), vec![1]);
    }
}
