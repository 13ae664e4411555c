//! Nearest-color ranking of catalog entries.

use crate::catalog::CatalogEntry;
use crate::color::{Rgb, distance};

/// Number of matches shown: one primary card and two secondary rows.
pub const MATCH_SLOTS: usize = 3;

/// Sort `pool` by ascending RGB distance to `query`.
///
/// The sort is stable, so equally distant entries keep their pool order.
/// Nothing is ever rejected as too far away.
pub fn rank<'a, I>(query: Rgb, pool: I) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut scored: Vec<(f64, &CatalogEntry)> = pool
        .into_iter()
        .map(|e| (distance(query, e.rgb), e))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, e)| e).collect()
}

/// The three display slots. Empty slots render as "no match".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    slots: [Option<CatalogEntry>; MATCH_SLOTS],
}

impl Matches {
    /// Closest entry.
    pub fn primary(&self) -> Option<&CatalogEntry> {
        self.slots[0].as_ref()
    }

    /// Second and third closest.
    pub fn secondary(&self) -> [Option<&CatalogEntry>; 2] {
        [self.slots[1].as_ref(), self.slots[2].as_ref()]
    }

    pub fn slot(&self, index: usize) -> Option<&CatalogEntry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Rank `pool` and keep the top [`MATCH_SLOTS`].
pub fn top_matches<'a, I>(query: Rgb, pool: I) -> Matches
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut matches = Matches::default();
    for (slot, entry) in matches
        .slots
        .iter_mut()
        .zip(rank(query, pool))
    {
        *slot = Some(entry.clone());
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hex: &str, name: &str) -> CatalogEntry {
        let mut e = CatalogEntry::with_hex(hex).unwrap();
        e.name = name.to_string();
        e
    }

    fn primaries() -> Vec<CatalogEntry> {
        vec![
            entry("#ff0000", "red"),
            entry("#00ff00", "green"),
            entry("#0000ff", "blue"),
        ]
    }

    #[test]
    fn near_red_ranks_red_first() {
        let pool = primaries();
        let ranked = rank(Rgb::new(250, 10, 10), &pool);
        assert_eq!(ranked[0].hex, "#ff0000");
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn ranking_is_ascending() {
        let pool = vec![
            entry("#000000", "black"),
            entry("#808080", "gray"),
            entry("#ffffff", "white"),
        ];
        let query = Rgb::new(200, 200, 200);
        let ranked = rank(query, &pool);
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["white", "gray", "black"]);
        let dists: Vec<f64> = ranked.iter().map(|e| distance(query, e.rgb)).collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ties_keep_pool_order() {
        let pool = vec![
            entry("#0a0000", "first"),
            entry("#000a00", "second"),
            entry("#00000a", "third"),
        ];
        let ranked = rank(Rgb::BLACK, &pool);
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn far_colors_still_match() {
        let pool = vec![entry("#000000", "black")];
        let m = top_matches(Rgb::WHITE, &pool);
        assert_eq!(m.primary().map(|e| e.name.as_str()), Some("black"));
    }

    #[test]
    fn empty_pool_gives_placeholders() {
        let m = top_matches(Rgb::WHITE, &[]);
        assert!(rank(Rgb::WHITE, &[]).is_empty());
        assert!(m.is_empty());
        assert_eq!(m.secondary(), [None, None]);
    }

    #[test]
    fn short_pool_leaves_trailing_slots_empty() {
        let pool = vec![entry("#ff0000", "red"), entry("#00ff00", "green")];
        let m = top_matches(Rgb::new(0, 200, 0), &pool);
        assert_eq!(m.primary().unwrap().name, "green");
        assert_eq!(m.secondary()[0].unwrap().name, "red");
        assert!(m.secondary()[1].is_none());
        assert!(m.slot(3).is_none());
    }

    #[test]
    fn top_matches_truncates_to_three() {
        let mut pool = primaries();
        pool.push(entry("#fa0a0a", "almost red"));
        let m = top_matches(Rgb::new(250, 10, 10), &pool);
        assert_eq!(m.primary().unwrap().name, "almost red");
        assert_eq!(m.slot(1).unwrap().name, "red");
        assert!(m.slot(2).is_some());
    }
}
