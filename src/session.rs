//! Per-instance tool state: the HSV cursor, the drag flags, the catalog and
//! the search. Views hold a session in a signal and call into it from pointer
//! and input events; nothing here is global.

use std::time::Instant;

use crate::catalog::{Catalog, CatalogEntry, CatalogSource, ParsedCatalog};
use crate::color::{Hsv, Rgb, hex_to_rgb, normalize_hex};
use crate::config::ToolConfig;
use crate::debounce::Debouncer;
use crate::error::CatalogError;
use crate::filter::{self, SearchFilter, TypeFilter};
use crate::matcher::{self, Matches};
use crate::raster::{self, WheelGeometry};

/// Which control, if any, currently owns the pointer.
///
/// At most one flag is set: pressing one control clears the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub wheel: bool,
    pub bar: bool,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.wheel || self.bar
    }
}

/// Readout of the selected color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub rgb: Rgb,
    /// `#rrggbb`
    pub hex: String,
    /// `r, g, b`
    pub rgb_text: String,
}

impl From<Rgb> for Selection {
    fn from(rgb: Rgb) -> Self {
        Self {
            rgb,
            hex: rgb.to_hex(),
            rgb_text: rgb.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ColorSession {
    hsv: Hsv,
    last_rgb: Option<Rgb>,
    drag: DragState,
    wheel: WheelGeometry,
    bar_width: u32,
    bar_height: u32,
    catalog: Catalog,
    filter: SearchFilter,
    search: Debouncer<SearchFilter>,
    suggestion_limit: usize,
    /// Card pinned from a suggestion or a secondary match. Cleared whenever
    /// the matches are recomputed.
    featured: Option<CatalogEntry>,
}

impl Default for ColorSession {
    fn default() -> Self {
        Self::new(&ToolConfig::default())
    }
}

impl ColorSession {
    pub fn new(config: &ToolConfig) -> Self {
        let size = config.wheel_size;
        Self {
            hsv: Hsv::default(),
            last_rgb: None,
            drag: DragState::default(),
            wheel: WheelGeometry::for_canvas(size, size, config.wheel_margin as f64),
            bar_width: config.bar_width,
            bar_height: size,
            catalog: Catalog::new(),
            filter: SearchFilter::default(),
            search: Debouncer::new(config.search_debounce()),
            suggestion_limit: config.suggestion_limit,
            featured: None,
        }
    }

    // ── Selection ──────────────────────────────────────────────────────

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    /// Color of the last interaction, `None` before the first one.
    pub fn last_rgb(&self) -> Option<Rgb> {
        self.last_rgb
    }

    /// Readout for the current cursor.
    pub fn selection(&self) -> Selection {
        self.last_rgb.unwrap_or_else(|| self.hsv.to_rgb()).into()
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn wheel_geometry(&self) -> &WheelGeometry {
        &self.wheel
    }

    /// Value bar raster size as `(width, height)`.
    pub fn bar_size(&self) -> (u32, u32) {
        (self.bar_width, self.bar_height)
    }

    fn resolve(&mut self) -> Rgb {
        let rgb = self.hsv.to_rgb();
        self.last_rgb = Some(rgb);
        self.featured = None;
        rgb
    }

    // ── Pointer input ──────────────────────────────────────────────────

    /// Pointer pressed on the wheel at canvas point `(x, y)`.
    pub fn press_wheel(&mut self, x: f64, y: f64) -> Option<Rgb> {
        self.drag = DragState {
            wheel: true,
            bar: false,
        };
        self.sample_wheel(x, y)
    }

    /// Pointer moved while the wheel may be held. Returns the new color, or
    /// `None` when the wheel is not held or the point is off the disk.
    pub fn drag_wheel(&mut self, x: f64, y: f64) -> Option<Rgb> {
        if !self.drag.wheel {
            return None;
        }
        self.sample_wheel(x, y)
    }

    fn sample_wheel(&mut self, x: f64, y: f64) -> Option<Rgb> {
        let (h, s) = self.wheel.pick(x, y)?;
        self.hsv.h = h;
        self.hsv.s = s;
        Some(self.resolve())
    }

    /// Pointer pressed on the value bar at bar row `y`.
    pub fn press_bar(&mut self, y: f64) -> Rgb {
        self.drag = DragState {
            wheel: false,
            bar: true,
        };
        self.sample_bar(y)
    }

    /// Pointer moved while the value bar may be held.
    pub fn drag_bar(&mut self, y: f64) -> Option<Rgb> {
        if !self.drag.bar {
            return None;
        }
        Some(self.sample_bar(y))
    }

    fn sample_bar(&mut self, y: f64) -> Rgb {
        self.hsv.v = raster::value_at(y, self.bar_height as f64);
        self.resolve()
    }

    /// Pointer released anywhere.
    pub fn release(&mut self) {
        self.drag = DragState::default();
    }

    /// Set the selection from a typed hex value. Invalid input is rejected
    /// and leaves the session untouched, and so does the hex already shown:
    /// re-committing it must not snap the cursor or drop the pinned card.
    pub fn set_hex(&mut self, input: &str) -> Option<Rgb> {
        let hex = normalize_hex(input)?;
        let rgb = hex_to_rgb(&hex)?;
        if hex == self.selection().hex {
            return Some(rgb);
        }
        self.set_rgb(rgb);
        Some(rgb)
    }

    /// Move the cursor to `rgb`. Grays keep the current hue.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        let hsv = rgb.to_hsv();
        if hsv.s > 0.0 && hsv.v > 0.0 {
            self.hsv.h = hsv.h;
        }
        self.hsv.s = hsv.s;
        self.hsv.v = hsv.v;
        self.last_rgb = Some(rgb);
        self.featured = None;
    }

    // ── Catalog ────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Claim the one-shot catalog load; see [`Catalog::begin_load`].
    pub fn begin_load(&mut self) -> bool {
        self.catalog.begin_load()
    }

    /// Store a finished load and re-apply the current filter to it.
    pub fn finish_load(&mut self, result: Result<ParsedCatalog, CatalogError>) {
        self.catalog.finish_load(result);
        self.catalog.apply_filter(&self.filter);
        self.featured = None;
    }

    /// Load synchronously from `source`, at most once per session.
    pub fn load_catalog(&mut self, source: &dyn CatalogSource) {
        if !self.begin_load() {
            return;
        }
        log::info!("Loading catalog from {}", source.describe());
        self.finish_load(source.load());
    }

    // ── Search ─────────────────────────────────────────────────────────

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Record a search edit; it applies once input has been quiet long enough.
    pub fn search_input(&mut self, filter: SearchFilter, now: Instant) {
        self.search.schedule(filter, now);
    }

    /// Apply the pending search if it is due. Returns whether it ran.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(filter) => {
                self.apply_filter(filter);
                true
            }
            None => false,
        }
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Re-filter the active pool right away.
    pub fn apply_filter(&mut self, filter: SearchFilter) {
        self.catalog.apply_filter(&filter);
        log::debug!(
            "Filter {:?} / {:?}: {} of {} entries in pool",
            filter.query,
            filter.kind.as_value(),
            self.catalog.pool_indices().len(),
            self.catalog.items().len()
        );
        self.filter = filter;
        self.featured = None;
    }

    /// The type filter after `current`: `*`, then each catalog type, then
    /// back to `*`.
    pub fn next_type_filter(&self, current: &TypeFilter) -> TypeFilter {
        let types = self.catalog.types();
        let next = match current {
            TypeFilter::Any => types.first(),
            TypeFilter::Exact(current) => {
                let current = current.to_lowercase();
                types
                    .iter()
                    .position(|t| t.to_lowercase() == current)
                    .and_then(|i| types.get(i + 1))
            }
        };
        next.map_or(TypeFilter::Any, |t| TypeFilter::Exact(t.clone()))
    }

    /// Entries listed under the search box.
    pub fn suggestions(&self) -> Vec<&CatalogEntry> {
        filter::suggestions(
            self.catalog.pool_indices(),
            &self.filter,
            self.suggestion_limit,
        )
        .into_iter()
        .filter_map(|i| self.catalog.get(i))
        .collect()
    }

    // ── Matches ────────────────────────────────────────────────────────

    /// Top matches of the active pool for the last selected color.
    pub fn matches(&self) -> Matches {
        match self.last_rgb {
            Some(rgb) => matcher::top_matches(rgb, self.catalog.pool()),
            None => Matches::default(),
        }
    }

    /// Pin `entry` to the primary card until the next recomputation.
    pub fn feature(&mut self, entry: CatalogEntry) {
        self.featured = Some(entry);
    }

    pub fn featured(&self) -> Option<&CatalogEntry> {
        self.featured.as_ref()
    }

    /// What the primary card shows: the pinned entry, else the best match.
    pub fn primary_card(&self) -> Option<CatalogEntry> {
        self.featured
            .clone()
            .or_else(|| self.matches().primary().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TextSource;
    use std::time::Duration;

    const FEED: &str = "name,hex,type\n\
        Red,#ff0000,Matte\n\
        Green,#00ff00,Gloss\n\
        Blue,#0000ff,Gloss\n\
        Dark Red,#800000,Matte\n";

    fn config() -> ToolConfig {
        ToolConfig {
            wheel_size: 100,
            wheel_margin: 10,
            ..ToolConfig::default()
        }
    }

    fn loaded() -> ColorSession {
        let mut session = ColorSession::new(&config());
        session.load_catalog(&TextSource(FEED.to_string()));
        session
    }

    #[test]
    fn starts_at_full_red_without_matches() {
        let session = loaded();
        assert_eq!(session.hsv(), Hsv::new(0.0, 1.0, 1.0));
        assert_eq!(session.last_rgb(), None);
        assert!(session.matches().is_empty());
        assert_eq!(session.selection().hex, "#ff0000");
    }

    #[test]
    fn wheel_press_and_drag_update_hue_and_saturation() {
        let mut session = loaded();
        // rim, pointing down: hue 1/4
        let rgb = session.press_wheel(50.0, 90.0).unwrap();
        assert!(session.drag().wheel);
        assert!((session.hsv().h - 0.25).abs() < 1e-12);
        assert_eq!(session.hsv().s, 1.0);
        assert_eq!(session.last_rgb(), Some(rgb));

        let rgb = session.drag_wheel(50.0, 50.0).unwrap();
        assert_eq!(session.hsv().s, 0.0);
        assert_eq!(rgb, Rgb::new(255, 255, 255));
    }

    #[test]
    fn drag_outside_wheel_is_ignored() {
        let mut session = loaded();
        session.press_wheel(90.0, 50.0);
        let before = session.hsv();
        assert_eq!(session.drag_wheel(0.0, 0.0), None);
        assert_eq!(session.hsv(), before);
        // the press still owns the pointer
        assert!(session.drag().wheel);
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut session = loaded();
        assert_eq!(session.drag_wheel(50.0, 50.0), None);
        assert_eq!(session.drag_bar(10.0), None);
        assert_eq!(session.last_rgb(), None);
    }

    #[test]
    fn bar_sets_value_and_release_clears_drag() {
        let mut session = loaded();
        let rgb = session.press_bar(50.0);
        assert!(session.drag().bar && !session.drag().wheel);
        assert_eq!(session.hsv().v, 0.5);
        assert_eq!(rgb, Rgb::new(128, 0, 0));

        assert_eq!(session.drag_bar(200.0), Some(Rgb::BLACK));
        session.release();
        assert!(!session.drag().is_dragging());
        assert_eq!(session.drag_bar(0.0), None);
    }

    #[test]
    fn pressing_one_control_releases_the_other() {
        let mut session = loaded();
        session.press_bar(10.0);
        session.press_wheel(50.0, 50.0);
        assert_eq!(
            session.drag(),
            DragState {
                wheel: true,
                bar: false
            }
        );
        assert_eq!(session.drag_bar(0.0), None);
    }

    #[test]
    fn interaction_ranks_catalog() {
        let mut session = loaded();
        session.press_bar(0.0);
        let m = session.matches();
        assert_eq!(m.primary().unwrap().name, "Red");
        assert_eq!(m.slot(1).unwrap().name, "Dark Red");
    }

    #[test]
    fn set_hex_moves_cursor_and_rejects_garbage() {
        let mut session = loaded();
        assert_eq!(session.set_hex("#00f"), Some(Rgb::new(0, 0, 255)));
        assert!((session.hsv().h - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(session.matches().primary().unwrap().name, "Blue");

        let before = session.hsv();
        assert_eq!(session.set_hex("blue"), None);
        assert_eq!(session.hsv(), before);
        assert_eq!(session.last_rgb(), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn gray_keeps_hue() {
        let mut session = loaded();
        session.set_hex("#00ff00");
        let hue = session.hsv().h;
        session.set_hex("#777777");
        assert_eq!(session.hsv().h, hue);
        assert_eq!(session.hsv().s, 0.0);
    }

    #[test]
    fn search_is_debounced() {
        let mut session = loaded();
        session.set_rgb(Rgb::new(255, 0, 0));
        let t0 = Instant::now();
        let gloss = |q: &str| SearchFilter::new(q, TypeFilter::parse("Gloss"));
        session.search_input(gloss("g"), t0);
        session.search_input(gloss("gr"), t0 + Duration::from_millis(50));
        assert!(!session.poll_search(t0 + Duration::from_millis(120)));
        assert_eq!(session.filter(), &SearchFilter::default());
        assert!(session.poll_search(t0 + Duration::from_millis(170)));
        assert_eq!(session.filter().query, "gr");
        assert_eq!(session.matches().primary().unwrap().name, "Green");
        assert!(session.matches().slot(1).is_none());
    }

    #[test]
    fn filter_without_hits_uses_whole_catalog() {
        let mut session = loaded();
        session.set_hex("#0000ff");
        session.apply_filter(SearchFilter::new("purple", TypeFilter::Any));
        assert_eq!(session.catalog().pool_indices().len(), 4);
        assert_eq!(session.matches().primary().unwrap().name, "Blue");
    }

    #[test]
    fn suggestions_follow_the_pool() {
        let mut session = loaded();
        assert!(session.suggestions().is_empty());
        session.apply_filter(SearchFilter::new("red", TypeFilter::Any));
        let names: Vec<&str> = session.suggestions().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Dark Red"]);
    }

    #[test]
    fn featured_entry_is_cleared_by_new_selection() {
        let mut session = loaded();
        session.set_rgb(Rgb::new(255, 0, 0));
        let blue = session.catalog().items()[2].clone();
        session.feature(blue);
        assert_eq!(session.primary_card().unwrap().name, "Blue");
        session.press_bar(0.0);
        assert!(session.featured().is_none());
        assert_eq!(session.primary_card().unwrap().name, "Red");
    }

    #[test]
    fn type_filter_cycles_through_catalog_types() {
        let session = loaded();
        let gloss = session.next_type_filter(&TypeFilter::Any);
        assert_eq!(gloss, TypeFilter::parse("Gloss"));
        let matte = session.next_type_filter(&gloss);
        assert_eq!(matte, TypeFilter::parse("Matte"));
        assert_eq!(session.next_type_filter(&matte), TypeFilter::Any);
        // unknown types restart the cycle
        assert_eq!(
            session.next_type_filter(&TypeFilter::parse("Chalk")),
            TypeFilter::Any
        );
    }

    #[test]
    fn recommitting_the_shown_hex_changes_nothing() {
        let mut session = loaded();
        assert_eq!(session.set_hex("#FF0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(session.last_rgb(), None);

        session.press_wheel(70.0, 50.0);
        session.press_bar(100.0);
        session.release();
        let before = session.hsv();
        assert!(before.s > 0.0);
        assert_eq!(before.v, 0.0);
        let blue = session.catalog().items()[2].clone();
        session.feature(blue.clone());

        let shown = session.selection().hex;
        assert_eq!(session.set_hex(&shown), Some(Rgb::BLACK));
        assert_eq!(session.hsv(), before);
        assert_eq!(session.featured(), Some(&blue));

        // a different value still applies
        assert!(session.set_hex("00ff00").is_some());
        assert!(session.featured().is_none());
    }

    #[test]
    fn type_filter_cycle_merges_case_variants() {
        let mut session = ColorSession::new(&config());
        session.load_catalog(&TextSource(
            "name,hex,type\nA,#ff0000,Gloss\nB,#00ff00,gloss\n".to_string(),
        ));
        let mut current = TypeFilter::Any;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = session.next_type_filter(&current);
            seen.push(current.as_value().to_string());
        }
        assert_eq!(seen, vec!["Gloss", "*", "Gloss", "*"]);
        // the lowercase spelling still belongs to the cycle
        assert_eq!(
            session.next_type_filter(&TypeFilter::parse("gloss")),
            TypeFilter::Any
        );
    }

    #[test]
    fn failed_load_degrades_to_no_matches() {
        let mut session = ColorSession::new(&config());
        session.load_catalog(&TextSource("<html><body>sign in</body></html>".to_string()));
        assert!(session.catalog().is_empty());
        // wheel still works
        assert!(session.press_wheel(50.0, 50.0).is_some());
        assert!(session.matches().is_empty());
        // and no second attempt
        assert!(!session.begin_load());
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = loaded();
        let b = loaded();
        a.press_bar(100.0);
        assert_eq!(a.hsv().v, 0.0);
        assert_eq!(b.hsv().v, 1.0);
    }
}
