//! Product catalog: entries, tabular parsing, sources and the per-activation
//! load cache.
//!
//! The feed is a published spreadsheet, comma- or tab-delimited. Only the
//! `hex` column is required; headers are accepted in English or Spanish.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::color::{Rgb, hex_to_rgb, normalize_hex};
use crate::error::CatalogError;
use crate::filter::{self, SearchFilter};

/// One product with a fixed display color.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Normalized `#rrggbb`; the source of truth for `rgb`.
    pub hex: String,
    pub rgb: Rgb,
    pub brand: String,
    pub kind: String,
    pub style: String,
    pub temperature: String,
    pub strength: String,
    pub link: String,
    pub image_url: String,
    pub ideas: Vec<String>,
}

impl CatalogEntry {
    /// Build an entry from a hex color, or `None` if it is not a color.
    pub fn with_hex(hex: &str) -> Option<Self> {
        let hex = normalize_hex(hex)?;
        let rgb = hex_to_rgb(&hex)?;
        Some(Self {
            id: String::new(),
            name: String::new(),
            hex,
            rgb,
            brand: String::new(),
            kind: String::new(),
            style: String::new(),
            temperature: String::new(),
            strength: String::new(),
            link: String::new(),
            image_url: String::new(),
            ideas: Vec::new(),
        })
    }

    /// Name for display, falling back to a placeholder.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    /// `brand · type · style`, with `-` for blanks.
    pub fn summary(&self) -> String {
        format!(
            "{} · {} · {}",
            or_dash(&self.brand),
            or_dash(&self.kind),
            or_dash(&self.style)
        )
    }
}

pub(crate) fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

/// Result of parsing a feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCatalog {
    pub entries: Vec<CatalogEntry>,
    /// Rows skipped because their hex failed validation.
    pub dropped: usize,
}

/// Column indices resolved from the header row.
#[derive(Debug)]
struct Columns {
    id: Option<usize>,
    name: Option<usize>,
    hex: usize,
    brand: Option<usize>,
    kind: Option<usize>,
    style: Option<usize>,
    temperature: Option<usize>,
    strength: Option<usize>,
    link: Option<usize>,
    image: Option<usize>,
    ideas: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, CatalogError> {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|n| headers.iter().position(|h| h == n))
        };
        let hex = find(&["hex"]).ok_or_else(|| CatalogError::missing_column("hex"))?;
        Ok(Self {
            id: find(&["id"]),
            name: find(&["name", "nombre"]),
            hex,
            brand: find(&["brand", "marca"]),
            kind: find(&["type", "tipo"]),
            style: find(&["style", "estilo"]),
            temperature: find(&["temp", "temperatura"]),
            strength: find(&["strength", "resistencia"]),
            link: find(&["link", "url"]),
            image: find(&["img", "image"]),
            ideas: find(&["ideas"]),
        })
    }
}

fn looks_like_html(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.match_indices('<').any(|(i, _)| {
        lower[i + 1..]
            .trim_start()
            .starts_with("html")
    })
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Split a semicolon-separated ideas cell into trimmed, non-empty items.
pub fn split_ideas(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma- or tab-delimited feed into catalog entries.
///
/// Fails on HTML bodies and when the `hex` column is missing. Rows with an
/// invalid hex are counted in [`ParsedCatalog::dropped`] and skipped.
pub fn parse_catalog(text: &str) -> Result<ParsedCatalog, CatalogError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n");
    if looks_like_html(&text) {
        return Err(CatalogError::HtmlResponse);
    }

    let header_line = text.split('\n').next().unwrap_or_default();
    let delim = if header_line.contains('\t') { '\t' } else { ',' };

    let mut lines = text.trim().split('\n');
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split(delim)
        .map(|h| unquote(h.trim()).to_lowercase().trim().to_string())
        .collect();
    let cols = Columns::resolve(&headers)?;

    let mut parsed = ParsedCatalog::default();
    for (row, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(delim).map(|f| unquote(f.trim())).collect();
        let cell = |ix: Option<usize>| {
            ix.and_then(|i| fields.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let raw_hex = fields.get(cols.hex).copied().unwrap_or_default();
        let Some(mut entry) = CatalogEntry::with_hex(raw_hex) else {
            log::debug!("Dropping catalog row {}: invalid hex {:?}", row + 2, raw_hex);
            parsed.dropped += 1;
            continue;
        };
        entry.id = cell(cols.id);
        entry.name = cell(cols.name);
        entry.brand = cell(cols.brand);
        entry.kind = cell(cols.kind);
        entry.style = cell(cols.style);
        entry.temperature = cell(cols.temperature);
        entry.strength = cell(cols.strength);
        entry.link = cell(cols.link);
        entry.image_url = cell(cols.image);
        entry.ideas = split_ideas(&cell(cols.ideas));
        parsed.entries.push(entry);
    }

    Ok(parsed)
}

/// Where the catalog text comes from.
///
/// `fetch` runs off the UI thread, hence `Send`.
pub trait CatalogSource: Send {
    /// Short description for log messages.
    fn describe(&self) -> String;

    /// Fetch the raw feed text.
    fn fetch(&self) -> Result<String, CatalogError>;

    /// Fetch and parse.
    fn load(&self) -> Result<ParsedCatalog, CatalogError> {
        parse_catalog(&self.fetch()?)
    }
}

/// A feed exported to a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, CatalogError> {
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Err(CatalogError::unavailable(self.describe(), "empty file"));
        }
        Ok(text)
    }
}

/// A feed already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource(pub String);

impl CatalogSource for TextSource {
    fn describe(&self) -> String {
        format!("in-memory feed ({} bytes)", self.0.len())
    }

    fn fetch(&self) -> Result<String, CatalogError> {
        Ok(self.0.clone())
    }
}

/// Lifecycle of the one-shot catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Catalog items plus the active pool handed to the matcher.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogEntry>,
    /// Indices into `items`.
    pool: Vec<usize>,
    state: LoadState,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded catalog holding `items`, all of them in the pool.
    pub fn from_entries(items: Vec<CatalogEntry>) -> Self {
        let pool = (0..items.len()).collect();
        Self {
            items,
            pool,
            state: LoadState::Loaded,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Claim the load. Returns `true` only the first time; later calls are
    /// no-ops whether the first load is in flight, done, or failed.
    pub fn begin_load(&mut self) -> bool {
        if self.state != LoadState::Idle {
            log::debug!("Catalog load already {:?}, not fetching again", self.state);
            return false;
        }
        self.state = LoadState::Loading;
        true
    }

    /// Store the outcome of a load. Errors are logged and leave the catalog
    /// empty; there is no retry.
    pub fn finish_load(&mut self, result: Result<ParsedCatalog, CatalogError>) {
        match result {
            Ok(parsed) => {
                log::info!(
                    "Catalog loaded: {} entries, {} rows dropped",
                    parsed.entries.len(),
                    parsed.dropped
                );
                *self = Self::from_entries(parsed.entries);
            }
            Err(e) => {
                log::error!("Catalog load failed: {e}");
                self.items.clear();
                self.pool.clear();
                self.state = LoadState::Failed;
            }
        }
    }

    pub fn items(&self) -> &[CatalogEntry] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.items.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indices of the active pool.
    pub fn pool_indices(&self) -> &[usize] {
        &self.pool
    }

    /// Entries of the active pool, in catalog order.
    pub fn pool(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.pool.iter().filter_map(|&i| self.items.get(i))
    }

    /// Recompute the active pool from `filter`.
    pub fn apply_filter(&mut self, filter: &SearchFilter) {
        self.pool = filter::active_pool(&self.items, filter);
    }

    /// Distinct non-empty types, sorted, for the type filter control.
    ///
    /// Types differing only in case are one type, as the filter treats them;
    /// the first spelling in the feed is kept.
    pub fn types(&self) -> Vec<String> {
        let mut types = BTreeMap::new();
        for e in self.items.iter().filter(|e| !e.kind.is_empty()) {
            types
                .entry(e.kind.to_lowercase())
                .or_insert_with(|| e.kind.clone());
        }
        types.into_values().collect()
    }
}
