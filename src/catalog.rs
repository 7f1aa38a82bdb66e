//! The fixed list of selectable items and their images.
//!
//! A catalog is built once and never changes afterwards. Every item should map
//! to an image reference; a missing mapping is a configuration defect that is
//! rendered with [`PLACEHOLDER_IMAGE`] instead of failing.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image reference used for items without a mapping
pub const PLACEHOLDER_IMAGE: &str = "placeholder";

/// Errors raised while building a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// An item name was empty or only whitespace
    #[error("Catalog item #{0} has an empty name")]
    EmptyName(usize),
    /// The same name appears twice
    #[error("Duplicate catalog item {0:?}")]
    DuplicateItem(String),
    /// No item at all
    #[error("Catalog is empty")]
    Empty,
    /// The catalog file could not be read
    #[error("Failed to read catalog file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    /// The catalog file is not valid RON
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One record of a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, also used as the item's identity
    pub name: String,
    /// Image reference (usually an URL)
    #[serde(default)]
    pub image: Option<String>,
}

/// Ordered, immutable set of item names with their image references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: IndexMap<String, Option<String>>,
}

impl Catalog {
    /// Build a catalog from `(name, image)` pairs, keeping their order
    pub fn from_entries<I, N>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (N, Option<String>)>,
        N: Into<String>,
    {
        let mut items = IndexMap::new();
        for (idx, (name, image)) in entries.into_iter().enumerate() {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName(idx));
            }
            if image.is_none() {
                warn!("catalog item {name:?} has no image, a placeholder will be shown");
            }
            if items.insert(name.clone(), image).is_some() {
                return Err(CatalogError::DuplicateItem(name));
            }
        }
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { items })
    }

    /// Parse a RON list of [`CatalogEntry`]
    ///
    /// ```ron
    /// [
    ///     (name: "Goa", image: Some("https://example.com/goa.jpg")),
    ///     (name: "Kerala"),
    /// ]
    /// ```
    pub fn from_ron_str(s: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = ron::from_str(s)?;
        Self::from_entries(entries.into_iter().map(|e| (e.name, e.image)))
    }

    /// Read a catalog from a RON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(path.display().to_string(), e))?;
        debug!("loading catalog from {}", path.display());
        Self::from_ron_str(&content)
    }

    /// The built-in catalog of Indian regions
    pub fn regions() -> Self {
        const REGIONS: [(&str, &str); 5] = [
            ("New Delhi", "https://images.unsplash.com/photo-1587474260584-136574528ed5?q=80&w=2370&auto=format&fit=crop"),
            ("Haryana", "https://images.unsplash.com/photo-1605469237567-a39930679526?q=80&w=2370&auto=format&fit=crop"),
            ("Telegana", "https://images.unsplash.com/photo-1699636250199-2a6998981619?q=80&w=2370&auto=format&fit=crop"),
            ("Karnataka", "https://images.unsplash.com/photo-1631714712922-eaa39e4452fa?q=80&w=2370&auto=format&fit=crop"),
            ("Himachal Pradesh", "https://images.unsplash.com/photo-1597074866923-dc0589150358?q=80&w=2370&auto=format&fit=crop"),
        ];
        Self {
            items: REGIONS
                .iter()
                .map(|(name, url)| (name.to_string(), Some(url.to_string())))
                .collect(),
        }
    }

    /// Item names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Position of the item in the catalog
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.get_index_of(name)
    }

    /// Whether the catalog knows the item
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Image reference of the item, or [`PLACEHOLDER_IMAGE`] when it has none
    pub fn image(&self, name: &str) -> &str {
        self.items
            .get(name)
            .and_then(|image| image.as_deref())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Whether the item has a real image mapping
    pub fn has_image(&self, name: &str) -> bool {
        self.items.get(name).is_some_and(Option::is_some)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a catalog built through the public constructors
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::regions()
    }
}
