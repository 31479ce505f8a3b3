//! Static message table: message key to per-locale variants.
//!
//! # Invariants
//!
//! 1. **Every entry resolves**: an entry exists only if at least one locale
//!    declares the key, so each entry has a fallback variant.
//!
//! 2. **Stable variant order**: variants inside an entry follow
//!    `Locale::ALL`, whatever order locales were added in.
//!
//! 3. **Immutable**: a built table is never mutated; share it via `Arc`.

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

use lingua_core::error::LinguaError;
use lingua_core::locale::Locale;
use lingua_core::params::MessageParams;

use crate::template::MessageVariant;

#[derive(RustEmbed)]
#[folder = "locales/"]
struct EmbeddedLocales;

/// Flat key-to-source-string map for one locale, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleStrings {
    strings: BTreeMap<String, String>,
}

impl LocaleStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `"key": "source"` pairs.
    pub fn from_json(json: &str) -> Result<Self, LinguaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, source: impl Into<String>) {
        self.strings.insert(key.into(), source.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// All variants of a single message key.
#[derive(Debug, Clone)]
pub struct MessageEntry {
    key: String,
    variants: Vec<(Locale, MessageVariant)>,
    fallback: Locale,
}

impl MessageEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The variant declared for `locale`, if any.
    pub fn variant(&self, locale: Locale) -> Option<&MessageVariant> {
        self.variants
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, v)| v)
    }

    /// Declared variants in locale declaration order.
    pub fn variants(&self) -> impl Iterator<Item = (Locale, &MessageVariant)> {
        self.variants.iter().map(|(l, v)| (*l, v))
    }

    /// The variant used when the requested locale has none.
    pub fn fallback(&self) -> (Locale, &MessageVariant) {
        let variant = self
            .variant(self.fallback)
            .unwrap_or(&self.variants[0].1);
        (self.fallback, variant)
    }

    /// Pick the variant for `locale`, or the fallback. Returns the locale
    /// whose variant was actually chosen.
    pub fn select(&self, locale: Locale) -> (Locale, &MessageVariant) {
        match self.variant(locale) {
            Some(v) => (locale, v),
            None => self.fallback(),
        }
    }

    /// Render the selected variant for `locale`.
    pub fn render(&self, locale: Locale, params: &MessageParams) -> String {
        self.select(locale).1.render(params)
    }

    /// Union of placeholder names across all variants, sorted.
    pub fn param_names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .variants
            .iter()
            .flat_map(|(_, v)| v.placeholders())
            .collect();
        names.into_iter().collect()
    }
}

/// Builder collecting per-locale strings before freezing them into a table.
#[derive(Debug, Clone)]
pub struct MessageTableBuilder {
    base: Locale,
    locales: BTreeMap<Locale, LocaleStrings>,
}

impl MessageTableBuilder {
    /// Add (or replace) the strings of one locale.
    pub fn add_locale(mut self, locale: Locale, strings: LocaleStrings) -> Self {
        self.locales.insert(locale, strings);
        self
    }

    pub fn build(self) -> MessageTable {
        let mut entries: BTreeMap<String, MessageEntry> = BTreeMap::new();

        for locale in Locale::ALL {
            let Some(strings) = self.locales.get(&locale) else {
                continue;
            };
            for (key, source) in strings.iter() {
                let entry = entries
                    .entry(key.to_string())
                    .or_insert_with(|| MessageEntry {
                        key: key.to_string(),
                        variants: Vec::new(),
                        fallback: locale,
                    });
                entry
                    .variants
                    .push((locale, MessageVariant::from_source(source)));
                if locale == self.base {
                    entry.fallback = locale;
                }
            }
        }

        MessageTable {
            base: self.base,
            locales: self.locales.keys().copied().collect(),
            entries,
        }
    }
}

/// Immutable table of every message and its locale variants.
///
/// # Example
///
/// ```
/// use lingua_catalog::table::{LocaleStrings, MessageTable};
/// use lingua_core::locale::Locale;
/// use lingua_core::params::MessageParams;
///
/// let mut en = LocaleStrings::new();
/// en.insert("dashboard_daysAgo", "{days}d ago");
/// let mut bg = LocaleStrings::new();
/// bg.insert("dashboard_daysAgo", "преди {days} дн");
///
/// let table = MessageTable::builder(Locale::En)
///     .add_locale(Locale::En, en)
///     .add_locale(Locale::Bg, bg)
///     .build();
///
/// let entry = table.get("dashboard_daysAgo").unwrap();
/// let params = MessageParams::new().with("days", 3);
/// assert_eq!(entry.render(Locale::Bg, &params), "преди 3 дн");
/// ```
#[derive(Debug, Clone)]
pub struct MessageTable {
    base: Locale,
    locales: Vec<Locale>,
    entries: BTreeMap<String, MessageEntry>,
}

impl MessageTable {
    pub fn builder(base: Locale) -> MessageTableBuilder {
        MessageTableBuilder {
            base,
            locales: BTreeMap::new(),
        }
    }

    /// The catalog compiled into the binary.
    pub fn embedded(base: Locale) -> Result<Self, LinguaError> {
        let mut builder = Self::builder(base);
        for file in EmbeddedLocales::iter() {
            let Some(locale) = locale_for_file(&file) else {
                continue;
            };
            let Some(content) = EmbeddedLocales::get(&file) else {
                continue;
            };
            let json = String::from_utf8_lossy(content.data.as_ref());
            let strings = LocaleStrings::from_json(&json).map_err(|e| {
                LinguaError::Catalog(format!("embedded {file}: {e}"))
            })?;
            builder = builder.add_locale(locale, strings);
        }
        let table = builder.build();
        if table.locales.is_empty() {
            return Err(LinguaError::Catalog("no embedded locale tables".into()));
        }
        Ok(table)
    }

    /// Load `<tag>.json` tables from a directory.
    pub fn from_dir(dir: impl AsRef<Path>, base: Locale) -> Result<Self, LinguaError> {
        let dir = dir.as_ref();
        let read = std::fs::read_dir(dir).map_err(|e| {
            LinguaError::Catalog(format!("failed to read {}: {e}", dir.display()))
        })?;

        let mut builder = Self::builder(base);
        let mut loaded = 0usize;
        for dirent in read {
            let path = dirent?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".json") {
                continue;
            }
            let Some(locale) = locale_for_file(file_name) else {
                warn!("catalog: skipping {}, not a supported locale", path.display());
                continue;
            };
            let content = std::fs::read_to_string(&path).map_err(|e| {
                LinguaError::Catalog(format!("failed to read {}: {e}", path.display()))
            })?;
            let strings = LocaleStrings::from_json(&content).map_err(|e| {
                LinguaError::Catalog(format!("failed to parse {}: {e}", path.display()))
            })?;
            info!("catalog: loaded {} messages for {locale}", strings.len());
            builder = builder.add_locale(locale, strings);
            loaded += 1;
        }

        if loaded == 0 {
            return Err(LinguaError::Catalog(format!(
                "no locale tables found in {}",
                dir.display()
            )));
        }
        Ok(builder.build())
    }

    pub fn base_locale(&self) -> Locale {
        self.base
    }

    /// Locales that contributed at least one table.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn locale_for_file(name: &str) -> Option<Locale> {
    let tag = name.strip_suffix(".json")?;
    if !Locale::is_locale(tag) {
        return None;
    }
    tag.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(pairs: &[(&str, &str)]) -> LocaleStrings {
        let mut s = LocaleStrings::new();
        for (k, v) in pairs {
            s.insert(*k, *v);
        }
        s
    }

    #[test]
    fn test_variants_follow_declaration_order() {
        let table = MessageTable::builder(Locale::En)
            .add_locale(Locale::Bg, strings(&[("hello", "Здравей")]))
            .add_locale(Locale::En, strings(&[("hello", "Hello")]))
            .build();
        let entry = table.get("hello").unwrap();
        let order: Vec<Locale> = entry.variants().map(|(l, _)| l).collect();
        assert_eq!(order, vec![Locale::En, Locale::Bg]);
        assert_eq!(table.locales(), &[Locale::En, Locale::Bg]);
    }

    #[test]
    fn test_missing_variant_uses_base_locale() {
        let table = MessageTable::builder(Locale::En)
            .add_locale(Locale::En, strings(&[("trending_item", "Item")]))
            .add_locale(Locale::Bg, strings(&[]))
            .build();
        let entry = table.get("trending_item").unwrap();
        assert!(entry.variant(Locale::Bg).is_none());
        let (used, variant) = entry.select(Locale::Bg);
        assert_eq!(used, Locale::En);
        assert_eq!(variant.as_constant(), Some("Item"));
    }

    #[test]
    fn test_fallback_is_first_declared_without_base_variant() {
        let table = MessageTable::builder(Locale::En)
            .add_locale(Locale::Bg, strings(&[("only_bg", "Само")]))
            .build();
        let entry = table.get("only_bg").unwrap();
        assert_eq!(entry.fallback().0, Locale::Bg);
        assert_eq!(entry.render(Locale::En, &MessageParams::new()), "Само");
    }

    #[test]
    fn test_fallback_honours_non_default_base() {
        let table = MessageTable::builder(Locale::Bg)
            .add_locale(Locale::En, strings(&[("k", "en")]))
            .add_locale(Locale::Bg, strings(&[("k", "bg")]))
            .build();
        assert_eq!(table.get("k").unwrap().fallback().0, Locale::Bg);
    }

    #[test]
    fn test_param_names_union() {
        let table = MessageTable::builder(Locale::En)
            .add_locale(Locale::En, strings(&[("m", "{count} photo{s}")]))
            .add_locale(Locale::Bg, strings(&[("m", "{count} снимки")]))
            .build();
        assert_eq!(table.get("m").unwrap().param_names(), vec!["count", "s"]);
    }

    #[test]
    fn test_embedded_catalog_loads_both_locales() {
        let table = MessageTable::embedded(Locale::En).unwrap();
        assert_eq!(table.locales(), &[Locale::En, Locale::Bg]);
        assert_eq!(table.len(), 1179);
        assert!(table.contains("dashboard_welcomeBack"));

        let coverage = table.coverage();
        assert_eq!(coverage.locales[0].present, 1179);
        assert_eq!(coverage.locales[1].present, 1170);

        let none = MessageParams::new();
        let render = |key: &str, locale| table.get(key).unwrap().render(locale, &none);
        assert_eq!(render("sell_includes", Locale::Bg), "включва");
        assert_eq!(render("category_women", Locale::En), "Women");
        assert_eq!(render("filter_allCategories", Locale::Bg), "filter_allCategories");
        let keys: Vec<&str> = table.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_from_dir_loads_and_skips_unsupported() {
        let tmp = std::env::temp_dir().join("__lingua_test_from_dir__");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();
        std::fs::write(tmp.join("en.json"), r#"{"a": "A", "b": "B {x}"}"#).unwrap();
        std::fs::write(tmp.join("bg.json"), r#"{"a": "А"}"#).unwrap();
        std::fs::write(tmp.join("fr.json"), r#"{"a": "Ah"}"#).unwrap();
        std::fs::write(tmp.join("notes.txt"), "ignored").unwrap();

        let table = MessageTable::from_dir(&tmp, Locale::En).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.locales(), &[Locale::En, Locale::Bg]);
        assert_eq!(
            table.get("a").unwrap().render(Locale::Bg, &MessageParams::new()),
            "А"
        );

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn test_from_dir_errors() {
        let tmp = std::env::temp_dir().join("__lingua_test_from_dir_errors__");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();

        let empty = MessageTable::from_dir(&tmp, Locale::En).unwrap_err();
        assert!(matches!(empty, LinguaError::Catalog(_)));

        std::fs::write(tmp.join("en.json"), "[1, 2").unwrap();
        let malformed = MessageTable::from_dir(&tmp, Locale::En).unwrap_err();
        assert!(malformed.to_string().contains("failed to parse"));

        let missing = MessageTable::from_dir(tmp.join("nope"), Locale::En).unwrap_err();
        assert!(matches!(missing, LinguaError::Catalog(_)));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
