//! Catalog diagnostics: translation coverage and authoring issues.
//!
//! Issues are reported, never fixed: the table keeps its contents as given.

use serde::Serialize;
use std::fmt;

use lingua_core::locale::Locale;

use crate::table::MessageTable;

/// Coverage of one locale over all keys in the table.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleCoverage {
    pub locale: Locale,
    pub present: usize,
    pub missing: Vec<String>,
    /// In `[0, 100]`.
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total_keys: usize,
    pub locales: Vec<LocaleCoverage>,
}

/// A suspicious entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    /// A variant's placeholders differ from the fallback variant's.
    PlaceholderMismatch {
        key: String,
        locale: Locale,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// A variant whose text is just its own key: an untranslated stub.
    KeyEcho { key: String, locale: Locale },
    /// Identical text in every locale.
    Untranslated { key: String, locales: Vec<Locale> },
}

impl CatalogIssue {
    pub fn key(&self) -> &str {
        match self {
            Self::PlaceholderMismatch { key, .. }
            | Self::KeyEcho { key, .. }
            | Self::Untranslated { key, .. } => key,
        }
    }

    /// Whether the issue breaks rendering rather than just looking odd.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaceholderMismatch {
                key,
                locale,
                expected,
                found,
            } => write!(
                f,
                "{key} [{locale}]: placeholders {found:?}, fallback has {expected:?}"
            ),
            Self::KeyEcho { key, locale } => write!(f, "{key} [{locale}]: text is the key itself"),
            Self::Untranslated { key, locales } => {
                let tags: Vec<&str> = locales.iter().map(Locale::as_str).collect();
                write!(f, "{key}: same text in {}", tags.join(", "))
            }
        }
    }
}

impl MessageTable {
    pub fn coverage(&self) -> CoverageReport {
        let total_keys = self.len();
        let locales = self
            .locales()
            .iter()
            .map(|&locale| {
                let missing: Vec<String> = self
                    .entries()
                    .filter(|e| e.variant(locale).is_none())
                    .map(|e| e.key().to_string())
                    .collect();
                let present = total_keys - missing.len();
                let percent = if total_keys == 0 {
                    100.0
                } else {
                    present as f64 * 100.0 / total_keys as f64
                };
                LocaleCoverage {
                    locale,
                    present,
                    missing,
                    percent,
                }
            })
            .collect();
        CoverageReport {
            total_keys,
            locales,
        }
    }

    /// Authoring issues, ordered by key.
    pub fn issues(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        for entry in self.entries() {
            let key = entry.key();
            let (fallback_locale, fallback) = entry.fallback();
            let expected = sorted_names(fallback.placeholders());

            for (locale, variant) in entry.variants() {
                if locale != fallback_locale {
                    let found = sorted_names(variant.placeholders());
                    if found != expected {
                        issues.push(CatalogIssue::PlaceholderMismatch {
                            key: key.to_string(),
                            locale,
                            expected: expected.clone(),
                            found,
                        });
                    }
                }
                if variant.as_constant() == Some(key) {
                    issues.push(CatalogIssue::KeyEcho {
                        key: key.to_string(),
                        locale,
                    });
                }
            }

            let locales: Vec<Locale> = entry.variants().map(|(l, _)| l).collect();
            if locales.len() > 1 {
                if let Some(text) = fallback.as_constant() {
                    let all_same = entry
                        .variants()
                        .all(|(_, v)| v.as_constant() == Some(text));
                    if all_same && text != key && text.chars().any(char::is_alphabetic) {
                        issues.push(CatalogIssue::Untranslated {
                            key: key.to_string(),
                            locales,
                        });
                    }
                }
            }
        }
        issues
    }
}

fn sorted_names(names: Vec<&str>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LocaleStrings;

    fn table(en: &[(&str, &str)], bg: &[(&str, &str)]) -> MessageTable {
        let mut en_s = LocaleStrings::new();
        for (k, v) in en {
            en_s.insert(*k, *v);
        }
        let mut bg_s = LocaleStrings::new();
        for (k, v) in bg {
            bg_s.insert(*k, *v);
        }
        MessageTable::builder(Locale::En)
            .add_locale(Locale::En, en_s)
            .add_locale(Locale::Bg, bg_s)
            .build()
    }

    #[test]
    fn test_coverage_counts_missing_keys() {
        let t = table(&[("a", "A"), ("b", "B")], &[("a", "А")]);
        let report = t.coverage();
        assert_eq!(report.total_keys, 2);
        let bg = &report.locales[1];
        assert_eq!(bg.locale, Locale::Bg);
        assert_eq!(bg.present, 1);
        assert_eq!(bg.missing, vec!["b".to_string()]);
        assert!((bg.percent - 50.0).abs() < f64::EPSILON);
        assert!((report.locales[0].percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_of_empty_table_is_complete() {
        let t = table(&[], &[]);
        for cov in t.coverage().locales {
            assert!((0.0..=100.0).contains(&cov.percent));
            assert!((cov.percent - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_issue_kinds() {
        let t = table(
            &[
                ("banner_brand", "DRIPLO"),
                ("count", "{n} items"),
                ("filter_allCategories", "All Categories"),
                ("price", "$5"),
            ],
            &[
                ("banner_brand", "DRIPLO"),
                ("count", "{count} артикула"),
                ("filter_allCategories", "filter_allCategories"),
                ("price", "$5"),
            ],
        );
        let issues = t.issues();
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert_eq!(
            issues[0],
            CatalogIssue::Untranslated {
                key: "banner_brand".into(),
                locales: vec![Locale::En, Locale::Bg],
            }
        );
        assert!(issues[1].is_error());
        assert_eq!(issues[1].key(), "count");
        assert_eq!(
            issues[2],
            CatalogIssue::KeyEcho {
                key: "filter_allCategories".into(),
                locale: Locale::Bg,
            }
        );
    }

    #[test]
    fn test_embedded_catalog_has_no_placeholder_mismatches() {
        let t = MessageTable::embedded(Locale::En).unwrap();
        let errors: Vec<_> = t.issues().into_iter().filter(CatalogIssue::is_error).collect();
        assert!(errors.is_empty(), "{errors:?}");
        assert!(t.issues().contains(&CatalogIssue::KeyEcho {
            key: "filter_allCategories".into(),
            locale: Locale::Bg,
        }));
    }
}
