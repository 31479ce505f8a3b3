//! Supported locale tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LinguaError;

/// A supported locale.
///
/// Declaration order is significant: it is the order variants are kept in
/// within a message entry and the order `Locale::ALL` yields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Bulgarian.
    Bg,
}

/// Alternate tags accepted in URL paths and mapped onto a supported locale.
const ALIASES: &[(&str, Locale)] = &[("uk", Locale::En)];

impl Locale {
    /// All supported locales, in declaration order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Bg];

    /// Canonical tag (e.g. `"en"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bg => "bg",
        }
    }

    /// Language name in its own language, for locale pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Bg => "Български",
        }
    }

    /// Whether `tag` is exactly a supported canonical tag.
    pub fn is_locale(tag: &str) -> bool {
        Self::ALL.iter().any(|l| l.as_str() == tag)
    }

    /// Parse a tag, also accepting aliases such as `uk`.
    pub fn from_alias(tag: &str) -> Option<Locale> {
        let lower = tag.to_ascii_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map(|(_, locale)| *locale)
            .or_else(|| lower.parse().ok())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LinguaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "bg" => Ok(Self::Bg),
            _ => Err(LinguaError::UnsupportedLocale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_tags() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("BG".parse::<Locale>().unwrap(), Locale::Bg);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_alias_maps_uk_to_english() {
        assert_eq!(Locale::from_alias("uk"), Some(Locale::En));
        assert_eq!(Locale::from_alias("bg"), Some(Locale::Bg));
        assert_eq!(Locale::from_alias("de"), None);
    }

    #[test]
    fn test_is_locale_is_exact() {
        assert!(Locale::is_locale("en"));
        assert!(!Locale::is_locale("uk"));
        assert!(!Locale::is_locale("EN"));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Locale::En.display_name(), "English");
        assert_eq!(Locale::Bg.display_name(), "Български");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Locale::Bg).unwrap();
        assert_eq!(json, "\"bg\"");
        let back: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Locale::En);
    }
}
