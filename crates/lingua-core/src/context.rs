use std::sync::{Arc, RwLock};
use tracing::warn;

use crate::{locale::Locale, traits::LocaleAccessor};

/// The active locale for one request or unit of work.
///
/// Passed explicitly through the call chain instead of living in a
/// process-wide global.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocaleContext {
    pub locale: Locale,
}

impl LocaleContext {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl LocaleAccessor for LocaleContext {
    fn current_locale(&self) -> Locale {
        self.locale
    }
}

/// A switchable current locale shared between handles.
///
/// Clones observe each other's updates. Setting an unsupported tag resets
/// to the default locale the handle was created with.
#[derive(Debug, Clone)]
pub struct SharedLocale {
    current: Arc<RwLock<Locale>>,
    default: Locale,
}

impl SharedLocale {
    /// Create a handle whose current and default locale are `default`.
    pub fn new(default: Locale) -> Self {
        Self {
            current: Arc::new(RwLock::new(default)),
            default,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn get_locale(&self) -> Locale {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the current locale from a tag.
    ///
    /// An unsupported tag falls back to the default locale.
    pub fn set_locale(&self, tag: &str) -> Locale {
        let locale = match tag.parse::<Locale>() {
            Ok(locale) if Locale::is_locale(tag) => locale,
            _ => {
                warn!(
                    "unsupported locale '{tag}', resetting to '{}'",
                    self.default
                );
                self.default
            }
        };
        self.apply_locale(locale);
        locale
    }

    pub fn apply_locale(&self, locale: Locale) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = locale;
    }

    /// Snapshot the current locale into a request-scoped context.
    pub fn context(&self) -> LocaleContext {
        LocaleContext::new(self.get_locale())
    }
}

impl LocaleAccessor for SharedLocale {
    fn current_locale(&self) -> Locale {
        self.get_locale()
    }
}
