use crate::{locale::Locale, params::MessageParams};

/// Message source trait: where localized strings come from.
///
/// Every delivery strategy (an in-process table, a server-side registry,
/// etc.) implements this trait so the resolver can stay agnostic of it.
pub trait MessageSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Produce the string for `key` in `locale`, rendering `params` into it.
    ///
    /// Returns `None` only when the source knows nothing about `key`.
    /// A missing translation for `locale` is not `None`: the source applies
    /// its own fallback variant.
    fn lookup(&self, key: &str, locale: Locale, params: &MessageParams) -> Option<String>;
}

/// Call tracker trait: a fire-and-forget observability hook.
///
/// Invoked once per resolution. Implementations must not block or panic.
pub trait CallTracker: Send + Sync {
    fn track(&self, key: &str, locale: Locale);
}

/// Yields the locale to use when a caller does not pass one explicitly.
pub trait LocaleAccessor: Send + Sync {
    fn current_locale(&self) -> Locale;
}
