//! The message resolver: one lookup path for every message key.
//!
//! The effective locale is the caller's explicit locale, otherwise the
//! resolver's locale accessor. Variant selection and fallback belong to the
//! configured [`MessageSource`]. Every call is reported to the
//! [`CallTracker`] after the lookup. Resolution never fails: an unknown key
//! resolves to the key itself.


use std::sync::Arc;
use tracing::{info, warn};

use lingua_core::config::Config;
use lingua_core::context::{LocaleContext, SharedLocale};
use lingua_core::error::LinguaError;
use lingua_core::locale::Locale;
use lingua_core::params::MessageParams;
use lingua_core::traits::{CallTracker, LocaleAccessor, MessageSource};

use crate::source::{build_source, LocalTable, ServerHandlers};
use crate::table::MessageTable;
use crate::tracker::{build_tracker, NoopTracker};

/// Per-call options for [`Resolver::message`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageOptions {
    /// Explicit locale; `None` uses the resolver's current locale.
    pub locale: Option<Locale>,
}

impl MessageOptions {
    pub fn locale(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
        }
    }
}

pub struct Resolver {
    source: Box<dyn MessageSource>,
    tracker: Arc<dyn CallTracker>,
    locale: Arc<dyn LocaleAccessor>,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Build source, tracker, and locale accessor from configuration.
    ///
    /// The catalog comes from `locale.catalog_dir` when set, otherwise from
    /// the embedded tables. A server source starts with no handlers; use
    /// [`Resolver::from_config_with_handlers`] to supply them.
    pub fn from_config(cfg: &Config) -> Result<Self, LinguaError> {
        Self::from_config_with_handlers(cfg, ServerHandlers::new())
    }

    /// Like [`Resolver::from_config`], with handlers for `[source] kind = "server"`.
    pub fn from_config_with_handlers(
        cfg: &Config,
        handlers: ServerHandlers,
    ) -> Result<Self, LinguaError> {
        ResolverBuilder::from_config(cfg, handlers)?.build()
    }

    /// Resolve `key` for `explicit_locale`, or the current locale if `None`.
    pub fn resolve(
        &self,
        key: &str,
        explicit_locale: Option<Locale>,
        params: &MessageParams,
    ) -> String {
        let locale = explicit_locale.unwrap_or_else(|| self.locale.current_locale());
        let resolved = match self.source.lookup(key, locale, params) {
            Some(text) => text,
            None => {
                warn!("unknown message key '{key}'");
                key.to_string()
            }
        };
        self.tracker.track(key, locale);
        resolved
    }

    /// Per-message call shape: `(params, options)`.
    pub fn message(&self, key: &str, params: &MessageParams, options: &MessageOptions) -> String {
        self.resolve(key, options.locale, params)
    }

    /// Resolve in an explicitly threaded request context.
    pub fn resolve_in(&self, ctx: &LocaleContext, key: &str, params: &MessageParams) -> String {
        self.resolve(key, Some(ctx.locale), params)
    }

    pub fn current_locale(&self) -> Locale {
        self.locale.current_locale()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("source", &self.source.name())
            .field("locale", &self.locale.current_locale())
            .finish()
    }
}

/// Wires a [`Resolver`] from explicit parts.
#[derive(Default)]
pub struct ResolverBuilder {
    source: Option<Box<dyn MessageSource>>,
    tracker: Option<Arc<dyn CallTracker>>,
    locale: Option<Arc<dyn LocaleAccessor>>,
}

impl ResolverBuilder {
    /// Start from configuration. Any part can still be replaced before
    /// [`build`](Self::build).
    pub fn from_config(cfg: &Config, handlers: ServerHandlers) -> Result<Self, LinguaError> {
        let table = load_table(cfg)?;
        info!(
            "catalog: {} messages across {} locales",
            table.len(),
            table.locales().len()
        );
        Ok(Self {
            source: Some(build_source(&cfg.source, Arc::new(table), handlers)),
            tracker: Some(build_tracker(&cfg.tracking)),
            locale: Some(Arc::new(SharedLocale::new(cfg.locale.default))),
        })
    }

    pub fn source(mut self, source: impl MessageSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn table(self, table: Arc<MessageTable>) -> Self {
        self.source(LocalTable::new(table))
    }

    pub fn tracker(mut self, tracker: Arc<dyn CallTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn locale_accessor(mut self, accessor: Arc<dyn LocaleAccessor>) -> Self {
        self.locale = Some(accessor);
        self
    }

    /// Use a fixed current locale.
    pub fn locale(self, locale: Locale) -> Self {
        self.locale_accessor(Arc::new(LocaleContext::new(locale)))
    }

    /// Finish the resolver. Without a source, the embedded catalog is used.
    pub fn build(self) -> Result<Resolver, LinguaError> {
        let source: Box<dyn MessageSource> = match self.source {
            Some(source) => source,
            None => Box::new(LocalTable::new(Arc::new(MessageTable::embedded(
                Locale::En,
            )?))),
        };
        Ok(Resolver {
            source,
            tracker: self
                .tracker
                .unwrap_or_else(|| Arc::new(NoopTracker) as Arc<dyn CallTracker>),
            locale: self
                .locale
                .unwrap_or_else(|| Arc::new(LocaleContext::default()) as Arc<dyn LocaleAccessor>),
        })
    }
}

/// Load the table a configuration points at.
pub fn load_table(cfg: &Config) -> Result<MessageTable, LinguaError> {
    match cfg.locale.catalog_dir.as_deref() {
        Some(dir) => MessageTable::from_dir(dir, cfg.locale.base),
        None => MessageTable::embedded(cfg.locale.base),
    }
}
