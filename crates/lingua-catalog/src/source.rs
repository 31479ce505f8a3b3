//! Message sources: the strategies a resolver dispatches lookups to.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use lingua_core::config::{SourceConfig, SourceKind};
use lingua_core::locale::Locale;
use lingua_core::params::MessageParams;
use lingua_core::traits::MessageSource;

use crate::table::MessageTable;

/// Looks messages up in an in-process table.
#[derive(Debug, Clone)]
pub struct LocalTable {
    table: Arc<MessageTable>,
}

impl LocalTable {
    pub fn new(table: Arc<MessageTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MessageTable {
        &self.table
    }
}

impl MessageSource for LocalTable {
    fn name(&self) -> &str {
        "local"
    }

    fn lookup(&self, key: &str, locale: Locale, params: &MessageParams) -> Option<String> {
        self.table.get(key).map(|entry| entry.render(locale, params))
    }
}

/// A server-side message handler.
pub type Handler = Box<dyn Fn(&MessageParams, Locale) -> String + Send + Sync>;

/// Server handlers keyed by message name, collected before a source is built.
#[derive(Default)]
pub struct ServerHandlers {
    handlers: HashMap<String, Handler>,
}

impl ServerHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `key`.
    pub fn register<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(&MessageParams, Locale) -> String + Send + Sync + 'static,
    {
        self.handlers.insert(key.into(), Box::new(handler));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&MessageParams, Locale) -> String + Send + Sync + 'static,
    {
        self.register(key, handler);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Handler> {
        self.handlers.get(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ServerHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ServerHandlers").field("keys", &keys).finish()
    }
}

/// Delegates to handlers registered by the server, keyed by message name.
///
/// A registered handler bypasses the table entirely. Keys with no handler
/// are served from the local table.
#[derive(Debug)]
pub struct ServerRegistry {
    handlers: ServerHandlers,
    local: LocalTable,
}

impl ServerRegistry {
    pub fn new(table: Arc<MessageTable>) -> Self {
        Self::with_handlers(table, ServerHandlers::new())
    }

    pub fn with_handlers(table: Arc<MessageTable>, handlers: ServerHandlers) -> Self {
        Self {
            handlers,
            local: LocalTable::new(table),
        }
    }

    /// Register (or replace) the handler for `key`.
    pub fn register<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(&MessageParams, Locale) -> String + Send + Sync + 'static,
    {
        self.handlers.register(key, handler);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.handlers.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl MessageSource for ServerRegistry {
    fn name(&self) -> &str {
        "server"
    }

    fn lookup(&self, key: &str, locale: Locale, params: &MessageParams) -> Option<String> {
        if let Some(handler) = self.handlers.get(key) {
            return Some(handler(params, locale));
        }
        debug!("server registry: no handler for '{key}', using local table");
        self.local.lookup(key, locale, params)
    }
}

/// Build the message source selected by configuration.
///
/// `handlers` back the server source; the local source ignores them.
pub fn build_source(
    cfg: &SourceConfig,
    table: Arc<MessageTable>,
    handlers: ServerHandlers,
) -> Box<dyn MessageSource> {
    let source: Box<dyn MessageSource> = match cfg.kind {
        SourceKind::Local => {
            if !handlers.is_empty() {
                warn!(
                    "message source is local, ignoring {} server handlers",
                    handlers.len()
                );
            }
            Box::new(LocalTable::new(table))
        }
        SourceKind::Server => {
            if handlers.is_empty() {
                warn!("message source is server but no handlers are registered");
            }
            Box::new(ServerRegistry::with_handlers(table, handlers))
        }
    };
    info!("message source: {}", source.name());
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LocaleStrings;

    fn table() -> Arc<MessageTable> {
        let mut en = LocaleStrings::new();
        en.insert("dashboard_daysAgo", "{days}d ago");
        en.insert("nav_home", "Home");
        let mut bg = LocaleStrings::new();
        bg.insert("dashboard_daysAgo", "преди {days} дн");
        Arc::new(
            MessageTable::builder(Locale::En)
                .add_locale(Locale::En, en)
                .add_locale(Locale::Bg, bg)
                .build(),
        )
    }

    #[test]
    fn test_local_table_lookup() {
        let src = LocalTable::new(table());
        let params = MessageParams::new().with("days", 3);
        assert_eq!(
            src.lookup("dashboard_daysAgo", Locale::En, &params).as_deref(),
            Some("3d ago")
        );
        assert_eq!(
            src.lookup("nav_home", Locale::Bg, &params).as_deref(),
            Some("Home")
        );
        assert!(src.lookup("missing_key", Locale::En, &params).is_none());
    }

    #[test]
    fn test_server_registry_bypasses_table() {
        let mut registry = ServerRegistry::new(table());
        registry.register("nav_home", |_, locale| format!("ssr:{locale}"));
        assert!(registry.is_registered("nav_home"));
        assert_eq!(registry.len(), 1);

        let params = MessageParams::new();
        assert_eq!(
            registry.lookup("nav_home", Locale::Bg, &params).as_deref(),
            Some("ssr:bg")
        );
    }

    #[test]
    fn test_server_registry_falls_back_to_table() {
        let registry = ServerRegistry::new(table());
        let params = MessageParams::new().with("days", 5);
        assert_eq!(
            registry
                .lookup("dashboard_daysAgo", Locale::Bg, &params)
                .as_deref(),
            Some("преди 5 дн")
        );
        assert!(registry.lookup("missing_key", Locale::En, &params).is_none());
    }

    #[test]
    fn test_build_source_from_config() {
        let handlers = || ServerHandlers::new().with("nav_home", |_, _| "from server".to_string());
        let none = MessageParams::new();

        let local = build_source(&SourceConfig::default(), table(), handlers());
        assert_eq!(local.name(), "local");
        assert_eq!(local.lookup("nav_home", Locale::En, &none).as_deref(), Some("Home"));

        let server = build_source(
            &SourceConfig {
                kind: SourceKind::Server,
            },
            table(),
            handlers(),
        );
        assert_eq!(server.name(), "server");
        assert_eq!(
            server.lookup("nav_home", Locale::En, &none).as_deref(),
            Some("from server")
        );
    }
}
