//! # lingua-catalog
//!
//! Data-driven message catalog: one resolver over a static table of
//! per-locale variants, replacing a generated function per message key.

pub mod detect;
pub mod report;
pub mod resolver;
pub mod source;
pub mod table;
pub mod template;
pub mod tracker;

pub use resolver::{MessageOptions, Resolver, ResolverBuilder};
pub use source::ServerHandlers;
pub use table::{LocaleStrings, MessageEntry, MessageTable};
pub use template::{MessageVariant, Template};
