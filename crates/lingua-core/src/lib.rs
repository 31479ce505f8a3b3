//! # lingua-core
//!
//! Core types, traits, configuration, and error handling for Lingua.

pub mod config;
pub mod context;
pub mod error;
pub mod locale;
pub mod params;
pub mod traits;
