//! Default value functions used by serde for config deserialization.

use crate::locale::Locale;

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_base_locale() -> Locale {
    Locale::En
}

pub fn default_locale() -> Locale {
    Locale::En
}
