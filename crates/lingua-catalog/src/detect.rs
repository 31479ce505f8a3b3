//! Locale detection from request data.
//!
//! Priority: URL path > `locale` query parameter > cookie >
//! `Accept-Language` header > caller default.

use lingua_core::locale::Locale;

/// Request data consulted by [`detect_locale`]. Every field is optional.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectionInput<'a> {
    /// Request path, e.g. `/bg/products`.
    pub path: Option<&'a str>,
    /// Raw query string, with or without the leading `?`.
    pub query: Option<&'a str>,
    /// Value of the locale cookie.
    pub cookie: Option<&'a str>,
    /// `Accept-Language` header value.
    pub header: Option<&'a str>,
}

/// Path prefixes recognised as a locale segment.
const PATH_TAGS: &[&str] = &["en", "uk", "bg"];

/// Coarse language guess from an `Accept-Language` header.
///
/// Any mention of `bg` wins; everything else, including a missing header,
/// is English.
pub fn detect_language(accept_language: Option<&str>) -> Locale {
    match accept_language {
        Some(header) if header.to_lowercase().contains("bg") => Locale::Bg,
        _ => Locale::En,
    }
}

pub fn detect_locale(input: &DetectionInput<'_>, default: Locale) -> Locale {
    input
        .path
        .and_then(locale_from_path)
        .or_else(|| input.query.and_then(locale_from_query))
        .or_else(|| input.cookie.and_then(exact_locale))
        .or_else(|| input.header.and_then(locale_from_header))
        .unwrap_or(default)
}

fn exact_locale(tag: &str) -> Option<Locale> {
    if Locale::is_locale(tag) {
        tag.parse().ok()
    } else {
        None
    }
}

fn locale_from_path(path: &str) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    let segment = rest.split('/').next()?;
    if PATH_TAGS.contains(&segment) {
        Locale::from_alias(segment)
    } else {
        None
    }
}

/// First `locale` parameter, decoded as `application/x-www-form-urlencoded`.
fn locale_from_query(query: &str) -> Option<Locale> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| form_decode(name) == "locale")
        .map(|(_, value)| form_decode(value))?;
    exact_locale(&value)
}

/// `+` becomes a space and `%XX` a byte. Malformed escapes are kept as written.
fn form_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let escaped = raw
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match escaped {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Primary subtag of the first language range. No whitespace is trimmed.
fn locale_from_header(header: &str) -> Option<Locale> {
    let first = header.split(',').next()?;
    let primary = first.split('-').next()?.to_lowercase();
    exact_locale(&primary)
}
