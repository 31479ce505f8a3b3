//! CLI command bodies. Each returns its output so it can be tested.

use lingua_catalog::detect::{detect_locale, DetectionInput};
use lingua_catalog::report::{CatalogIssue, CoverageReport};
use lingua_catalog::tracker::CallCounter;
use lingua_catalog::MessageTable;
use lingua_core::config::LocaleConfig;
use lingua_core::locale::Locale;
use lingua_core::params::ParamValue;
use std::fmt::Write;


/// Parse a `name=value` argument. Integers, floats, and `true`/`false` keep
/// their type; anything else is text.
pub fn parse_param(arg: &str) -> Result<(String, ParamValue), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    if name.is_empty() {
        return Err(format!("empty parameter name in '{arg}'"));
    }
    let value = if let Ok(n) = raw.parse::<i64>() {
        ParamValue::Int(n)
    } else if let Ok(x) = raw.parse::<f64>() {
        ParamValue::Float(x)
    } else if let Ok(b) = raw.parse::<bool>() {
        ParamValue::Bool(b)
    } else {
        ParamValue::Text(raw.to_string())
    };
    Ok((name.to_string(), value))
}

pub fn detect(
    path: Option<&str>,
    query: Option<&str>,
    cookie: Option<&str>,
    header: Option<&str>,
    default: Locale,
) -> Locale {
    let input = DetectionInput {
        path,
        query,
        cookie,
        header,
    };
    detect_locale(&input, default)
}

pub fn keys<'a>(table: &'a MessageTable, prefix: Option<&str>) -> Vec<&'a str> {
    table
        .keys()
        .filter(|k| prefix.map_or(true, |p| k.starts_with(p)))
        .collect()
}

pub fn locales(cfg: &LocaleConfig) -> String {
    let mut out = String::new();
    for locale in Locale::ALL {
        let mut marks = Vec::new();
        if locale == cfg.base {
            marks.push("base");
        }
        if locale == cfg.default {
            marks.push("default");
        }
        let _ = write!(out, "{}  {}", locale, locale.display_name());
        if !marks.is_empty() {
            let _ = write!(out, "  ({})", marks.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn check_report(coverage: &CoverageReport, issues: &[CatalogIssue]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Keys: {}", coverage.total_keys);
    for cov in &coverage.locales {
        let _ = writeln!(
            out,
            "  {}: {}/{} ({:.1}%)",
            cov.locale, cov.present, coverage.total_keys, cov.percent
        );
        for key in &cov.missing {
            let _ = writeln!(out, "    missing: {key}");
        }
    }

    if issues.is_empty() {
        out.push_str("No issues.\n");
        return out;
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let _ = writeln!(
        out,
        "Issues: {} ({errors} error{})",
        issues.len(),
        if errors == 1 { "" } else { "s" }
    );
    for issue in issues {
        let level = if issue.is_error() { "error" } else { "note" };
        let _ = writeln!(out, "  {level}: {issue}");
    }
    out
}

/// One `key  locale  count` line per tracked call site, then the total.
pub fn call_counts(counter: &CallCounter) -> String {
    let mut out = String::new();
    for (key, locale, n) in counter.snapshot() {
        let _ = writeln!(out, "{key}  {locale}  {n}");
    }
    let _ = writeln!(out, "total: {}", counter.total());
    out
}
