//! Message variants and `{name}` templates.
//!
//! A template is parsed once into literal and placeholder segments and
//! rendered in a single pass: substituted values are never re-scanned, and
//! a placeholder without a matching parameter is written back verbatim.

use lingua_core::params::MessageParams;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed message template such as `"{days}d ago"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a source string. `{word}` is a placeholder, where a word is one
    /// or more of `[A-Za-z0-9_]`; every other character is literal.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if name_len > 0 && after[name_len..].starts_with('}') {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(after[..name_len].to_string()));
                rest = &after[name_len + 1..];
            } else {
                literal.push('{');
                rest = after;
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if let Segment::Placeholder(name) = seg {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(_)))
    }

    pub fn render(&self, params: &MessageParams) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match params.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// The string a message produces for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageVariant {
    /// Fixed text.
    Constant(String),
    /// Text with `{name}` placeholders.
    Template(Template),
}

impl MessageVariant {
    /// `Constant` when the source has no placeholders, `Template` otherwise.
    pub fn from_source(source: &str) -> Self {
        let template = Template::parse(source);
        if template.has_placeholders() {
            Self::Template(template)
        } else {
            Self::Constant(source.to_string())
        }
    }

    pub fn render(&self, params: &MessageParams) -> String {
        match self {
            Self::Constant(text) => text.clone(),
            Self::Template(t) => t.render(params),
        }
    }

    pub fn placeholders(&self) -> Vec<&str> {
        match self {
            Self::Constant(_) => Vec::new(),
            Self::Template(t) => t.placeholders(),
        }
    }

    /// The text of a constant variant, `None` for templates.
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Self::Constant(text) => Some(text),
            Self::Template(_) => None,
        }
    }
}
