//! Layout templates and placeholder substitution.
//!
//! A layout is a plain text template. The only syntax it understands is the
//! placeholder:
//!
//! ```text
//! {{ key }}      key := [A-Za-z0-9_][A-Za-z0-9_.-]*
//! ```
//!
//! `{{ content }}` is the page body; every other key is a page metadata
//! field (`{{ author.name }}` for nested tables). Unknown keys render as the
//! empty string. Anything that does not match the grammar is literal text.

use super::page::Page;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z0-9_][A-Za-z0-9_.\-]*)[ \t]*\}\}").unwrap()
});

/// A named template loaded from the layouts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    template: String,
}

impl Layout {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render `page` into this layout.
    ///
    /// Single left-to-right pass: substituted values are never scanned
    /// again, so a body containing `{{ title }}` is emitted as-is.
    pub fn render(&self, page: &Page) -> String {
        RE_PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| {
                page.field(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    }

    /// Distinct placeholder keys in first-occurrence order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for caps in RE_PLACEHOLDER.captures_iter(&self.template) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}
