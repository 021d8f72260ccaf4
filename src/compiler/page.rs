//! Page definitions: TOML front matter plus a verbatim body.
//!
//! ```text
//! +++
//! layout = "base"
//! title = "Home"
//! [author]
//! name = "Ada"
//! +++
//! <p>Everything after the closing fence is the body.</p>
//! ```
//!
//! `layout` is the only required key. The remaining front matter is
//! flattened into string fields (`title`, `author.name`) for placeholder
//! substitution; `content` is reserved for the body.

use super::error::{BuildError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use toml::{Table, Value};

static RE_FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\+\+\+[ \t]*\r?\n(?:(.*?)\r?\n)??\+\+\+[ \t]*(?:\r?\n|\z)(.*)\z").unwrap()
});

/// Key holding the page body.
pub const CONTENT_KEY: &str = "content";

/// Key naming the layout a page renders with.
pub const LAYOUT_KEY: &str = "layout";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: String,
    layout: String,
    content: String,
    fields: BTreeMap<String, String>,
}

impl Page {
    /// Parse a page definition.
    ///
    /// Fails if the front matter is missing or not valid TOML, if `layout`
    /// is absent or not a plain identifier, or if `content` is set in the
    /// front matter.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let caps = RE_FRONT_MATTER
            .captures(source)
            .ok_or_else(|| BuildError::parse(name, "missing `+++` front matter block"))?;
        let front_matter = caps.get(1).map_or("", |m| m.as_str());
        let content = caps.get(2).map_or("", |m| m.as_str());

        let table: Table = toml::from_str(front_matter)
            .map_err(|err| BuildError::parse(name, format!("invalid front matter: {err}")))?;

        if table.contains_key(CONTENT_KEY) {
            return Err(BuildError::parse(
                name,
                "`content` is reserved for the page body",
            ));
        }

        let layout = match table.get(LAYOUT_KEY) {
            None => return Err(BuildError::parse(name, "missing `layout` key")),
            Some(Value::String(layout)) if is_identifier(layout) => layout.clone(),
            Some(Value::String(layout)) => {
                return Err(BuildError::parse(
                    name,
                    format!("`layout` must be a plain name, got {layout:?}"),
                ));
            }
            Some(other) => {
                return Err(BuildError::parse(
                    name,
                    format!("`layout` must be a string, got {}", other.type_str()),
                ));
            }
        };

        let mut fields = BTreeMap::new();
        for (key, value) in &table {
            flatten_into(&mut fields, key.clone(), value);
        }

        Ok(Self {
            name: name.to_owned(),
            layout,
            content: content.to_owned(),
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the layout this page asks for. Not checked until render time.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Look up a substitution value by placeholder key.
    pub fn field(&self, key: &str) -> Option<&str> {
        if key == CONTENT_KEY {
            Some(self.content())
        } else {
            self.fields.get(key).map(String::as_str)
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\')
}

/// Nested tables become dotted keys; everything else becomes one string.
fn flatten_into(fields: &mut BTreeMap<String, String>, key: String, value: &Value) {
    match value {
        Value::Table(table) => {
            for (sub, value) in table {
                flatten_into(fields, format!("{key}.{sub}"), value);
            }
        }
        value => {
            fields.insert(key, value_text(value));
        }
    }
}

/// Scalars render as their TOML literal (`1.0`, `nan`); strings unquoted.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(_) => value.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Table(_) => value.to_string(),
    }
}
