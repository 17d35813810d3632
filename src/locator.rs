//! Locator classification
//!
//! A raw locator is either a plain string or a single-key descriptor such as
//! `{"name": "password"}`. [`Locator::classify`] turns it into a typed value;
//! strings that carry no recognizable CSS or XPath prefix become
//! [`Locator::Fuzzy`] and are resolved through a strategy chain.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::driver::Query;
use crate::errors::{LocateError, Result};
use crate::xpath;

/// A locator exactly as the caller wrote it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatorInput {
    /// Free text, a CSS selector or an XPath expression
    Text(String),
    /// Structured descriptor, e.g. `{"css": "#login"}`
    Strict(BTreeMap<String, String>),
}

impl LocatorInput {
    /// Build a single-key descriptor
    pub fn strict(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.into(), value.into());
        LocatorInput::Strict(map)
    }

    /// Parse a CLI argument: JSON objects become descriptors, anything else is text
    pub fn from_arg(arg: &str) -> Self {
        if arg.trim_start().starts_with('{')
            && let Ok(map) = serde_json::from_str::<BTreeMap<String, String>>(arg)
        {
            return LocatorInput::Strict(map);
        }
        LocatorInput::Text(arg.to_string())
    }

    /// The single `(key, value)` pair of a descriptor
    pub(crate) fn single_entry(&self) -> Option<(&str, &str)> {
        match self {
            LocatorInput::Strict(map) if map.len() == 1 => map
                .iter()
                .next()
                .map(|(k, v)| (k.as_str(), v.as_str())),
            _ => None,
        }
    }
}

impl From<&str> for LocatorInput {
    fn from(s: &str) -> Self {
        LocatorInput::Text(s.to_string())
    }
}

impl From<String> for LocatorInput {
    fn from(s: String) -> Self {
        LocatorInput::Text(s)
    }
}

impl From<&String> for LocatorInput {
    fn from(s: &String) -> Self {
        LocatorInput::Text(s.clone())
    }
}

impl fmt::Display for LocatorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorInput::Text(s) => write!(f, "{}", s),
            LocatorInput::Strict(map) => {
                let entries: Vec<String> =
                    map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", entries.join(", "))
            }
        }
    }
}

/// A classified locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
    Name(String),
    /// Match on an arbitrary attribute, from a descriptor with an unknown key
    Attribute { key: String, value: String },
    /// Text with no explicit strategy
    Fuzzy(String),
}

impl Locator {
    /// Classify a raw locator
    pub fn classify(raw: &LocatorInput) -> Result<Locator> {
        match raw {
            LocatorInput::Text(text) => Self::classify_text(text),
            LocatorInput::Strict(map) => {
                let Some((key, value)) = raw.single_entry() else {
                    return Err(LocateError::ambiguous(
                        raw.to_string(),
                        format!("expected exactly one key, found {}", map.len()),
                    ));
                };
                Self::classify_strict(key, value, raw)
            }
        }
    }

    /// Classify a plain string
    pub fn parse(text: &str) -> Result<Locator> {
        Self::classify_text(text)
    }

    fn classify_text(text: &str) -> Result<Locator> {
        if text.trim().is_empty() {
            return Err(LocateError::ambiguous(text, "locator is empty"));
        }
        if is_xpath(text) {
            Ok(Locator::XPath(text.to_string()))
        } else if is_css(text) {
            Ok(Locator::Css(text.to_string()))
        } else {
            Ok(Locator::Fuzzy(text.to_string()))
        }
    }

    fn classify_strict(key: &str, value: &str, raw: &LocatorInput) -> Result<Locator> {
        if value.is_empty() {
            return Err(LocateError::ambiguous(raw.to_string(), "locator value is empty"));
        }
        let value = value.to_string();
        Ok(match key {
            "css" => Locator::Css(value),
            "xpath" => Locator::XPath(value),
            "id" => Locator::Id(value),
            "name" => Locator::Name(value),
            other => {
                if !xpath::is_attribute_name(other) {
                    return Err(LocateError::ambiguous(
                        raw.to_string(),
                        format!("'{}' is not a valid attribute name", other),
                    ));
                }
                Locator::Attribute {
                    key: other.to_string(),
                    value,
                }
            }
        })
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, Locator::Fuzzy(_))
    }

    /// Strategy type, absent for fuzzy locators
    pub fn kind(&self) -> Option<&str> {
        match self {
            Locator::Css(_) => Some("css"),
            Locator::XPath(_) => Some("xpath"),
            Locator::Id(_) => Some("id"),
            Locator::Name(_) => Some("name"),
            Locator::Attribute { key, .. } => Some(key.as_str()),
            Locator::Fuzzy(_) => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::Css(v)
            | Locator::XPath(v)
            | Locator::Id(v)
            | Locator::Name(v)
            | Locator::Fuzzy(v)
            | Locator::Attribute { value: v, .. } => v,
        }
    }

    /// The single native query for a typed locator; `None` when fuzzy
    pub fn direct_query(&self) -> Option<Query> {
        match self {
            Locator::Css(css) => Some(Query::css(css)),
            Locator::XPath(xp) => Some(Query::xpath(xp)),
            Locator::Id(id) => Some(Query::xpath(format!(
                ".//*[@id = {}]",
                xpath::literal(id)
            ))),
            Locator::Name(name) => Some(Query::xpath(format!(
                ".//*[@name = {}]",
                xpath::literal(name)
            ))),
            Locator::Attribute { key, value } => Some(Query::xpath(format!(
                ".//*[@{} = {}]",
                key,
                xpath::literal(value)
            ))),
            Locator::Fuzzy(_) => None,
        }
    }

    /// Literal interpretation of the text, used as the last resort of every chain
    pub fn literal_query(&self) -> Query {
        self.direct_query()
            .unwrap_or_else(|| Query::css(self.value()))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(v) | Locator::XPath(v) | Locator::Fuzzy(v) => write!(f, "{}", v),
            Locator::Id(v) => write!(f, "{{id: {}}}", v),
            Locator::Name(v) => write!(f, "{{name: {}}}", v),
            Locator::Attribute { key, value } => write!(f, "{{{}: {}}}", key, value),
        }
    }
}

fn is_xpath(text: &str) -> bool {
    text.starts_with("//") || text.starts_with(".//") || text.starts_with('(')
}

fn is_css(text: &str) -> bool {
    text.starts_with('#') || text.starts_with('.')
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
