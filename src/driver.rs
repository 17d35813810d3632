//! The seam between the locator engine and a browser driver
//!
//! Everything the engine needs from a browser goes through [`Driver`], so the
//! resolution logic can run against the WebDriver backend in production and a
//! recording mock in tests.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// A driver-native query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    Css(String),
    XPath(String),
}

impl Query {
    pub fn css(selector: impl Into<String>) -> Self {
        Query::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Query::XPath(expression.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Query::Css(s) | Query::XPath(s) => s,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Css(s) => write!(f, "css={}", s),
            Query::XPath(s) => write!(f, "xpath={}", s),
        }
    }
}

/// The driver refused `query` as malformed.
///
/// Drivers return this (inside `anyhow::Error`) instead of a generic failure
/// so the engine can decide whether a bad selector means "no match".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid selector: {query}")]
pub struct InvalidSelector {
    pub query: Query,
}

impl InvalidSelector {
    /// Whether `err` is, or wraps, an [`InvalidSelector`]
    pub fn is(err: &anyhow::Error) -> bool {
        err.downcast_ref::<InvalidSelector>().is_some()
    }
}

/// Browser operations consumed by the locator engine.
///
/// Implementations hold per-session state only; the implicit wait and the
/// current frame are global to that session.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Handle to a resolved DOM element
    type Element: Clone + Send + Sync;

    /// Find all elements matching `query` from the document root
    async fn find_all(&self, query: &Query) -> Result<Vec<Self::Element>>;

    /// Find all elements matching `query` below `parent`
    async fn find_all_from(
        &self,
        parent: &Self::Element,
        query: &Query,
    ) -> Result<Vec<Self::Element>>;

    /// Set the session-wide implicit wait used by find operations
    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()>;

    /// Switch the session into the frame `frame`
    async fn enter_frame(&self, frame: &Self::Element) -> Result<()>;

    /// Switch back to the parent of the current frame
    async fn leave_frame(&self) -> Result<()>;

    async fn text(&self, element: &Self::Element) -> Result<String>;

    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    async fn tag_name(&self, element: &Self::Element) -> Result<String>;

    async fn is_selected(&self, element: &Self::Element) -> Result<bool>;

    async fn is_displayed(&self, element: &Self::Element) -> Result<bool>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    async fn clear(&self, element: &Self::Element) -> Result<()>;

    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;
}
