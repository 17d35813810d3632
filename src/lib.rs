//! # webseek
#![allow(clippy::uninlined_format_args)]
//!
//! Locator resolution for WebDriver automation.
//!
//! Turns loosely written locators ("Sign in", `#login`, `{"name": "email"}`)
//! into element handles. Typed locators go to the driver as a single query;
//! free text runs through an ordered fallback chain chosen by the kind of
//! control being looked for.
//!
//! ## Locators
//!
//! | Input                         | Classified as                  |
//! |-------------------------------|--------------------------------|
//! | `#id`, `.class`               | CSS                            |
//! | `//div`, `.//a`, `(//li)[2]`  | XPath                          |
//! | `{"css": "form input"}`       | CSS                            |
//! | `{"name": "email"}`           | `@name` match                  |
//! | `{"data-test": "submit"}`     | `@data-test` match             |
//! | `Sign in`                     | fuzzy, resolved by a chain     |
//!
//! ## Chains
//!
//! - **field**: label equal to text, label containing text, `name`,
//!   `placeholder`, literal selector
//! - **clickable**: exact text/value/title/alt, partial text, literal selector
//! - **checkable**: label, `name`, literal selector
//! - **containment**: literal selector
//!
//! ## CLI Usage
//!
//! ```bash
//! # Find the input labelled "Password"
//! webseek locate "https://example.com/login" "Password" --capability field
//!
//! # Look only inside the login form, waiting up to 3 seconds for matches
//! webseek locate "https://example.com" "Sign in" --capability clickable \
//!     --within "#login" --smart-wait 3000
//!
//! # Text assertions
//! webseek see "https://example.com" "Welcome"
//! webseek checked "https://example.com/signup" "agree"
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use webseek::{BrowserType, Capability, LocateOptions, LocatorConfig, Session, WebDriverBackend};
//!
//! # async fn example() -> webseek::Result<()> {
//! let backend = WebDriverBackend::connect(BrowserType::Firefox, None, None, true).await?;
//! backend.goto("https://example.com/login").await?;
//!
//! let config = LocatorConfig {
//!     smart_wait_ms: Some(5000),
//!     ..LocatorConfig::default()
//! };
//! let session = Session::new(backend, config);
//!
//! let s = &session;
//! session
//!     .within("#login", || async move {
//!         s.fill_field("Email", "ada@example.com").await?;
//!         s.fill_field("Password", "secret").await?;
//!         s.click("Sign in").await
//!     })
//!     .await?;
//!
//! let fields = session
//!     .locate("Search", LocateOptions::new(Capability::Field).smart_wait(true))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Assertion and action helpers built on `locate`
pub mod assertions;

/// Session configuration
pub mod config;

/// Driver abstraction consumed by the engine
pub mod driver;

/// Error types and exit codes
pub mod errors;

/// Locator classification
pub mod locator;

/// `within` scope state
pub mod scope;

/// Resolution facade
pub mod session;

/// Per-capability strategy chains
pub mod strategy;

/// CLI output types
pub mod types;

/// Smart-wait window
pub mod wait;

/// WebDriver backend over fantoccini
pub mod webdriver;

/// XPath literal helpers
pub mod xpath;

#[cfg(test)]
mod mock_driver;

pub use config::LocatorConfig;
pub use driver::{Driver, InvalidSelector, Query};
pub use errors::{LocateError, Result};
pub use locator::{Locator, LocatorInput};
pub use scope::ScopeTarget;
pub use session::{LocateOptions, Session};
pub use strategy::{Capability, Resolution};
pub use types::{OutputFormat, ViewportSize};
pub use wait::WaitWindow;
pub use webdriver::{BrowserType, WebDriverBackend};
