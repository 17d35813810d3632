use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::driver::{Driver, InvalidSelector, Query};
use crate::types::ViewportSize;

/// WebDriver session backing a [`crate::Session`]
pub struct WebDriverBackend {
    client: Client,
    browser_type: BrowserType,
}

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Mozilla Firefox
    #[default]
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Default WebDriver URL for this browser type
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }

    fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// Session capabilities for this browser
    fn capabilities(
        &self,
        viewport: Option<&ViewportSize>,
        headless: bool,
    ) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }
                if let Some(vp) = viewport {
                    args.push(format!("--width={}", vp.width));
                    args.push(format!("--height={}", vp.height));
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    // Chrome 112+ changed headless behavior
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                if let Some(vp) = viewport {
                    args.push(format!("--window-size={},{}", vp.width, vp.height));
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

impl WebDriverBackend {
    /// Open a new WebDriver session
    ///
    /// # Arguments
    /// * `browser_type` - Firefox or Chrome
    /// * `webdriver_url` - WebDriver endpoint, the browser's default port when `None`
    /// * `viewport` - Optional viewport dimensions
    /// * `headless` - Whether to run in headless mode
    pub async fn connect(
        browser_type: BrowserType,
        webdriver_url: Option<&str>,
        viewport: Option<ViewportSize>,
        headless: bool,
    ) -> Result<Self> {
        let webdriver_url = webdriver_url.unwrap_or(browser_type.default_webdriver_url());
        info!("Connecting to {:?} WebDriver at {}", browser_type, webdriver_url);

        if !Self::is_webdriver_running(webdriver_url).await {
            let driver_name = browser_type.driver_name();
            anyhow::bail!(
                "Cannot connect to {} WebDriver at {}.\n\
                Please ensure {} is running:\n\
                  For Firefox: geckodriver --port 4444\n\
                  For Chrome: chromedriver --port 9515",
                driver_name,
                webdriver_url,
                driver_name
            );
        }

        let caps = browser_type.capabilities(viewport.as_ref(), headless);
        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        if let Some(vp) = viewport {
            debug!("Setting viewport to {}x{}", vp.width, vp.height);
            if let Err(e) = client.set_window_size(vp.width, vp.height).await {
                // Best-effort, some drivers refuse resizing headless windows
                debug!("Note: Could not set window size: {}", e);
            }
        }

        let backend = WebDriverBackend {
            client,
            browser_type,
        };
        // Finds must not wait unless a smart-wait window asks for it
        backend.set_implicit_wait(Duration::ZERO).await?;

        Ok(backend)
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url.trim_end_matches('/'));

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await?;

        // Wait for the page to be ready, at most 2 seconds
        let wait_script = "return document.readyState === 'complete';";
        for _ in 0..20 {
            match self.client.execute(wait_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Timeouts that change the implicit wait and leave script and page load alone
fn implicit_wait_only(timeout: Duration) -> TimeoutConfiguration {
    TimeoutConfiguration::new(None, None, Some(timeout))
}

fn native(query: &Query) -> Locator<'_> {
    match query {
        Query::Css(css) => Locator::Css(css),
        Query::XPath(xpath) => Locator::XPath(xpath),
    }
}

/// Report a selector the driver refused as [`InvalidSelector`] so callers can
/// tell it apart from transport failures
fn find_result(
    query: &Query,
    result: std::result::Result<Vec<Element>, CmdError>,
) -> Result<Vec<Element>> {
    match result {
        Ok(elements) => Ok(elements),
        Err(e) if is_invalid_selector(&e) => {
            debug!("Driver rejected {} as invalid: {}", query, e);
            Err(InvalidSelector {
                query: query.clone(),
            }
            .into())
        }
        Err(e) => Err(e).context(format!("Failed to find elements with {}", query)),
    }
}

fn is_invalid_selector(err: &CmdError) -> bool {
    matches!(err, CmdError::Standard(wd) if matches!(wd.error, ErrorStatus::InvalidSelector))
}

#[async_trait]
impl Driver for WebDriverBackend {
    type Element = Element;

    async fn find_all(&self, query: &Query) -> Result<Vec<Element>> {
        let result = self.client.find_all(native(query)).await;
        find_result(query, result)
    }

    async fn find_all_from(&self, parent: &Element, query: &Query) -> Result<Vec<Element>> {
        let result = parent.find_all(native(query)).await;
        find_result(query, result)
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.client
            .update_timeouts(implicit_wait_only(timeout))
            .await
            .context("Failed to set implicit wait timeout")?;
        Ok(())
    }

    async fn enter_frame(&self, frame: &Element) -> Result<()> {
        frame
            .clone()
            .enter_frame()
            .await
            .context("Failed to switch into frame")?;
        Ok(())
    }

    async fn leave_frame(&self) -> Result<()> {
        self.client
            .enter_parent_frame()
            .await
            .context("Failed to switch to parent frame")?;
        Ok(())
    }

    async fn text(&self, element: &Element) -> Result<String> {
        Ok(element.text().await?)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        Ok(element.attr(name).await?)
    }

    async fn tag_name(&self, element: &Element) -> Result<String> {
        Ok(element.tag_name().await?)
    }

    async fn is_selected(&self, element: &Element) -> Result<bool> {
        Ok(element.is_selected().await?)
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool> {
        Ok(element.is_displayed().await?)
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn clear(&self, element: &Element) -> Result<()> {
        element.clear().await?;
        Ok(())
    }

    async fn send_keys(&self, element: &Element, text: &str) -> Result<()> {
        element.send_keys(text).await?;
        Ok(())
    }
}
