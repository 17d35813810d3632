use std::future::Future;
use tracing::{debug, info};
use webseek::config::parse_smart_wait;
use webseek::{
    LocateError, LocatorConfig, LocatorInput, Result, Session, ViewportSize, WebDriverBackend,
};

/// Browser and resolution options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct SessionArgs {
    /// Browser to use (firefox, chrome)
    #[arg(short, long)]
    pub browser: Option<String>,

    /// WebDriver URL (defaults to the browser's standard port)
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Set viewport size (WIDTHxHEIGHT, e.g., 1920x1080)
    #[arg(long)]
    pub viewport: Option<String>,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless")]
    pub no_headless: bool,

    /// Smart-wait window in milliseconds, or "off"
    #[arg(long)]
    pub smart_wait: Option<String>,

    /// Turn smart wait off regardless of config
    #[arg(long, conflicts_with = "smart_wait")]
    pub no_smart_wait: bool,

    /// Restrict all searches to this element (or {"frame": ...})
    #[arg(long)]
    pub within: Option<String>,
}

impl SessionArgs {
    /// Config file and environment, then command line flags
    pub fn config(&self) -> Result<LocatorConfig> {
        let mut config = LocatorConfig::load()?;

        if let Some(browser) = &self.browser {
            config.browser = browser
                .parse()
                .map_err(|e: anyhow::Error| LocateError::Config(e.to_string()))?;
        }
        if let Some(url) = &self.webdriver {
            config.webdriver_url = Some(url.clone());
        }
        if let Some(smart_wait) = &self.smart_wait {
            config.smart_wait_ms = parse_smart_wait(smart_wait)?;
        }
        if self.no_smart_wait {
            config.smart_wait_ms = None;
        }
        if self.no_headless {
            config.headless = false;
        }

        Ok(config)
    }
}

/// Connect to WebDriver and open `url`
pub async fn open_session(url: &str, args: &SessionArgs) -> Result<Session<WebDriverBackend>> {
    let config = args.config()?;
    debug!("Using config {:?}", config);

    let viewport = match &args.viewport {
        Some(v) => Some(
            ViewportSize::parse(v).map_err(|e| LocateError::Config(e.to_string()))?,
        ),
        None => None,
    };

    if url::Url::parse(url).is_err() {
        return Err(LocateError::Config(format!("Invalid URL: {}", url)));
    }

    let backend = WebDriverBackend::connect(
        config.browser,
        config.webdriver_url.as_deref(),
        viewport,
        config.headless,
    )
    .await?;

    if let Err(e) = backend.goto(url).await {
        let _ = backend.close().await;
        return Err(e.into());
    }

    Ok(Session::new(backend, config))
}

/// Run `block` inside the `--within` scope when one was given
pub async fn scoped<F, Fut, T>(
    session: &Session<WebDriverBackend>,
    within: Option<&str>,
    block: F,
) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match within {
        Some(scope) => session.within(LocatorInput::from_arg(scope), block).await,
        None => block().await,
    }
}

/// Close the browser, logging instead of failing
pub async fn close_session(session: Session<WebDriverBackend>) {
    info!("Closing browser session");
    if let Err(e) = session.into_driver().close().await {
        debug!("Note: Could not close browser cleanly: {}", e);
    }
}
