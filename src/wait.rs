//! Smart wait: a temporary implicit-wait window around one resolution
//!
//! The implicit wait is global to a WebDriver session. Every window opened
//! here is closed again (timeout set back to zero) whether the wrapped query
//! succeeded or failed.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::driver::Driver;
use crate::errors::Result;

/// Implicit-wait window requested for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitWindow {
    pub enabled: bool,
    pub timeout: Duration,
}

impl WaitWindow {
    pub fn new(timeout: Duration) -> Self {
        WaitWindow {
            enabled: true,
            timeout,
        }
    }

    pub fn disabled() -> Self {
        WaitWindow {
            enabled: false,
            timeout: Duration::ZERO,
        }
    }
}

/// Run `query` inside `window`.
///
/// When the window is disabled `query` runs with no implicit wait. Otherwise
/// the driver's implicit wait is set to the window's timeout, `query` runs,
/// and the wait is reset to zero before returning. A failing reset is
/// reported only when `query` itself succeeded.
///
/// The reset is a driver call, so it cannot run when `query` panics or when
/// the returned future is dropped before completion. In both cases the
/// session keeps the window's implicit wait until the next window closes.
pub async fn with_smart_wait<D, F, Fut, T>(driver: &D, window: WaitWindow, query: F) -> Result<T>
where
    D: Driver + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if !window.enabled {
        return query().await;
    }

    debug!("SmartWait ({}ms) opened", window.timeout.as_millis());
    driver.set_implicit_wait(window.timeout).await?;

    let result = query().await;
    let reset = driver.set_implicit_wait(Duration::ZERO).await;
    debug!("SmartWait closed");

    match (result, reset) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(reset_err)) => {
            warn!("Failed to reset implicit wait: {}", reset_err);
            Err(e)
        }
    }
}
