//! Resolution facade
//!
//! A [`Session`] owns a driver together with the mutable state that is global
//! to it (the implicit wait and the `within` binding). All resolution goes
//! through [`Session::locate`].

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::LocatorConfig;
use crate::driver::{Driver, InvalidSelector, Query};
use crate::errors::{LocateError, Result};
use crate::locator::{Locator, LocatorInput};
use crate::scope::{ScopeState, ScopeTarget, SearchRoot};
use crate::strategy::{Capability, Resolution, first_non_empty};
use crate::wait::{WaitWindow, with_smart_wait};

/// Per-call options for [`Session::locate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateOptions {
    pub capability: Capability,
    /// Open a smart-wait window around this call
    pub smart_wait: bool,
    /// Window length for this call instead of the configured one
    pub smart_wait_timeout: Option<Duration>,
}

impl Default for LocateOptions {
    fn default() -> Self {
        LocateOptions {
            capability: Capability::Containment,
            smart_wait: false,
            smart_wait_timeout: None,
        }
    }
}

impl LocateOptions {
    pub fn new(capability: Capability) -> Self {
        LocateOptions {
            capability,
            ..Self::default()
        }
    }

    pub fn smart_wait(mut self, enabled: bool) -> Self {
        self.smart_wait = enabled;
        self
    }

    pub fn smart_wait_timeout(mut self, timeout: Duration) -> Self {
        self.smart_wait = true;
        self.smart_wait_timeout = Some(timeout);
        self
    }
}

/// A driver plus the state that is global to its browser session
pub struct Session<D: Driver> {
    driver: D,
    config: LocatorConfig,
    scope: Mutex<ScopeState<D::Element>>,
}

impl<D: Driver> Session<D> {
    pub fn new(driver: D, config: LocatorConfig) -> Self {
        Session {
            driver,
            config,
            scope: Mutex::new(ScopeState::default()),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Give the driver back, e.g. to close the browser
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Resolve a locator to its matches.
    ///
    /// Zero matches is not an error here; the assertion helpers decide that.
    pub async fn locate(
        &self,
        raw: impl Into<LocatorInput>,
        options: LocateOptions,
    ) -> Result<Vec<D::Element>> {
        Ok(self.locate_traced(raw, options).await?.elements)
    }

    /// [`Session::locate`], also reporting which strategy matched
    pub async fn locate_traced(
        &self,
        raw: impl Into<LocatorInput>,
        options: LocateOptions,
    ) -> Result<Resolution<D::Element>> {
        let raw = raw.into();
        let locator = Locator::classify(&raw)?;
        let window = self.wait_window(&options);

        with_smart_wait(&self.driver, window, || {
            self.resolve(&locator, options.capability)
        })
        .await
    }

    /// Run `query` inside the configured smart-wait window when `enabled`
    pub async fn with_smart_wait<F, Fut, T>(&self, enabled: bool, query: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let options = LocateOptions::default().smart_wait(enabled);
        with_smart_wait(&self.driver, self.wait_window(&options), query).await
    }

    fn wait_window(&self, options: &LocateOptions) -> WaitWindow {
        match (options.smart_wait, self.config.smart_wait()) {
            (true, Some(configured)) => {
                WaitWindow::new(options.smart_wait_timeout.unwrap_or(configured))
            }
            _ => WaitWindow::disabled(),
        }
    }

    async fn resolve(
        &self,
        locator: &Locator,
        capability: Capability,
    ) -> Result<Resolution<D::Element>> {
        let root = self.scope.lock().await.root().clone();

        if let Some(query) = locator.direct_query() {
            debug!("Locating {} directly", query);
            let elements = self.find(&root, &query).await?;
            return Ok(Resolution {
                strategy: (!elements.is_empty()).then_some("direct"),
                attempts: 1,
                elements,
            });
        }

        debug!("Locating fuzzy '{}' as {}", locator.value(), capability);
        let root = &root;
        let literal = &locator.literal_query();
        let resolution =
            first_non_empty(capability.chain(), locator.value(), |query| async move {
                match self.find(root, &query).await {
                    // Free text is rarely valid CSS; that only means no match
                    Err(e) if query == *literal && InvalidSelector::is(&e) => {
                        debug!("'{}' is not a valid selector, no literal match", literal);
                        Ok(Vec::new())
                    }
                    other => other,
                }
            })
            .await?;
        Ok(resolution)
    }

    async fn find(
        &self,
        root: &SearchRoot<D::Element>,
        query: &Query,
    ) -> anyhow::Result<Vec<D::Element>> {
        match root {
            SearchRoot::Document => self.driver.find_all(query).await,
            SearchRoot::Element(parent) => self.driver.find_all_from(parent, query).await,
        }
    }

    /// Narrow every following search to the element (or frame) `raw` resolves to.
    ///
    /// Only one scope may be active; entering a second one fails with
    /// [`LocateError::ScopeAlreadyActive`].
    pub async fn within_begin(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let target = ScopeTarget::from_input(raw.into());
        self.scope.lock().await.ensure_inactive(&target)?;

        let matches = self
            .locate(
                target.locator().clone(),
                LocateOptions::new(Capability::Containment).smart_wait(true),
            )
            .await?;
        let Some(element) = matches.into_iter().next() else {
            return Err(LocateError::not_found(target.locator().to_string()));
        };

        let root = if target.is_frame() {
            self.driver.enter_frame(&element).await?;
            SearchRoot::Document
        } else {
            SearchRoot::Element(element)
        };

        info!("Entering within {}", target);
        let is_frame = target.is_frame();
        let entered = self.scope.lock().await.enter(target, root);
        if entered.is_err() && is_frame {
            self.driver.leave_frame().await?;
        }
        entered
    }

    /// Restore the search root saved by [`Session::within_begin`]
    pub async fn within_end(&self) -> Result<()> {
        let exited = self.scope.lock().await.exit();
        match exited {
            Some(active) => {
                info!("Leaving within {}", active.target);
                if active.target.is_frame() {
                    self.driver.leave_frame().await?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Run `block` inside a `within` scope, leaving it on every exit path.
    ///
    /// If `block` panics or the returned future is dropped early, the search
    /// root is still restored, but a frame scope stays switched into its frame
    /// because leaving it needs a driver call.
    pub async fn within<F, Fut, T>(&self, raw: impl Into<LocatorInput>, block: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.within_begin(raw).await?;
        let _restore = RestoreOnDrop(&self.scope);
        let result = block().await;
        let exited = self.within_end().await;

        match (result, exited) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(exit_err)) => {
                warn!("Failed to leave within scope: {}", exit_err);
                Err(e)
            }
        }
    }

    /// Description of the active scope, if any
    pub async fn current_scope(&self) -> Option<ScopeTarget> {
        self.scope
            .lock()
            .await
            .active()
            .map(|active| active.target.clone())
    }

    /// Element the session is currently scoped to
    pub(crate) async fn scope_root(&self) -> SearchRoot<D::Element> {
        self.scope.lock().await.root().clone()
    }
}

/// Puts the saved search root back when a `within` block unwinds or is dropped.
/// Exiting is idempotent, so this is a no-op after `within_end`.
struct RestoreOnDrop<'a, E: Clone>(&'a Mutex<ScopeState<E>>);

impl<E: Clone> Drop for RestoreOnDrop<'_, E> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_lock()
            && let Some(active) = state.exit()
        {
            warn!("Within {} abandoned, search root restored", active.target);
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
