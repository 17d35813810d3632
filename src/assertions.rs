//! Assertion and action helpers built on [`Session::locate`]
//!
//! These are the callers of the resolution engine. `locate` returns an empty
//! list for "nothing matched"; the helpers here turn that into
//! [`LocateError::ElementNotFound`] with a message naming the kind of control
//! that was expected.

use tracing::{debug, info};

use crate::driver::Driver;
use crate::errors::{DEFAULT_SUFFIX, LocateError, Result};
use crate::locator::LocatorInput;
use crate::scope::SearchRoot;
use crate::session::{LocateOptions, Session};
use crate::strategy::Capability;

/// Fail with `ElementNotFound` when `elements` is empty
pub fn assert_element_exists<E>(
    elements: Vec<E>,
    locator: &LocatorInput,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<E>> {
    if elements.is_empty() {
        return Err(LocateError::not_found_with(locator.to_string(), prefix, suffix));
    }
    Ok(elements)
}

impl<D: Driver> Session<D> {
    /// Locate with smart wait and require at least one match
    async fn require(
        &self,
        raw: &LocatorInput,
        capability: Capability,
    ) -> Result<Vec<D::Element>> {
        let elements = self
            .locate(raw.clone(), LocateOptions::new(capability).smart_wait(true))
            .await?;
        assert_element_exists(elements, raw, capability.not_found_prefix(), DEFAULT_SUFFIX)
    }

    async fn any_displayed(&self, elements: &[D::Element]) -> Result<bool> {
        for element in elements {
            if self.driver().is_displayed(element).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Any of `elements` is checked
    async fn any_selected(&self, elements: &[D::Element]) -> Result<bool> {
        let mut checked = false;
        for element in elements {
            checked = checked || self.driver().is_selected(element).await?;
        }
        Ok(checked)
    }

    /// At least one visible element matches `raw`
    pub async fn see_element(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Containment).await?;
        if !self.any_displayed(&elements).await? {
            return Err(LocateError::AssertionFailed(format!(
                "expected elements of {} to be seen",
                raw
            )));
        }
        Ok(())
    }

    /// No visible element matches `raw`
    pub async fn dont_see_element(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self
            .locate(raw.clone(), LocateOptions::new(Capability::Containment))
            .await?;
        if self.any_displayed(&elements).await? {
            return Err(LocateError::AssertionFailed(format!(
                "expected elements of {} not to be seen",
                raw
            )));
        }
        Ok(())
    }

    pub async fn see_number_of_elements(
        &self,
        raw: impl Into<LocatorInput>,
        expected: usize,
    ) -> Result<()> {
        let raw = raw.into();
        let found = self
            .locate(
                raw.clone(),
                LocateOptions::new(Capability::Containment).smart_wait(true),
            )
            .await?
            .len();
        if found != expected {
            return Err(LocateError::AssertionFailed(format!(
                "expected number of elements ({}) is {}, but found {}",
                raw, expected, found
            )));
        }
        Ok(())
    }

    /// Text of the containment context with a description of where it came from
    async fn context_text(&self, context: Option<LocatorInput>) -> Result<(String, String)> {
        let (elements, description) = match context {
            Some(ctx) => {
                let elements = self.require(&ctx, Capability::Containment).await?;
                (elements, format!("element {}", ctx))
            }
            None => match (self.current_scope().await, self.scope_root().await) {
                (Some(target), SearchRoot::Element(root)) => {
                    (vec![root], format!("current context {}", target))
                }
                (Some(target), SearchRoot::Document) => {
                    let root = LocatorInput::from(self.config().root.as_str());
                    let elements = self.require(&root, Capability::Containment).await?;
                    (elements, format!("current context {}", target))
                }
                (None, _) => {
                    let root = LocatorInput::from(self.config().root.as_str());
                    let elements = self.require(&root, Capability::Containment).await?;
                    (elements, "web page".to_string())
                }
            },
        };

        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            texts.push(self.driver().text(element).await?);
        }
        debug!("Collected text of {} node(s) in {}", texts.len(), description);
        Ok((texts.join("\n"), description))
    }

    /// `text` appears in the current context (page body or `within` scope)
    pub async fn see(&self, text: &str) -> Result<()> {
        self.see_text(text, None).await
    }

    /// `text` appears in the elements matched by `context`
    pub async fn see_in(&self, text: &str, context: impl Into<LocatorInput>) -> Result<()> {
        self.see_text(text, Some(context.into())).await
    }

    pub async fn dont_see(&self, text: &str) -> Result<()> {
        self.dont_see_text(text, None).await
    }

    pub async fn dont_see_in(&self, text: &str, context: impl Into<LocatorInput>) -> Result<()> {
        self.dont_see_text(text, Some(context.into())).await
    }

    async fn see_text(&self, text: &str, context: Option<LocatorInput>) -> Result<()> {
        let (source, description) = self.context_text(context).await?;
        if !source.contains(text) {
            return Err(LocateError::AssertionFailed(format!(
                "expected {} to include \"{}\"",
                description, text
            )));
        }
        Ok(())
    }

    async fn dont_see_text(&self, text: &str, context: Option<LocatorInput>) -> Result<()> {
        let (source, description) = self.context_text(context).await?;
        if source.contains(text) {
            return Err(LocateError::AssertionFailed(format!(
                "expected {} not to include \"{}\"",
                description, text
            )));
        }
        Ok(())
    }

    /// Any checkbox or radio matching `raw` is checked
    pub async fn see_checkbox_is_checked(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Checkable).await?;
        if !self.any_selected(&elements).await? {
            return Err(LocateError::AssertionFailed(format!(
                "expected checkbox {} to be checked",
                raw
            )));
        }
        Ok(())
    }

    /// No checkbox or radio matching `raw` is checked
    pub async fn dont_see_checkbox_is_checked(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Checkable).await?;
        if self.any_selected(&elements).await? {
            return Err(LocateError::AssertionFailed(format!(
                "expected checkbox {} not to be checked",
                raw
            )));
        }
        Ok(())
    }

    /// Click the first clickable element matching `raw`
    pub async fn click(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Clickable).await?;
        info!("Clicking {}", raw);
        self.driver().click(&elements[0]).await?;
        Ok(())
    }

    /// Replace the value of the first field matching `raw`
    pub async fn fill_field(&self, raw: impl Into<LocatorInput>, value: &str) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Field).await?;
        info!("Filling {}", raw);
        let field = &elements[0];
        self.driver().clear(field).await?;
        self.driver().send_keys(field, value).await?;
        Ok(())
    }

    /// Check the first checkbox or radio matching `raw` unless already checked
    pub async fn check_option(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Checkable).await?;
        let option = &elements[0];
        if self.driver().is_selected(option).await? {
            debug!("{} is already checked", raw);
            return Ok(());
        }
        self.driver().click(option).await?;
        Ok(())
    }

    /// Uncheck the first checkbox matching `raw` if it is checked
    pub async fn uncheck_option(&self, raw: impl Into<LocatorInput>) -> Result<()> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Checkable).await?;
        let option = &elements[0];
        if self.driver().is_selected(option).await? {
            self.driver().click(option).await?;
        }
        Ok(())
    }

    /// Text of the first element matching `raw`
    pub async fn grab_text_from(&self, raw: impl Into<LocatorInput>) -> Result<String> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Containment).await?;
        Ok(self.driver().text(&elements[0]).await?)
    }

    /// Attribute `name` of the first element matching `raw`
    pub async fn grab_attribute_from(
        &self,
        raw: impl Into<LocatorInput>,
        name: &str,
    ) -> Result<Option<String>> {
        let raw = raw.into();
        let elements = self.require(&raw, Capability::Containment).await?;
        Ok(self.driver().attribute(&elements[0], name).await?)
    }
}

#[cfg(test)]
#[path = "assertions_test.rs"]
mod assertions_test;
