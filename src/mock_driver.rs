// Recording driver for unit tests
//
// Answers queries from a lookup table instead of a DOM and records every call,
// so tests can check which strategies ran and what the implicit wait was set to.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use crate::driver::{Driver, InvalidSelector, Query};

#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    pub id: String,
    pub tag: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub selected: bool,
    pub displayed: bool,
}

impl MockElement {
    pub fn new(id: &str) -> Self {
        MockElement {
            id: id.to_string(),
            tag: "div".to_string(),
            text: String::new(),
            attributes: BTreeMap::new(),
            selected: false,
            displayed: true,
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find {
        parent: Option<String>,
        query: Query,
    },
    ImplicitWait(Duration),
    EnterFrame(String),
    LeaveFrame,
    Click(String),
    Clear(String),
    SendKeys(String, String),
}

#[derive(Default)]
pub struct MockDriver {
    root: Mutex<HashMap<Query, Vec<MockElement>>>,
    scoped: Mutex<HashMap<(String, Query), Vec<MockElement>>>,
    failing: Mutex<Vec<Query>>,
    rejected: Mutex<Vec<Query>>,
    fail_implicit_wait: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
    implicit_wait: Mutex<Duration>,
    frame_depth: Mutex<usize>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` from the document root with `elements`
    pub fn on(&self, query: Query, elements: Vec<MockElement>) -> &Self {
        self.root.lock().unwrap().insert(query, elements);
        self
    }

    /// Answer `query` issued below the element `parent`
    pub fn on_within(&self, parent: &str, query: Query, elements: Vec<MockElement>) -> &Self {
        self.scoped
            .lock()
            .unwrap()
            .insert((parent.to_string(), query), elements);
        self
    }

    /// Make `query` fail like a dropped session
    pub fn fail_on(&self, query: Query) -> &Self {
        self.failing.lock().unwrap().push(query);
        self
    }

    /// Make `query` fail as a malformed selector
    pub fn reject(&self, query: Query) -> &Self {
        self.rejected.lock().unwrap().push(query);
        self
    }

    pub fn fail_implicit_wait(&self) {
        *self.fail_implicit_wait.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Queries sent so far, in order
    pub fn queries(&self) -> Vec<Query> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Find { query, .. } => Some(query),
                _ => None,
            })
            .collect()
    }

    /// Every implicit wait value that was set, in order
    pub fn wait_history(&self) -> Vec<Duration> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ImplicitWait(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn implicit_wait(&self) -> Duration {
        *self.implicit_wait.lock().unwrap()
    }

    pub fn frame_depth(&self) -> usize {
        *self.frame_depth.lock().unwrap()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self, query: &Query) -> Result<()> {
        if self.failing.lock().unwrap().contains(query) {
            bail!("invalid session id: session terminated");
        }
        if self.rejected.lock().unwrap().contains(query) {
            return Err(InvalidSelector {
                query: query.clone(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for MockDriver {
    type Element = MockElement;

    async fn find_all(&self, query: &Query) -> Result<Vec<MockElement>> {
        self.record(Call::Find {
            parent: None,
            query: query.clone(),
        });
        self.check_failing(query)?;
        Ok(self
            .root
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_all_from(&self, parent: &MockElement, query: &Query) -> Result<Vec<MockElement>> {
        self.record(Call::Find {
            parent: Some(parent.id.clone()),
            query: query.clone(),
        });
        self.check_failing(query)?;
        Ok(self
            .scoped
            .lock()
            .unwrap()
            .get(&(parent.id.clone(), query.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<()> {
        self.record(Call::ImplicitWait(timeout));
        if *self.fail_implicit_wait.lock().unwrap() {
            bail!("could not update timeouts");
        }
        *self.implicit_wait.lock().unwrap() = timeout;
        Ok(())
    }

    async fn enter_frame(&self, frame: &MockElement) -> Result<()> {
        self.record(Call::EnterFrame(frame.id.clone()));
        *self.frame_depth.lock().unwrap() += 1;
        Ok(())
    }

    async fn leave_frame(&self) -> Result<()> {
        self.record(Call::LeaveFrame);
        let mut depth = self.frame_depth.lock().unwrap();
        *depth = depth.saturating_sub(1);
        Ok(())
    }

    async fn text(&self, element: &MockElement) -> Result<String> {
        Ok(element.text.clone())
    }

    async fn attribute(&self, element: &MockElement, name: &str) -> Result<Option<String>> {
        Ok(element.attributes.get(name).cloned())
    }

    async fn tag_name(&self, element: &MockElement) -> Result<String> {
        Ok(element.tag.clone())
    }

    async fn is_selected(&self, element: &MockElement) -> Result<bool> {
        Ok(element.selected)
    }

    async fn is_displayed(&self, element: &MockElement) -> Result<bool> {
        Ok(element.displayed)
    }

    async fn click(&self, element: &MockElement) -> Result<()> {
        self.record(Call::Click(element.id.clone()));
        Ok(())
    }

    async fn clear(&self, element: &MockElement) -> Result<()> {
        self.record(Call::Clear(element.id.clone()));
        Ok(())
    }

    async fn send_keys(&self, element: &MockElement, text: &str) -> Result<()> {
        self.record(Call::SendKeys(element.id.clone(), text.to_string()));
        Ok(())
    }
}
