//! State behind `within` blocks
//!
//! A session sends every find either to the document or to one element. While
//! a `within` scope is active that binding points at the scoped element (or at
//! the document of an entered frame) and the previous binding is kept so it
//! can be put back exactly on exit. Only one scope may be active at a time.

use crate::errors::{LocateError, Result};
use crate::locator::LocatorInput;

/// Where root-level finds are sent
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRoot<E> {
    Document,
    Element(E),
}

impl<E> SearchRoot<E> {
    pub fn element(&self) -> Option<&E> {
        match self {
            SearchRoot::Document => None,
            SearchRoot::Element(el) => Some(el),
        }
    }
}

/// What a `within` block narrows to
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeTarget {
    /// An element sub-tree
    Element(LocatorInput),
    /// The document inside an iframe
    Frame(LocatorInput),
}

impl ScopeTarget {
    /// `{"frame": ...}` selects a frame, anything else an element
    pub fn from_input(raw: LocatorInput) -> Self {
        match raw.single_entry() {
            Some(("frame", value)) => ScopeTarget::Frame(LocatorInput::from(value)),
            _ => ScopeTarget::Element(raw),
        }
    }

    pub fn locator(&self) -> &LocatorInput {
        match self {
            ScopeTarget::Element(l) | ScopeTarget::Frame(l) => l,
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, ScopeTarget::Frame(_))
    }
}

impl std::fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeTarget::Element(l) => write!(f, "{}", l),
            ScopeTarget::Frame(l) => write!(f, "frame {}", l),
        }
    }
}

/// A scope that has been entered
#[derive(Debug, Clone)]
pub struct ActiveScope<E> {
    pub target: ScopeTarget,
    saved: SearchRoot<E>,
}

/// Binding of a session's find operations
#[derive(Debug)]
pub struct ScopeState<E> {
    root: SearchRoot<E>,
    active: Option<ActiveScope<E>>,
}

impl<E: Clone> Default for ScopeState<E> {
    fn default() -> Self {
        ScopeState {
            root: SearchRoot::Document,
            active: None,
        }
    }
}

impl<E: Clone> ScopeState<E> {
    pub fn root(&self) -> &SearchRoot<E> {
        &self.root
    }

    pub fn active(&self) -> Option<&ActiveScope<E>> {
        self.active.as_ref()
    }

    /// Refuse a second scope while one is active
    pub fn ensure_inactive(&self, requested: &ScopeTarget) -> Result<()> {
        match &self.active {
            Some(active) => Err(LocateError::ScopeAlreadyActive {
                active: active.target.to_string(),
                requested: requested.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Rebind finds to `root`, keeping the current binding for `exit`
    pub fn enter(&mut self, target: ScopeTarget, root: SearchRoot<E>) -> Result<()> {
        self.ensure_inactive(&target)?;
        let saved = std::mem::replace(&mut self.root, root);
        self.active = Some(ActiveScope { target, saved });
        Ok(())
    }

    /// Restore the binding saved by `enter`; does nothing when no scope is active
    pub fn exit(&mut self) -> Option<ActiveScope<E>> {
        let active = self.active.take()?;
        self.root = active.saved.clone();
        Some(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(css: &str) -> ScopeTarget {
        ScopeTarget::Element(LocatorInput::from(css))
    }

    #[test]
    fn test_enter_then_exit_restores_binding() {
        let mut state: ScopeState<&str> = ScopeState::default();
        let before = state.root().clone();

        state
            .enter(element("#form"), SearchRoot::Element("form-el"))
            .unwrap();
        assert_eq!(state.root(), &SearchRoot::Element("form-el"));
        assert!(state.active().is_some());

        let exited = state.exit().unwrap();
        assert_eq!(exited.target, element("#form"));
        assert_eq!(state.root(), &before);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_exit_is_idempotent() {
        let mut state: ScopeState<&str> = ScopeState::default();
        assert!(state.exit().is_none());
        state.enter(element("#a"), SearchRoot::Element("a")).unwrap();
        assert!(state.exit().is_some());
        assert!(state.exit().is_none());
        assert_eq!(state.root(), &SearchRoot::Document);
    }

    #[test]
    fn test_second_enter_is_rejected() {
        let mut state: ScopeState<&str> = ScopeState::default();
        state.enter(element("#a"), SearchRoot::Element("a")).unwrap();

        let err = state
            .enter(element("#b"), SearchRoot::Element("b"))
            .unwrap_err();
        assert!(matches!(err, LocateError::ScopeAlreadyActive { .. }));
        assert!(err.to_string().contains("#a"));
        // The first scope is untouched
        assert_eq!(state.root(), &SearchRoot::Element("a"));
    }

    #[test]
    fn test_frame_target_from_descriptor() {
        let target = ScopeTarget::from_input(LocatorInput::strict("frame", "#payment"));
        assert!(target.is_frame());
        assert_eq!(target.locator(), &LocatorInput::from("#payment"));
        assert_eq!(target.to_string(), "frame #payment");

        let target = ScopeTarget::from_input(LocatorInput::strict("css", "#payment"));
        assert!(!target.is_frame());
    }
}
