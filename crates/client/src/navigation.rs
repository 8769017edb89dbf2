//! Navigation and confirmation capabilities.
//!
//! View-models never render or route by themselves. They ask a
//! [`Navigator`] to move to a [`Route`] and a [`Confirm`] to answer yes/no
//! questions, so the same state machines drive a terminal, a test, or any
//! other front-end.

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use custdesk_core::CustomerId;

/// A destination in the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/customer-list`
    CustomerList,
    /// `/create-customer`
    CreateCustomer,
    /// `/customers/{id}`
    Profile(CustomerId),
    /// `/customers/{id}/edit`
    Edit(CustomerId),
}

impl Route {
    /// Path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::CustomerList => "/customer-list".to_string(),
            Self::CreateCustomer => "/create-customer".to_string(),
            Self::Profile(id) => format!("/customers/{id}"),
            Self::Edit(id) => format!("/customers/{id}/edit"),
        }
    }

    /// Parse a path back into a route.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => return Some(Self::Home),
            "/customer-list" => return Some(Self::CustomerList),
            "/create-customer" => return Some(Self::CreateCustomer),
            _ => {}
        }

        let rest = path.strip_prefix("/customers/")?;
        match rest.split('/').collect::<Vec<_>>().as_slice() {
            [id] if !id.is_empty() => Some(Self::Profile(CustomerId::new(*id))),
            [id, "edit"] if !id.is_empty() => Some(Self::Edit(CustomerId::new(*id))),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the application to another view.
pub trait Navigator {
    fn go_to(&self, route: &Route);
}

impl<F: Fn(&Route)> Navigator for F {
    fn go_to(&self, route: &Route) {
        self(route);
    }
}

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A [`Navigator`] that only remembers where it was sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route visited, oldest first.
    #[must_use]
    pub fn visited(&self) -> Vec<Route> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent route, if any.
    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: &Route) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.clone());
    }
}

/// Tracks whether the view that owns a view-model is still mounted.
///
/// Clones share the flag: the front-end keeps one and calls
/// [`dispose`](Self::dispose) on unmount, and the view-model checks it
/// before applying a result that arrived late.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    disposed: Arc<AtomicBool>,
}

impl ViewLifetime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view as gone.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
