//! Newtype IDs for type-safe entity references.
//!
//! Customer ids are opaque strings assigned by the backing store. Wrapping
//! them keeps a customer id from being confused with any other string in a
//! request path or form field.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned customer identifier.
///
/// The value is never generated client-side for real records; it only
/// exists once the store has persisted the customer.
///
/// # Example
///
/// ```rust
/// use custdesk_core::CustomerId;
///
/// let id = CustomerId::new("abc123");
/// assert_eq!(id.as_str(), "abc123");
/// assert_eq!(id.to_string(), "abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<CustomerId> for String {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
