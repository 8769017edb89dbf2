//! Customer persistence contract.
//!
//! [`CustomerRepository`] is the seam between the view-models and the
//! backing store. Two implementations ship with the crate:
//!
//! - [`CustomerClient`](crate::api::CustomerClient) - the REST API
//! - [`MemoryRepository`] - an in-process store for tests and demos
//!
//! Every call is a single round trip. There are no retries, no timeouts
//! beyond the transport's own, and nothing is cached.

pub mod memory;

use std::future::Future;

use custdesk_core::{Customer, CustomerDraft, CustomerId};
use thiserror::Error;

pub use memory::MemoryRepository;

/// Errors that can occur during repository operations.
///
/// Everything except [`RepositoryError::NotFound`] is a transport failure:
/// the store could not be reached or answered with something unusable.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested id does not resolve.
    #[error("customer not found: {0}")]
    NotFound(CustomerId),

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The store is unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Whether the requested record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a network or server failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !self.is_not_found()
    }
}

/// Persistent store of customer records.
///
/// `create` is the only non-idempotent operation.
pub trait CustomerRepository {
    /// Fetch the full collection.
    fn list(&self) -> impl Future<Output = Result<Vec<Customer>, RepositoryError>> + Send;

    /// Fetch one record.
    fn get(
        &self,
        id: &CustomerId,
    ) -> impl Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Persist a new record, returning it with its server-assigned id.
    fn create(
        &self,
        draft: &CustomerDraft,
    ) -> impl Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Replace the full record at `id`.
    fn update(
        &self,
        id: &CustomerId,
        draft: &CustomerDraft,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove the record at `id`.
    fn delete(&self, id: &CustomerId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
