//! In-memory customer store.
//!
//! Keeps records in insertion order behind a shared lock, so clones of a
//! [`MemoryRepository`] see the same data. Ids are UUID v4 strings, which is
//! what a real store hands back for new records.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use custdesk_core::{Customer, CustomerDraft, CustomerId};
use tracing::debug;
use uuid::Uuid;

use super::{CustomerRepository, RepositoryError};

/// In-memory storage backend for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    customers: Mutex<Vec<Customer>>,
    simulate_failure: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given records.
    #[must_use]
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let repo = Self::default();
        *repo.lock() = customers;
        repo
    }

    /// Make every subsequent call fail with [`RepositoryError::Unavailable`].
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.inner.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Number of repository calls made so far, failed ones included.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored records.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Customer> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Customer>> {
        self.inner
            .customers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_call(&self, operation: &str) -> Result<(), RepositoryError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.simulate_failure.load(Ordering::SeqCst) {
            debug!(operation, "Simulated store failure");
            return Err(RepositoryError::Unavailable(format!(
                "simulated failure during {operation}"
            )));
        }
        Ok(())
    }
}

impl CustomerRepository for MemoryRepository {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.begin_call("list")?;
        Ok(self.snapshot())
    }

    async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        self.begin_call("get")?;
        self.lock()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, RepositoryError> {
        self.begin_call("create")?;
        let id = CustomerId::new(Uuid::new_v4().simple().to_string());
        let customer = Customer::from_draft(id, draft.clone());
        self.lock().push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: &CustomerId, draft: &CustomerDraft) -> Result<(), RepositoryError> {
        self.begin_call("update")?;
        let mut customers = self.lock();
        let existing = customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        existing.draft = draft.clone();
        Ok(())
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), RepositoryError> {
        self.begin_call("delete")?;
        let mut customers = self.lock();
        let before = customers.len();
        customers.retain(|c| &c.id != id);
        if customers.len() == before {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }
}
