//! Customer list and search.
//!
//! [`ListState`] owns the fetched collection and the filtered view derived
//! from the current query. [`CustomerList`] drives it against a repository
//! and a confirmation prompt.
//!
//! Filtering happens in memory: the full collection is fetched once and
//! never mutated by a query.

use custdesk_core::{Customer, CustomerId};
use tracing::{debug, error, info, instrument};

use crate::navigation::{Confirm, Route, ViewLifetime};
use crate::repository::CustomerRepository;

pub const FETCH_FAILED: &str = "Failed to fetch customers";
pub const DELETE_FAILED: &str = "Failed to delete customer";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this customer?";
pub const NO_RESULTS: &str = "No customers found";

/// Whether a customer matches a free-text query.
///
/// Names match case-insensitively; the phone matches the query literally.
#[must_use]
pub fn matches_query(customer: &Customer, query: &str) -> bool {
    let needle = query.to_lowercase();
    customer.first_name().to_lowercase().contains(&needle)
        || customer.last_name().to_lowercase().contains(&needle)
        || customer.phone().contains(query)
}

/// Customers matching `query`, in collection order.
#[must_use]
pub fn filter_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    customers
        .iter()
        .filter(|customer| matches_query(customer, query))
        .cloned()
        .collect()
}

/// Phase of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
    /// A fetch or delete failed. The collection, if any, is kept.
    Failed(String),
}

/// Owned state of the list view.
#[derive(Debug, Clone)]
pub struct ListState {
    phase: ListPhase,
    customers: Vec<Customer>,
    query: String,
    filtered: Vec<Customer>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            customers: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &ListPhase {
        &self.phase
    }

    /// The full fetched collection.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The collection filtered by the current query.
    #[must_use]
    pub fn filtered(&self) -> &[Customer] {
        &self.filtered
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Visible error message, if the view is in a failed state.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the view is ready and nothing matches the query.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.phase == ListPhase::Ready && self.filtered.is_empty()
    }

    /// The collection arrived.
    pub fn loaded(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
        self.phase = ListPhase::Ready;
        self.refilter();
    }

    /// The collection could not be fetched.
    pub fn load_failed(&mut self) {
        self.phase = ListPhase::Failed(FETCH_FAILED.to_string());
    }

    /// Change the query and recompute the filtered view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Drop a deleted record from the local collection.
    pub fn removed(&mut self, id: &CustomerId) {
        self.customers.retain(|customer| &customer.id != id);
        self.refilter();
    }

    /// A delete call failed; keep the collection and show the error.
    pub fn delete_failed(&mut self) {
        self.phase = ListPhase::Failed(DELETE_FAILED.to_string());
    }

    fn refilter(&mut self) {
        self.filtered = filter_customers(&self.customers, &self.query);
    }
}

/// Result of a delete request from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    /// The record is gone from the store and the list.
    Deleted,
    /// The store call failed; the list is unchanged.
    Failed,
    /// The view went away before the store answered.
    Discarded,
}

/// List view-model: fetches, filters and deletes customers.
#[derive(Debug)]
pub struct CustomerList<R, C> {
    state: ListState,
    repo: R,
    confirm: C,
    lifetime: ViewLifetime,
}

impl<R, C> CustomerList<R, C>
where
    R: CustomerRepository,
    C: Confirm,
{
    /// A list in the `Loading` phase. Call [`load`](Self::load) to fetch.
    pub fn new(repo: R, confirm: C) -> Self {
        Self {
            state: ListState::new(),
            repo,
            confirm,
            lifetime: ViewLifetime::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Handle for the owning view; dispose it on unmount.
    #[must_use]
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    /// Fetch the full collection.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let result = self.repo.list().await;
        if self.lifetime.is_disposed() {
            debug!("List view disposed, discarding fetch result");
            return;
        }

        match result {
            Ok(customers) => {
                debug!(count = customers.len(), "Customer list loaded");
                self.state.loaded(customers);
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch customers");
                self.state.load_failed();
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    /// Delete a customer after asking for confirmation.
    #[instrument(skip(self, id), fields(customer_id = %id))]
    pub async fn delete(&mut self, id: &CustomerId) -> DeleteOutcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!("Delete declined");
            return DeleteOutcome::Declined;
        }

        let result = self.repo.delete(id).await;
        if self.lifetime.is_disposed() {
            debug!("List view disposed, discarding delete result");
            return DeleteOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                info!("Customer deleted");
                self.state.removed(id);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(error = %e, "Failed to delete customer");
                self.state.delete_failed();
                DeleteOutcome::Failed
            }
        }
    }

    /// Route of the create action.
    #[must_use]
    pub const fn create_route() -> Route {
        Route::CreateCustomer
    }

    /// Route of a row's edit action.
    #[must_use]
    pub fn edit_route(id: &CustomerId) -> Route {
        Route::Edit(id.clone())
    }

    /// Route of a row's profile link.
    #[must_use]
    pub fn profile_route(id: &CustomerId) -> Route {
        Route::Profile(id.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use custdesk_core::CustomerDraft;
    use std::cell::Cell;

    fn customer(id: &str, first: &str, last: &str, phone: &str) -> Customer {
        Customer::from_draft(
            CustomerId::new(id),
            CustomerDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone: phone.to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
                addresses: Vec::new(),
            },
        )
    }

    fn sample() -> Vec<Customer> {
        vec![
            customer("1", "John", "Smith", "5551234567"),
            customer("2", "Jane", "Doe", "5559876543"),
            customer("3", "Bob", "Johnson", "2125550000"),
        ]
    }

    fn always(answer: bool) -> impl Fn(&str) -> bool {
        move |_| answer
    }

    #[test]
    fn test_query_matches_first_name_only_john() {
        let collection = vec![
            customer("1", "John", "Smith", "5551234567"),
            customer("2", "Jane", "Doe", "5559876543"),
        ];
        let result = filter_customers(&collection, "John");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "1");
    }

    #[test]
    fn test_query_is_case_insensitive_on_names() {
        let result = filter_customers(&sample(), "john");
        let ids: Vec<_> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(filter_customers(&sample(), "DOE").len(), 1);
    }

    #[test]
    fn test_phone_is_matched_literally() {
        assert_eq!(filter_customers(&sample(), "212555").len(), 1);
        // Formatted phone queries are not normalized
        assert!(filter_customers(&sample(), "(212) 555").is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert_eq!(filter_customers(&sample(), "").len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        for query in ["j", "Jo", "555", "zzz", ""] {
            let once = filter_customers(&sample(), query);
            let twice = filter_customers(&once, query);
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn test_state_refilters_on_query_and_collection_change() {
        let mut state = ListState::new();
        assert_eq!(state.phase(), &ListPhase::Loading);

        state.set_query("ja");
        state.loaded(sample());
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.customers().len(), 3);

        state.set_query("");
        assert_eq!(state.filtered().len(), 3);

        state.removed(&CustomerId::new("2"));
        assert_eq!(state.customers().len(), 2);
        assert_eq!(state.filtered().len(), 2);

        state.set_query("nobody");
        assert!(state.is_empty_result());
        assert_eq!(state.customers().len(), 2);
    }

    #[tokio::test]
    async fn test_load_success_and_failure() {
        let repo = MemoryRepository::with_customers(sample());
        let mut list = CustomerList::new(repo.clone(), always(true));
        list.load().await;
        assert_eq!(list.state().phase(), &ListPhase::Ready);
        assert_eq!(list.state().filtered().len(), 3);

        repo.set_simulate_failure(true);
        let mut failing = CustomerList::new(repo, always(true));
        failing.load().await;
        assert_eq!(failing.state().error(), Some(FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_delete_confirmed_removes_without_refetch() {
        let repo = MemoryRepository::with_customers(sample());
        let mut list = CustomerList::new(repo.clone(), always(true));
        list.load().await;
        let calls_after_load = repo.call_count();

        let outcome = list.delete(&CustomerId::new("2")).await;
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(list.state().customers().len(), 2);
        // Exactly one call: the delete itself, no re-fetch
        assert_eq!(repo.call_count(), calls_after_load + 1);
        assert_eq!(repo.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_declined_makes_no_call() {
        let repo = MemoryRepository::with_customers(sample());
        let asked = Cell::new(0);
        let confirm = |prompt: &str| {
            assert_eq!(prompt, DELETE_PROMPT);
            asked.set(asked.get() + 1);
            false
        };
        let mut list = CustomerList::new(repo.clone(), confirm);
        list.load().await;
        let calls_after_load = repo.call_count();

        let outcome = list.delete(&CustomerId::new("1")).await;
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(asked.get(), 1);
        assert_eq!(repo.call_count(), calls_after_load);
        assert_eq!(list.state().customers().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_collection() {
        let repo = MemoryRepository::with_customers(sample());
        let mut list = CustomerList::new(repo.clone(), always(true));
        list.load().await;

        repo.set_simulate_failure(true);
        let outcome = list.delete(&CustomerId::new("1")).await;
        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(list.state().error(), Some(DELETE_FAILED));
        assert_eq!(list.state().customers().len(), 3);
    }

    #[tokio::test]
    async fn test_disposed_list_ignores_late_results() {
        let repo = MemoryRepository::with_customers(sample());
        let mut list = CustomerList::new(repo, always(true));
        list.lifetime().dispose();

        list.load().await;
        assert_eq!(list.state().phase(), &ListPhase::Loading);
        assert!(list.state().customers().is_empty());
    }

    #[test]
    fn test_row_routes() {
        type List = CustomerList<MemoryRepository, fn(&str) -> bool>;
        let id = CustomerId::new("abc");
        assert_eq!(List::edit_route(&id).path(), "/customers/abc/edit");
        assert_eq!(List::profile_route(&id).path(), "/customers/abc");
        assert_eq!(List::create_route().path(), "/create-customer");
    }
}
