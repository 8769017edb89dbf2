//! Customer profile view.

use custdesk_core::{Customer, CustomerId};
use tracing::{debug, error, instrument};

use crate::navigation::{Route, ViewLifetime};
use crate::repository::CustomerRepository;

/// Phase of the profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePhase {
    Loading,
    Ready(Customer),
    NotFound,
    Failed(String),
}

/// Profile view-model: shows one customer.
#[derive(Debug)]
pub struct CustomerProfile<R> {
    id: CustomerId,
    phase: ProfilePhase,
    repo: R,
    lifetime: ViewLifetime,
}

impl<R: CustomerRepository> CustomerProfile<R> {
    pub fn new(id: CustomerId, repo: R) -> Self {
        Self {
            id,
            phase: ProfilePhase::Loading,
            repo,
            lifetime: ViewLifetime::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &CustomerId {
        &self.id
    }

    #[must_use]
    pub const fn phase(&self) -> &ProfilePhase {
        &self.phase
    }

    /// The loaded customer, once ready.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        match &self.phase {
            ProfilePhase::Ready(customer) => Some(customer),
            _ => None,
        }
    }

    #[must_use]
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    #[instrument(skip(self), fields(customer_id = %self.id))]
    pub async fn load(&mut self) {
        let result = self.repo.get(&self.id).await;
        if self.lifetime.is_disposed() {
            debug!("Profile disposed, discarding fetch result");
            return;
        }

        self.phase = match result {
            Ok(customer) => ProfilePhase::Ready(customer),
            Err(e) if e.is_not_found() => ProfilePhase::NotFound,
            Err(e) => {
                error!(error = %e, "Error fetching customer details");
                ProfilePhase::Failed(e.to_string())
            }
        };
    }

    /// Route of the "Edit Customer" link.
    #[must_use]
    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id.clone())
    }

    /// Route of the "Back to Customer List" link.
    #[must_use]
    pub const fn back_route(&self) -> Route {
        Route::Home
    }
}
