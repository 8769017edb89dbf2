//! Customer operations over REST.

use custdesk_core::{Customer, CustomerDraft, CustomerId};
use tracing::{debug, instrument};

use super::CustomerClient;
use crate::repository::{CustomerRepository, RepositoryError};

impl CustomerRepository for CustomerClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers: Vec<Customer> = self.get_json(None).await?;
        debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    #[instrument(skip(self, id), fields(customer_id = %id))]
    async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        self.get_json(Some(id)).await
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, RepositoryError> {
        let customer: Customer = self.post_json(draft).await?;
        debug!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    #[instrument(skip(self, id, draft), fields(customer_id = %id))]
    async fn update(&self, id: &CustomerId, draft: &CustomerDraft) -> Result<(), RepositoryError> {
        self.put_json(id, draft).await
    }

    #[instrument(skip(self, id), fields(customer_id = %id))]
    async fn delete(&self, id: &CustomerId) -> Result<(), RepositoryError> {
        self.send_delete(id).await
    }
}
