//! `custdesk list`

use std::io::Write;

use custdesk_client::CustomerRepository;
use custdesk_client::views::CustomerList;
use custdesk_client::views::list::NO_RESULTS;

use super::CliError;
use crate::render;

/// Fetch every customer and print those matching `query`.
pub async fn run<R, W>(repo: R, query: Option<&str>, out: &mut W) -> Result<(), CliError>
where
    R: CustomerRepository,
    W: Write,
{
    // Listing never deletes, so nothing is ever confirmed
    let mut view = CustomerList::new(repo, |_: &str| false);
    view.load().await;

    if let Some(message) = view.state().error() {
        return Err(CliError::Load(message.to_string()));
    }
    if let Some(query) = query {
        view.set_query(query);
    }

    if view.state().is_empty_result() {
        writeln!(out, "{NO_RESULTS}")?;
    } else {
        render::write_customer_rows(out, view.state().filtered())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use custdesk_client::MemoryRepository;
    use custdesk_core::{Customer, CustomerDraft, CustomerId};

    fn customer(id: &str, first: &str, last: &str, email: &str) -> Customer {
        Customer::from_draft(
            CustomerId::new(id),
            CustomerDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                ..CustomerDraft::default()
            },
        )
    }

    fn repo() -> MemoryRepository {
        MemoryRepository::with_customers(vec![
            customer("1", "John", "Doe", "john@x.com"),
            customer("2", "Jane", "Smith", "jane@y.com"),
        ])
    }

    #[tokio::test]
    async fn test_lists_everything_without_query() {
        let mut out = Vec::new();
        run(repo(), None, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("John Doe"));
        assert!(text.contains("Jane Smith"));
    }

    #[tokio::test]
    async fn test_filters_by_query() {
        let mut out = Vec::new();
        run(repo(), Some("jane"), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("John Doe"));
        assert!(text.contains("Jane Smith"));
    }

    #[tokio::test]
    async fn test_no_match_prints_empty_message() {
        let mut out = Vec::new();
        run(repo(), Some("zzz"), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No customers found\n");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_an_error() {
        let repo = repo();
        repo.set_simulate_failure(true);
        let mut out = Vec::new();
        let err = run(repo, None, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch customers");
        assert!(out.is_empty());
    }
}
