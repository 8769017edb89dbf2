//! `custdesk delete <id>`

use std::io::Write;

use custdesk_client::views::{CustomerList, DeleteOutcome};
use custdesk_client::{Confirm, CustomerRepository};
use custdesk_core::CustomerId;

use super::CliError;
use crate::prompt::StdinConfirm;

/// Delete a customer, prompting on the terminal unless `yes` is set.
pub async fn run<R, W>(repo: R, id: &CustomerId, yes: bool, out: &mut W) -> Result<(), CliError>
where
    R: CustomerRepository,
    W: Write,
{
    if yes {
        delete_with(repo, id, |_: &str| true, out).await
    } else {
        delete_with(repo, id, StdinConfirm, out).await
    }
}

async fn delete_with<R, C, W>(repo: R, id: &CustomerId, confirm: C, out: &mut W) -> Result<(), CliError>
where
    R: CustomerRepository,
    C: Confirm,
    W: Write,
{
    let mut view = CustomerList::new(repo, confirm);

    match view.delete(id).await {
        DeleteOutcome::Deleted => {
            writeln!(out, "Deleted customer {id}")?;
            Ok(())
        }
        DeleteOutcome::Declined => {
            writeln!(out, "Cancelled")?;
            Ok(())
        }
        DeleteOutcome::Failed | DeleteOutcome::Discarded => Err(CliError::Delete(
            view.state().error().unwrap_or_default().to_string(),
        )),
    }
}
