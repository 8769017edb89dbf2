//! `custdesk show <id>`

use std::io::Write;

use custdesk_client::CustomerRepository;
use custdesk_client::views::{CustomerProfile, ProfilePhase};
use custdesk_core::CustomerId;

use super::CliError;
use crate::render;

/// Print one customer's profile.
pub async fn run<R, W>(repo: R, id: CustomerId, out: &mut W) -> Result<(), CliError>
where
    R: CustomerRepository,
    W: Write,
{
    let mut profile = CustomerProfile::new(id, repo);
    profile.load().await;

    match profile.phase() {
        ProfilePhase::Ready(customer) => {
            render::write_profile(out, customer)?;
            writeln!(out)?;
            writeln!(out, "Edit: {}", profile.edit_route())?;
            Ok(())
        }
        ProfilePhase::NotFound => Err(CliError::NotFound(profile.id().clone())),
        ProfilePhase::Failed(message) => Err(CliError::Load(message.clone())),
        ProfilePhase::Loading => Err(CliError::Load("customer was not loaded".to_string())),
    }
}
