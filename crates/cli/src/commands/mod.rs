//! Subcommands and their shared argument parsing.

use std::io::Write;

use custdesk_client::views::{CustomerForm, FormError, SubmitOutcome};
use custdesk_client::{ConfigError, CustomerRepository, RecordingNavigator, RepositoryError};
use custdesk_core::{Address, AddressField, CustomerField, CustomerId};
use thiserror::Error;

use crate::render;

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("customer not found: {0}")]
    NotFound(CustomerId),

    #[error("{0}")]
    Load(String),

    #[error("validation failed for {0} field(s)")]
    Validation(usize),

    #[error("{0}")]
    Save(String),

    #[error("{0}")]
    Delete(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument parsing
// ─────────────────────────────────────────────────────────────────────────────

/// `--set firstName=Jane`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub field: CustomerField,
    pub value: String,
}

/// `--set-address 0.zip=62701`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAssignment {
    pub index: usize,
    pub field: AddressField,
    pub value: String,
}

/// Parse `street,city,state,zip`.
pub fn parse_address(raw: &str) -> Result<Address, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [street, city, state, zip] => Ok(Address {
            street: (*street).to_string(),
            city: (*city).to_string(),
            state: (*state).to_string(),
            zip: (*zip).to_string(),
            primary: None,
        }),
        _ => Err(format!(
            "expected `street,city,state,zip`, got {} part(s)",
            parts.len()
        )),
    }
}

/// Parse `field=value` where `field` is a wire name such as `firstName`.
pub fn parse_field_assignment(raw: &str) -> Result<FieldAssignment, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `field=value`, got `{raw}`"))?;
    let field = name
        .trim()
        .parse::<CustomerField>()
        .map_err(|e| e.to_string())?;
    Ok(FieldAssignment {
        field,
        value: value.to_string(),
    })
}

/// Parse `index.field=value`, for example `1.city=Springfield`.
pub fn parse_address_assignment(raw: &str) -> Result<AddressAssignment, String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `index.field=value`, got `{raw}`"))?;
    let (index, name) = target
        .split_once('.')
        .ok_or_else(|| format!("expected `index.field`, got `{target}`"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid address index: `{index}`"))?;
    let field = name
        .trim()
        .parse::<AddressField>()
        .map_err(|e| e.to_string())?;
    Ok(AddressAssignment {
        index,
        field,
        value: value.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Form submission
// ─────────────────────────────────────────────────────────────────────────────

/// Fill the address at `index` from a parsed address.
fn fill_address<R: CustomerRepository>(
    form: &mut CustomerForm<R, RecordingNavigator>,
    index: usize,
    address: &Address,
) -> Result<(), FormError> {
    for field in AddressField::ALL {
        form.set_address_field(index, field, field.get(address))?;
    }
    Ok(())
}

/// Submit a filled form and report where it landed.
async fn submit<R, W>(
    form: &mut CustomerForm<R, RecordingNavigator>,
    navigator: &RecordingNavigator,
    out: &mut W,
) -> Result<CustomerId, CliError>
where
    R: CustomerRepository,
    W: Write,
{
    match form.submit().await {
        SubmitOutcome::Saved(id) => {
            let route = navigator
                .last()
                .map_or_else(String::new, |route| route.path());
            writeln!(out, "Saved customer {id} ({route})")?;
            Ok(id)
        }
        SubmitOutcome::Invalid => {
            let errors = form.state().errors();
            render::write_field_errors(out, errors)?;
            Err(CliError::Validation(errors.len()))
        }
        SubmitOutcome::Failed => Err(CliError::Save(
            form.state().submit_error().unwrap_or_default().to_string(),
        )),
        SubmitOutcome::Ignored | SubmitOutcome::Discarded => {
            Err(CliError::Form(FormError::NotEditing))
        }
    }
}
