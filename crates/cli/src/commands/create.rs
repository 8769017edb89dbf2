//! `custdesk create`

use std::io::Write;

use custdesk_client::views::CustomerForm;
use custdesk_client::{CustomerRepository, RecordingNavigator};
use custdesk_core::{Address, CustomerField, CustomerId};

use super::{CliError, fill_address, submit};

/// Field values collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct CreateInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub addresses: Vec<Address>,
}

/// Fill a create form and submit it.
pub async fn run<R, W>(repo: R, input: CreateInput, out: &mut W) -> Result<CustomerId, CliError>
where
    R: CustomerRepository,
    W: Write,
{
    let navigator = RecordingNavigator::new();
    let mut form = CustomerForm::create(repo, navigator.clone());

    form.set_field(CustomerField::FirstName, input.first_name)?;
    form.set_field(CustomerField::LastName, input.last_name)?;
    form.set_field(CustomerField::Phone, input.phone)?;
    form.set_field(CustomerField::Email, input.email)?;

    // The form starts with one blank address
    if input.addresses.is_empty() {
        form.remove_address(0)?;
    }
    for (index, address) in input.addresses.iter().enumerate() {
        if index > 0 {
            form.add_address()?;
        }
        fill_address(&mut form, index, address)?;
    }

    submit(&mut form, &navigator, out).await
}
