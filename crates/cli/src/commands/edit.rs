//! `custdesk edit <id>`

use std::io::Write;

use custdesk_client::views::{CustomerForm, FormPhase};
use custdesk_client::{CustomerRepository, RecordingNavigator};
use custdesk_core::{Address, CustomerId};

use super::{AddressAssignment, CliError, FieldAssignment, fill_address, submit};

/// Changes collected from the command line.
///
/// Applied in order: field assignments, address assignments, then new
/// addresses. Address indices refer to the stored addresses.
#[derive(Debug, Clone, Default)]
pub struct EditChanges {
    pub fields: Vec<FieldAssignment>,
    pub address_fields: Vec<AddressAssignment>,
    pub new_addresses: Vec<Address>,
}

/// Load a customer into an edit form, apply changes and submit.
pub async fn run<R, W>(
    repo: R,
    id: CustomerId,
    changes: EditChanges,
    out: &mut W,
) -> Result<CustomerId, CliError>
where
    R: CustomerRepository,
    W: Write,
{
    let navigator = RecordingNavigator::new();
    let mut form = CustomerForm::edit(id, repo, navigator.clone());
    form.load().await;

    if let FormPhase::LoadFailed(message) = form.state().phase() {
        return Err(CliError::Load(message.clone()));
    }

    for FieldAssignment { field, value } in changes.fields {
        form.set_field(field, value)?;
    }
    for AddressAssignment {
        index,
        field,
        value,
    } in changes.address_fields
    {
        form.set_address_field(index, field, value)?;
    }
    for address in &changes.new_addresses {
        form.add_address()?;
        let index = form.state().draft().addresses.len() - 1;
        fill_address(&mut form, index, address)?;
    }

    submit(&mut form, &navigator, out).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::{parse_address, parse_address_assignment, parse_field_assignment};
    use custdesk_client::MemoryRepository;
    use custdesk_client::views::FormError;
    use custdesk_core::{Customer, CustomerDraft};

    fn seeded() -> (MemoryRepository, CustomerId) {
        let id = CustomerId::new("c1");
        let customer = Customer::from_draft(
            id.clone(),
            CustomerDraft {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                phone: "5551234567".to_string(),
                email: "jane@example.com".to_string(),
                addresses: vec![parse_address("1 Main St,Springfield,IL,62701").unwrap()],
            },
        );
        (MemoryRepository::with_customers(vec![customer]), id)
    }

    #[tokio::test]
    async fn test_edit_fields_and_addresses() {
        let (repo, id) = seeded();
        let changes = EditChanges {
            fields: vec![parse_field_assignment("phone=5559876543").unwrap()],
            address_fields: vec![parse_address_assignment("0.zip=62702").unwrap()],
            new_addresses: vec![parse_address("2 Oak Ave,Shelbyville,IL,62565").unwrap()],
        };

        let mut out = Vec::new();
        let saved = run(repo.clone(), id.clone(), changes, &mut out).await.unwrap();
        assert_eq!(saved, id);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Saved customer c1 (/customers/c1)\n"
        );

        let stored = repo.snapshot();
        assert_eq!(stored[0].phone(), "5559876543");
        assert_eq!(stored[0].addresses().len(), 2);
        assert_eq!(stored[0].addresses()[0].zip, "62702");
        assert_eq!(stored[0].addresses()[1].street, "2 Oak Ave");
    }

    #[tokio::test]
    async fn test_edit_rules_apply() {
        let (repo, id) = seeded();
        let changes = EditChanges {
            fields: vec![parse_field_assignment("phone=555-1234").unwrap()],
            ..EditChanges::default()
        };

        let mut out = Vec::new();
        let err = run(repo, id, changes, &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::Validation(1)));
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("phone: Phone must be 10 digits")
        );
    }

    #[tokio::test]
    async fn test_edit_missing_customer() {
        let (repo, _) = seeded();
        let err = run(repo, CustomerId::new("nope"), EditChanges::default(), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Load(_)));
    }

    #[tokio::test]
    async fn test_edit_address_out_of_range() {
        let (repo, id) = seeded();
        let changes = EditChanges {
            address_fields: vec![parse_address_assignment("3.city=Nowhere").unwrap()],
            ..EditChanges::default()
        };
        let err = run(repo, id, changes, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Form(FormError::AddressOutOfRange { index: 3, len: 1 })
        ));
    }
}
