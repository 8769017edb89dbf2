//! Plain-text rendering of view-model state.

use std::io::{self, Write};

use custdesk_core::{Customer, FieldErrors};

/// One row per customer: id, name, email, phone.
pub fn write_customer_rows<W: Write>(out: &mut W, customers: &[Customer]) -> io::Result<()> {
    let id_width = customers
        .iter()
        .map(|customer| customer.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    writeln!(out, "{:<id_width$}  {:<24}  {:<32}  PHONE", "ID", "NAME", "EMAIL")?;
    for customer in customers {
        writeln!(
            out,
            "{:<id_width$}  {:<24}  {:<32}  {}",
            customer.id.as_str(),
            customer.full_name(),
            customer.email(),
            customer.phone(),
        )?;
    }
    Ok(())
}

/// The profile screen.
pub fn write_profile<W: Write>(out: &mut W, customer: &Customer) -> io::Result<()> {
    writeln!(out, "{}", customer.full_name())?;
    writeln!(out, "  Id:    {}", customer.id)?;
    writeln!(out, "  Email: {}", customer.email())?;
    writeln!(out, "  Phone: {}", customer.phone())?;

    if customer.addresses().is_empty() {
        writeln!(out, "  Addresses: none")?;
    } else {
        writeln!(out, "  Addresses:")?;
        for address in customer.addresses() {
            writeln!(out, "    - {address}")?;
        }
    }
    Ok(())
}

/// Validation messages keyed by field.
pub fn write_field_errors<W: Write>(out: &mut W, errors: &FieldErrors) -> io::Result<()> {
    for (key, message) in errors.iter() {
        writeln!(out, "  {key}: {message}")?;
    }
    Ok(())
}
