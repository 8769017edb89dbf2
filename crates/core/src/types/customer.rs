//! Customer record types.
//!
//! A customer exists in two shapes:
//!
//! - [`CustomerDraft`] - what a form holds. Any field may be empty or invalid
//!   and there is no id.
//! - [`Customer`] - a persisted record returned by the store. Always carries
//!   a server-assigned [`CustomerId`].
//!
//! The only conversions between the two are [`Customer::from_draft`] (adds
//! the id) and [`Customer::into_draft`] (strips it).

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::id::CustomerId;

// ─────────────────────────────────────────────────────────────────────────────
// Address
// ─────────────────────────────────────────────────────────────────────────────

/// A postal address attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    #[serde(default)]
    pub street: String,
    /// City name.
    #[serde(default)]
    pub city: String,
    /// State or province.
    #[serde(default)]
    pub state: String,
    /// Five-digit zip code. Older records store this as `zipCode`.
    #[serde(default, alias = "zipCode")]
    pub zip: String,
    /// Whether this is the customer's primary address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl Address {
    /// An address with every field empty, as seeded by the forms.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether the primary flag is set.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.street, self.city, self.state, self.zip)?;
        if self.is_primary() {
            f.write_str(" (Primary)")?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draft
// ─────────────────────────────────────────────────────────────────────────────

/// An in-progress customer as held by a create or edit form.
///
/// This is also the request body for `POST` and `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Phone number, expected as ten digits.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Addresses in display order. Never null on the wire.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub addresses: Vec<Address>,
}

impl CustomerDraft {
    /// The initial draft of the create form: empty fields and one blank address.
    #[must_use]
    pub fn with_blank_address() -> Self {
        Self {
            addresses: vec![Address::blank()],
            ..Self::default()
        }
    }
}

/// Treats a JSON `null` sequence as an empty one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Persisted record
// ─────────────────────────────────────────────────────────────────────────────

/// A customer as stored and returned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned id. Legacy payloads name it `_id`.
    #[serde(alias = "_id")]
    pub id: CustomerId,
    /// Everything except the id.
    #[serde(flatten)]
    pub draft: CustomerDraft,
}

impl Customer {
    /// Attach a server-assigned id to a draft.
    #[must_use]
    pub const fn from_draft(id: CustomerId, draft: CustomerDraft) -> Self {
        Self { id, draft }
    }

    /// Strip the id, yielding an editable draft.
    #[must_use]
    pub fn into_draft(self) -> CustomerDraft {
        self.draft
    }

    /// Get the customer's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.draft.first_name, self.draft.last_name)
            .trim()
            .to_string()
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.draft.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.draft.last_name
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.draft.phone
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.draft.email
    }

    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.draft.addresses
    }
}
