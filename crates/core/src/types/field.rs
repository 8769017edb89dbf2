//! Field names and per-field validation messages.
//!
//! Field keys use the wire names of the draft (`firstName`, `email`) and,
//! for addresses, a field prefix plus the address position
//! (`addressZip_1`). Keys for different positions never collide.

use core::fmt;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::customer::{Address, CustomerDraft};

/// Error returned when a field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// Editable fields
// ─────────────────────────────────────────────────────────────────────────────

/// A top-level scalar field of a [`CustomerDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    FirstName,
    LastName,
    Phone,
    Email,
}

impl CustomerField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::FirstName, Self::LastName, Self::Phone, Self::Email];

    /// Wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    /// Borrow this field's value from a draft.
    #[must_use]
    pub fn get(self, draft: &CustomerDraft) -> &str {
        match self {
            Self::FirstName => &draft.first_name,
            Self::LastName => &draft.last_name,
            Self::Phone => &draft.phone,
            Self::Email => &draft.email,
        }
    }

    /// Mutable access to this field's value in a draft.
    pub fn get_mut(self, draft: &mut CustomerDraft) -> &mut String {
        match self {
            Self::FirstName => &mut draft.first_name,
            Self::LastName => &mut draft.last_name,
            Self::Phone => &mut draft.phone,
            Self::Email => &mut draft.email,
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CustomerField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A scalar field of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Street,
    City,
    State,
    Zip,
}

impl AddressField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Street, Self::City, Self::State, Self::Zip];

    /// Wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
        }
    }

    /// Prefix used when building a positional [`FieldKey`].
    const fn key_prefix(self) -> &'static str {
        match self {
            Self::Street => "addressStreet",
            Self::City => "addressCity",
            Self::State => "addressState",
            Self::Zip => "addressZip",
        }
    }

    #[must_use]
    pub fn get(self, address: &Address) -> &str {
        match self {
            Self::Street => &address.street,
            Self::City => &address.city,
            Self::State => &address.state,
            Self::Zip => &address.zip,
        }
    }

    pub fn get_mut(self, address: &mut Address) -> &mut String {
        match self {
            Self::Street => &mut address.street,
            Self::City => &mut address.city,
            Self::State => &mut address.state,
            Self::Zip => &mut address.zip,
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field keys
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies which draft field a validation message applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// A top-level field.
    Customer(CustomerField),
    /// A field of the address at `index`. Orders by position first.
    Address {
        index: usize,
        field: AddressField,
    },
}

impl FieldKey {
    /// Whether this key refers to an address position.
    #[must_use]
    pub const fn is_address(&self) -> bool {
        matches!(self, Self::Address { .. })
    }
}

impl From<CustomerField> for FieldKey {
    fn from(field: CustomerField) -> Self {
        Self::Customer(field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer(field) => f.write_str(field.name()),
            Self::Address { field, index } => write!(f, "{}_{index}", field.key_prefix()),
        }
    }
}

impl FromStr for FieldKey {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(field) = s.parse::<CustomerField>() {
            return Ok(Self::Customer(field));
        }

        let unknown = || UnknownField(s.to_string());
        let (prefix, index) = s.rsplit_once('_').ok_or_else(unknown)?;
        let index = index.parse::<usize>().map_err(|_| unknown())?;
        let field = AddressField::ALL
            .into_iter()
            .find(|field| field.key_prefix() == prefix)
            .ok_or_else(unknown)?;

        Ok(Self::Address { field, index })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field errors
// ─────────────────────────────────────────────────────────────────────────────

/// Validation messages keyed by field.
///
/// An empty set means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldKey, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, key: impl Into<FieldKey>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    /// Message for a field, if any.
    #[must_use]
    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Message for a field given its wire key (e.g. `addressZip_1`).
    #[must_use]
    pub fn get_by_name(&self, key: &str) -> Option<&str> {
        key.parse::<FieldKey>().ok().and_then(|key| self.get(&key))
    }

    #[must_use]
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Drop every address-position message, keeping top-level ones.
    pub fn clear_addresses(&mut self) {
        self.0.retain(|key, _| !key.is_address());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.0.iter().map(|(key, message)| (key, message.as_str()))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, message) in &self.0 {
            map.serialize_entry(&key.to_string(), message)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_display() {
        assert_eq!(FieldKey::from(CustomerField::FirstName).to_string(), "firstName");
        assert_eq!(
            FieldKey::Address {
                field: AddressField::Zip,
                index: 2
            }
            .to_string(),
            "addressZip_2"
        );
    }

    #[test]
    fn test_field_key_parse() {
        assert_eq!(
            "email".parse::<FieldKey>().unwrap(),
            FieldKey::Customer(CustomerField::Email)
        );
        assert_eq!(
            "addressStreet_10".parse::<FieldKey>().unwrap(),
            FieldKey::Address {
                field: AddressField::Street,
                index: 10
            }
        );
        assert!("addressZip_x".parse::<FieldKey>().is_err());
        assert!("nickname".parse::<FieldKey>().is_err());
    }

    #[test]
    fn test_positions_do_not_collide() {
        let mut errors = FieldErrors::new();
        errors.insert(
            FieldKey::Address {
                field: AddressField::Zip,
                index: 0,
            },
            "first",
        );
        errors.insert(
            FieldKey::Address {
                field: AddressField::Zip,
                index: 2,
            },
            "third",
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get_by_name("addressZip_0"), Some("first"));
        assert_eq!(errors.get_by_name("addressZip_2"), Some("third"));
    }

    #[test]
    fn test_clear_addresses_keeps_top_level() {
        let mut errors = FieldErrors::new();
        errors.insert(CustomerField::Phone, "bad phone");
        errors.insert(
            FieldKey::Address {
                field: AddressField::City,
                index: 1,
            },
            "City is required",
        );
        errors.clear_addresses();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get_by_name("phone"), Some("bad phone"));
    }

    #[test]
    fn test_serialize_uses_wire_keys() {
        let mut errors = FieldErrors::new();
        errors.insert(CustomerField::Email, "Invalid email address");
        errors.insert(
            FieldKey::Address {
                field: AddressField::State,
                index: 0,
            },
            "State is required",
        );
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"], "Invalid email address");
        assert_eq!(json["addressState_0"], "State is required");
    }

    #[test]
    fn test_field_accessors() {
        let mut draft = CustomerDraft::with_blank_address();
        *CustomerField::Phone.get_mut(&mut draft) = "5551234567".to_string();
        assert_eq!(CustomerField::Phone.get(&draft), "5551234567");

        let address = draft.addresses.first_mut().unwrap();
        *AddressField::Zip.get_mut(address) = "12345".to_string();
        assert_eq!(AddressField::Zip.get(address), "12345");
        assert_eq!("zip".parse::<AddressField>().unwrap(), AddressField::Zip);
    }

    #[test]
    fn test_errors_iterate_address_by_address() {
        let mut errors = FieldErrors::new();
        for index in [1, 0] {
            for field in AddressField::ALL {
                errors.insert(FieldKey::Address { field, index }, "required");
            }
        }
        errors.insert(CustomerField::Phone, "invalid");
        errors.insert(CustomerField::FirstName, "required");

        let keys: Vec<String> = errors.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(
            keys,
            [
                "firstName",
                "phone",
                "addressStreet_0",
                "addressCity_0",
                "addressState_0",
                "addressZip_0",
                "addressStreet_1",
                "addressCity_1",
                "addressState_1",
                "addressZip_1",
            ]
        );
    }
}
