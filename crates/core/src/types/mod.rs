//! Core types for custdesk.
//!
//! This module provides the customer record shapes and the field names used
//! to edit and validate them.

pub mod customer;
pub mod field;
pub mod id;

pub use customer::{Address, Customer, CustomerDraft};
pub use field::{AddressField, CustomerField, FieldErrors, FieldKey, UnknownField};
pub use id::CustomerId;
