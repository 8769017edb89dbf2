//! custdesk core - customer record model and validation.
//!
//! This crate provides the types shared by every custdesk component:
//! - `client` - REST repository client and view-models
//! - `cli` - Terminal front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Customer, draft and address records, field keys, error maps
//! - [`validation`] - Create and edit rule sets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{RuleSet, validate, validate_create, validate_edit};
