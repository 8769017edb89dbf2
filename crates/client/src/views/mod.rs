//! View-models for the customer screens.
//!
//! Each view-model owns its state exclusively and exposes it read-only.
//! State transitions live on plain structs ([`ListState`], [`FormState`])
//! so they can be exercised without a repository; the async drivers wrap
//! them with repository calls, navigation and disposal checks.
//!
//! - [`list`] - Customer list with search and delete
//! - [`form`] - Create and edit forms
//! - [`profile`] - Single customer view

pub mod form;
pub mod list;
pub mod profile;

pub use form::{CustomerForm, FormError, FormFlow, FormPhase, FormState, SubmitOutcome, SubmitStart};
pub use list::{CustomerList, DeleteOutcome, ListPhase, ListState, filter_customers, matches_query};
pub use profile::{CustomerProfile, ProfilePhase};
