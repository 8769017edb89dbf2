//! custdesk client - customer repository and view-models.
//!
//! This crate connects the core record model to a backing store and to
//! whatever front-end renders the screens:
//!
//! - [`repository`] - The persistence contract and an in-memory store
//! - [`api`] - REST implementation of the contract
//! - [`views`] - List, profile and form view-models
//! - [`navigation`] - Routes and the navigation/confirmation capabilities
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod navigation;
pub mod repository;
pub mod views;

pub use api::CustomerClient;
pub use config::{ClientConfig, ConfigError};
pub use navigation::{Confirm, Navigator, RecordingNavigator, Route, ViewLifetime};
pub use repository::{CustomerRepository, MemoryRepository, RepositoryError};
