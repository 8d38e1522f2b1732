//! Data model and persistence for the todo service.
//!
//! # Overview
//! `TodoStore` owns the SQLite pool and exposes the handful of primary-key
//! operations the HTTP layer needs. It knows nothing about HTTP; status code
//! mapping lives in the server crate.
//!
//! # Design
//! - The table definition (`schema`) and the JSON shape (`types`) are kept
//!   apart; rows are decoded into a private row struct and converted.
//! - `TodoStore` is a cheap `Clone` handle around the pool, built once at
//!   startup and passed into the router state.

pub mod error;
pub mod schema;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::TodoStore;
pub use types::{Todo, TodoInput};
