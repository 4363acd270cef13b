//! Pure domain logic for the scholarship status service.
//!
//! Nothing in this crate touches the network, the database, or the clock of
//! a running server; every function here is deterministic given its inputs.

pub mod application;
pub mod csv_import;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
