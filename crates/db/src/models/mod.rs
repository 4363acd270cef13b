//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the input types used to write it.

pub mod admin;
pub mod application;
