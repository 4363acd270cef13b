//! Business operations over the record store.
//!
//! Handlers stay thin: they extract and authenticate, then call into one of
//! these modules with `&dyn ApplicationStore`.

pub mod applications;
pub mod csv_import;
pub mod listing;
pub mod status_lookup;

#[cfg(test)]
pub(crate) mod faulty_store;
