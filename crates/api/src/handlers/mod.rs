pub mod applications;
pub mod auth;
pub mod import;
pub mod status;
