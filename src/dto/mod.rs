//! Data transfer objects exchanged between services and routes.

pub mod api;
pub mod customers;
