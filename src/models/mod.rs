//! Models shared across the admin server.

pub mod config;
