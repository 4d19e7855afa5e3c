//! Domain types and pure logic for the customers admin page.

pub mod customer;
pub mod filter;
pub mod search;
pub mod types;
pub mod view;
