//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls the session core depends on and `types`
//! defines their wire schema.

pub mod api;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
