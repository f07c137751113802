//! Browser-facing helpers shared by state and routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts durable key-value persistence; `locale` keeps the
//! UI language preference in the same storage.

pub mod locale;
pub mod storage;
