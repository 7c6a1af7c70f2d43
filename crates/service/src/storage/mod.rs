//! Storage abstractions for service layer
//!
//! Contains the ordered JSON document store that both record store
//! implementations build on.

pub mod json_doc_store;
