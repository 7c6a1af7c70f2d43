//! Service layer providing record CRUD on top of `models`.
//! - Separates the wire/stored translation from the HTTP surface.
//! - Puts persistence behind the `RecordStore` trait so the store can be swapped.

pub mod errors;
pub mod file;
pub mod pagination;
pub mod record_service;
pub mod records;
pub mod runtime;
pub mod storage;

pub use record_service::RecordService;
