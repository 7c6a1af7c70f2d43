//! Record persistence: the `RecordStore` seam and its implementations.

pub mod doc_store;
pub mod store;

pub use doc_store::DocRecordStore;
pub use store::RecordStore;
