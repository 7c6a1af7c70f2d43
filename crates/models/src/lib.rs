//! Record shapes and the image attachment codec.
//!
//! - `attachment` / `data_uri`: binary photos and their `data:` URI wire form.
//! - `schema`: which scalar and image fields a deployment stores.
//! - `record`: stored records, merge patches and the outbound JSON shape.

pub mod attachment;
pub mod data_uri;
pub mod errors;
pub mod record;
pub mod schema;

pub use attachment::ImageAttachment;
pub use record::{Record, RecordId, RecordPatch};
pub use schema::RecordSchema;
