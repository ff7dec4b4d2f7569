pub mod mapping;
pub mod path;
pub mod schema;

pub use mapping::Mapping;
pub use path::{Path, PathStep};
pub use schema::{
    ENCODING_CHARACTERS, FIELD_SEPARATOR, HEADER_SEGMENT_ID, SchemaMap, SegmentSchema,
};
