//! Custom extractors.

mod path_id;
mod validated_json;

pub use path_id::parse_id;
pub use validated_json::ValidatedJson;
