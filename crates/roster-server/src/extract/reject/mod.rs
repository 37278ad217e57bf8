//! Request data extractors whose rejections use the response envelope.

mod json;
mod path;
mod query;
mod validated_json;

pub use json::Json;
pub use path::Path;
pub use query::Query;
pub use validated_json::ValidateJson;
