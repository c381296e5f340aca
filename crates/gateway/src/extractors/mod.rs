//! Request extractors.

mod context;
mod search;
mod validated_json;

pub use context::{Ctx, REQUEST_ID_HEADER};
pub use search::SearchParams;
pub use validated_json::ValidatedJson;
