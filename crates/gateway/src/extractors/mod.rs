//! Request extractors.

mod json_body;
mod user_id;

pub use json_body::JsonBody;
pub use user_id::UserIdPath;
