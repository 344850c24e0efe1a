pub mod fields;
pub mod interpret;
pub mod message;
pub mod tables;

pub use fields::{extract_fields, ExtractedFields};
pub use interpret::{degraded_summary, interpret};
pub use message::compose;
