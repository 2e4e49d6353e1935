//! Shared transport plumbing: response envelope, error rendering and
//! validating extractors.

pub mod path_id;
pub mod response;
pub mod validated_json;

pub use path_id::PathId;
pub use response::{status_for, ApiResponse, PageData};
pub use validated_json::{ValidatedJson, ValidatedQuery};
