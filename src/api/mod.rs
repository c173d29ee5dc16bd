//! API request extractors and response envelopes

pub mod extract;
pub mod response;

pub use extract::{ApiJson, ApiQuery};
pub use response::{Created, DataResponse, WriteResponse};
