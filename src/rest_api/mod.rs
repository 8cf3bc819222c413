//! # REST API Module
//!
//! Response shaping shared by every HTTP handler: the JSON envelope and
//! the error-to-status mapping.

pub mod errors;
pub mod response;

pub use errors::{RestError, RestResult};
pub use response::{Envelope, ErrorResponse};
