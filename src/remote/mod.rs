//! Remote submission to the QC server.
//!
//! One outbound call: POST the full record as JSON to
//! `<base-url>/measurements`. The response body is opaque to this
//! application; only success or failure matters to the save flow.

mod error;
mod gateway;

pub use error::SubmitError;
pub use gateway::{HttpGateway, SubmissionGateway};
