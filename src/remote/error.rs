/// Errors that can occur while submitting a record to the QC server.
///
/// The UI shows only a generic failure notice either way; the distinction
/// exists for the diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server rejected submission: HTTP {0}")]
    Status(reqwest::StatusCode),
}
