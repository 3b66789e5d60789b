//! HTTP gateway port

use crate::core::models::{HttpOutcome, HttpRequest};
use crate::error::NetworkError;

/// Sends blocking HTTP requests.
///
/// Any response, whatever its status, is an [`HttpOutcome`]; only transport
/// failures are errors. Classification is the caller's job.
pub trait HttpGateway {
    /// Send `request` and wait for the response
    fn send(&self, request: &HttpRequest) -> Result<HttpOutcome, NetworkError>;
}
