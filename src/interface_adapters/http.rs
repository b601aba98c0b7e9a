// JSON body for plain HTTP responses, e.g. rejecting an upgrade when the relay is full.

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
