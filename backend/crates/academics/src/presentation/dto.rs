//! API DTOs
//!
//! The entities themselves are the response bodies (see
//! `domain::entities`); only the confirmation shape lives here.

use serde::Serialize;

/// Plain confirmation message (delete endpoints)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
