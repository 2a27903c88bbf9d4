use serde::Serialize;

/// Body for successful deletes: `{success: true, message}`.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}

impl DeletedResponse {
    pub fn new(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
