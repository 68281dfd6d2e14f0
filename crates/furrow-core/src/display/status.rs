//! Status and confirmation message types for operation feedback.

use std::fmt;

/// A one-line confirmation message.
pub struct OperationStatus {
    pub message: String,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)
    }
}
