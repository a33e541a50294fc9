use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

/// Uniform result of every product operation.
///
/// A missing product, user or category is reported here with
/// `is_success == false` and a readable `exception_message`; it is never an
/// `Err`. Callers branch on `is_success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub is_success: bool,
    pub entity: Option<T>,
    pub list: Vec<T>,
    pub total_count: i64,
    pub exception_message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn entity(entity: T) -> Self {
        Self {
            is_success: true,
            entity: Some(entity),
            list: Vec::new(),
            total_count: 0,
            exception_message: None,
        }
    }

    pub fn list(list: Vec<T>, total_count: i64) -> Self {
        Self {
            is_success: true,
            entity: None,
            list,
            total_count,
            exception_message: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            entity: None,
            list: Vec::new(),
            total_count: 0,
            exception_message: Some(message.into()),
        }
    }
}

impl<T: Serialize> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(e) => write!(f, "Error serializing ApiResponse to JSON: {e}"),
        }
    }
}
