//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use expiry_mcp::ExpiryServerHandler;
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (ExpiryServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = ExpiryServerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    (handler, temp_file)
}

/// Extract item ID from an add response
/// Response format: "Item added with ID: <id>\n\n..."
pub fn extract_id_from_response(response: &str) -> String {
    response
        .lines()
        .find_map(|line| line.strip_prefix("Item added with ID: "))
        .unwrap_or("")
        .trim()
        .to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
