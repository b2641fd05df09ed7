//! MCP tool handlers for the expiry server
//!
//! Each handler runs one tracker command and renders the resulting view.

pub mod add_item;
pub mod clear_all;
pub mod delete_item;
pub mod list;
