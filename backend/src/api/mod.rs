//! API module
//!
//! Contains HTTP request handlers for the chat page and its JSON endpoints

pub mod chat;
pub mod page;
pub mod utils;
