mod message;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod labelstring;
pub mod parser;
pub mod reader;
pub mod structs;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
