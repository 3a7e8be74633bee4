//! Integration tests for the Gwirian CLI

mod binary;
mod command_session;
mod test_utils;
mod transport_http;

pub use test_utils::*;
