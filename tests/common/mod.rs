//! Shared helpers for the integration test suite.
#![allow(dead_code)]

pub mod harness;
pub mod http_client;
