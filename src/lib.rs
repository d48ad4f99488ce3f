//! CHLP - a minimal line-framed file protocol over TCP
//!
//! Core library shared by the `chlp-server` and `chlp-client` binaries.

pub mod client;
pub mod config;
pub mod logging;
pub mod protocol;
pub mod server;
