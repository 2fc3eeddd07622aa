//! s11nsha command line front end
//!
//! The binary lives in `main.rs`; command implementations and configuration
//! handling are exposed here so they can be tested directly.

pub mod commands;
pub mod config;
