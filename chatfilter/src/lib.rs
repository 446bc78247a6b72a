// chatfilter/src/lib.rs
//! # ChatFilter CLI Application
//!
//! Terminal front end for `chatfilter-core`. It can censor text directly,
//! validate a configuration file, and act as a line-delimited JSON bridge
//! that a game server (or any other host) feeds its submissions through.

pub mod cli;
pub mod commands;
pub mod host;
pub mod logger;
pub mod ui;
