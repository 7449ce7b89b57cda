//! `household-waste` library crate.
//!
//! The binary (`waste`) is a thin wrapper around this library so that:
//!
//! - the page computation is testable without spawning processes
//! - the CLI and the terminal page share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
