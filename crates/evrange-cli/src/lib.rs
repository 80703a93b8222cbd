//! EV range simulator CLI library.
//!
//! This crate provides the command-line front end for the simulator,
//! including terminal styling, output formatting and the line-oriented
//! session protocol.

pub mod output;
pub mod session;
pub mod terminal;
