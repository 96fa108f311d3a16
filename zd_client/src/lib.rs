//! Internal modules for the terminal client.
//!
//! This library provides command parsing and the controller wiring used by
//! the zd_client binary.

pub mod app;
pub mod commands;
