//! # Domain Layer
//!
//! History state machine, notification options and display helpers.
//! No network or filesystem access.

pub mod display;
pub mod entities;
pub mod errors;
pub mod history;
pub mod notify;
