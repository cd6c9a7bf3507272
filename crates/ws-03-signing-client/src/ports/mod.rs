//! # Ports Layer
//!
//! The signing client only has driven (outbound) ports; callers use
//! [`crate::SigningWorkflow`] and [`crate::MessageHistory`] directly.

pub mod outbound;
