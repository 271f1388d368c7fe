//! API route modules.

pub mod disputes;
pub mod reports;
