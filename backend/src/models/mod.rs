//! Database models for the Inventory & Quotation Management backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
