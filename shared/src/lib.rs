//! Shared types and models for the Inventory & Quotation Management platform
//!
//! This crate contains the domain model and the pure business rules used by
//! the backend: stock ledger arithmetic, the alert threshold decision table,
//! quotation totals, and the role/permission policy.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
