//! HTTP middleware for the Inventory & Quotation Management backend

pub mod auth;

pub use auth::{auth_middleware, require, AuthUser, CurrentUser};
