//! Core use-case services.
//!
//! # Responsibility
//! - Validate presentation-layer input before it reaches the store.
//! - Keep UI layers decoupled from the store's silent no-op policy.

pub mod sheet_service;
