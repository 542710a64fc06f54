//! In-memory sheet store and its snapshot plumbing.
//!
//! # Responsibility
//! - Own the canonical topic tree and expose the only mutation surface.
//! - Publish every applied mutation to snapshot subscribers.
//!
//! # Invariants
//! - Operations on unknown ids or out-of-range indices change nothing.
//! - A published snapshot is never modified by later mutations.

pub mod seed;
pub mod sheet_store;
pub mod subscription;
