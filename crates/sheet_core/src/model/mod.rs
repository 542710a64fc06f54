//! Sheet domain model: topics, sub-topics and questions.
//!
//! # Responsibility
//! - Define the three-level record shapes shared by store, service and UI.
//! - Derive completion progress from current children on demand.
//!
//! # Invariants
//! - Every entity carries an `EntityId` assigned once at creation.
//! - Children are owned by exactly one parent; order is display order.
//! - Progress is never stored; it is recomputed from leaves.

pub mod ids;
pub mod progress;
pub mod sheet;
