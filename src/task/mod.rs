//! Task management for chores.
//!
//! This module implements the task store: creating, fetching, renaming,
//! deleting, and listing to-do items over interchangeable backends. It
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//!
//! Both backends satisfy the same [`ports::TaskStore`] contract and list
//! tasks in reverse creation order; exactly one backend is selected at
//! startup and held for the process lifetime.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
