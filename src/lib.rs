//! Chores: a task management service.
//!
//! Exposes create/read/update/delete/list operations over to-do items
//! through an HTTP API, backed interchangeably by a transient in-process
//! store or `PostgreSQL`.
//!
//! # Architecture
//!
//! Chores follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, database)
//!
//! # Modules
//!
//! - [`task`]: Task entity, store contract, and storage backends
//! - [`config`]: Environment-driven process configuration
//! - [`server`]: HTTP adapter layer over the task store

pub mod config;
pub mod server;
pub mod task;
