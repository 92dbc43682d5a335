//! Unit tests for the task module.

mod memory_store_tests;
mod support;
