//! Deterministic, pure logic shared by the launcher.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values (environment snapshots, paths, command lines) and return
//! deterministic outputs suitable for tests.

pub mod plan;
pub mod search_path;
pub mod types;
