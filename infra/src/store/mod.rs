//! Verification Record Store Module
//!
//! This module provides implementations of the core `VerificationStore`
//! trait:
//!
//! - **Redis**: production store with per-key TTLs matching record expiry
//! - **In-memory**: development and test store with no external dependency
//!
//! Record contents are stored as JSON; the store neither inspects nor
//! rewrites them.

pub mod memory;
pub mod redis_client;
pub mod redis_store;

pub use memory::InMemoryVerificationStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisVerificationStore;
