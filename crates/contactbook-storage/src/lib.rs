//! # contactbook-storage
//!
//! Storage backend implementations for Contactbook.
//!
//! This crate provides two [`ContactStore`](contactbook_core::ContactStore)
//! backends:
//! - [`MemoryStore`]: in-process storage, for tests and throwaway runs
//! - [`RedbStore`]: durable embedded document storage backed by `redb`

#![warn(clippy::all)]

pub mod database;
pub mod memory;

pub use database::RedbStore;
pub use memory::MemoryStore;
