//! Modules layer - Infrastructure components
//!
//! Holds the storage backend that owns the on-disk file directory.

pub mod storage;
