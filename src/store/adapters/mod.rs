//! Document store adapter implementations.

pub mod memory;
