//! Outbound persistence adapters for the record store port.

mod memory;

pub use memory::InMemoryUserStore;
