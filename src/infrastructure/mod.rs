//! Infrastructure layer - Concrete adapters for the outbound ports

pub mod channel;
pub mod config;
pub mod sim;
