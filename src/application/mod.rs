//! Application layer - Use cases and boundary interfaces

pub mod ports;
pub mod services;
