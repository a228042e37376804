//! Domain layer - Core types with no platform dependencies
//!
//! This layer contains:
//! - Entities: the opposed-check types (AttackIntent, Outcome, ...)
//! - Value Objects: identifiers, settings, defender references
//! - Events: the inbound event shapes and boundary-crossing messages

pub mod entities;
pub mod events;
pub mod value_objects;
