//! Domain layer: entities, value objects, ports and pure services.

pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod tolerant;
pub mod value_objects;
