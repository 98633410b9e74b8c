//! Market data value objects shared by both components.

pub mod value_objects;

pub use value_objects::*;
