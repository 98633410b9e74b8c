//! Chart aggregate: chart kinds, the four-slot image set and the ticker synchronizer.

pub mod entities;
pub mod sync;
pub mod value_objects;

pub use entities::*;
pub use sync::*;
pub use value_objects::*;
