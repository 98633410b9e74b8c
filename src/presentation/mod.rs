//! Leptos views over the two use cases.

pub mod dashboard;
pub mod register;

pub use dashboard::*;
pub use register::*;
