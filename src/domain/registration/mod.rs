//! Registration aggregate: form fields, local validation and the submission lifecycle.

pub mod flow;
pub mod form;

pub use flow::*;
pub use form::*;
