pub mod register_user;
pub mod ticker_chart_sync;

pub use register_user::*;
pub use ticker_chart_sync::*;
