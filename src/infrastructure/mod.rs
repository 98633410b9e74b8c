pub mod config;
pub mod http;
pub mod services;

pub use config::ServiceConfig;
pub use http::{HttpAccountGateway, HttpChartDataGateway};
