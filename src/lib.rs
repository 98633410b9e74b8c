use wasm_bindgen::prelude::*;

use leptos::{mount_to_body, view};

use crate::app::App;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::ServiceConfig;

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Installs logging, resolves the service configuration and mounts the UI.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match ServiceConfig::from_window() {
        Ok(Some(config)) => (config, None),
        Ok(None) => (ServiceConfig::default(), None),
        Err(err) => (ServiceConfig::default(), Some(err)),
    };

    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));

    if let Some(err) = config_error {
        get_logger().warn(
            LogComponent::Presentation("Initialize"),
            &format!("Falling back to default service configuration: {}", err),
        );
    }

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!(
            "🚀 Charts from {}, accounts at {} ({} policy)",
            config.analytics_base_url, config.account_base_url, config.response_policy
        ),
    );

    mount_to_body(move || view! { <App config=config /> });
}
