use crate::domain::chart::ResponsePolicy;
use crate::domain::errors::ConfigurationError;
use crate::domain::logging::LogLevel;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Name of the optional `window` property holding a JSON-shaped config object.
pub const WINDOW_CONFIG_KEY: &str = "STOCK_INSIGHT_CONFIG";

pub const CHART_DATA_ENDPOINT: &str = "/get_stock_data";
pub const REGISTER_ENDPOINT: &str = "/register";

/// Service endpoints and client behaviour, injected into each component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub analytics_base_url: String,
    pub account_base_url: String,
    pub response_policy: ResponsePolicy,
    pub log_level: LogLevel,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            analytics_base_url: DEFAULT_BASE_URL.to_string(),
            account_base_url: DEFAULT_BASE_URL.to_string(),
            response_policy: ResponsePolicy::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl ServiceConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validated()
    }

    /// Reads `window.STOCK_INSIGHT_CONFIG`; `Ok(None)` when it is not set.
    pub fn from_window() -> Result<Option<Self>, ConfigurationError> {
        use gloo::utils::format::JsValueSerdeExt;
        use wasm_bindgen::JsValue;

        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(WINDOW_CONFIG_KEY))
            .map_err(|e| ConfigurationError::Parse(format!("{:?}", e)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }

        let config: Self =
            value.into_serde().map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validated().map(Some)
    }

    /// Normalizes base URLs (no trailing slash) and rejects non-http(s) ones.
    pub fn validated(mut self) -> Result<Self, ConfigurationError> {
        self.analytics_base_url = normalize_base_url("analytics_base_url", &self.analytics_base_url)?;
        self.account_base_url = normalize_base_url("account_base_url", &self.account_base_url)?;
        Ok(self)
    }

    pub fn chart_data_url(&self) -> String {
        format!("{}{}", self.analytics_base_url, CHART_DATA_ENDPOINT)
    }

    pub fn register_url(&self) -> String {
        format!("{}{}", self.account_base_url, REGISTER_ENDPOINT)
    }
}

fn normalize_base_url(field: &'static str, value: &str) -> Result<String, ConfigurationError> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigurationError::InvalidBaseUrl { field, value: value.to_string() });
    }
    Ok(trimmed.to_string())
}
