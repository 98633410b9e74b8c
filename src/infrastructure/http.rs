use crate::application::ports::{AccountGateway, ChartDataGateway};
use crate::domain::{
    chart::RawChartPlots,
    errors::{ChartFetchError, RegistrationFailure},
    logging::LogComponent,
    market_data::Ticker,
    registration::RegistrationRequest,
};
use crate::infrastructure::config::ServiceConfig;
use futures::future::{FutureExt, LocalBoxFuture};
use crate::{log_debug, log_warn};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

/// Body of `POST /get_stock_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataQuery {
    pub ticker: Ticker,
}

/// Error body the account service sends with non-2xx answers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// JSON-over-HTTP client built on gloo for WASM
#[derive(Debug, Clone)]
pub struct GlooHttpClient {
    url: String,
}

impl GlooHttpClient {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `body` as JSON and read the answer as text. Any status comes back
    /// with its body; only transport and serialization problems are errors here.
    pub async fn post_json<B: Serialize>(&self, body: &B) -> Result<(u16, String), gloo_net::Error> {
        log_debug!(LogComponent::Infrastructure("HTTP"), "POST {}", self.url);

        let response = Request::post(&self.url)
            .header("Accept", "application/json")
            .json(body)?
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        log_debug!(LogComponent::Infrastructure("HTTP"), "POST {} -> {} ({} bytes)", self.url, status, text.len());
        Ok((status, text))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Maps an analytics answer: non-2xx is `Status`, an unreadable 2xx body is `Decode`.
pub fn chart_response(status: u16, body: &str) -> Result<RawChartPlots, ChartFetchError> {
    if !is_success(status) {
        return Err(ChartFetchError::Status(status));
    }
    serde_json::from_str(body).map_err(|e| ChartFetchError::Decode(e.to_string()))
}

/// Maps an account-service answer. Any 2xx is success; otherwise the `error`
/// field of a JSON body is the message, if there is one.
pub fn registration_response(status: u16, body: &str) -> Result<(), RegistrationFailure> {
    if is_success(status) {
        return Ok(());
    }

    let message = match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(e) => {
            log_warn!(LogComponent::Infrastructure("HTTP"), "Unreadable error body for HTTP {}: {}", status, e);
            None
        }
    };
    Err(RegistrationFailure::Rejected { status, message })
}

/// Chart data collaborator reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpChartDataGateway {
    client: GlooHttpClient,
}

impl HttpChartDataGateway {
    pub fn new(config: &ServiceConfig) -> Self {
        Self { client: GlooHttpClient::new(config.chart_data_url()) }
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    async fn fetch(&self, ticker: Ticker) -> Result<RawChartPlots, ChartFetchError> {
        let (status, body) = self
            .client
            .post_json(&ChartDataQuery { ticker })
            .await
            .map_err(|e| ChartFetchError::Transport(e.to_string()))?;
        chart_response(status, &body)
    }
}

impl ChartDataGateway for HttpChartDataGateway {
    fn fetch_charts(&self, ticker: Ticker) -> LocalBoxFuture<'_, Result<RawChartPlots, ChartFetchError>> {
        self.fetch(ticker).boxed_local()
    }
}

/// Account collaborator reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAccountGateway {
    client: GlooHttpClient,
}

impl HttpAccountGateway {
    pub fn new(config: &ServiceConfig) -> Self {
        Self { client: GlooHttpClient::new(config.register_url()) }
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    async fn submit(&self, request: &RegistrationRequest) -> Result<(), RegistrationFailure> {
        let (status, body) = self
            .client
            .post_json(request)
            .await
            .map_err(|e| RegistrationFailure::Transport(e.to_string()))?;
        registration_response(status, &body)
    }
}

impl AccountGateway for HttpAccountGateway {
    fn register<'a>(
        &'a self,
        request: &'a RegistrationRequest,
    ) -> LocalBoxFuture<'a, Result<(), RegistrationFailure>> {
        self.submit(request).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartSet;

    #[test]
    fn gateways_use_configured_endpoints() {
        let config = ServiceConfig::from_json(
            r#"{"analytics_base_url": "https://charts.example.com/", "account_base_url": "https://id.example.com"}"#,
        )
        .unwrap();
        assert_eq!(HttpChartDataGateway::new(&config).url(), "https://charts.example.com/get_stock_data");
        assert_eq!(HttpAccountGateway::new(&config).url(), "https://id.example.com/register");
    }

    #[test]
    fn chart_query_serializes_symbol() {
        let body = serde_json::to_string(&ChartDataQuery { ticker: Ticker::BrkA }).unwrap();
        assert_eq!(body, r#"{"ticker":"BRK-A"}"#);
    }

    #[test]
    fn error_body_field_is_optional() {
        let body: ServiceErrorBody = serde_json::from_str(r#"{"error": "User already exists"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("User already exists"));
        let body: ServiceErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(body.error.is_none());
    }

    #[test]
    fn chart_success_decodes_plots() {
        let plots = chart_response(200, r#"{"rsi_plot":"iVBORw0KGgpSU0k=","pb_plot":""}"#).unwrap();
        assert_eq!(plots.rsi_plot, "iVBORw0KGgpSU0k=");
        assert_eq!(plots.beta_plot, "");
    }

    #[test]
    fn chart_null_field_keeps_the_others() {
        let plots = chart_response(
            200,
            r#"{"rsi_plot":"iVBORw0KGgpSU0k=","beta_plot":null,"pe_plot":"iVBORw0KGgpQRQ==","pb_plot":"iVBORw0KGgpQQg=="}"#,
        )
        .unwrap();
        assert_eq!(ChartSet::from_plots(&plots).present_count(), 3);
    }

    #[test]
    fn chart_non_2xx_is_status_error() {
        assert_eq!(chart_response(500, "oops"), Err(ChartFetchError::Status(500)));
        assert_eq!(chart_response(404, r#"{"rsi_plot":"iVBORw0KGgpSU0k="}"#), Err(ChartFetchError::Status(404)));
        assert_eq!(chart_response(199, "{}"), Err(ChartFetchError::Status(199)));
    }

    #[test]
    fn chart_unreadable_body_is_decode_error() {
        assert!(matches!(chart_response(200, "<html>"), Err(ChartFetchError::Decode(_))));
        assert!(matches!(chart_response(200, r#"{"rsi_plot":42}"#), Err(ChartFetchError::Decode(_))));
    }

    #[test]
    fn any_2xx_registers() {
        assert_eq!(registration_response(200, ""), Ok(()));
        assert_eq!(registration_response(201, r#"{"message":"created"}"#), Ok(()));
        assert_eq!(registration_response(204, ""), Ok(()));
    }

    #[test]
    fn rejection_carries_service_message() {
        assert_eq!(
            registration_response(400, r#"{"error": "username taken"}"#),
            Err(RegistrationFailure::Rejected { status: 400, message: Some("username taken".to_string()) })
        );
    }

    #[test]
    fn rejection_without_readable_message() {
        for (status, body) in [(400, r#"{"message": "nope"}"#), (500, "Internal Server Error"), (502, "")] {
            assert_eq!(
                registration_response(status, body),
                Err(RegistrationFailure::Rejected { status, message: None })
            );
        }
    }
}
