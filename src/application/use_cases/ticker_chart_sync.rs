use crate::application::ports::ChartDataGateway;
use crate::domain::chart::{ChartRequest, FetchOutcome, ResponsePolicy, TickerChartSync};
use crate::domain::errors::UnknownTicker;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Ticker;
use crate::{log_debug, log_error, log_info, log_warn};
use std::cell::RefCell;
use std::rc::Rc;

type Observer = Rc<dyn Fn(&TickerChartSync)>;

/// Use Case: keep the chart slots in step with the selected ticker.
///
/// Cheap to clone; clones share one synchronizer. State is never borrowed
/// across an await, so selection changes stay possible while a fetch runs.
pub struct TickerChartSyncUseCase<G: ChartDataGateway> {
    gateway: Rc<G>,
    state: Rc<RefCell<TickerChartSync>>,
    observers: Rc<RefCell<Vec<Observer>>>,
}

impl<G: ChartDataGateway> Clone for TickerChartSyncUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            state: Rc::clone(&self.state),
            observers: Rc::clone(&self.observers),
        }
    }
}

impl<G: ChartDataGateway> TickerChartSyncUseCase<G> {
    pub fn new(gateway: G, policy: ResponsePolicy) -> Self {
        Self {
            gateway: Rc::new(gateway),
            state: Rc::new(RefCell::new(TickerChartSync::new(policy))),
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Called with the new state after every mutation.
    pub fn subscribe(&self, observer: impl Fn(&TickerChartSync) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn snapshot(&self) -> TickerChartSync {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&TickerChartSync) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn select_ticker(&self, ticker: Ticker) {
        self.state.borrow_mut().select_ticker(ticker);
        log_debug!(LogComponent::Application("ChartSync"), "Selected {}", ticker);
        self.notify();
    }

    pub fn select_symbol(&self, symbol: &str) -> Result<Ticker, UnknownTicker> {
        let selected = self.state.borrow_mut().select_symbol(symbol);
        match selected {
            Ok(ticker) => {
                log_debug!(LogComponent::Application("ChartSync"), "Selected {}", ticker);
                self.notify();
                Ok(ticker)
            }
            Err(err) => {
                log_warn!(LogComponent::Application("ChartSync"), "{}", err);
                Err(err)
            }
        }
    }

    /// Initial fetch for the default ticker. Later calls are no-ops returning `None`.
    pub async fn mount(&self) -> Option<FetchOutcome> {
        let request = self.state.borrow_mut().mount()?;
        log_info!(LogComponent::Application("ChartSync"), "Mounted, loading charts for {}", request.ticker);
        Some(self.run(request).await)
    }

    /// Fetch charts for the current selection.
    pub async fn request_charts(&self) -> FetchOutcome {
        let request = self.state.borrow_mut().begin_request();
        self.run(request).await
    }

    async fn run(&self, request: ChartRequest) -> FetchOutcome {
        self.notify();
        log_debug!(
            LogComponent::Application("ChartSync"),
            "Dispatching chart request #{} for {}",
            request.sequence,
            request.ticker
        );

        let result = self.gateway.fetch_charts(request.ticker).await;
        if let Err(err) = &result {
            log_error!(
                LogComponent::Application("ChartSync"),
                "Error fetching stock data for {}: {}",
                request.ticker,
                err
            );
        }

        let outcome = self.state.borrow_mut().complete_request(request, result);
        match outcome {
            FetchOutcome::Applied => {
                log_info!(
                    LogComponent::Application("ChartSync"),
                    "Charts for {} updated ({} of 4 available)",
                    request.ticker,
                    self.with_state(|s| s.charts().present_count())
                );
            }
            FetchOutcome::Superseded => {
                log_debug!(
                    LogComponent::Application("ChartSync"),
                    "Discarded answer to request #{} ({}): a newer request is pending",
                    request.sequence,
                    request.ticker
                );
            }
            FetchOutcome::Failed => {}
        }
        self.notify();
        outcome
    }

    fn notify(&self) {
        let observers: Vec<Observer> = self.observers.borrow().clone();
        let state = self.snapshot();
        for observer in observers {
            observer(&state);
        }
    }
}
