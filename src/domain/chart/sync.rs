use super::entities::ChartSet;
use super::value_objects::RawChartPlots;
use crate::domain::errors::{ChartFetchError, UnknownTicker};
use crate::domain::market_data::Ticker;
use serde::{Deserialize, Serialize};
use strum::Display as StrumDisplay;

/// Observable phase of the chart synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum ChartSyncPhase {
    /// No data and nothing in flight.
    Idle,
    /// First data is on its way.
    Fetching,
    Populated,
    /// A refresh is in flight while older charts stay on screen.
    PopulatedStale,
}

/// How overlapping chart requests are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Only the answer to the most recent dispatch may touch the charts.
    #[default]
    LatestDispatchWins,
    /// Whatever answer arrives last overwrites the charts.
    LastResponseWins,
}

/// A dispatched chart fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRequest {
    pub ticker: Ticker,
    pub sequence: u64,
}

/// What a completion did to the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// All four slots were replaced.
    Applied,
    /// A newer request superseded this one; nothing changed.
    Superseded,
    /// The fetch failed; charts kept their previous value.
    Failed,
}

/// Selected ticker plus the chart slots shown for it.
#[derive(Debug, Clone)]
pub struct TickerChartSync {
    selection: Ticker,
    charts: ChartSet,
    policy: ResponsePolicy,
    populated: bool,
    mounted: bool,
    next_sequence: u64,
    in_flight: usize,
    charts_ticker: Option<Ticker>,
    last_failure: Option<ChartFetchError>,
}

impl Default for TickerChartSync {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}

impl TickerChartSync {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            selection: Ticker::default(),
            charts: ChartSet::empty(),
            policy,
            populated: false,
            mounted: false,
            next_sequence: 0,
            in_flight: 0,
            charts_ticker: None,
            last_failure: None,
        }
    }

    pub fn selection(&self) -> Ticker {
        self.selection
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// Ticker the current charts were fetched for
    pub fn charts_ticker(&self) -> Option<Ticker> {
        self.charts_ticker
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn last_failure(&self) -> Option<&ChartFetchError> {
        self.last_failure.as_ref()
    }

    pub fn phase(&self) -> ChartSyncPhase {
        match (self.in_flight > 0, self.populated) {
            (true, true) => ChartSyncPhase::PopulatedStale,
            (true, false) => ChartSyncPhase::Fetching,
            (false, true) => ChartSyncPhase::Populated,
            (false, false) => ChartSyncPhase::Idle,
        }
    }

    /// Changes the selection only; charts are untouched until the next request.
    pub fn select_ticker(&mut self, ticker: Ticker) {
        self.selection = ticker;
    }

    /// Raw-string variant for values coming straight from the DOM.
    pub fn select_symbol(&mut self, symbol: &str) -> Result<Ticker, UnknownTicker> {
        let ticker = Ticker::parse(symbol)?;
        self.select_ticker(ticker);
        Ok(ticker)
    }

    /// First-mount hook: yields the initial request once per instance.
    pub fn mount(&mut self) -> Option<ChartRequest> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin_request())
    }

    pub fn begin_request(&mut self) -> ChartRequest {
        self.next_sequence += 1;
        self.in_flight += 1;
        ChartRequest { ticker: self.selection, sequence: self.next_sequence }
    }

    /// Applies the completion of `request`. Charts are either replaced whole or left alone.
    pub fn complete_request(
        &mut self,
        request: ChartRequest,
        result: Result<RawChartPlots, ChartFetchError>,
    ) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let superseded = self.policy == ResponsePolicy::LatestDispatchWins
            && request.sequence != self.next_sequence;
        if superseded {
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(plots) => {
                self.charts = ChartSet::from_plots(&plots);
                self.charts_ticker = Some(request.ticker);
                self.populated = true;
                self.last_failure = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.last_failure = Some(err);
                FetchOutcome::Failed
            }
        }
    }
}
