use crate::domain::chart::RawChartPlots;
use crate::domain::errors::{ChartFetchError, RegistrationFailure};
use crate::domain::market_data::Ticker;
use crate::domain::registration::RegistrationRequest;
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Boundary to the analytics service that renders the charts
pub trait ChartDataGateway {
    fn fetch_charts(&self, ticker: Ticker) -> LocalBoxFuture<'_, Result<RawChartPlots, ChartFetchError>>;
}

/// Boundary to the account service that stores registrations
pub trait AccountGateway {
    fn register<'a>(
        &'a self,
        request: &'a RegistrationRequest,
    ) -> LocalBoxFuture<'a, Result<(), RegistrationFailure>>;
}

impl<G: ChartDataGateway + ?Sized> ChartDataGateway for Rc<G> {
    fn fetch_charts(&self, ticker: Ticker) -> LocalBoxFuture<'_, Result<RawChartPlots, ChartFetchError>> {
        (**self).fetch_charts(ticker)
    }
}

impl<A: AccountGateway + ?Sized> AccountGateway for Rc<A> {
    fn register<'a>(
        &'a self,
        request: &'a RegistrationRequest,
    ) -> LocalBoxFuture<'a, Result<(), RegistrationFailure>> {
        (**self).register(request)
    }
}
