use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use quickcheck_macros::quickcheck;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use stock_insight_wasm::application::{ChartDataGateway, TickerChartSyncUseCase};
use stock_insight_wasm::domain::chart::{
    ChartKind, ChartSyncPhase, FetchOutcome, RawChartPlots, ResponsePolicy,
};
use stock_insight_wasm::domain::errors::ChartFetchError;
use stock_insight_wasm::domain::market_data::Ticker;
use stock_insight_wasm::infrastructure::http::chart_response;

type Reply = Result<RawChartPlots, ChartFetchError>;

fn plots_for(ticker: Ticker) -> RawChartPlots {
    let tag = match ticker.symbol().len() % 3 {
        0 => "iVBORw0KGgpSU0k=",
        1 => "iVBORw0KGgpCRVRB",
        _ => "iVBORw0KGgpQRQ==",
    };
    RawChartPlots {
        rsi_plot: tag.to_string(),
        beta_plot: "iVBORw0KGgpCRVRB".to_string(),
        pe_plot: "iVBORw0KGgpQRQ==".to_string(),
        pb_plot: "iVBORw0KGgpQQg==".to_string(),
    }
}

/// Answers immediately with a canned reply.
struct CannedGateway {
    calls: RefCell<Vec<Ticker>>,
    reply: RefCell<Reply>,
}

impl CannedGateway {
    fn new(reply: Reply) -> Self {
        Self { calls: RefCell::new(Vec::new()), reply: RefCell::new(reply) }
    }

    fn set_reply(&self, reply: Reply) {
        *self.reply.borrow_mut() = reply;
    }
}

impl ChartDataGateway for CannedGateway {
    fn fetch_charts(&self, ticker: Ticker) -> LocalBoxFuture<'_, Reply> {
        self.calls.borrow_mut().push(ticker);
        let reply = self.reply.borrow().clone();
        async move { reply }.boxed_local()
    }
}

/// Holds every call open until the test answers it.
#[derive(Default)]
struct ManualGateway {
    calls: RefCell<Vec<Ticker>>,
    pending: RefCell<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl ManualGateway {
    fn answer(&self, call: usize, reply: Reply) {
        let sender = self.pending.borrow_mut()[call].take().expect("call already answered");
        sender.send(reply).expect("request future dropped");
    }
}

impl ChartDataGateway for ManualGateway {
    fn fetch_charts(&self, ticker: Ticker) -> LocalBoxFuture<'_, Reply> {
        self.calls.borrow_mut().push(ticker);
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push(Some(tx));
        async move {
            rx.await.unwrap_or_else(|_| Err(ChartFetchError::Transport("cancelled".to_string())))
        }
        .boxed_local()
    }
}

#[test]
fn mount_dispatches_exactly_one_fetch_for_default_ticker() {
    let use_case = TickerChartSyncUseCase::new(
        CannedGateway::new(Ok(plots_for(Ticker::Aapl))),
        ResponsePolicy::default(),
    );

    assert_eq!(block_on(use_case.mount()), Some(FetchOutcome::Applied));
    assert_eq!(block_on(use_case.mount()), None);

    assert_eq!(*use_case.gateway().calls.borrow(), vec![Ticker::Aapl]);
    assert_eq!(use_case.with_state(|s| s.phase()), ChartSyncPhase::Populated);
}

#[test]
fn selecting_a_ticker_alone_does_not_fetch() {
    let use_case =
        TickerChartSyncUseCase::new(CannedGateway::new(Ok(plots_for(Ticker::Aapl))), ResponsePolicy::default());
    use_case.select_ticker(Ticker::Msft);
    assert!(use_case.select_symbol("NOPE").is_err());

    assert!(use_case.gateway().calls.borrow().is_empty());
    assert_eq!(use_case.with_state(|s| s.selection()), Ticker::Msft);
    assert!(use_case.with_state(|s| s.charts().is_empty()));
}

#[test]
fn request_uses_current_selection() {
    let use_case =
        TickerChartSyncUseCase::new(CannedGateway::new(Ok(plots_for(Ticker::Tsla))), ResponsePolicy::default());
    block_on(use_case.mount());
    use_case.select_symbol("TSLA").unwrap();
    block_on(use_case.request_charts());

    assert_eq!(*use_case.gateway().calls.borrow(), vec![Ticker::Aapl, Ticker::Tsla]);
    assert_eq!(use_case.with_state(|s| s.charts_ticker()), Some(Ticker::Tsla));
}

#[test]
fn failed_refresh_keeps_previous_charts() {
    let use_case =
        TickerChartSyncUseCase::new(CannedGateway::new(Ok(plots_for(Ticker::Aapl))), ResponsePolicy::default());
    block_on(use_case.mount());
    let before = use_case.snapshot();

    use_case.gateway().set_reply(Err(ChartFetchError::Status(500)));
    assert_eq!(block_on(use_case.request_charts()), FetchOutcome::Failed);

    let after = use_case.snapshot();
    assert_eq!(after.charts(), before.charts());
    assert_eq!(after.phase(), ChartSyncPhase::Populated);
    assert_eq!(after.last_failure(), Some(&ChartFetchError::Status(500)));
}

#[test]
fn failed_first_fetch_returns_to_idle() {
    let use_case = TickerChartSyncUseCase::new(
        CannedGateway::new(Err(ChartFetchError::Transport("connection refused".into()))),
        ResponsePolicy::default(),
    );
    assert_eq!(block_on(use_case.mount()), Some(FetchOutcome::Failed));
    assert_eq!(use_case.with_state(|s| s.phase()), ChartSyncPhase::Idle);
    assert!(use_case.with_state(|s| s.charts().is_empty()));
}

#[test]
fn missing_fields_render_as_placeholders() {
    let partial = RawChartPlots { pe_plot: "iVBORw0KGgpQRQ==".into(), ..RawChartPlots::default() };
    let use_case = TickerChartSyncUseCase::new(CannedGateway::new(Ok(partial)), ResponsePolicy::default());
    block_on(use_case.mount());

    let state = use_case.snapshot();
    assert!(state.charts().is_present(ChartKind::Pe));
    for kind in [ChartKind::Rsi, ChartKind::Beta, ChartKind::Pb] {
        assert!(!state.charts().is_present(kind));
    }
    assert!(state.last_failure().is_none());
}

#[test]
fn null_plot_in_answer_only_blanks_its_own_card() {
    let answer = chart_response(
        200,
        r#"{"rsi_plot":"iVBORw0KGgpSU0k=","beta_plot":null,"pe_plot":"iVBORw0KGgpQRQ==","pb_plot":"iVBORw0KGgpQQg=="}"#,
    );
    let use_case = TickerChartSyncUseCase::new(CannedGateway::new(answer), ResponsePolicy::default());

    assert_eq!(block_on(use_case.mount()), Some(FetchOutcome::Applied));

    let state = use_case.snapshot();
    assert_eq!(state.charts().present_count(), 3);
    assert!(!state.charts().is_present(ChartKind::Beta));
    assert_eq!(state.phase(), ChartSyncPhase::Populated);
}

#[test]
fn observers_see_fetching_then_populated() {
    let use_case =
        TickerChartSyncUseCase::new(CannedGateway::new(Ok(plots_for(Ticker::Aapl))), ResponsePolicy::default());
    let phases = Rc::new(RefCell::new(Vec::new()));
    {
        let phases = Rc::clone(&phases);
        use_case.subscribe(move |s| phases.borrow_mut().push(s.phase()));
    }

    block_on(use_case.mount());
    use_case.select_ticker(Ticker::Meta);

    assert_eq!(
        *phases.borrow(),
        vec![ChartSyncPhase::Fetching, ChartSyncPhase::Populated, ChartSyncPhase::Populated]
    );
}

#[test]
fn selection_changes_while_fetch_is_in_flight() {
    let mut pool = LocalPool::new();
    let use_case = TickerChartSyncUseCase::new(ManualGateway::default(), ResponsePolicy::default());

    let task = use_case.clone();
    pool.spawner()
        .spawn_local(async move {
            task.mount().await;
        })
        .unwrap();
    pool.run_until_stalled();

    use_case.select_ticker(Ticker::Dis);
    assert_eq!(use_case.with_state(|s| s.phase()), ChartSyncPhase::Fetching);

    use_case.gateway().answer(0, Ok(plots_for(Ticker::Aapl)));
    pool.run_until_stalled();

    let state = use_case.snapshot();
    assert_eq!(state.selection(), Ticker::Dis);
    assert_eq!(state.charts_ticker(), Some(Ticker::Aapl));
    assert_eq!(state.phase(), ChartSyncPhase::Populated);
}

fn overlapping_requests(policy: ResponsePolicy) -> TickerChartSyncUseCase<ManualGateway> {
    let mut pool = LocalPool::new();
    let use_case = TickerChartSyncUseCase::new(ManualGateway::default(), policy);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    for ticker in [Ticker::Aapl, Ticker::Nvda] {
        use_case.select_ticker(ticker);
        let task = use_case.clone();
        let outcomes = Rc::clone(&outcomes);
        pool.spawner()
            .spawn_local(async move {
                let outcome = task.request_charts().await;
                outcomes.borrow_mut().push(outcome);
            })
            .unwrap();
        pool.run_until_stalled();
    }
    assert_eq!(use_case.with_state(|s| s.in_flight()), 2);
    assert_eq!(*use_case.gateway().calls.borrow(), vec![Ticker::Aapl, Ticker::Nvda]);

    // The newer request answers first, the slow older one last.
    use_case.gateway().answer(1, Ok(plots_for(Ticker::Nvda)));
    pool.run_until_stalled();
    use_case.gateway().answer(0, Ok(RawChartPlots::default()));
    pool.run_until_stalled();

    assert_eq!(outcomes.borrow().len(), 2);
    use_case
}

#[test]
fn slow_stale_answer_is_discarded_by_default() {
    let use_case = overlapping_requests(ResponsePolicy::LatestDispatchWins);
    let state = use_case.snapshot();
    assert_eq!(state.charts_ticker(), Some(Ticker::Nvda));
    assert_eq!(state.charts().present_count(), 4);
    assert_eq!(state.phase(), ChartSyncPhase::Populated);
}

#[test]
fn slow_stale_answer_overwrites_under_last_response_wins() {
    let use_case = overlapping_requests(ResponsePolicy::LastResponseWins);
    let state = use_case.snapshot();
    assert_eq!(state.charts_ticker(), Some(Ticker::Aapl));
    assert!(state.charts().is_empty());
}

#[test]
fn late_failure_of_superseded_request_is_silent() {
    let mut pool = LocalPool::new();
    let use_case = TickerChartSyncUseCase::new(ManualGateway::default(), ResponsePolicy::LatestDispatchWins);
    let failures = Rc::new(Cell::new(0));

    for _ in 0..2 {
        let task = use_case.clone();
        let failures = Rc::clone(&failures);
        pool.spawner()
            .spawn_local(async move {
                if task.request_charts().await == FetchOutcome::Failed {
                    failures.set(failures.get() + 1);
                }
            })
            .unwrap();
        pool.run_until_stalled();
    }

    use_case.gateway().answer(1, Ok(plots_for(Ticker::Aapl)));
    use_case.gateway().answer(0, Err(ChartFetchError::Status(502)));
    pool.run_until_stalled();

    assert_eq!(failures.get(), 0);
    assert!(use_case.with_state(|s| s.last_failure().is_none()));
    assert_eq!(use_case.with_state(|s| s.charts().present_count()), 4);
}

#[quickcheck]
fn fetch_replaces_all_slots_or_none(ticker_index: u8, succeed: bool, mask: u8) -> bool {
    let ticker = Ticker::all().nth(ticker_index as usize % 20).unwrap();
    let initial = plots_for(Ticker::Aapl);

    let mut reply_plots = RawChartPlots::default();
    for (bit, kind) in [ChartKind::Rsi, ChartKind::Beta, ChartKind::Pe, ChartKind::Pb].into_iter().enumerate() {
        if mask & (1 << bit) != 0 {
            *reply_plots.plot_mut(kind) = "iVBORw0KGgpBQkM=".to_string();
        }
    }
    let reply = if succeed { Ok(reply_plots.clone()) } else { Err(ChartFetchError::Status(503)) };

    let use_case = TickerChartSyncUseCase::new(CannedGateway::new(Ok(initial)), ResponsePolicy::default());
    block_on(use_case.mount());
    let before = use_case.snapshot();

    use_case.gateway().set_reply(reply);
    use_case.select_ticker(ticker);
    block_on(use_case.request_charts());
    let after = use_case.snapshot();

    if succeed {
        [ChartKind::Rsi, ChartKind::Beta, ChartKind::Pe, ChartKind::Pb].into_iter().all(|kind| {
            after.charts().get(kind).map(|image| image.payload().to_string())
                == Some(reply_plots.plot(kind).to_string()).filter(|p| !p.is_empty())
        }) && after.charts_ticker() == Some(ticker)
    } else {
        after.charts() == before.charts() && after.charts_ticker() == Some(Ticker::Aapl)
    }
}
