use crate::application::{ChartDataGateway, TickerChartSyncUseCase};
use crate::domain::chart::{ChartImage, ChartKind, ChartSyncPhase, TickerChartSync};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Ticker;
use crate::log_warn;
use leptos::*;

/// Ticker picker plus the four chart cards.
///
/// The first chart fetch starts when the component is created.
#[component]
pub fn Dashboard<G>(use_case: TickerChartSyncUseCase<G>) -> impl IntoView
where
    G: ChartDataGateway + 'static,
{
    let state = create_rw_signal(use_case.snapshot());
    use_case.subscribe(move |sync: &TickerChartSync| {
        // The view may already be gone when a late answer lands.
        let _ = state.try_set(sync.clone());
    });

    {
        let use_case = use_case.clone();
        spawn_local(async move {
            use_case.mount().await;
        });
    }

    let on_select = {
        let use_case = use_case.clone();
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            if use_case.select_symbol(&value).is_err() {
                log_warn!(LogComponent::Presentation("Dashboard"), "Ignoring picker value {:?}", value);
            }
        }
    };

    let on_submit = {
        let use_case = use_case.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let use_case = use_case.clone();
            spawn_local(async move {
                use_case.request_charts().await;
            });
        }
    };

    let selected = move || state.with(|s| s.selection());
    let chart = move |kind: ChartKind| Signal::derive(move || state.with(|s| s.charts().get(kind).cloned()));

    view! {
        <div class="dashboard">
            <h2>"Stock Market Analysis Dashboard"</h2>

            <form on:submit=on_submit class="form">
                <label>
                    "Enter Ticker Symbol:"
                    <select class="input" on:change=on_select prop:value=move || selected().symbol()>
                        {Ticker::all()
                            .map(|ticker| {
                                view! {
                                    <option value=ticker.symbol() selected=move || selected() == ticker>
                                        {ticker.symbol()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <button type="submit" class="button">"Fetch Data"</button>
                <span class="sync-phase" class:busy=move || {
                    matches!(state.with(|s| s.phase()), ChartSyncPhase::Fetching | ChartSyncPhase::PopulatedStale)
                }></span>
            </form>

            <div class="charts-container">
                <ChartCard kind=ChartKind::Rsi image=chart(ChartKind::Rsi) />
            </div>
            <div class="charts-row">
                <ChartCard kind=ChartKind::Beta image=chart(ChartKind::Beta) />
                <ChartCard kind=ChartKind::Pe image=chart(ChartKind::Pe) />
                <ChartCard kind=ChartKind::Pb image=chart(ChartKind::Pb) />
            </div>
        </div>
    }
}

/// "Loading..." while the slot is absent, the decoded image once present
#[component]
pub fn ChartCard(kind: ChartKind, #[prop(into)] image: Signal<Option<ChartImage>>) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3>{kind.title()}</h3>
            {move || match image.get() {
                Some(image) => view! {
                    <img src=image.data_url() alt=kind.alt_text() class="chart-image" />
                }
                .into_view(),
                None => view! { <p>"Loading..."</p> }.into_view(),
            }}
        </div>
    }
}
