use leptos::*;

use crate::{
    application::{RegisterUserUseCase, TickerChartSyncUseCase},
    domain::logging::{LogComponent, get_logger},
    infrastructure::{HttpAccountGateway, HttpChartDataGateway, ServiceConfig},
    presentation::{Dashboard, RegisterForm},
};

/// Top-level pages. Switching page unmounts the previous one together with its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Register,
    Login,
}

/// 🦀 Root component
#[component]
pub fn App(config: ServiceConfig) -> impl IntoView {
    let page = create_rw_signal(Page::Dashboard);
    let notice = create_rw_signal(None::<String>);
    let config = store_value(config);

    let go = move |target: Page| {
        move |_: ev::MouseEvent| {
            notice.set(None);
            page.set(target);
        }
    };

    view! {
        <div class="stock-insight-app">
            <nav class="nav">
                <button on:click=go(Page::Dashboard)>"Dashboard"</button>
                <button on:click=go(Page::Register)>"Register"</button>
            </nav>
            {move || match page.get() {
                Page::Dashboard => {
                    let config = config.get_value();
                    let use_case = TickerChartSyncUseCase::new(
                        HttpChartDataGateway::new(&config),
                        config.response_policy,
                    );
                    view! { <Dashboard use_case=use_case /> }.into_view()
                }
                Page::Register => {
                    let use_case = RegisterUserUseCase::new(HttpAccountGateway::new(&config.get_value()));
                    use_case.on_success(move |username| {
                        get_logger().info(
                            LogComponent::Presentation("App"),
                            &format!("Registration successful for {}, showing login", username),
                        );
                        notice.set(Some("Registration successful".to_string()));
                        page.set(Page::Login);
                    });
                    view! {
                        <RegisterForm use_case=use_case on_login=move |_| page.set(Page::Login) />
                    }
                    .into_view()
                }
                Page::Login => view! { <LoginPlaceholder notice=notice /> }.into_view(),
            }}
        </div>
    }
}

/// Login lives in another service; this page only confirms where the user landed.
#[component]
fn LoginPlaceholder(notice: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <div class="login-container">
            {move || notice.get().map(|text| view! { <p class="success-message">{text}</p> })}
            <h2>"Login"</h2>
        </div>
    }
}
