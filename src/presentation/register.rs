use crate::application::{AccountGateway, RegisterUserUseCase};
use crate::domain::market_data::Ticker;
use crate::domain::registration::{FormField, RegistrationFlow};
use leptos::*;

/// Registration form bound field-by-field to a `RegisterUserUseCase`.
///
/// Navigation after success is the caller's business: hook it up through
/// `RegisterUserUseCase::on_success` before handing the use case over.
#[component]
pub fn RegisterForm<A>(
    use_case: RegisterUserUseCase<A>,
    /// Invoked by the "Login Here" link.
    #[prop(into)]
    on_login: Callback<()>,
) -> impl IntoView
where
    A: AccountGateway + 'static,
{
    let flow = create_rw_signal(use_case.snapshot());
    use_case.subscribe(move |next: &RegistrationFlow| {
        let _ = flow.try_set(next.clone());
    });

    let on_submit = {
        let use_case = use_case.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let use_case = use_case.clone();
            spawn_local(async move {
                use_case.submit().await;
            });
        }
    };

    let is_submitting = move || flow.with(|f| f.is_submitting());
    let selected = move || flow.with(|f| f.form().preferred_stocks().iter().copied().collect::<Vec<_>>());

    let text_input = |field: FormField, kind: &'static str, label: &'static str| {
        let use_case = use_case.clone();
        view! {
            <div class="form-group">
                <input
                    type=kind
                    required=true
                    placeholder=" "
                    prop:value=move || flow.with(|f| f.form().field(field).to_string())
                    on:input=move |ev| use_case.set_field(field, event_target_value(&ev))
                />
                <label>{label}</label>
            </div>
        }
    };

    let checkboxes = Ticker::all()
        .map(|ticker| {
            let use_case = use_case.clone();
            view! {
                <label>
                    <input
                        type="checkbox"
                        value=ticker.symbol()
                        prop:checked=move || flow.with(|f| f.form().is_preferred(ticker))
                        on:change=move |_| {
                            use_case.toggle_preferred_stock(ticker);
                        }
                    />
                    {ticker.symbol()}
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="register-container">
            <div class="register-form">
                <h2>"Register"</h2>
                <form on:submit=on_submit>
                    {move || flow.with(|f| f.last_error().map(str::to_string)).map(|message| {
                        view! { <p class="error-message">{message}</p> }
                    })}
                    {text_input(FormField::Username, "text", "Username")}
                    {text_input(FormField::Password, "password", "New Password")}
                    {text_input(FormField::ConfirmPassword, "password", "Confirm Password")}
                    <div class="form-group">
                        <label>"Select Your Stocks:"</label>
                        <div class="checkbox-group">{checkboxes}</div>
                        <Show when=move || !selected().is_empty()>
                            <div class="selected-stocks">
                                <h4>"Selected Stocks:"</h4>
                                <ul>
                                    {move || {
                                        selected()
                                            .into_iter()
                                            .map(|ticker| view! { <li>{ticker.symbol()}</li> })
                                            .collect_view()
                                    }}
                                </ul>
                            </div>
                        </Show>
                    </div>
                    <button type="submit" disabled=is_submitting>
                        {move || if is_submitting() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p>
                    "Already have an account? "
                    <a href="#" on:click=move |ev: ev::MouseEvent| {
                        ev.prevent_default();
                        on_login.call(());
                    }>"Login Here"</a>
                </p>
            </div>
        </div>
    }
}
