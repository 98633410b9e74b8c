use crate::application::ports::AccountGateway;
use crate::domain::errors::{RegistrationFailure, UnknownTicker, ValidationError};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Ticker;
use crate::domain::registration::{FormField, RegistrationFlow, SubmissionOutcome, SubmitDecision};
use crate::{log_error, log_info, log_warn};
use std::cell::RefCell;
use std::rc::Rc;

type Observer = Rc<dyn Fn(&RegistrationFlow)>;
type SuccessHandler = Rc<dyn Fn(&str)>;

/// What a call to `submit` ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Rejected locally; the account service was not contacted.
    Invalid(ValidationError),
    Registered,
    Failed(String),
    /// A submission was already running or the account already exists.
    Ignored,
}

/// Use Case: drive the registration form through validation and submission.
pub struct RegisterUserUseCase<A: AccountGateway> {
    gateway: Rc<A>,
    flow: Rc<RefCell<RegistrationFlow>>,
    observers: Rc<RefCell<Vec<Observer>>>,
    on_success: Rc<RefCell<Option<SuccessHandler>>>,
}

impl<A: AccountGateway> Clone for RegisterUserUseCase<A> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            flow: Rc::clone(&self.flow),
            observers: Rc::clone(&self.observers),
            on_success: Rc::clone(&self.on_success),
        }
    }
}

impl<A: AccountGateway> RegisterUserUseCase<A> {
    pub fn new(gateway: A) -> Self {
        Self {
            gateway: Rc::new(gateway),
            flow: Rc::new(RefCell::new(RegistrationFlow::new())),
            observers: Rc::new(RefCell::new(Vec::new())),
            on_success: Rc::new(RefCell::new(None)),
        }
    }

    pub fn gateway(&self) -> &A {
        &self.gateway
    }

    /// Success signal, receives the registered username. Navigation hangs off this.
    pub fn on_success(&self, handler: impl Fn(&str) + 'static) {
        *self.on_success.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn subscribe(&self, observer: impl Fn(&RegistrationFlow) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn snapshot(&self) -> RegistrationFlow {
        self.flow.borrow().clone()
    }

    pub fn with_flow<R>(&self, f: impl FnOnce(&RegistrationFlow) -> R) -> R {
        f(&self.flow.borrow())
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.flow.borrow_mut().set_field(field, value);
        self.notify();
    }

    pub fn toggle_preferred_stock(&self, ticker: Ticker) -> bool {
        let selected = self.flow.borrow_mut().toggle_preferred_stock(ticker);
        self.notify();
        selected
    }

    pub fn toggle_preferred_symbol(&self, symbol: &str) -> Result<bool, UnknownTicker> {
        let toggled = self.flow.borrow_mut().toggle_preferred_symbol(symbol);
        match toggled {
            Ok(selected) => {
                self.notify();
                Ok(selected)
            }
            Err(err) => {
                log_warn!(LogComponent::Application("Register"), "{}", err);
                Err(err)
            }
        }
    }

    pub async fn submit(&self) -> SubmitResult {
        let decision = self.flow.borrow_mut().begin_submit();
        let request = match decision {
            SubmitDecision::Ignored => return SubmitResult::Ignored,
            SubmitDecision::Invalid(err) => {
                log_info!(LogComponent::Application("Register"), "Validation failed: {}", err);
                self.notify();
                return SubmitResult::Invalid(err);
            }
            SubmitDecision::Dispatch(request) => request,
        };
        self.notify();

        log_info!(
            LogComponent::Application("Register"),
            "Registering {} with {} preferred stock(s)",
            request.username,
            request.preferred_stock.len()
        );
        let result = self.gateway.register(&request).await;
        if let Err(RegistrationFailure::Transport(reason)) = &result {
            log_error!(LogComponent::Application("Register"), "Error during registration: {}", reason);
        }

        let outcome = self.flow.borrow_mut().complete_submit(result);
        self.notify();

        match outcome {
            SubmissionOutcome::Succeeded => {
                log_info!(LogComponent::Application("Register"), "Registration successful for {}", request.username);
                let handler = self.on_success.borrow().clone();
                if let Some(handler) = handler {
                    handler(&request.username);
                }
                SubmitResult::Registered
            }
            SubmissionOutcome::Failed(message) => {
                log_warn!(LogComponent::Application("Register"), "Registration failed: {}", message);
                SubmitResult::Failed(message)
            }
            SubmissionOutcome::Unexpected => SubmitResult::Ignored,
        }
    }

    fn notify(&self) {
        let observers: Vec<Observer> = self.observers.borrow().clone();
        let flow = self.snapshot();
        for observer in observers {
            observer(&flow);
        }
    }
}
