use super::form::{FormField, RegistrationForm, RegistrationRequest};
use crate::domain::errors::{RegistrationFailure, UnknownTicker, ValidationError};
use crate::domain::market_data::Ticker;
use strum::Display as StrumDisplay;

pub const GENERIC_REJECTION_MESSAGE: &str = "Registration failed";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred during registration. Please try again later.";

/// Lifecycle of one registration form instance.
///
/// Validation runs synchronously inside `begin_submit`, so it never shows up as
/// an observable phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum RegistrationPhase {
    Editing,
    Submitting,
    /// Terminal: the account exists.
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// Result of pressing submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Checks passed; send this request.
    Dispatch(RegistrationRequest),
    /// A local check failed; nothing is sent.
    Invalid(ValidationError),
    /// Already submitting or already registered.
    Ignored,
}

/// Result of a boundary call completing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(String),
    /// No submission was pending.
    Unexpected,
}

#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    form: RegistrationForm,
    phase: RegistrationPhase,
    last_error: Option<String>,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self { form: RegistrationForm::new(), phase: RegistrationPhase::Editing, last_error: None }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn phase(&self) -> RegistrationPhase {
        self.phase
    }

    pub fn submission_state(&self) -> SubmissionState {
        match self.phase {
            RegistrationPhase::Submitting => SubmissionState::Submitting,
            _ => SubmissionState::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_state() == SubmissionState::Submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the submit control should accept clicks.
    pub fn can_submit(&self) -> bool {
        self.phase == RegistrationPhase::Editing
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn toggle_preferred_stock(&mut self, ticker: Ticker) -> bool {
        self.form.toggle_preferred_stock(ticker)
    }

    pub fn toggle_preferred_symbol(&mut self, symbol: &str) -> Result<bool, UnknownTicker> {
        self.form.toggle_preferred_symbol(symbol)
    }

    pub fn begin_submit(&mut self) -> SubmitDecision {
        if !self.can_submit() {
            return SubmitDecision::Ignored;
        }

        self.last_error = None;
        if let Err(err) = self.form.validate() {
            self.last_error = Some(err.to_string());
            return SubmitDecision::Invalid(err);
        }

        self.phase = RegistrationPhase::Submitting;
        SubmitDecision::Dispatch(self.form.to_request())
    }

    /// Field values are never reset here, whatever the outcome.
    pub fn complete_submit(&mut self, result: Result<(), RegistrationFailure>) -> SubmissionOutcome {
        if self.phase != RegistrationPhase::Submitting {
            return SubmissionOutcome::Unexpected;
        }

        match result {
            Ok(()) => {
                self.phase = RegistrationPhase::Succeeded;
                SubmissionOutcome::Succeeded
            }
            Err(failure) => {
                let message = match failure {
                    RegistrationFailure::Rejected { message: Some(message), .. }
                        if !message.trim().is_empty() =>
                    {
                        message
                    }
                    RegistrationFailure::Rejected { .. } => GENERIC_REJECTION_MESSAGE.to_string(),
                    RegistrationFailure::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
                };
                self.phase = RegistrationPhase::Editing;
                self.last_error = Some(message.clone());
                SubmissionOutcome::Failed(message)
            }
        }
    }
}
