use crate::domain::errors::{UnknownTicker, ValidationError};
use crate::domain::market_data::Ticker;
use serde::Serialize;
use std::collections::BTreeSet;
use strum::{Display as StrumDisplay, EnumIter};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Scalar inputs of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter)]
pub enum FormField {
    Username,
    Password,
    ConfirmPassword,
}

/// Field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    username: String,
    password: String,
    confirm_password: String,
    preferred_stocks: BTreeSet<Ticker>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Username => self.username = value,
            FormField::Password => self.password = value,
            FormField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn preferred_stocks(&self) -> &BTreeSet<Ticker> {
        &self.preferred_stocks
    }

    pub fn is_preferred(&self, ticker: Ticker) -> bool {
        self.preferred_stocks.contains(&ticker)
    }

    /// Adds the ticker if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_preferred_stock(&mut self, ticker: Ticker) -> bool {
        if self.preferred_stocks.remove(&ticker) {
            false
        } else {
            self.preferred_stocks.insert(ticker);
            true
        }
    }

    pub fn toggle_preferred_symbol(&mut self, symbol: &str) -> Result<bool, UnknownTicker> {
        let ticker = Ticker::parse(symbol)?;
        Ok(self.toggle_preferred_stock(ticker))
    }

    /// Local checks in their fixed order; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        Ok(())
    }

    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            preferred_stock: self.preferred_stocks.iter().copied().collect(),
        }
    }
}

/// Body of `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "preferredStock")]
    pub preferred_stock: Vec<Ticker>,
}
