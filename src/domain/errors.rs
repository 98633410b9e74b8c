use derive_more::Display;

/// A symbol outside the closed ticker list
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "Unknown ticker symbol: {}", _0)]
pub struct UnknownTicker(pub String);

impl std::error::Error for UnknownTicker {}

/// Why a chart payload was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartImageError {
    #[display(fmt = "empty chart payload")]
    Empty,
    #[display(fmt = "malformed base64 at byte {}", _0)]
    Malformed(usize),
    #[display(fmt = "base64 length {} cannot be complete", _0)]
    Truncated(usize),
    #[display(fmt = "base64 padding is wrong")]
    BadPadding,
    #[display(fmt = "payload is not a PNG image")]
    NotPng,
}

impl std::error::Error for ChartImageError {}

impl From<base64::DecodeError> for ChartImageError {
    fn from(err: base64::DecodeError) -> Self {
        match err {
            base64::DecodeError::InvalidByte(offset, _) | base64::DecodeError::InvalidLastSymbol(offset, _) => {
                ChartImageError::Malformed(offset)
            }
            base64::DecodeError::InvalidLength(length) => ChartImageError::Truncated(length),
            base64::DecodeError::InvalidPadding => ChartImageError::BadPadding,
        }
    }
}

/// Failure of the chart data boundary call
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChartFetchError {
    #[display(fmt = "transport failure: {}", _0)]
    Transport(String),
    #[display(fmt = "HTTP {}", _0)]
    Status(u16),
    #[display(fmt = "undecodable response: {}", _0)]
    Decode(String),
}

impl std::error::Error for ChartFetchError {}

/// Failure of the registration boundary call
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RegistrationFailure {
    /// The account service answered with a non-2xx status.
    #[display(fmt = "rejected with HTTP {}", status)]
    Rejected { status: u16, message: Option<String> },
    /// The call never completed.
    #[display(fmt = "transport failure: {}", _0)]
    Transport(String),
}

impl std::error::Error for RegistrationFailure {}

/// Locally detected form problems, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValidationError {
    #[display(fmt = "Passwords do not match")]
    PasswordMismatch,
    #[display(fmt = "Password must be at least {} characters long", _0)]
    PasswordTooShort(usize),
    #[display(fmt = "Username is required")]
    MissingUsername,
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigurationError {
    #[display(fmt = "invalid configuration JSON: {}", _0)]
    Parse(String),
    #[display(fmt = "{} must be an http(s) URL, got {:?}", field, value)]
    InvalidBaseUrl { field: &'static str, value: String },
}

impl std::error::Error for ConfigurationError {}
