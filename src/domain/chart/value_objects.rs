use crate::domain::errors::ChartImageError;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display as StrumDisplay, EnumCount, EnumIter};

/// Value Object - One of the four pre-rendered analytical plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumIter, EnumCount)]
pub enum ChartKind {
    #[strum(serialize = "RSI")]
    Rsi = 0,
    #[strum(serialize = "BETA")]
    Beta = 1,
    #[strum(serialize = "PE")]
    Pe = 2,
    #[strum(serialize = "PB")]
    Pb = 3,
}

impl ChartKind {
    /// Slot position inside a `ChartSet`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key in the analytics response
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Rsi => "rsi_plot",
            Self::Beta => "beta_plot",
            Self::Pe => "pe_plot",
            Self::Pb => "pb_plot",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Rsi => "RSI (Relative Strength Index)",
            Self::Beta => "Beta",
            Self::Pe => "P/E Ratios",
            Self::Pb => "Price to Book Ratio",
        }
    }

    pub fn alt_text(self) -> &'static str {
        match self {
            Self::Rsi => "RSI Chart",
            Self::Beta => "Beta Chart",
            Self::Pe => "P/E Ratios Chart",
            Self::Pb => "Price to Book Chart",
        }
    }
}

/// First bytes of every PNG file
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Value Object - A complete base64-encoded PNG.
///
/// The payload must decode as canonical standard base64 and start with the PNG
/// signature. The pixels themselves stay opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage(String);

impl ChartImage {
    pub fn parse(payload: impl Into<String>) -> Result<Self, ChartImageError> {
        let payload = payload.into();
        if payload.is_empty() {
            return Err(ChartImageError::Empty);
        }

        let bytes = BASE64.decode(payload.as_bytes())?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(ChartImageError::NotPng);
        }

        Ok(Self(payload))
    }

    pub fn payload(&self) -> &str {
        &self.0
    }

    /// `src` value for an `<img>` element
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }
}

/// Body of a successful `/get_stock_data` answer. Missing keys and `null` read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawChartPlots {
    #[serde(deserialize_with = "null_as_empty")]
    pub rsi_plot: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub beta_plot: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub pe_plot: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub pb_plot: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RawChartPlots {
    pub fn plot(&self, kind: ChartKind) -> &str {
        match kind {
            ChartKind::Rsi => &self.rsi_plot,
            ChartKind::Beta => &self.beta_plot,
            ChartKind::Pe => &self.pe_plot,
            ChartKind::Pb => &self.pb_plot,
        }
    }

    pub fn plot_mut(&mut self, kind: ChartKind) -> &mut String {
        match kind {
            ChartKind::Rsi => &mut self.rsi_plot,
            ChartKind::Beta => &mut self.beta_plot,
            ChartKind::Pe => &mut self.pe_plot,
            ChartKind::Pb => &mut self.pb_plot,
        }
    }
}
