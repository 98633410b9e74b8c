use crate::domain::errors::UnknownTicker;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Value Object - Ticker symbol from the closed list the analytics service knows.
///
/// Declaration order is the display order of the picker, and `Ord` follows it,
/// so ordered collections of tickers list them the way the UI does.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    StrumDisplay,
    EnumIter,
    EnumString,
    EnumCount,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Ticker {
    #[default]
    Aapl,
    Msft,
    Amzn,
    Tsla,
    Googl,
    Goog,
    Meta,
    Nvda,
    #[strum(serialize = "BRK-A")]
    #[serde(rename = "BRK-A")]
    BrkA,
    #[strum(serialize = "BRK-B")]
    #[serde(rename = "BRK-B")]
    BrkB,
    Jpm,
    Jnj,
    V,
    Wmt,
    Pg,
    Unh,
    Hd,
    Dis,
    Nflx,
    Xom,
}

impl Ticker {
    /// Wire symbol, e.g. `"BRK-A"`
    pub fn symbol(self) -> &'static str {
        self.into()
    }

    /// Strict parse: the symbol must match a member exactly.
    pub fn parse(symbol: &str) -> Result<Self, UnknownTicker> {
        Self::from_str(symbol).map_err(|_| UnknownTicker(symbol.to_string()))
    }

    pub fn all() -> impl Iterator<Item = Ticker> {
        Self::iter()
    }
}
