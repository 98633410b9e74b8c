use super::value_objects::{ChartImage, ChartKind, RawChartPlots};
use crate::domain::logging::LogComponent;
use crate::log_warn;
use strum::{EnumCount, IntoEnumIterator};

/// Four chart slots, one per `ChartKind`; each slot is absent or holds a full image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSet {
    slots: [Option<ChartImage>; ChartKind::COUNT],
}

impl ChartSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds every slot at once from an analytics response.
    ///
    /// Empty fields are "not available yet". Fields that are not valid base64 are
    /// dropped to absent as well, so a slot never holds a partial image.
    pub fn from_plots(plots: &RawChartPlots) -> Self {
        let mut set = Self::empty();
        for kind in ChartKind::iter() {
            let raw = plots.plot(kind);
            if raw.is_empty() {
                continue;
            }
            match ChartImage::parse(raw) {
                Ok(image) => set.slots[kind.index()] = Some(image),
                Err(err) => {
                    log_warn!(
                        LogComponent::Domain("ChartSet"),
                        "Dropping {} payload ({} chars): {}",
                        kind.field_name(),
                        raw.len(),
                        err
                    );
                }
            }
        }
        set
    }

    pub fn get(&self, kind: ChartKind) -> Option<&ChartImage> {
        self.slots[kind.index()].as_ref()
    }

    pub fn is_present(&self, kind: ChartKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartKind, Option<&ChartImage>)> + '_ {
        ChartKind::iter().map(move |kind| (kind, self.get(kind)))
    }
}
