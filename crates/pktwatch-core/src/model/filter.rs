// ── Filter domain types ──
//
// The packet board narrows its listing by a date range plus four
// multi-select categories. State is immutable: reducers build a new
// `FilterState` that shares every untouched field through `Arc`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use pktwatch_api::PacketQuery;

// ── FilterCategory ──────────────────────────────────────────────────

/// One of the four multi-select dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum FilterCategory {
    #[strum(serialize = "regions")]
    #[serde(rename = "regions")]
    Region,
    #[strum(serialize = "locations")]
    #[serde(rename = "locations")]
    Location,
    #[strum(serialize = "models")]
    #[serde(rename = "models")]
    Model,
    #[strum(serialize = "types")]
    #[serde(rename = "types")]
    Type,
}

impl FilterCategory {
    /// Iteration order used by the selected-filter projection.
    pub const ALL: [Self; 4] = [Self::Region, Self::Location, Self::Model, Self::Type];

    /// Human label used as the chip prefix.
    pub fn label(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Location => "Location",
            Self::Model => "Model",
            Self::Type => "Type",
        }
    }
}

// ── FilterOption ────────────────────────────────────────────────────

/// A selectable entry within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Unique within its category.
    pub id: String,
    /// Value sent to the server when selected.
    pub value: String,
    pub selected: bool,
    /// Grouping row this option belongs to (model categories only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            selected: false,
            parent_id: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

// ── DateRange ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

// ── FilterState ─────────────────────────────────────────────────────

/// Complete filter selection of the packet board.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Only the first range is sent to the server.
    pub dates: Arc<Vec<DateRange>>,
    /// Date-picker presets; opaque to the board.
    pub ranges: Arc<Value>,
    pub regions: Arc<Vec<FilterOption>>,
    pub locations: Arc<Vec<FilterOption>>,
    pub models: Arc<Vec<FilterOption>>,
    pub types: Arc<Vec<FilterOption>>,
}

impl FilterState {
    pub fn category(&self, category: FilterCategory) -> &Arc<Vec<FilterOption>> {
        match category {
            FilterCategory::Region => &self.regions,
            FilterCategory::Location => &self.locations,
            FilterCategory::Model => &self.models,
            FilterCategory::Type => &self.types,
        }
    }

    /// Copy of `self` with one category replaced; all other fields shared.
    #[must_use]
    pub fn with_category(&self, category: FilterCategory, options: Vec<FilterOption>) -> Self {
        let mut next = self.clone();
        let slot = match category {
            FilterCategory::Region => &mut next.regions,
            FilterCategory::Location => &mut next.locations,
            FilterCategory::Model => &mut next.models,
            FilterCategory::Type => &mut next.types,
        };
        *slot = Arc::new(options);
        next
    }

    /// Values of the selected options of one category, in option order.
    pub fn selected_values(&self, category: FilterCategory) -> Vec<String> {
        self.category(category)
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Server query for the current selection.
    pub fn to_query(&self) -> PacketQuery {
        let range = self.dates.first();
        PacketQuery {
            start: range.map(|r| r.start_date),
            end: range.map(|r| r.end_date),
            regions: self.selected_values(FilterCategory::Region),
            locations: self.selected_values(FilterCategory::Location),
            models: self.selected_values(FilterCategory::Model),
            types: self.selected_values(FilterCategory::Type),
        }
    }
}

// ── SelectedFilter ──────────────────────────────────────────────────

/// One active filter chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFilter {
    #[serde(rename = "type")]
    pub category: FilterCategory,
    pub id: String,
    pub label: String,
}
