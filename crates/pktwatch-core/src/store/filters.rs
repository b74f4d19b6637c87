// ── Filter reducer ──
//
// Pure transitions over `FilterState`. The previous state is never
// touched; only the changed field is rebuilt.

use std::str::FromStr;

use serde_json::Value;
use strum::EnumString;

use crate::error::CoreError;
use crate::model::{DateRange, FilterCategory, FilterOption, FilterState};

/// Action vocabulary of the filter store.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Replace the date ranges wholesale.
    Dates(Vec<DateRange>),
    /// Replace the date-picker presets wholesale.
    Ranges(Value),
    /// Flip `selected` on the option `id` of `category`.
    Toggle { category: FilterCategory, id: String },
    /// Set the model row `id` and every model whose `parent_id` is `id`
    /// to the row's inverted selection.
    ToggleModelCategory(String),
}

/// String names of the actions, as emitted by UI bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum FilterActionKind {
    #[strum(serialize = "dates")]
    Dates,
    #[strum(serialize = "ranges")]
    Ranges,
    #[strum(serialize = "regions")]
    Regions,
    #[strum(serialize = "locations")]
    Locations,
    #[strum(serialize = "models")]
    Models,
    #[strum(serialize = "types")]
    Types,
    #[strum(serialize = "model-category")]
    ModelCategory,
}

impl FilterAction {
    pub fn toggle(category: FilterCategory, id: impl Into<String>) -> Self {
        Self::Toggle {
            category,
            id: id.into(),
        }
    }

    /// Build an action from its string kind and JSON payload.
    ///
    /// Unknown kinds fail with [`CoreError::UnexpectedAction`].
    pub fn parse(kind: &str, value: Value) -> Result<Self, CoreError> {
        let kind = FilterActionKind::from_str(kind).map_err(|_| CoreError::UnexpectedAction {
            kind: kind.to_owned(),
        })?;

        let category = match kind {
            FilterActionKind::Dates => {
                let ranges: Vec<DateRange> =
                    serde_json::from_value(value).map_err(|e| CoreError::ValidationFailed {
                        message: format!("invalid dates payload: {e}"),
                    })?;
                return Ok(Self::Dates(ranges));
            }
            FilterActionKind::Ranges => return Ok(Self::Ranges(value)),
            FilterActionKind::ModelCategory => {
                return Ok(Self::ToggleModelCategory(option_id(&value)?));
            }
            FilterActionKind::Regions => FilterCategory::Region,
            FilterActionKind::Locations => FilterCategory::Location,
            FilterActionKind::Models => FilterCategory::Model,
            FilterActionKind::Types => FilterCategory::Type,
        };
        Ok(Self::toggle(category, option_id(&value)?))
    }
}

fn option_id(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CoreError::ValidationFailed {
            message: format!("expected an option id, got {other}"),
        }),
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// A rejected action leaves `state` untouched.
pub fn reduce_filters(state: &FilterState, action: FilterAction) -> Result<FilterState, CoreError> {
    match action {
        FilterAction::Dates(dates) => {
            let mut next = state.clone();
            next.dates = dates.into();
            Ok(next)
        }
        FilterAction::Ranges(ranges) => {
            let mut next = state.clone();
            next.ranges = ranges.into();
            Ok(next)
        }
        FilterAction::Toggle { category, id } => {
            let options = state
                .category(category)
                .iter()
                .map(|o| {
                    if o.id == id {
                        FilterOption {
                            selected: !o.selected,
                            ..o.clone()
                        }
                    } else {
                        o.clone()
                    }
                })
                .collect();
            Ok(state.with_category(category, options))
        }
        FilterAction::ToggleModelCategory(id) => {
            let new_selected = state
                .models
                .iter()
                .find(|o| o.id == id)
                .map(|o| !o.selected)
                .ok_or_else(|| CoreError::UnknownFilterOption {
                    category: FilterCategory::Model.to_string(),
                    id: id.clone(),
                })?;

            let options = state
                .models
                .iter()
                .map(|o| {
                    if o.id == id || o.parent_id.as_deref() == Some(id.as_str()) {
                        FilterOption {
                            selected: new_selected,
                            ..o.clone()
                        }
                    } else {
                        o.clone()
                    }
                })
                .collect();
            Ok(state.with_category(FilterCategory::Model, options))
        }
    }
}
