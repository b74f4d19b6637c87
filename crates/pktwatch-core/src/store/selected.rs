// ── Selected-filter projection ──

use crate::model::{FilterCategory, FilterState, SelectedFilter};

/// Active filter chips for `state`.
///
/// Full scan in category order (region, location, model, type) and option
/// order within each category. Options need to be selected *and* carry a
/// non-empty value. Dates and ranges never produce chips.
pub fn project_selected(state: &FilterState) -> Vec<SelectedFilter> {
    FilterCategory::ALL
        .into_iter()
        .flat_map(|category| {
            state
                .category(category)
                .iter()
                .filter(|o| o.selected && !o.value.is_empty())
                .map(move |o| SelectedFilter {
                    category,
                    id: o.id.clone(),
                    label: format!("{}: {}", category.label(), o.value),
                })
        })
        .collect()
}
