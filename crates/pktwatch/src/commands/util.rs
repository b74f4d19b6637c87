//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;

use pktwatch_core::{
    DateRange, FetchOutcome, FilterAction, FilterCategory, FilterOption, FilterState, Navigation,
    reduce_filters,
};

use crate::cli::{FilterArgs, GlobalOpts};
use crate::error::CliError;

/// Build a filter state whose options are exactly the requested values, all selected.
///
/// Options start unselected and are switched on through the filter
/// reducer, so the CLI follows the same transitions as any other consumer.
pub fn filter_state(args: &FilterArgs) -> Result<FilterState, CliError> {
    let mut state = FilterState {
        regions: options(&args.regions),
        locations: options(&args.locations),
        models: options(&args.models),
        types: options(&args.types),
        ..FilterState::default()
    };

    if let (Some(start), Some(end)) = (args.start, args.end) {
        if end < start {
            return Err(CliError::Validation {
                field: "end".into(),
                reason: format!("{end} is before {start}"),
            });
        }
        state = reduce_filters(&state, FilterAction::Dates(vec![DateRange::new(start, end)]))?;
    }

    for category in FilterCategory::ALL {
        let ids: Vec<String> = state.category(category).iter().map(|o| o.id.clone()).collect();
        for id in ids {
            state = reduce_filters(&state, FilterAction::toggle(category, id))?;
        }
    }
    Ok(state)
}

/// One unselected option per distinct value, in first-seen order.
fn options(values: &[String]) -> Arc<Vec<FilterOption>> {
    let mut seen: Vec<&String> = Vec::with_capacity(values.len());
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    Arc::new(
        seen.into_iter()
            .map(|v| FilterOption::new(v.clone(), v.clone()))
            .collect(),
    )
}

/// Fail if the board asked for a login redirect since `rx` was created.
pub fn check_navigation(rx: &mut broadcast::Receiver<Navigation>) -> Result<(), CliError> {
    match rx.try_recv() {
        Ok(Navigation::Login { path, reason }) => Err(CliError::login_required(&path, reason)),
        Err(_) => Ok(()),
    }
}

/// Turn a non-applied fetch into an error.
pub fn ensure_applied(outcome: FetchOutcome, what: &str) -> Result<(), CliError> {
    match outcome {
        FetchOutcome::Applied => Ok(()),
        FetchOutcome::Superseded => Err(CliError::ApiError {
            code: "cancelled".into(),
            message: format!("{what} was cancelled"),
        }),
        FetchOutcome::Redirected | FetchOutcome::Failed => Err(CliError::ApiError {
            code: "request_failed".into(),
            message: format!("{what} failed; run with -v for details"),
        }),
    }
}

/// Spinner on stderr while waiting on the server. `None` when quiet or piped.
pub fn spinner(global: &GlobalOpts, message: &str) -> Option<ProgressBar> {
    if global.quiet || !io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub fn finish(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
