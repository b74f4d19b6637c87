//! Device command handlers.

use tabled::Tabled;

use pktwatch_core::{DeviceStatus, PacketBoard};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Status")]
    label: &'static str,
    #[tabled(rename = "Devices")]
    count: u64,
    #[tabled(rename = "Share")]
    share: String,
}

fn detail(status: &DeviceStatus) -> String {
    let rows: Vec<StatusRow> = status
        .series()
        .into_iter()
        .zip(status.shares())
        .map(|((label, count), share)| StatusRow {
            label,
            count,
            share: format!("{share:.1}%"),
        })
        .collect();
    format!("{}\nTotal: {}", output::render_table(&rows), status.total())
}

fn plain(status: &DeviceStatus) -> String {
    status
        .series()
        .iter()
        .map(|(label, count)| format!("{label}={count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(
    board: &PacketBoard,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::Status => {
            let mut nav = board.navigation();

            let spinner = util::spinner(global, "Fetching device status...");
            let outcome = board.fetch_device_status().await;
            util::finish(spinner);

            util::check_navigation(&mut nav)?;
            util::ensure_applied(outcome, "device status")?;

            let status = board.device_status().ok_or_else(|| CliError::ApiError {
                code: "empty".into(),
                message: "server returned no device status".into(),
            })?;

            let out = output::render_single(&global.output, &status, detail, plain);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
