//! Command dispatch: bridges CLI args -> packet board -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod packets;
pub mod util;

use pktwatch_core::PacketBoard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    board: &PacketBoard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Packets(args) => packets::handle(board, args, global).await,
        Command::Devices(args) => devices::handle(board, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
