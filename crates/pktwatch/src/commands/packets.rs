//! Packet command handlers.

use serde::Serialize;
use tabled::Tabled;

use pktwatch_core::{PacketBoard, PacketId, PacketInfo, PacketRow};

use crate::cli::{FilterArgs, GlobalOpts, PacketsArgs, PacketsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CountView {
    count: u64,
    filters: Vec<String>,
}

#[derive(Serialize)]
struct PageView {
    count: u64,
    page: u32,
    page_size: u32,
    info: Option<PacketInfo>,
    filters: Vec<String>,
    unread: Vec<PacketId>,
    rows: Vec<PacketRow>,
}

impl PageView {
    fn pages(&self) -> u64 {
        self.count.div_ceil(u64::from(self.page_size.max(1))).max(1)
    }

    fn is_unread(&self, id: &PacketId) -> bool {
        self.unread.contains(id)
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PacketTableRow {
    #[tabled(rename = "")]
    unread: String,
    #[tabled(rename = "No")]
    no: u64,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Type")]
    packet_type: String,
    #[tabled(rename = "Packet ID")]
    packet_id: String,
}

#[derive(Serialize, Tabled)]
struct UnreadRow {
    #[tabled(rename = "Unread packet ID")]
    packet_id: String,
}

fn chips(labels: &[String], color: bool) -> String {
    if labels.is_empty() {
        return "Filters:  (none)".into();
    }
    let chips: Vec<String> = labels.iter().map(|l| output::filter_chip(l, color)).collect();
    format!("Filters:  {}", chips.join(" "))
}

fn page_detail(view: &PageView, color: bool) -> String {
    let mut lines = vec![chips(&view.filters, color)];
    if let Some(info) = view.info {
        lines.push(format!(
            "Today {} · Cycle {} · Capture {} · Error {}",
            info.today, info.cycle, info.capture, info.error
        ));
    }
    let rows: Vec<PacketTableRow> = view
        .rows
        .iter()
        .map(|r| PacketTableRow {
            unread: output::unread_marker(view.is_unread(&r.packet_id), color),
            no: r.no,
            created_at: r.created_at.clone(),
            region: r.region.clone(),
            location: r.location.clone(),
            model: r.model_name.clone(),
            packet_type: output::type_chip(r.packet_type, color),
            packet_id: r.packet_id.to_string(),
        })
        .collect();
    lines.push(output::render_table(&rows));
    lines.push(format!(
        "Page {} of {} ({} packets, {} unread on this page)",
        view.page,
        view.pages(),
        view.count,
        view.unread.len()
    ));
    lines.join("\n")
}

// ── Fetch helpers ───────────────────────────────────────────────────

/// Apply `filters`, refresh the count (which rewinds to page 1), then move to `page`.
async fn load_page(
    board: &PacketBoard,
    filters: &FilterArgs,
    page: u32,
    global: &GlobalOpts,
) -> Result<PageView, CliError> {
    let mut nav = board.navigation();
    board.load_filters(util::filter_state(filters)?);

    let spinner = util::spinner(global, "Loading packets...");
    let count = board.fetch_count().await;
    let list = board.set_page(page).await;
    util::finish(spinner);

    util::check_navigation(&mut nav)?;
    util::ensure_applied(count, "packet count")?;
    util::ensure_applied(list?, "packet list")?;

    Ok(PageView {
        count: board.packet_count(),
        page: board.page(),
        page_size: board.config().page_size,
        info: board.packet_info(),
        filters: labels(board),
        unread: board.unread().list.clone(),
        rows: board.packet_list().as_ref().clone(),
    })
}

fn labels(board: &PacketBoard) -> Vec<String> {
    board
        .selected_filters()
        .iter()
        .map(|s| s.label.clone())
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    board: &PacketBoard,
    args: PacketsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        PacketsCommand::Count(filters) => {
            let mut nav = board.navigation();
            board.load_filters(util::filter_state(&filters)?);

            let spinner = util::spinner(global, "Counting packets...");
            let outcome = board.fetch_count().await;
            util::finish(spinner);

            util::check_navigation(&mut nav)?;
            util::ensure_applied(outcome, "packet count")?;

            let view = CountView {
                count: board.packet_count(),
                filters: labels(board),
            };
            let out = output::render_single(
                &global.output,
                &view,
                |v| format!("{}\nPackets:  {}", chips(&v.filters, color), v.count),
                |v| v.count.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PacketsCommand::List { filters, page } => {
            let view = load_page(board, &filters, page, global).await?;
            let out = output::render_single(
                &global.output,
                &view,
                |v| page_detail(v, color),
                |v| {
                    v.rows
                        .iter()
                        .map(|r| r.packet_id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PacketsCommand::Read { ids } => {
            let pending: Vec<_> = ids
                .into_iter()
                .map(|id| {
                    let packet_id = PacketId::from(id);
                    let handle = board.mark_read(packet_id.clone());
                    (packet_id, handle)
                })
                .collect();

            let mut first_err = None;
            for (packet_id, handle) in pending {
                match handle.await {
                    Ok(Ok(())) => {
                        if !global.quiet {
                            eprintln!("✓ Packet {packet_id} marked read");
                        }
                    }
                    Ok(Err(e)) => {
                        first_err.get_or_insert(CliError::from(e));
                    }
                    Err(join) => {
                        first_err.get_or_insert(CliError::ApiError {
                            code: "internal".into(),
                            message: format!("acknowledgment task for {packet_id} failed: {join}"),
                        });
                    }
                }
            }
            first_err.map_or(Ok(()), Err)
        }

        PacketsCommand::Unread { filters, page } => {
            let view = load_page(board, &filters, page, global).await?;
            let unread: Vec<UnreadRow> = view
                .unread
                .iter()
                .map(|id| UnreadRow {
                    packet_id: id.to_string(),
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &unread,
                |r| UnreadRow {
                    packet_id: r.packet_id.clone(),
                },
                |r| r.packet_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
