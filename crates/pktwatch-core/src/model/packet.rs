// ── Packet domain types ──

use serde::Serialize;
use strum::Display;

use super::PacketId;

/// Display category derived from the raw `type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PacketType {
    /// Code `"5"`: periodic report.
    Cycle,
    /// Code `"4"`.
    Warning,
    /// Any other code.
    Error,
}

/// A packet record normalized for display. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketRow {
    /// 1-based position across all pages.
    pub no: u64,
    /// e.g. `2024년 03월 15일 12시 30분`
    pub created_at: String,
    pub region: String,
    pub location: String,
    pub model_name: String,
    #[serde(rename = "type")]
    pub packet_type: PacketType,
    pub packet_id: PacketId,
    /// Payload pretty-printed with four-space indentation.
    pub packet: String,
}

/// Dashboard counters returned alongside each page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PacketInfo {
    pub today: u64,
    pub cycle: u64,
    pub capture: u64,
    pub error: u64,
}

impl PacketInfo {
    /// `[today, cycle, capture, error]`
    pub fn to_array(self) -> [u64; 4] {
        [self.today, self.cycle, self.capture, self.error]
    }
}
