// ── API-to-domain conversions ──
//
// Bridges raw `pktwatch_api` records into display-ready domain types.
// All transforms are one-way.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use pktwatch_api::{DeviceStatusResponse, PacketInfoResponse, PacketRecord};

use crate::model::{DeviceStatus, PacketId, PacketInfo, PacketRow, PacketType};

// ── Helpers ────────────────────────────────────────────────────────

/// Characters `start..end` of `s`; shorter inputs yield shorter slices.
fn slice_chars(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// `YYMMDDHHmm` → `20YY년 MM월 DD일 HH시 mm분`.
///
/// Purely positional; out-of-range fields are passed through untouched.
pub fn format_created_at(created_at: &str) -> String {
    let year = slice_chars(created_at, 0, 2);
    let month = slice_chars(created_at, 2, 4);
    let day = slice_chars(created_at, 4, 6);
    let hour = slice_chars(created_at, 6, 8);
    let minute = slice_chars(created_at, 8, 10);
    format!("20{year}년 {month}월 {day}일 {hour}시 {minute}분")
}

pub fn label_packet_type(code: &str) -> PacketType {
    match code {
        "5" => PacketType::Cycle,
        "4" => PacketType::Warning,
        _ => PacketType::Error,
    }
}

/// Pretty-print a payload with four-space indentation.
pub fn pretty_packet(packet: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    if packet.serialize(&mut ser).is_err() {
        return packet.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| packet.to_string())
}

/// 1-based row number across pages.
pub fn row_number(page: u32, row: u32, index: usize) -> u64 {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    u64::from(page.saturating_sub(1)) * u64::from(row) + index + 1
}

// ── Records ────────────────────────────────────────────────────────

/// Normalize one page of records into display rows.
pub fn packet_rows(records: &[PacketRecord], page: u32, row: u32) -> Vec<PacketRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| PacketRow {
            no: row_number(page, row, index),
            created_at: format_created_at(&record.created_at),
            region: record.region.clone(),
            location: record.location.clone(),
            model_name: record.model_name.clone(),
            packet_type: label_packet_type(&record.packet_type),
            packet_id: record.packet_id.clone(),
            packet: pretty_packet(&record.packet),
        })
        .collect()
}

/// Ids of the records not yet read, in page order.
pub fn unread_ids(records: &[PacketRecord]) -> Vec<PacketId> {
    records
        .iter()
        .filter(|r| !r.is_read)
        .map(|r| r.packet_id.clone())
        .collect()
}

impl From<PacketInfoResponse> for PacketInfo {
    fn from(info: PacketInfoResponse) -> Self {
        Self {
            today: info.today,
            cycle: info.cycle,
            capture: info.capture,
            error: info.error,
        }
    }
}

impl From<DeviceStatusResponse> for DeviceStatus {
    fn from(status: DeviceStatusResponse) -> Self {
        Self {
            normal: status.normal,
            replacement: status.replacement,
            error: status.error,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(id: u64, kind: &str, is_read: bool) -> PacketRecord {
        serde_json::from_value(json!({
            "created_at": "2403151230",
            "region": "Seoul",
            "location": "Gangnam",
            "model_name": "PM-100",
            "type": kind,
            "packet_id": id,
            "packet": {"temp": 21, "ok": true},
            "is_read": is_read
        }))
        .unwrap()
    }

    #[test]
    fn created_at_is_sliced_positionally() {
        assert_eq!(format_created_at("2403151230"), "2024년 03월 15일 12시 30분");
    }

    #[test]
    fn created_at_does_not_validate_ranges() {
        assert_eq!(format_created_at("9913329961"), "2099년 13월 32일 99시 61분");
    }

    #[test]
    fn short_created_at_does_not_panic() {
        assert_eq!(format_created_at("2403"), "2024년 03월 일 시 분");
    }

    #[test]
    fn type_codes_map_to_labels() {
        assert_eq!(label_packet_type("5"), PacketType::Cycle);
        assert_eq!(label_packet_type("4"), PacketType::Warning);
        assert_eq!(label_packet_type("9"), PacketType::Error);
        assert_eq!(label_packet_type(""), PacketType::Error);
        assert_eq!(PacketType::Warning.to_string(), "WARNING");
    }

    #[test]
    fn payload_uses_four_space_indent() {
        assert_eq!(pretty_packet(&json!({"a": 1})), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn rows_are_numbered_across_pages() {
        let records = vec![record(1, "5", false), record(2, "4", true)];
        let rows = packet_rows(&records, 3, 10);
        assert_eq!(rows[0].no, 21);
        assert_eq!(rows[1].no, 22);
        assert_eq!(rows[0].packet_type, PacketType::Cycle);
        assert_eq!(rows[1].packet_type, PacketType::Warning);
        assert_eq!(rows[0].created_at, "2024년 03월 15일 12시 30분");
        assert_eq!(rows[0].model_name, "PM-100");
    }

    #[test]
    fn unread_ids_skip_read_records() {
        let records = vec![
            record(1, "5", false),
            record(2, "5", true),
            record(3, "9", false),
        ];
        assert_eq!(
            unread_ids(&records),
            vec![PacketId::from(1), PacketId::from(3)]
        );
    }
}
