// ── Domain model ──
//
// Canonical types consumed by the CLI. Wire shapes stay in
// `pktwatch_api::models`; `crate::convert` bridges the two.

pub mod device;
pub mod filter;
pub mod packet;

pub use device::DeviceStatus;
pub use filter::{DateRange, FilterCategory, FilterOption, FilterState, SelectedFilter};
pub use packet::{PacketInfo, PacketRow, PacketType};
pub use pktwatch_api::PacketId;
