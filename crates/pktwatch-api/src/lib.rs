// pktwatch-api: Async Rust client for the packet monitoring REST API

pub mod client;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod packets;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    DeviceStatusResponse, PacketCountResponse, PacketId, PacketInfoResponse, PacketListResponse,
    PacketQuery, PacketRecord,
};
pub use transport::{TlsMode, TransportConfig};
