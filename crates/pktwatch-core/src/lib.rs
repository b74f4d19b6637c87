//! State layer between `pktwatch-api` and UI consumers (CLI today).
//!
//! This crate owns the business logic behind the packets board:
//!
//! - **[`PacketBoard`]**: Facade owning the filter state, current page,
//!   fetched results and the unread set. Every filter change re-runs the
//!   count and list fetches; superseded fetches are cancelled and their
//!   late responses discarded. Consumers observe state through `watch`
//!   receivers and login redirects through [`Navigation`] events.
//!
//! - **Reducers** ([`store`]): Pure state transitions:
//!   [`reduce_filters`] for the filter selection, [`reduce_unread`] for the
//!   unread set, and [`project_selected`] deriving the active filter chips.
//!
//! - **Domain model** ([`model`]): `FilterState`, `PacketRow`,
//!   `PacketInfo`, `DeviceStatus` and friends.
//!
//! - **[`convert`]**: Raw API records to display rows.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BoardConfig, TlsVerification};
pub use controller::{FetchOutcome, Navigation, PacketBoard, RedirectReason, RefreshOutcome};
pub use error::CoreError;
pub use session::Session;
pub use store::{
    FilterAction, UnreadAction, UnreadState, project_selected, reduce_filters, reduce_unread,
};

pub use model::{
    DateRange, DeviceStatus, FilterCategory, FilterOption, FilterState, PacketId, PacketInfo,
    PacketRow, PacketType, SelectedFilter,
};
