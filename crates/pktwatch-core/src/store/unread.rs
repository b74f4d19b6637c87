// ── Unread-tracking reducer ──
//
// Holds the ids of packets the operator has not acknowledged yet.
// The list is only ever replaced wholesale or shrunk by one id.
// The server acknowledgment is issued by `PacketBoard::mark_read`, never here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::EnumString;

use crate::error::CoreError;
use crate::model::PacketId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadState {
    pub list: Vec<PacketId>,
}

impl UnreadState {
    pub fn new(list: Vec<PacketId>) -> Self {
        Self { list }
    }

    pub fn contains(&self, id: &PacketId) -> bool {
        self.list.contains(id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadAction {
    /// Replace the whole state.
    Initialize(UnreadState),
    /// The operator opened a packet.
    Click(PacketId),
}

#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum UnreadActionKind {
    Initialize,
    Click,
}

impl UnreadAction {
    /// Build an action from its string kind and JSON payload.
    ///
    /// Unknown kinds fail with [`CoreError::UnexpectedAction`].
    pub fn parse(kind: &str, value: Value) -> Result<Self, CoreError> {
        let parsed = UnreadActionKind::from_str(kind).map_err(|_| CoreError::UnexpectedAction {
            kind: kind.to_owned(),
        })?;
        let invalid = |e: serde_json::Error| CoreError::ValidationFailed {
            message: format!("invalid {kind} payload: {e}"),
        };
        match parsed {
            UnreadActionKind::Initialize => serde_json::from_value(value)
                .map(Self::Initialize)
                .map_err(invalid),
            UnreadActionKind::Click => serde_json::from_value(value)
                .map(Self::Click)
                .map_err(invalid),
        }
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce_unread(state: &UnreadState, action: UnreadAction) -> UnreadState {
    match action {
        UnreadAction::Initialize(next) => next,
        UnreadAction::Click(id) => {
            let mut list = state.list.clone();
            if let Some(index) = list.iter().position(|p| *p == id) {
                list.remove(index);
            }
            UnreadState { list }
        }
    }
}
