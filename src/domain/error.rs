//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::RoomId;

/// Domain errors represent violations of the mansion's data-structure rules.
///
/// Most of them are recoverable: the interactive loop reports them and asks again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("{field} too long: {len} characters (max {max})")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("unknown room: {0:?}")]
    UnknownRoom(RoomId),

    #[error("room already attached: {0}")]
    AlreadyAttached(String),

    #[error("{side} path of {room} is already taken")]
    SlotTaken { room: String, side: &'static str },

    #[error("lookup table needs at least one bucket")]
    ZeroCapacity,

    #[error("unknown direction: {0:?} (expected left, right or stop)")]
    UnknownDirection(String),

    #[error("no path to the {direction} from {room}")]
    NoPath { room: String, direction: String },

    #[error("exploration already ended")]
    SessionEnded,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
