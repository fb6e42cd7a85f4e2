//! Domain layer: the mansion's data structures
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod clues;
pub mod error;
pub mod lookup;
pub mod session;
pub mod tree;
pub mod verdict;

pub use clues::ClueCollection;
pub use error::{DomainError, DomainResult};
pub use lookup::{LookupTable, DEFAULT_BUCKET_COUNT};
pub use session::{Direction, EndReason, ExplorationSession, SessionState, Step, Visit};
pub use tree::{ExplorationTree, Room, RoomId, TreeDisplay, MAX_CLUE_LEN, MAX_ROOM_NAME_LEN};
pub use verdict::{evaluate, Outcome, Verdict, SUSTAIN_THRESHOLD};
