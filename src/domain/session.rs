//! Exploration session: walks the mansion one choice at a time.
//!
//! The session borrows the tree and never owns rooms. Every room entered has
//! its clue added to the session's [`ClueCollection`].

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, instrument};

use crate::domain::clues::ClueCollection;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::lookup::LookupTable;
use crate::domain::tree::{ExplorationTree, RoomId};

/// A choice offered to the player at each room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Stop,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "e" | "esquerda" => Ok(Direction::Left),
            "right" | "r" | "d" | "direita" => Ok(Direction::Right),
            "stop" | "s" | "q" | "quit" | "sair" => Ok(Direction::Stop),
            _ => Err(DomainError::UnknownDirection(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Stop => "stop",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Reached a room without further paths.
    DeadEnd,
    /// The player chose to stop.
    Stopped,
    /// The tree had no rooms to begin with.
    EmptyMansion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Exploring,
    Ended(EndReason),
}

/// What the player sees on entering a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub room: String,
    pub clue: Option<String>,
    /// False when the clue had already been collected on an earlier walk.
    pub newly_collected: bool,
    /// Suspect linked to the clue, when hints are enabled.
    pub suspect_hint: Option<String>,
}

/// Outcome of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Moved into a room with further paths.
    Entered(Visit),
    /// Moved into a room without exits; the session is over.
    DeadEnd(Visit),
    /// The player stopped exploring.
    Stopped,
}

pub struct ExplorationSession<'a> {
    tree: &'a ExplorationTree,
    hints: Option<&'a LookupTable>,
    current: Option<RoomId>,
    state: SessionState,
    collected: ClueCollection,
    visits: Vec<Visit>,
}

impl<'a> ExplorationSession<'a> {
    /// Starts at the root with an empty clue collection.
    pub fn new(tree: &'a ExplorationTree, hints: Option<&'a LookupTable>) -> Self {
        Self::resume(tree, hints, ClueCollection::new())
    }

    /// Starts a new walk from the root, adding to clues gathered earlier.
    #[instrument(level = "debug", skip_all)]
    pub fn resume(
        tree: &'a ExplorationTree,
        hints: Option<&'a LookupTable>,
        collected: ClueCollection,
    ) -> Self {
        let mut session = Self {
            tree,
            hints,
            current: None,
            state: SessionState::Ended(EndReason::EmptyMansion),
            collected,
            visits: Vec::new(),
        };
        if let Some(root) = tree.root() {
            session.state = SessionState::Exploring;
            session.enter(root);
        }
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended(_))
    }

    /// Room the player stands in; `None` once the session has ended.
    pub fn current_room(&self) -> Option<RoomId> {
        self.current
    }

    pub fn current_room_name(&self) -> Option<&'a str> {
        let tree = self.tree;
        self.current
            .and_then(|id| tree.room(id))
            .map(|room| room.name())
    }

    /// Rooms entered so far, in walking order.
    pub fn visited(&self) -> &[Visit] {
        &self.visits
    }

    pub fn collected(&self) -> &ClueCollection {
        &self.collected
    }

    pub fn into_collected(self) -> ClueCollection {
        self.collected
    }

    /// Directions the player may pick in the current room (always ends with `Stop`).
    pub fn available_directions(&self) -> Vec<Direction> {
        let Some(room) = self.current.and_then(|id| self.tree.room(id)) else {
            return Vec::new();
        };
        let mut directions = Vec::with_capacity(3);
        if room.left().is_some() {
            directions.push(Direction::Left);
        }
        if room.right().is_some() {
            directions.push(Direction::Right);
        }
        directions.push(Direction::Stop);
        directions
    }

    /// Parses a raw player token and steps.
    pub fn step_input(&mut self, input: &str) -> DomainResult<Step> {
        let direction: Direction = input.parse()?;
        self.step(direction)
    }

    /// Applies one player choice.
    ///
    /// A missing path is reported as [`DomainError::NoPath`] and leaves the
    /// session where it was.
    #[instrument(level = "debug", skip(self))]
    pub fn step(&mut self, direction: Direction) -> DomainResult<Step> {
        if self.is_ended() {
            return Err(DomainError::SessionEnded);
        }
        let tree = self.tree;
        let room = self
            .current
            .and_then(|id| tree.room(id))
            .ok_or(DomainError::SessionEnded)?;

        let next = match direction {
            Direction::Stop => {
                info!("exploration stopped in {}", room.name());
                self.end(EndReason::Stopped);
                return Ok(Step::Stopped);
            }
            Direction::Left => room.left(),
            Direction::Right => room.right(),
        };
        let next = next.ok_or_else(|| DomainError::NoPath {
            room: room.name().to_string(),
            direction: direction.to_string(),
        })?;

        let visit = self.enter(next);
        if self.is_ended() {
            Ok(Step::DeadEnd(visit))
        } else {
            Ok(Step::Entered(visit))
        }
    }

    fn enter(&mut self, id: RoomId) -> Visit {
        let tree = self.tree;
        let Some(room) = tree.room(id) else {
            self.end(EndReason::DeadEnd);
            return Visit {
                room: String::new(),
                clue: None,
                newly_collected: false,
                suspect_hint: None,
            };
        };
        debug!("entering {}", room.name());

        let clue = room.clue();
        let newly_collected = clue.is_some_and(|c| self.collected.insert(c));
        let suspect_hint = match (clue, self.hints) {
            (Some(c), Some(table)) => table.get(c).map(str::to_string),
            _ => None,
        };
        let visit = Visit {
            room: room.name().to_string(),
            clue: clue.map(str::to_string),
            newly_collected,
            suspect_hint,
        };
        self.visits.push(visit.clone());

        self.current = Some(id);
        if room.is_leaf() {
            info!("no further paths from {}", room.name());
            self.end(EndReason::DeadEnd);
        }
        visit
    }

    fn end(&mut self, reason: EndReason) {
        self.state = SessionState::Ended(reason);
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      hall [a]
    //      /     \
    //  den [b]   attic
    fn tree() -> ExplorationTree {
        let mut tree = ExplorationTree::new();
        let hall = tree.create_room("Hall", Some("a")).unwrap();
        tree.add_left(hall, "Den", Some("b")).unwrap();
        tree.add_right(hall, "Attic", None).unwrap();
        tree
    }

    #[test]
    fn test_root_clue_collected_on_start() {
        let tree = tree();
        let session = ExplorationSession::new(&tree, None);
        assert_eq!(session.state(), SessionState::Exploring);
        assert_eq!(session.current_room_name(), Some("Hall"));
        assert!(session.collected().contains("a"));
        assert_eq!(
            session.available_directions(),
            vec![Direction::Left, Direction::Right, Direction::Stop]
        );
    }

    #[test]
    fn test_leaf_ends_session() {
        let tree = tree();
        let mut session = ExplorationSession::new(&tree, None);
        let step = session.step(Direction::Left).unwrap();
        assert!(matches!(step, Step::DeadEnd(ref v) if v.room == "Den" && v.newly_collected));
        assert_eq!(session.state(), SessionState::Ended(EndReason::DeadEnd));
        assert_eq!(session.current_room(), None);
        assert!(session.available_directions().is_empty());
        assert_eq!(session.step(Direction::Right), Err(DomainError::SessionEnded));
    }

    #[test]
    fn test_stop_ends_session() {
        let tree = tree();
        let mut session = ExplorationSession::new(&tree, None);
        assert_eq!(session.step_input(" STOP "), Ok(Step::Stopped));
        assert_eq!(session.state(), SessionState::Ended(EndReason::Stopped));
        assert_eq!(session.into_collected().len(), 1);
    }

    #[test]
    fn test_invalid_input_keeps_room() {
        let tree = tree();
        let mut session = ExplorationSession::new(&tree, None);
        assert_eq!(
            session.step_input("up"),
            Err(DomainError::UnknownDirection("up".into()))
        );
        assert_eq!(session.current_room_name(), Some("Hall"));
        assert_eq!(session.state(), SessionState::Exploring);
    }

    #[test]
    fn test_missing_path_keeps_room() {
        let mut tree = ExplorationTree::new();
        let hall = tree.create_room("Hall", None).unwrap();
        tree.add_right(hall, "Attic", None).unwrap();
        let mut session = ExplorationSession::new(&tree, None);
        assert_eq!(session.available_directions(), vec![Direction::Right, Direction::Stop]);
        assert!(matches!(session.step(Direction::Left), Err(DomainError::NoPath { .. })));
        assert_eq!(session.current_room_name(), Some("Hall"));
    }

    #[test]
    fn test_empty_tree_starts_ended() {
        let tree = ExplorationTree::new();
        let session = ExplorationSession::new(&tree, None);
        assert_eq!(session.state(), SessionState::Ended(EndReason::EmptyMansion));
        assert!(session.visited().is_empty());
    }

    #[test]
    fn test_hint_from_lookup_table() {
        let tree = tree();
        let table: LookupTable = [("b", "Mr. Green")].into_iter().collect();
        let mut session = ExplorationSession::new(&tree, Some(&table));
        let Step::DeadEnd(visit) = session.step(Direction::Left).unwrap() else {
            panic!("expected dead end");
        };
        assert_eq!(visit.suspect_hint.as_deref(), Some("Mr. Green"));
        assert_eq!(session.visited()[0].suspect_hint, None);
    }

    #[test]
    fn test_resume_marks_known_clues() {
        let tree = tree();
        let first = ExplorationSession::new(&tree, None).into_collected();
        let session = ExplorationSession::resume(&tree, None, first);
        assert!(!session.visited()[0].newly_collected);
        assert_eq!(session.collected().len(), 1);
    }
}
