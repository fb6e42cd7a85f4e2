//! Exploration tree: the fixed binary layout of the mansion.
//!
//! Rooms live in a generational arena owned by [`ExplorationTree`]. Each room
//! only knows its children, so ownership flows strictly downward.

use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Longest accepted room name, in characters.
pub const MAX_ROOM_NAME_LEN: usize = 49;
/// Longest accepted clue text, in characters.
pub const MAX_CLUE_LEN: usize = 99;

/// Handle to a room inside an [`ExplorationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(Index);

/// A node of the mansion layout.
#[derive(Debug)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<RoomId>,
    right: Option<RoomId>,
    attached: bool,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clue found in this room, `None` when the room holds nothing.
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn left(&self) -> Option<RoomId> {
        self.left
    }

    pub fn right(&self) -> Option<RoomId> {
        self.right
    }

    /// A room without children ends the exploration.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.clue {
            Some(clue) => write!(f, "{} [{}]", self.name, clue),
            None => write!(f, "{}", self.name),
        }
    }
}

fn check_len(field: &'static str, text: &str, max: usize) -> DomainResult<()> {
    let len = text.chars().count();
    if len > max {
        return Err(DomainError::TextTooLong { field, len, max });
    }
    Ok(())
}

/// Arena-based binary tree of rooms.
///
/// The first room created becomes the root. Further rooms start detached and
/// are wired in with [`ExplorationTree::set_left`] / [`ExplorationTree::set_right`].
#[derive(Debug)]
pub struct ExplorationTree {
    arena: Arena<Room>,
    root: Option<RoomId>,
}

impl Default for ExplorationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorationTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a new leaf room.
    ///
    /// The name is trimmed; the clue is stored verbatim, and only an empty
    /// clue means no clue. Overlong names or clues are rejected instead of
    /// truncated.
    #[instrument(level = "trace", skip(self))]
    pub fn create_room(&mut self, name: &str, clue: Option<&str>) -> DomainResult<RoomId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        check_len("room name", name, MAX_ROOM_NAME_LEN)?;
        let clue = match clue {
            Some(c) if !c.is_empty() => {
                check_len("clue", c, MAX_CLUE_LEN)?;
                Some(c.to_string())
            }
            _ => None,
        };

        let is_root = self.root.is_none();
        let id = RoomId(self.arena.insert(Room {
            name: name.to_string(),
            clue,
            left: None,
            right: None,
            attached: is_root,
        }));
        if is_root {
            debug!("root room: {}", name);
            self.root = Some(id);
        }
        Ok(id)
    }

    /// Makes `child` the left path of `parent`.
    pub fn set_left(&mut self, parent: RoomId, child: RoomId) -> DomainResult<()> {
        self.attach(parent, child, Side::Left)
    }

    /// Makes `child` the right path of `parent`.
    pub fn set_right(&mut self, parent: RoomId, child: RoomId) -> DomainResult<()> {
        self.attach(parent, child, Side::Right)
    }

    /// Creates a room and attaches it as the left child of `parent`.
    pub fn add_left(&mut self, parent: RoomId, name: &str, clue: Option<&str>) -> DomainResult<RoomId> {
        let child = self.create_room(name, clue)?;
        self.set_left(parent, child)?;
        Ok(child)
    }

    /// Creates a room and attaches it as the right child of `parent`.
    pub fn add_right(&mut self, parent: RoomId, name: &str, clue: Option<&str>) -> DomainResult<RoomId> {
        let child = self.create_room(name, clue)?;
        self.set_right(parent, child)?;
        Ok(child)
    }

    #[instrument(level = "trace", skip(self))]
    fn attach(&mut self, parent: RoomId, child: RoomId, side: Side) -> DomainResult<()> {
        let child_room = self.arena.get(child.0).ok_or(DomainError::UnknownRoom(child))?;
        if child_room.attached || parent == child {
            return Err(DomainError::AlreadyAttached(child_room.name.clone()));
        }
        let parent_room = self
            .arena
            .get_mut(parent.0)
            .ok_or(DomainError::UnknownRoom(parent))?;
        let slot = match side {
            Side::Left => &mut parent_room.left,
            Side::Right => &mut parent_room.right,
        };
        if slot.is_some() {
            return Err(DomainError::SlotTaken {
                room: parent_room.name.clone(),
                side: side.as_str(),
            });
        }
        *slot = Some(child);
        if let Some(child_room) = self.arena.get_mut(child.0) {
            child_room.attached = true;
        }
        Ok(())
    }

    pub fn root(&self) -> Option<RoomId> {
        self.root
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.arena.get(id.0)
    }

    /// Looks a room up by name (first match in pre-order).
    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.iter().find(|(_, room)| room.name == name).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root (room, left, right).
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    /// Post-order traversal from the root (left, right, room).
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of rooms on the longest path from the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(RoomId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(room) = self.room(id) {
                stack.extend(room.left.iter().chain(room.right.iter()).map(|&c| (c, depth + 1)));
            }
        }
        max_depth
    }

    /// Names of all rooms where exploration ends, left to right.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, room)| room.is_leaf())
            .map(|(_, room)| room.name())
            .collect()
    }

    /// Frees every room, children before their parent.
    ///
    /// Rooms that were never attached are dropped afterwards. Safe to call on
    /// an empty or already released tree.
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self) {
        let order: Vec<RoomId> = self.iter_postorder().map(|(id, _)| id).collect();
        for id in &order {
            self.arena.remove(id.0);
        }
        debug!("released {} rooms ({} detached)", order.len(), self.arena.len());
        self.arena.clear();
        self.root = None;
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a ExplorationTree,
    stack: Vec<RoomId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a ExplorationTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let room = self.tree.room(id)?;
        // right first so that left comes off the stack first
        self.stack.extend(room.right);
        self.stack.extend(room.left);
        Some((id, room))
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a ExplorationTree,
    stack: Vec<(RoomId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a ExplorationTree) -> Self {
        Self {
            tree,
            stack: tree.root.map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (RoomId, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, visited)) = self.stack.pop() {
            if let Some(room) = self.tree.room(id) {
                if visited {
                    return Some((id, room));
                }
                self.stack.push((id, true));
                self.stack.extend(room.right.map(|c| (c, false)));
                self.stack.extend(room.left.map(|c| (c, false)));
            }
        }
        None
    }
}

/// Rendering of trees through `termtree`.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for ExplorationTree {
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root) = self.root else {
            return Tree::new("Empty mansion".to_string());
        };

        // Post-order: every child subtree is finished before its parent.
        let mut built: Vec<(RoomId, Tree<String>)> = Vec::new();
        for (id, room) in self.iter_postorder() {
            let mut children = Vec::with_capacity(2);
            for child in [room.left, room.right].into_iter().flatten() {
                if let Some(pos) = built.iter().rposition(|(c, _)| *c == child) {
                    children.push(built.remove(pos).1);
                }
            }
            built.push((id, Tree::new(room.to_string()).with_leaves(children)));
        }

        match built.pop() {
            Some((id, tree)) if id == root => tree,
            _ => Tree::new("Empty mansion".to_string()),
        }
    }
}
