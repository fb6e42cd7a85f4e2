//! Mansion mystery.
//!
//! The player walks a fixed binary tree of rooms, collecting the clue found in
//! each room into an ordered set. At the end they accuse a suspect, and the
//! accusation is judged by how many collected clues point to that suspect.
//!
//! - [`domain`]: exploration tree, clue collection, lookup table, session, verdict
//! - [`application`]: scenarios and the game service
//! - [`infrastructure`]: console and service container
//! - [`cli`]: argument parsing and commands

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
