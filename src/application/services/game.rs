//! Game service
//!
//! Runs one game: exploration, clue summary, accusation and verdict, all
//! through the [`Console`] boundary.

use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    evaluate, ClueCollection, Direction, DomainError, EndReason, ExplorationSession,
    ExplorationTree, LookupTable, Outcome, SessionState, Step, Verdict, Visit, SUSTAIN_THRESHOLD,
};
use crate::infrastructure::traits::{Console, Tone};

/// Knobs for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Tell the player which suspect a clue points to as it is found.
    pub show_hints: bool,
    /// Matching clues needed to sustain an accusation.
    pub sustain_threshold: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            show_hints: true,
            sustain_threshold: SUSTAIN_THRESHOLD,
        }
    }
}

impl From<&Settings> for GameOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            show_hints: settings.show_suspect_hints,
            sustain_threshold: settings.sustain_threshold,
        }
    }
}

/// How the game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// The player named nobody; no verdict was computed.
    NoAccusation,
    Judged { verdict: Verdict, outcome: Outcome },
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// Room names in walking order.
    pub visited: Vec<String>,
    /// Collected clues, ascending.
    pub clues: Vec<String>,
    pub outcome: GameOutcome,
}

/// Service running interactive games.
pub struct GameService {
    console: Arc<dyn Console>,
    options: GameOptions,
}

impl GameService {
    pub fn new(console: Arc<dyn Console>, options: GameOptions) -> Self {
        Self { console, options }
    }

    /// Plays a whole game on the given mansion.
    #[instrument(level = "debug", skip_all)]
    pub fn play(&self, tree: &ExplorationTree, table: &LookupTable) -> ApplicationResult<GameReport> {
        let (visited, collected) = self.explore(tree, table)?;
        self.summarize(&collected)?;
        let outcome = self.accuse(&collected, table)?;

        Ok(GameReport {
            visited,
            clues: collected.iter().map(str::to_string).collect(),
            outcome,
        })
    }

    /// Runs the exploration loop until the player stops or reaches a dead end.
    ///
    /// End of input counts as `stop`.
    pub fn explore(
        &self,
        tree: &ExplorationTree,
        table: &LookupTable,
    ) -> ApplicationResult<(Vec<String>, ClueCollection)> {
        let hints = self.options.show_hints.then_some(table);
        let mut session = ExplorationSession::new(tree, hints);

        if session.state() == SessionState::Ended(EndReason::EmptyMansion) {
            self.say(Tone::Warning, "The mansion has no rooms.")?;
        }
        if let Some(first) = session.visited().first() {
            self.describe(first)?;
        }
        if session.is_ended() && !session.visited().is_empty() {
            self.say(Tone::Plain, "There are no further paths.")?;
        }

        while !session.is_ended() {
            let choices = session.available_directions().iter().join("/");
            self.console
                .prompt(&format!("Where to? [{choices}]"))
                .with_context("write prompt")?;

            let Some(input) = self.console.read_line().with_context("read direction")? else {
                debug!("input closed, stopping exploration");
                session.step(Direction::Stop)?;
                break;
            };

            match session.step_input(&input) {
                Ok(Step::Entered(visit)) => self.describe(&visit)?,
                Ok(Step::DeadEnd(visit)) => {
                    self.describe(&visit)?;
                    self.say(Tone::Plain, "There are no further paths.")?;
                }
                Ok(Step::Stopped) => self.say(Tone::Plain, "You stop exploring.")?,
                Err(e @ (DomainError::UnknownDirection(_) | DomainError::NoPath { .. })) => {
                    warn!("rejected choice: {}", e);
                    self.say(Tone::Warning, &e.to_string())?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let visited = session.visited().iter().map(|v| v.room.clone()).collect();
        info!("exploration over, {} clues collected", session.collected().len());
        Ok((visited, session.into_collected()))
    }

    /// Asks for a suspect and judges the accusation.
    ///
    /// A blank answer, or end of input, is no accusation.
    pub fn accuse(&self, collected: &ClueCollection, table: &LookupTable) -> ApplicationResult<GameOutcome> {
        let suspects = table.suspects();
        if !suspects.is_empty() {
            self.say(Tone::Plain, &format!("Suspects: {}", suspects.join(", ")))?;
        }
        self.console
            .prompt("Who do you accuse?")
            .with_context("write prompt")?;
        let answer = self.console.read_line().with_context("read accusation")?;
        let accused = answer.as_deref().map(str::trim).unwrap_or_default();
        if accused.is_empty() {
            self.say(Tone::Warning, "No accusation made. The case stays open.")?;
            return Ok(GameOutcome::NoAccusation);
        }

        let verdict = evaluate(collected, table, accused);
        let outcome = verdict.outcome_with(self.options.sustain_threshold);
        self.report(&verdict, outcome)?;
        Ok(GameOutcome::Judged { verdict, outcome })
    }

    fn summarize(&self, collected: &ClueCollection) -> ApplicationResult<()> {
        if collected.is_empty() {
            return self.say(Tone::Plain, "You found no clues.");
        }
        self.say(Tone::Header, "Clues collected:")?;
        for clue in collected {
            self.say(Tone::Clue, &format!("  - {clue}"))?;
        }
        Ok(())
    }

    fn report(&self, verdict: &Verdict, outcome: Outcome) -> ApplicationResult<()> {
        self.say(
            Tone::Plain,
            &format!("{} clue(s) point to {}.", verdict.match_count, verdict.accused),
        )?;
        for clue in &verdict.matching_clues {
            self.say(Tone::Clue, &format!("  - {clue}"))?;
        }
        let tone = match outcome {
            Outcome::Sustained => Tone::Success,
            Outcome::Insufficient => Tone::Warning,
            Outcome::NoEvidence => Tone::Failure,
        };
        let message = match outcome {
            Outcome::Sustained => format!("Accusation sustained: {} is guilty.", verdict.accused),
            Outcome::Insufficient => format!("Insufficient evidence against {}.", verdict.accused),
            Outcome::NoEvidence => format!("No evidence against {}.", verdict.accused),
        };
        self.say(tone, &message)
    }

    fn describe(&self, visit: &Visit) -> ApplicationResult<()> {
        self.say(Tone::Header, &format!("You are in: {}", visit.room))?;
        match &visit.clue {
            Some(clue) if visit.newly_collected => self.say(Tone::Clue, &format!("Clue found: {clue}"))?,
            Some(clue) => self.say(Tone::Clue, &format!("Clue already noted: {clue}"))?,
            None => self.say(Tone::Plain, "Nothing of interest here.")?,
        }
        if let Some(suspect) = &visit.suspect_hint {
            self.say(Tone::Hint, &format!("This clue points to {suspect}."))?;
        }
        Ok(())
    }

    fn say(&self, tone: Tone, line: &str) -> ApplicationResult<()> {
        self.console.write_line(tone, line).with_context("write output")
    }
}
