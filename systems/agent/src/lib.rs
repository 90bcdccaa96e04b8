#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven agent that steers the snake along planned shortest paths.
//!
//! Each call to [`Agent::tick`] consumes one cell of the cached path, planning
//! a fresh one whenever the cache is empty or the target has moved since the
//! last plan. An unreachable target is not an error: the agent idles (or
//! applies its fallback) and tries again on the next tick.

use std::collections::VecDeque;

use log::{debug, info};
use pathsnake_core::{
    CellCoord, Direction, Event, Fallback, GameOverReason, StepResult, TickOutcome,
};
use pathsnake_system_pathfinding::{find_path, path_is_well_formed};
use pathsnake_world::{self as world, query, World};
use thiserror::Error;

mod session;

pub use session::Session;

/// Invariant violations detected while driving the world.
///
/// Both indicate that the planner and the world disagreed about legality,
/// which must never happen because they share one predicate.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    /// The world rejected a step the agent believed legal.
    #[error("world rejected a planned move {direction:?} from {from:?}")]
    IllegalMoveAttempted {
        /// Head cell before the attempted move.
        from: CellCoord,
        /// Direction the agent tried to move in.
        direction: Direction,
    },
    /// The next cached cell is not adjacent to the snake head.
    #[error("cached path jumps from {from:?} to {to:?}")]
    PathDiscontinuity {
        /// Head cell at the time of the tick.
        from: CellCoord,
        /// Next cell taken from the cached path.
        to: CellCoord,
    },
}

/// Counters describing how the agent spent its ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgentStats {
    /// Ticks processed while the world was still running.
    pub ticks: u64,
    /// Searches run against the world.
    pub replans: u64,
    /// Ticks on which the snake stayed put because no path existed.
    pub idle_ticks: u64,
}

/// Path-following controller for a single snake.
#[derive(Clone, Debug, Default)]
pub struct Agent {
    fallback: Fallback,
    path: VecDeque<CellCoord>,
    planned_for: Option<CellCoord>,
    stats: AgentStats,
}

impl Agent {
    /// Creates an agent with an empty path cache.
    #[must_use]
    pub fn new(fallback: Fallback) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Runs one simulation tick against `world`.
    ///
    /// Events produced by the world while stepping are appended to
    /// `out_events`.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] when the world and the cached path disagree,
    /// which signals a bug rather than a recoverable condition.
    pub fn tick(
        &mut self,
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<TickOutcome, AgentError> {
        if let Some(reason) = query::game_over_reason(world) {
            return Ok(terminal_outcome(reason));
        }
        self.stats.ticks = self.stats.ticks.saturating_add(1);

        let target = query::target_cell(world);
        if self.planned_for != Some(target) {
            self.invalidate();
        }

        if self.path.is_empty() && !self.plan(world, target) {
            return self.fall_back(world, out_events);
        }

        let head = query::head(world);
        let Some(next) = self.path.pop_front() else {
            return self.fall_back(world, out_events);
        };
        let direction = Direction::between(head, next)
            .ok_or(AgentError::PathDiscontinuity { from: head, to: next })?;

        self.advance(world, direction, out_events)
    }

    /// Cells the agent still intends to visit, nearest first.
    pub fn planned_path(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.path.iter().copied()
    }

    /// Counters accumulated since the agent was created.
    #[must_use]
    pub fn stats(&self) -> AgentStats {
        self.stats
    }

    /// Drops the cached path so the next tick plans from scratch.
    pub fn invalidate(&mut self) {
        self.path.clear();
        self.planned_for = None;
    }

    fn plan(&mut self, world: &World, target: CellCoord) -> bool {
        self.stats.replans = self.stats.replans.saturating_add(1);
        let head = query::head(world);

        let Some(path) = find_path(query::grid_size(world), head, target, |cell| {
            query::is_legal(world, cell)
        }) else {
            debug!("no path from {head:?} to {target:?}");
            return false;
        };

        debug_assert!(path_is_well_formed(head, &path, |cell| {
            query::is_legal(world, cell)
        }));
        debug!("planned {} steps from {head:?} to {target:?}", path.len());

        self.path = path.into();
        self.planned_for = Some(target);
        true
    }

    fn advance(
        &mut self,
        world: &mut World,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<TickOutcome, AgentError> {
        let from = query::head(world);

        match world::step(world, direction, out_events) {
            StepResult::Moved => Ok(TickOutcome::Advanced),
            StepResult::TargetReached => {
                self.invalidate();
                Ok(TickOutcome::TargetReached)
            }
            StepResult::BoardFilled => {
                self.invalidate();
                info!("board filled after {} ticks", self.stats.ticks);
                Ok(TickOutcome::BoardFilled)
            }
            StepResult::Collided { .. } => {
                self.invalidate();
                Err(AgentError::IllegalMoveAttempted { from, direction })
            }
            StepResult::Frozen => Ok(TickOutcome::GameOver),
        }
    }

    fn fall_back(
        &mut self,
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<TickOutcome, AgentError> {
        self.invalidate();

        if self.fallback == Fallback::FirstLegalNeighbor {
            let head = query::head(world);
            let escape = Direction::ALL.into_iter().find(|direction| {
                head.neighbor(*direction)
                    .map_or(false, |cell| query::is_legal(world, cell))
            });
            if let Some(direction) = escape {
                debug!("target unreachable; wandering {direction:?}");
                return self.advance(world, direction, out_events);
            }
        }

        self.stats.idle_ticks = self.stats.idle_ticks.saturating_add(1);
        Ok(TickOutcome::NoPathIdle)
    }
}

fn terminal_outcome(reason: GameOverReason) -> TickOutcome {
    match reason {
        GameOverReason::Collision => TickOutcome::GameOver,
        GameOverReason::BoardFilled => TickOutcome::BoardFilled,
    }
}
