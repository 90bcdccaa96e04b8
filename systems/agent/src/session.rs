//! Single-owner bundle of a world and the agent that drives it.

use pathsnake_core::{CellCoord, Command, ConfigError, Event, GameConfig, TickOutcome};
use pathsnake_world::{self as world, query, World};

use crate::{Agent, AgentError, AgentStats};

/// A running game: the authoritative world plus its path-following agent.
///
/// Presentation layers call [`Session::tick`] once per timer tick and read the
/// board back through the query methods. Calls must not overlap; the session
/// is a plain value and holds no locks.
#[derive(Clone, Debug)]
pub struct Session {
    world: World,
    agent: Agent,
    events: Vec<Event>,
}

impl Session {
    /// Builds the world described by `config` and an agent using its fallback.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] raised while building the world.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            world: World::new(config)?,
            agent: Agent::new(config.fallback),
            events: Vec::new(),
        })
    }

    /// Advances the game by one tick.
    ///
    /// Events from the previous tick are discarded first; read the new ones
    /// through [`Session::events`].
    ///
    /// # Errors
    ///
    /// Propagates [`AgentError`] invariant violations.
    pub fn tick(&mut self) -> Result<TickOutcome, AgentError> {
        self.events.clear();
        self.agent.tick(&mut self.world, &mut self.events)
    }

    /// Moves the target to `cell`, returning whether the world accepted it.
    ///
    /// An accepted move makes the agent re-plan on its next tick.
    pub fn relocate_target(&mut self, cell: CellCoord) -> bool {
        let before = self.events.len();
        world::apply(
            &mut self.world,
            Command::RelocateTarget { cell },
            &mut self.events,
        );
        let accepted = self.events[before..]
            .iter()
            .any(|event| matches!(event, Event::TargetRelocated { .. }));
        if accepted {
            self.agent.invalidate();
        }
        accepted
    }

    /// Snake body ordered from head to tail.
    #[must_use]
    pub fn snake_cells(&self) -> Vec<CellCoord> {
        query::snake_cells(&self.world)
    }

    /// Cell the snake is heading for.
    #[must_use]
    pub fn target_cell(&self) -> CellCoord {
        query::target_cell(&self.world)
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        query::is_over(&self.world)
    }

    /// Edge length of the square board.
    #[must_use]
    pub fn grid_size(&self) -> u32 {
        query::grid_size(&self.world)
    }

    /// Cells the agent still intends to visit, nearest first.
    #[must_use]
    pub fn planned_path(&self) -> Vec<CellCoord> {
        self.agent.planned_path().collect()
    }

    /// Events produced since the last tick began.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Counters accumulated by the agent.
    #[must_use]
    pub fn stats(&self) -> AgentStats {
        self.agent.stats()
    }

    /// Read-only access to the underlying world for richer queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }
}
