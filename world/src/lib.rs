#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for pathsnake.
//!
//! The world owns the snake body, the target, the board bounds and the
//! terminal flag. Every mutation flows through [`apply`] or [`step`]; both
//! consult the same legality predicate ([`query::is_legal`]) that the
//! pathfinder uses, so a planned path is always steppable.

use std::collections::VecDeque;

use log::{debug, info, warn};
use pathsnake_core::{
    CellCoord, Command, ConfigError, Direction, Event, GameConfig, GameOverReason, StepResult,
};
use rand::{seq::IteratorRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Represents the authoritative pathsnake world state.
#[derive(Clone, Debug)]
pub struct World {
    grid_size: u32,
    snake: VecDeque<CellCoord>,
    occupancy: OccupancyGrid,
    target: CellCoord,
    over: Option<GameOverReason>,
    rng: ChaCha8Rng,
    steps_taken: u64,
    targets_reached: u32,
}

impl World {
    /// Creates a world from a validated configuration.
    ///
    /// When the configuration leaves the target unset it is placed at a free
    /// cell drawn from the seeded generator.
    ///
    /// # Errors
    ///
    /// Propagates the [`ConfigError`] reported by [`GameConfig::validate`].
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake: VecDeque<CellCoord> = config.snake.iter().copied().collect();
        let mut occupancy = OccupancyGrid::new(config.grid_size);
        for &cell in &snake {
            occupancy.occupy(cell);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let target = match config.target {
            Some(cell) => cell,
            None => occupancy
                .random_free_cell(&mut rng)
                .ok_or(ConfigError::NoRoomForTarget {
                    size: config.grid_size,
                })?,
        };

        debug!(
            "world created: {0}x{0} board, snake head {1:?}, target {target:?}",
            config.grid_size, snake[0]
        );

        Ok(Self {
            grid_size: config.grid_size,
            snake,
            occupancy,
            target,
            over: None,
            rng,
            steps_taken: 0,
            targets_reached: 0,
        })
    }

    fn head(&self) -> CellCoord {
        // The body is never empty: it starts from a validated config and a
        // step only removes the tail after pushing a new head.
        self.snake[0]
    }

    fn finish(&mut self, reason: GameOverReason, out_events: &mut Vec<Event>) {
        self.over = Some(reason);
        out_events.push(Event::GameOver { reason });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StepSnake { direction } => {
            let _ = step(world, direction, out_events);
        }
        Command::RelocateTarget { cell } => relocate_target(world, cell, out_events),
    }
}

/// Advances the snake one cell in `direction`.
///
/// An illegal destination ends the game and leaves the body untouched.
/// Landing on the target grows the snake by one and places a new target on a
/// free cell; if none remains the game ends with
/// [`GameOverReason::BoardFilled`].
pub fn step(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) -> StepResult {
    if world.over.is_some() {
        return StepResult::Frozen;
    }

    let from = world.head();
    let candidate = from.neighbor(direction);
    let Some(to) = candidate.filter(|cell| query::is_legal(world, *cell)) else {
        info!("snake collided moving {direction:?} from {from:?}");
        world.finish(GameOverReason::Collision, out_events);
        return StepResult::Collided { cell: candidate };
    };

    let reached_target = to == world.target;

    world.snake.push_front(to);
    world.occupancy.occupy(to);
    if !reached_target {
        if let Some(tail) = world.snake.pop_back() {
            world.occupancy.vacate(tail);
        }
    }
    world.steps_taken = world.steps_taken.saturating_add(1);
    out_events.push(Event::SnakeAdvanced { from, to });

    if !reached_target {
        return StepResult::Moved;
    }

    world.targets_reached = world.targets_reached.saturating_add(1);
    out_events.push(Event::TargetReached { cell: to });
    info!(
        "target {to:?} reached; snake length is now {}",
        world.snake.len()
    );

    match world.occupancy.random_free_cell(&mut world.rng) {
        Some(cell) => {
            world.target = cell;
            out_events.push(Event::TargetRelocated { cell });
            StepResult::TargetReached
        }
        None => {
            warn!("snake fills the whole board; no cell left for a target");
            world.finish(GameOverReason::BoardFilled, out_events);
            StepResult::BoardFilled
        }
    }
}

fn relocate_target(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) {
    if world.over.is_some() || !query::is_legal(world, cell) {
        warn!("rejected target relocation to {cell:?}");
        out_events.push(Event::TargetRelocationRejected { cell });
        return;
    }

    world.target = cell;
    out_events.push(Event::TargetRelocated { cell });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pathsnake_core::{CellCoord, GameOverReason};

    use super::World;

    /// Reports whether the snake head may enter `cell`.
    ///
    /// A cell is legal when it lies on the board and no snake segment covers
    /// it. Stepping and path planning both use this predicate.
    #[must_use]
    pub fn is_legal(world: &World, cell: CellCoord) -> bool {
        world.occupancy.is_free(cell)
    }

    /// Snake body ordered from head to tail.
    #[must_use]
    pub fn snake_cells(world: &World) -> Vec<CellCoord> {
        world.snake.iter().copied().collect()
    }

    /// Cell currently occupied by the snake head.
    #[must_use]
    pub fn head(world: &World) -> CellCoord {
        world.head()
    }

    /// Number of cells covered by the snake.
    #[must_use]
    pub fn snake_len(world: &World) -> usize {
        world.snake.len()
    }

    /// Cell the snake is heading for.
    #[must_use]
    pub fn target_cell(world: &World) -> CellCoord {
        world.target
    }

    /// Whether the world stopped accepting moves.
    #[must_use]
    pub fn is_over(world: &World) -> bool {
        world.over.is_some()
    }

    /// Why the world stopped, if it did.
    #[must_use]
    pub fn game_over_reason(world: &World) -> Option<GameOverReason> {
        world.over
    }

    /// Edge length of the square board measured in cells.
    #[must_use]
    pub fn grid_size(world: &World) -> u32 {
        world.grid_size
    }

    /// Number of cells not covered by the snake.
    #[must_use]
    pub fn free_cell_count(world: &World) -> usize {
        world.occupancy.free_count()
    }

    /// Number of successful steps since the world was created.
    #[must_use]
    pub fn steps_taken(world: &World) -> u64 {
        world.steps_taken
    }

    /// Number of targets consumed since the world was created.
    #[must_use]
    pub fn targets_reached(world: &World) -> u32 {
        world.targets_reached
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    size: u32,
    cells: Vec<bool>,
    occupied: usize,
}

impl OccupancyGrid {
    fn new(size: u32) -> Self {
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            size,
            cells: vec![false; capacity],
            occupied: 0,
        }
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .map_or(false, |taken| !taken)
    }

    fn occupy(&mut self, cell: CellCoord) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            if !*slot {
                *slot = true;
                self.occupied += 1;
            }
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            if *slot {
                *slot = false;
                self.occupied -= 1;
            }
        }
    }

    fn free_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    /// Uniform draw over the free cells; `None` once the board is full.
    fn random_free_cell(&self, rng: &mut ChaCha8Rng) -> Option<CellCoord> {
        if self.free_count() == 0 {
            return None;
        }

        let size = self.size;
        (0..size)
            .flat_map(|row| (0..size).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| self.is_free(*cell))
            .choose(rng)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.size && cell.row() < self.size {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
