#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest-path search over the snake's square board.
//!
//! The search knows nothing about snakes or targets: callers hand it a start
//! cell, a goal cell and the world's legality predicate. All moves cost one
//! step, so a FIFO frontier yields shortest paths without any priority queue.

use std::collections::VecDeque;

use pathsnake_core::{CellCoord, Direction};

/// Finds a shortest path from `start` to `goal` on a `grid_size` square board.
///
/// The returned cells run from the first step after `start` up to and
/// including `goal`. An empty path means `start == goal`; `None` means the
/// goal cannot be reached through cells accepted by `is_legal`.
///
/// `start` itself is never tested against `is_legal`, since it is normally
/// the snake head and therefore occupied. Neighbours are expanded in
/// [`Direction::ALL`] order, which fixes the choice between equally short
/// paths.
pub fn find_path<F>(
    grid_size: u32,
    start: CellCoord,
    goal: CellCoord,
    mut is_legal: F,
) -> Option<Vec<CellCoord>>
where
    F: FnMut(CellCoord) -> bool,
{
    if start == goal {
        return Some(Vec::new());
    }

    let width = usize::try_from(grid_size).ok()?;
    let cell_count = width.checked_mul(width)?;
    let start_index = index(width, start)?;

    let mut visited = vec![false; cell_count];
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut frontier: VecDeque<usize> = VecDeque::new();

    visited[start_index] = true;
    nodes.push(SearchNode {
        cell: start,
        parent: None,
    });
    frontier.push_back(0);

    while let Some(current) = frontier.pop_front() {
        let cell = nodes[current].cell;

        for direction in Direction::ALL {
            let Some(neighbor) = cell.neighbor(direction) else {
                continue;
            };
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };
            if visited[neighbor_index] || !is_legal(neighbor) {
                continue;
            }

            visited[neighbor_index] = true;
            nodes.push(SearchNode {
                cell: neighbor,
                parent: Some(current),
            });
            let discovered = nodes.len() - 1;

            if neighbor == goal {
                return Some(reconstruct(&nodes, discovered));
            }

            frontier.push_back(discovered);
        }
    }

    None
}

/// Checks that `path` is a contiguous walk of legal cells leaving `start`.
///
/// Every consecutive pair must be orthogonally adjacent, the first cell must
/// neighbour `start`, and no cell may repeat or fail `is_legal`.
#[must_use]
pub fn path_is_well_formed<F>(start: CellCoord, path: &[CellCoord], mut is_legal: F) -> bool
where
    F: FnMut(CellCoord) -> bool,
{
    let mut previous = start;
    let mut seen = Vec::with_capacity(path.len());

    for &cell in path {
        if Direction::between(previous, cell).is_none() {
            return false;
        }
        if !is_legal(cell) || seen.contains(&cell) {
            return false;
        }
        seen.push(cell);
        previous = cell;
    }

    true
}

/// Arena entry linking a discovered cell to the node that discovered it.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    cell: CellCoord,
    parent: Option<usize>,
}

fn reconstruct(nodes: &[SearchNode], from: usize) -> Vec<CellCoord> {
    let mut path = Vec::new();
    let mut cursor = Some(from);

    while let Some(position) = cursor {
        let node = nodes[position];
        // The root is the start cell, which the path excludes.
        if node.parent.is_none() {
            break;
        }
        path.push(node.cell);
        cursor = node.parent;
    }

    path.reverse();
    path
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    if column >= width || row >= width {
        return None;
    }
    row.checked_mul(width)?.checked_add(column)
}
