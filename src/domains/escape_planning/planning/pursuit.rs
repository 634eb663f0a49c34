use super::movement::MovementModel;
use crate::domains::escape_planning::aggregate::{Move, Position};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// One reaction step of the guard toward a target cell.
///
/// Implementations must be pure and deterministic: the search replays them
/// while expanding states and again when materializing the found plan.
pub trait PursuitPolicy: Send + Sync {
    fn react(&self, movement: &MovementModel<'_>, guard: Position, target: Position) -> Position;
}

/// Greedy chase: close the horizontal gap first, fall through to the vertical
/// gap when horizontal is aligned or blocked, otherwise stay put.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPursuit;

impl PursuitPolicy for GreedyPursuit {
    fn react(&self, movement: &MovementModel<'_>, guard: Position, target: Position) -> Position {
        let horizontal = if guard.x < target.x {
            Some(Move::Right)
        } else if guard.x > target.x {
            Some(Move::Left)
        } else {
            None
        };
        if let Some(next) = horizontal.and_then(|dir| movement.move_pos(guard, dir)) {
            return next;
        }

        let vertical = if guard.y < target.y {
            Some(Move::Down)
        } else if guard.y > target.y {
            Some(Move::Up)
        } else {
            None
        };
        vertical
            .and_then(|dir| movement.move_pos(guard, dir))
            .unwrap_or(guard)
    }
}

/// Wall-aware chase: take the first step of a breadth-first shortest path to
/// the target. Stays put when the target is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathPursuit;

impl PursuitPolicy for ShortestPathPursuit {
    fn react(&self, movement: &MovementModel<'_>, guard: Position, target: Position) -> Position {
        if guard == target {
            return guard;
        }
        // first step taken from the guard to reach each visited cell
        let mut first_step: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::from([guard]);
        first_step.insert(guard, guard);

        while let Some(cell) = queue.pop_front() {
            for dir in Move::ALL {
                let Some(next) = movement.move_pos(cell, dir) else {
                    continue;
                };
                if first_step.contains_key(&next) {
                    continue;
                }
                let step = if cell == guard { next } else { first_step[&cell] };
                if next == target {
                    return step;
                }
                first_step.insert(next, step);
                queue.push_back(next);
            }
        }
        guard
    }
}

/// Configurable selection of the guard's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuitKind {
    #[default]
    Greedy,
    ShortestPath,
}

impl PursuitKind {
    pub fn policy(self) -> Box<dyn PursuitPolicy> {
        match self {
            PursuitKind::Greedy => Box::new(GreedyPursuit),
            PursuitKind::ShortestPath => Box::new(ShortestPathPursuit),
        }
    }
}

/// Result of letting the guard react to one evader move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Evaded(Position),
    Captured,
}

/// Run `reactions` guard steps against the evader's new position, checking
/// for capture after every single step.
pub fn react_to_move(
    policy: &dyn PursuitPolicy,
    movement: &MovementModel<'_>,
    guard: Position,
    evader: Position,
    reactions: u32,
) -> ReactionOutcome {
    let mut guard = guard;
    for _ in 0..reactions {
        guard = policy.react(movement, guard, evader);
        if guard == evader {
            return ReactionOutcome::Captured;
        }
    }
    ReactionOutcome::Evaded(guard)
}
