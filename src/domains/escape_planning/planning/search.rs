use super::goal::{manhattan_distance, GoalOracle};
use super::movement::MovementModel;
use super::pursuit::{react_to_move, PursuitPolicy, ReactionOutcome};
use crate::common::{DomainError, DomainResult};
use crate::domains::escape_planning::aggregate::{Grid, JointState, Move, Position, SimulationStep};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, info};

pub const MISSING_ACTORS: &str = "Please set both a prisoner and a guard.";
pub const NO_EXIT: &str = "No exit found on the grid.";

/// How the search estimates the remaining distance to an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicMode {
    /// Distance to the exit nearest the evader's start, fixed for the whole search.
    #[default]
    StartNearestExit,
    /// Distance to whichever exit is nearest the evaluated cell.
    AllExits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    pub heuristic: HeuristicMode,
    pub guard_moves_per_turn: u32,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            heuristic: HeuristicMode::StartNearestExit,
            guard_moves_per_turn: 2,
        }
    }
}

/// A capture-free escape: the evader's moves and the materialized trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscapePlan {
    pub moves: Vec<Move>,
    pub steps: Vec<SimulationStep>,
    pub expanded_states: usize,
    pub target_exit: Position,
}

#[derive(Debug, Clone, Copy)]
struct NodeRecord {
    g: u32,
    f: u32,
    // discovery order; ties on f go to the earliest discovered state
    seq: u64,
    parent: Option<(JointState, Move)>,
}

/// A* over (evader, guard) pairs. The guard's reactions are part of each edge.
pub struct JointStateSearch<'a> {
    movement: MovementModel<'a>,
    oracle: GoalOracle<'a>,
    policy: &'a dyn PursuitPolicy,
    options: PlannerOptions,
}

impl<'a> JointStateSearch<'a> {
    pub fn new(grid: &'a Grid, policy: &'a dyn PursuitPolicy, options: PlannerOptions) -> Self {
        Self {
            movement: MovementModel::new(grid),
            oracle: GoalOracle::new(grid),
            policy,
            options,
        }
    }

    /// Plan from the evader and guard cells recorded on the grid.
    pub fn solve(&self) -> DomainResult<EscapePlan> {
        let grid = self.movement.grid();
        match (grid.evader(), grid.guard()) {
            (Some(evader), Some(guard)) => self.search_from(evader, guard),
            _ => Err(DomainError::Configuration { reason: MISSING_ACTORS.to_string() }),
        }
    }

    pub fn search_from(&self, evader: Position, guard: Position) -> DomainResult<EscapePlan> {
        let grid = self.movement.grid();
        if !grid.contains(evader) || !grid.contains(guard) {
            return Err(DomainError::Configuration {
                reason: format!("Start positions {} / {} are outside the grid", evader, guard),
            });
        }
        let target_exit = self
            .oracle
            .find_nearest_exit(evader)
            .ok_or_else(|| DomainError::Configuration { reason: NO_EXIT.to_string() })?;

        info!(%evader, %guard, %target_exit, "starting joint-state search");

        let start = JointState::new(evader, guard);
        let mut nodes: HashMap<JointState, NodeRecord> = HashMap::new();
        let mut closed: HashSet<JointState> = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut next_seq: u64 = 0;

        let start_f = self.heuristic(evader, target_exit);
        nodes.insert(start, NodeRecord { g: 0, f: start_f, seq: next_seq, parent: None });
        open.push(Reverse((start_f, next_seq, start)));
        next_seq += 1;

        while let Some(Reverse((f, _, current))) = open.pop() {
            if closed.contains(&current) {
                continue;
            }
            let record = nodes[&current];
            if record.f != f {
                // superseded by a cheaper path pushed later
                continue;
            }

            if self.oracle.is_exit(current.evader) {
                let moves = reconstruct_moves(&nodes, current);
                let steps = self.replay(evader, guard, &moves)?;
                info!(moves = moves.len(), expanded = closed.len(), "escape found");
                return Ok(EscapePlan {
                    moves,
                    steps,
                    expanded_states: closed.len(),
                    target_exit,
                });
            }

            closed.insert(current);

            for dir in Move::ALL {
                let Some(next) = self.successor(current, dir) else {
                    continue;
                };
                if closed.contains(&next) {
                    continue;
                }
                let tentative = record.g + 1;
                let next_f = tentative + self.heuristic(next.evader, target_exit);
                match nodes.get_mut(&next) {
                    None => {
                        nodes.insert(
                            next,
                            NodeRecord { g: tentative, f: next_f, seq: next_seq, parent: Some((current, dir)) },
                        );
                        open.push(Reverse((next_f, next_seq, next)));
                        next_seq += 1;
                    }
                    Some(existing) if tentative < existing.g => {
                        existing.g = tentative;
                        existing.f = next_f;
                        existing.parent = Some((current, dir));
                        open.push(Reverse((next_f, existing.seq, next)));
                    }
                    Some(_) => {}
                }
            }
        }

        debug!(expanded = closed.len(), "open set exhausted");
        Err(DomainError::SearchExhausted { explored: closed.len() })
    }

    /// Materialize the trajectory of `moves` from the given start, step 0 included.
    ///
    /// Uses exactly the transition the search expands, so a plan produced by
    /// this search always replays; anything else is reported as an invalid command.
    pub fn replay(&self, evader: Position, guard: Position, moves: &[Move]) -> DomainResult<Vec<SimulationStep>> {
        let mut state = JointState::new(evader, guard);
        let mut steps = Vec::with_capacity(moves.len() + 1);
        steps.push(SimulationStep::from(state));
        for (i, dir) in moves.iter().enumerate() {
            let evader = self.movement.move_pos(state.evader, *dir).ok_or_else(|| DomainError::InvalidCommand {
                reason: format!("Move {} ({}) from {} is blocked", i + 1, dir, state.evader),
            })?;
            match react_to_move(self.policy, &self.movement, state.guard, evader, self.options.guard_moves_per_turn) {
                ReactionOutcome::Evaded(guard) => state = JointState::new(evader, guard),
                ReactionOutcome::Captured => {
                    return Err(DomainError::InvalidCommand {
                        reason: format!("Evader is captured at {} on move {}", evader, i + 1),
                    })
                }
            }
            steps.push(SimulationStep::from(state));
        }
        Ok(steps)
    }

    fn successor(&self, state: JointState, dir: Move) -> Option<JointState> {
        let evader = self.movement.move_pos(state.evader, dir)?;
        match react_to_move(self.policy, &self.movement, state.guard, evader, self.options.guard_moves_per_turn) {
            ReactionOutcome::Evaded(guard) => Some(JointState::new(evader, guard)),
            ReactionOutcome::Captured => None,
        }
    }

    fn heuristic(&self, evader: Position, target_exit: Position) -> u32 {
        match self.options.heuristic {
            HeuristicMode::StartNearestExit => manhattan_distance(evader, target_exit),
            HeuristicMode::AllExits => self.oracle.distance_to_nearest_exit(evader).unwrap_or(0),
        }
    }
}

fn reconstruct_moves(nodes: &HashMap<JointState, NodeRecord>, goal: JointState) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut current = goal;
    while let Some((parent, dir)) = nodes.get(&current).and_then(|r| r.parent) {
        moves.push(dir);
        current = parent;
    }
    moves.reverse();
    moves
}
