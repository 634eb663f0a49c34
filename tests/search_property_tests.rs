use prison_escape::common::DomainError;
use prison_escape::domains::escape_planning::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};

fn random_position(rng: &mut StdRng, width: u32, height: u32) -> Position {
    Position::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

fn random_grid(rng: &mut StdRng, exit_count: usize) -> Grid {
    let width = rng.gen_range(2..=5);
    let height = rng.gen_range(2..=5);
    let mut grid = Grid::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            for side in [Move::Right, Move::Down] {
                if rng.gen_bool(0.25) {
                    grid.set_wall(Position::new(x, y), side, true).unwrap();
                }
            }
        }
    }

    let mut taken = HashSet::new();
    let mut pick = |rng: &mut StdRng| loop {
        let pos = random_position(rng, width, height);
        if taken.insert(pos) {
            return pos;
        }
    };
    let evader = pick(rng);
    let guard = pick(rng);
    let exits: Vec<Position> = (0..exit_count.min((width * height) as usize - 2)).map(|_| pick(rng)).collect();

    for exit in exits {
        grid.assign_role(exit, CellRole::Exit).unwrap();
    }
    grid.assign_role(evader, CellRole::Evader).unwrap();
    grid.assign_role(guard, CellRole::Pursuer).unwrap();
    grid
}

/// Breadth-first search over joint states with the same transition rules.
fn brute_force_min_moves(grid: &Grid, reactions: u32) -> Option<usize> {
    let movement = MovementModel::new(grid);
    let start = JointState::new(grid.evader()?, grid.guard()?);
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((state, depth)) = queue.pop_front() {
        if grid.is_exit(state.evader) {
            return Some(depth);
        }
        for dir in Move::ALL {
            let Some(evader) = movement.move_pos(state.evader, dir) else {
                continue;
            };
            if let ReactionOutcome::Evaded(guard) =
                react_to_move(&GreedyPursuit, &movement, state.guard, evader, reactions)
            {
                let next = JointState::new(evader, guard);
                if seen.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
    }
    None
}

fn check_plan(grid: &Grid, plan: &EscapePlan, options: PlannerOptions) {
    let search = JointStateSearch::new(grid, &GreedyPursuit, options);
    let start = plan.steps[0];
    assert_eq!(start.evader, grid.evader().unwrap());
    assert_eq!(start.guard, grid.guard().unwrap());
    assert_eq!(plan.steps.len(), plan.moves.len() + 1);

    // replaying the moves reproduces the trajectory element for element
    let replayed = search.replay(start.evader, start.guard, &plan.moves).unwrap();
    assert_eq!(replayed, plan.steps);

    let movement = MovementModel::new(grid);
    for (i, pair) in plan.steps.windows(2).enumerate() {
        assert_eq!(movement.move_pos(pair[0].evader, plan.moves[i]), Some(pair[1].evader));
        assert_ne!(pair[1].guard, pair[1].evader);
    }

    assert!(grid.is_exit(plan.steps.last().unwrap().evader));
    assert!(plan.steps[..plan.steps.len() - 1].iter().all(|s| !grid.is_exit(s.evader)));
}

#[test]
fn test_single_exit_plans_are_minimal_and_replayable() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let options = PlannerOptions::default();
    let mut solved = 0;

    for _ in 0..300 {
        let grid = random_grid(&mut rng, 1);
        let expected = brute_force_min_moves(&grid, options.guard_moves_per_turn);
        let result = JointStateSearch::new(&grid, &GreedyPursuit, options).solve();

        match (expected, result) {
            (Some(min_moves), Ok(plan)) => {
                assert_eq!(plan.moves.len(), min_moves);
                check_plan(&grid, &plan, options);
                solved += 1;
            }
            (None, Err(DomainError::SearchExhausted { .. })) => {}
            (expected, result) => panic!("Mismatch: brute force {:?}, search {:?}", expected, result),
        }
    }
    assert!(solved > 0);
}

#[test]
fn test_all_exits_heuristic_stays_minimal_with_many_exits() {
    let mut rng = StdRng::seed_from_u64(42);
    let options = PlannerOptions { heuristic: HeuristicMode::AllExits, ..PlannerOptions::default() };

    for _ in 0..300 {
        let grid = random_grid(&mut rng, 3);
        let expected = brute_force_min_moves(&grid, options.guard_moves_per_turn);
        let result = JointStateSearch::new(&grid, &GreedyPursuit, options).solve();

        match (expected, result) {
            (Some(min_moves), Ok(plan)) => {
                assert_eq!(plan.moves.len(), min_moves);
                check_plan(&grid, &plan, options);
            }
            (None, Err(DomainError::SearchExhausted { .. })) => {}
            (expected, result) => panic!("Mismatch: brute force {:?}, search {:?}", expected, result),
        }
    }
}

#[test]
fn test_heuristic_never_overestimates_remaining_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let options = PlannerOptions::default();

    for _ in 0..200 {
        let grid = random_grid(&mut rng, 1);
        if let Ok(plan) = JointStateSearch::new(&grid, &GreedyPursuit, options).solve() {
            let remaining = plan.moves.len();
            for (i, step) in plan.steps.iter().enumerate() {
                assert!(manhattan_distance(step.evader, plan.target_exit) as usize <= remaining - i);
            }
        }
    }
}

#[test]
fn test_start_nearest_exit_mode_still_reaches_an_exit_with_many_exits() {
    let mut rng = StdRng::seed_from_u64(99);
    let options = PlannerOptions::default();

    for _ in 0..200 {
        let grid = random_grid(&mut rng, 3);
        let reachable = brute_force_min_moves(&grid, options.guard_moves_per_turn);
        let result = JointStateSearch::new(&grid, &GreedyPursuit, options).solve();
        match (reachable, result) {
            (Some(min_moves), Ok(plan)) => {
                assert!(plan.moves.len() >= min_moves);
                check_plan(&grid, &plan, options);
            }
            (None, Err(DomainError::SearchExhausted { .. })) => {}
            (reachable, result) => panic!("Mismatch: brute force {:?}, search {:?}", reachable, result),
        }
    }
}
