//! A* pathfinding over the implicit hex adjacency graph
//!
//! Obstacles come from the caller as a passability predicate; the search
//! itself holds no grid state. `cube_distance` is the heuristic: it never
//! overestimates the remaining steps, so with the default unit step cost
//! the returned path is optimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use ordered_float::NotNan;

use super::cell::HexCell;
use super::config::GridConfig;
use super::coords::CubeCoord;
use super::neighbors::{cube_distance, neighbors};

/// A route from start to goal inclusive, with its total step cost.
#[derive(Debug, Clone)]
pub struct Path {
    pub cells: Vec<HexCell>,
    pub cost: f64,
}

impl Path {
    /// Number of steps taken (one less than the number of cells).
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Outcome of a path query. An unreachable goal is an ordinary result of
/// obstacle placement, never an error.
#[derive(Debug, Clone)]
pub enum PathResult {
    Found(Path),
    Unreachable,
    /// The search budget ran out before the goal was settled.
    BudgetExhausted,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, PathResult::Unreachable)
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            PathResult::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Optional bounds on search work, checked once per open-set pop so an
/// interactive caller can cap worst-case latency on unbounded grids.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    pub max_expansions: Option<usize>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max: usize) -> Self {
        Self {
            max_expansions: Some(max),
            cancel: None,
        }
    }
}

struct Node {
    cube: CubeCoord,
    f: NotNan<f64>,
    /// Insertion sequence number. Equal-f ties pop earliest-discovered
    /// first, keeping results byte-for-byte reproducible across platforms.
    seq: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the lowest f (then the
        // earliest insertion) pops first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path with unit step cost and no search budget.
pub fn find_path(
    start: CubeCoord,
    goal: CubeCoord,
    config: &GridConfig,
    passable: impl Fn(CubeCoord) -> bool,
) -> PathResult {
    find_path_weighted(
        start,
        goal,
        config,
        passable,
        |_, _| 1.0,
        &SearchBudget::unlimited(),
    )
}

/// Shortest path with a caller-supplied step cost and search budget.
///
/// The heuristic assumes step costs of at least 1; cheaper edges still
/// find a path but may lose strict optimality. A non-finite step cost
/// closes the edge. Whether an impassable start or goal makes sense is
/// the caller's call: the search never rejects either outright, so
/// pathing out of (or into) a temporarily blocked cell works.
pub fn find_path_weighted(
    start: CubeCoord,
    goal: CubeCoord,
    config: &GridConfig,
    passable: impl Fn(CubeCoord) -> bool,
    step_cost: impl Fn(CubeCoord, CubeCoord) -> f64,
    budget: &SearchBudget,
) -> PathResult {
    // Ingestion boundary: caller-built triples may violate the zero-sum
    // invariant; a skewed s would corrupt the heuristic.
    let start = start.normalized();
    let goal = goal.normalized();

    if start == goal {
        return PathResult::Found(Path {
            cells: vec![HexCell::from_cube(start, config)],
            cost: 0.0,
        });
    }

    // A goal with all six neighbors blocked can only be entered from an
    // adjacent start. Detecting it up front matters on an unbounded grid,
    // where the frontier would otherwise grow forever; any larger
    // disconnected region needs a search budget to bound the walk.
    if cube_distance(start, goal) > 1 && neighbors(goal).iter().all(|n| !passable(*n)) {
        tracing::debug!(?start, ?goal, "goal ring fully blocked");
        return PathResult::Unreachable;
    }

    let mut open = BinaryHeap::new();
    let mut came_from: AHashMap<CubeCoord, CubeCoord> = AHashMap::new();
    let mut g_score: AHashMap<CubeCoord, f64> = AHashMap::new();
    let mut closed: AHashSet<CubeCoord> = AHashSet::new();
    let mut seq: u64 = 0;
    let mut expansions: usize = 0;

    g_score.insert(start, 0.0);
    if let Some(f) = heap_key(cube_distance(start, goal) as f64) {
        open.push(Node {
            cube: start,
            f,
            seq,
        });
    }

    while let Some(current) = open.pop() {
        if let Some(max) = budget.max_expansions {
            if expansions >= max {
                tracing::debug!(?start, ?goal, expansions, "search budget exhausted");
                return PathResult::BudgetExhausted;
            }
        }
        if let Some(flag) = &budget.cancel {
            if flag.load(AtomicOrdering::Relaxed) {
                tracing::debug!(?start, ?goal, expansions, "search cancelled");
                return PathResult::BudgetExhausted;
            }
        }
        expansions += 1;

        if current.cube == goal {
            return PathResult::Found(reconstruct(goal, &came_from, &g_score, config));
        }

        if !closed.insert(current.cube) {
            continue;
        }

        for neighbor in neighbors(current.cube) {
            if closed.contains(&neighbor) {
                continue;
            }
            // The goal itself is exempt from the passability filter.
            if neighbor != goal && !passable(neighbor) {
                continue;
            }
            let step = step_cost(current.cube, neighbor);
            if !step.is_finite() {
                continue;
            }

            let tentative = g_score.get(&current.cube).unwrap_or(&f64::INFINITY) + step;
            if tentative < *g_score.get(&neighbor).unwrap_or(&f64::INFINITY) {
                came_from.insert(neighbor, current.cube);
                g_score.insert(neighbor, tentative);
                let h = cube_distance(neighbor, goal) as f64;
                if let Some(f) = heap_key(tentative + h) {
                    seq += 1;
                    open.push(Node {
                        cube: neighbor,
                        f,
                        seq,
                    });
                }
            }
        }
    }

    tracing::debug!(?start, ?goal, expansions, "goal unreachable");
    PathResult::Unreachable
}

// Step costs are filtered for finiteness before keys are built, so this
// only rejects a NaN produced by a pathological cost function.
fn heap_key(f: f64) -> Option<NotNan<f64>> {
    NotNan::new(f).ok()
}

fn reconstruct(
    goal: CubeCoord,
    came_from: &AHashMap<CubeCoord, CubeCoord>,
    g_score: &AHashMap<CubeCoord, f64>,
    config: &GridConfig,
) -> Path {
    let mut cubes = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cubes.push(prev);
        current = prev;
    }
    cubes.reverse();

    Path {
        cells: cubes
            .into_iter()
            .map(|c| HexCell::from_cube(c, config))
            .collect(),
        cost: g_score.get(&goal).copied().unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    fn config() -> GridConfig {
        GridConfig::hex(true, false, 100.0).unwrap()
    }

    fn open_grid(_: CubeCoord) -> bool {
        true
    }

    #[test]
    fn test_same_cell_is_zero_cost() {
        let start = CubeCoord::new(3, -1);
        let path = find_path(start, start, &config(), open_grid)
            .into_path()
            .unwrap();
        assert_eq!(path.cells.len(), 1);
        assert_eq!(path.steps(), 0);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_open_grid_cost_equals_distance() {
        let start = CubeCoord::new(0, 0);
        let goal = CubeCoord::new(4, -2);
        let path = find_path(start, goal, &config(), open_grid)
            .into_path()
            .unwrap();
        assert_eq!(path.cost, cube_distance(start, goal) as f64);
        assert_eq!(path.cells.first().map(|c| c.cube), Some(start));
        assert_eq!(path.cells.last().map(|c| c.cube), Some(goal));
    }

    #[test]
    fn test_straight_line_path_is_deterministic() {
        let start = CubeCoord::new(0, 0);
        let goal = CubeCoord::from_qrs(2, 0, -2);
        let path = find_path(start, goal, &config(), open_grid)
            .into_path()
            .unwrap();
        let cubes: Vec<_> = path.cells.iter().map(|c| c.cube).collect();
        assert_eq!(
            cubes,
            vec![start, CubeCoord::from_qrs(1, 0, -1), goal]
        );
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn test_path_steps_are_adjacent() {
        let goal = CubeCoord::new(-3, 5);
        let path = find_path(CubeCoord::new(2, 2), goal, &config(), open_grid)
            .into_path()
            .unwrap();
        for pair in path.cells.windows(2) {
            assert_eq!(cube_distance(pair[0].cube, pair[1].cube), 1);
        }
    }

    #[test]
    fn test_detour_around_wall() {
        // Vertical wall at q == 1 with no gap near the route.
        let wall: AHashSet<CubeCoord> = (-4..=4).map(|r| CubeCoord::new(1, r)).collect();
        let start = CubeCoord::new(0, 0);
        let goal = CubeCoord::new(2, 0);
        let path = find_path(start, goal, &config(), |c| !wall.contains(&c))
            .into_path()
            .unwrap();
        assert!(path.cost > cube_distance(start, goal) as f64);
        for cell in &path.cells {
            assert!(!wall.contains(&cell.cube));
        }
    }

    #[test]
    fn test_surrounded_goal_is_unreachable() {
        let goal = CubeCoord::new(5, 5);
        let ring: AHashSet<CubeCoord> = neighbors(goal).into_iter().collect();
        let result = find_path(CubeCoord::new(0, 0), goal, &config(), |c| !ring.contains(&c));
        assert!(result.is_unreachable());
    }

    #[test]
    fn test_blocked_goal_is_still_reachable() {
        // A caller may path into a temporarily occupied cell.
        let goal = CubeCoord::new(3, 0);
        let result = find_path(CubeCoord::new(0, 0), goal, &config(), |c| c != goal);
        assert!(result.is_found());
    }

    #[test]
    fn test_malformed_endpoints_are_normalized() {
        // A stale s component must not skew the heuristic or the result.
        let bad_start = CubeCoord { q: 0, r: 0, s: 9 };
        let bad_goal = CubeCoord { q: 2, r: 0, s: 3 };
        let path = find_path(bad_start, bad_goal, &config(), open_grid)
            .into_path()
            .unwrap();
        assert_eq!(path.cost, 2.0);
        assert_eq!(path.cells.first().map(|c| c.cube), Some(CubeCoord::new(0, 0)));
        assert_eq!(path.cells.last().map(|c| c.cube), Some(CubeCoord::new(2, 0)));
        for cell in &path.cells {
            assert!(cell.cube.is_valid());
        }
    }

    #[test]
    fn test_budget_exhaustion() {
        let budget = SearchBudget::with_max_expansions(2);
        let result = find_path_weighted(
            CubeCoord::new(0, 0),
            CubeCoord::new(50, -25),
            &config(),
            open_grid,
            |_, _| 1.0,
            &budget,
        );
        assert!(matches!(result, PathResult::BudgetExhausted));
    }

    #[test]
    fn test_cancel_flag_stops_search() {
        let cancel = Arc::new(AtomicBool::new(true));
        let budget = SearchBudget {
            max_expansions: None,
            cancel: Some(cancel),
        };
        let result = find_path_weighted(
            CubeCoord::new(0, 0),
            CubeCoord::new(10, 0),
            &config(),
            open_grid,
            |_, _| 1.0,
            &budget,
        );
        assert!(matches!(result, PathResult::BudgetExhausted));
    }

    #[test]
    fn test_weighted_path_prefers_cheap_cells() {
        // Entering any cell with r != 0 costs 5, so the straight q-axis
        // route wins even though detours have equal step counts.
        let start = CubeCoord::new(0, 0);
        let goal = CubeCoord::new(4, 0);
        let path = find_path_weighted(
            start,
            goal,
            &config(),
            open_grid,
            |_, to| if to.r == 0 { 1.0 } else { 5.0 },
            &SearchBudget::unlimited(),
        )
        .into_path()
        .unwrap();
        assert_eq!(path.cost, 4.0);
        for cell in &path.cells {
            assert_eq!(cell.cube.r, 0);
        }
    }

    #[test]
    fn test_non_finite_step_cost_closes_edge() {
        let goal = CubeCoord::new(2, 0);
        let result = find_path_weighted(
            CubeCoord::new(0, 0),
            goal,
            &config(),
            open_grid,
            |_, _| f64::INFINITY,
            &SearchBudget::unlimited(),
        );
        assert!(result.is_unreachable());
    }
}
