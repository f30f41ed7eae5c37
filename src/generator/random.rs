use alloc::vec::Vec;
use hashbrown::HashSet;
use smallvec::SmallVec;

use super::*;

/// Step budget shared by every restart of one generation run. Walks that
/// exhaust it are asking for a length the grid cannot host.
pub const DEFAULT_STEP_BUDGET: u32 = 10_000;

/// Generation strategy that grows the path one adjacent unvisited cell at a
/// time and restarts from a fresh random cell whenever it runs out of moves.
/// One seed always yields the same path for the same config.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomWalkGenerator {
    seed: u64,
    step_budget: u32,
}

impl RandomWalkGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_step_budget(seed, DEFAULT_STEP_BUDGET)
    }

    pub fn with_step_budget(seed: u64, step_budget: u32) -> Self {
        Self { seed, step_budget }
    }
}

impl PathGenerator for RandomWalkGenerator {
    fn generate(self, config: GameConfig) -> Result<Path> {
        use rand::prelude::*;

        if config.path_len > config.total_cells() {
            log::warn!(
                "Cannot fit path, requested {} cells but the grid only has {}",
                config.path_len,
                config.total_cells()
            );
            return Err(GameError::UnreachableLength);
        }

        let target = usize::from(config.path_len);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cells: Vec<Cell> = Vec::with_capacity(target);
        let mut visited: HashSet<Cell> = HashSet::with_capacity(target);
        let mut steps: u32 = 0;

        while cells.len() < target {
            if steps >= self.step_budget {
                log::warn!("Gave up on a {}-cell path after {} steps", target, steps);
                return Err(GameError::UnreachableLength);
            }
            steps += 1;

            let Some(&tip) = cells.last() else {
                let start = Cell::new(
                    rng.random_range(0..config.height),
                    rng.random_range(0..config.width),
                );
                visited.insert(start);
                cells.push(start);
                continue;
            };

            let candidates: SmallVec<[Cell; Topology::MAX_NEIGHBORS]> = config
                .topology
                .neighbors(tip, config.width, config.height)
                .filter(|cell| !visited.contains(cell))
                .collect();

            if candidates.is_empty() {
                // Walked into a dead end, throw the walk away and restart.
                log::debug!("dead end after {} cells, restarting walk", cells.len());
                cells.clear();
                visited.clear();
                continue;
            }

            let next = candidates[rng.random_range(0..candidates.len())];
            visited.insert(next);
            cells.push(next);
        }

        Ok(Path { cells })
    }
}
