pub mod test_config;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::Environment;
use crate::types::Coord;
use crate::world::{TrapSpec, World};

/// World starting top-left with the goal bottom-right
pub(crate) fn make_world(size: usize, traps: Option<&TrapSpec>) -> World {
    let mut rng = StdRng::seed_from_u64(42);
    World::new(size, Coord::new(0, 0), None, traps, &mut rng).unwrap()
}

pub(crate) fn make_env(size: usize, traps: Option<&TrapSpec>, max_steps: usize) -> Environment {
    Environment::new(make_world(size, traps), max_steps).unwrap()
}
