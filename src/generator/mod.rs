use crate::*;
pub use random::*;

mod random;

/// Strategy producing the secret path of a new game. Consumes itself so one
/// generator maps to exactly one path, replaying means building it again.
pub trait PathGenerator {
    fn generate(self, config: GameConfig) -> Result<Path>;
}
