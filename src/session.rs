//! Session state machine: configuration, reveal phase, player input and the
//! terminal states.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::*;

/// Pause between two consecutive highlights of the reveal animation.
pub const REVEAL_STEP_INTERVAL: Duration = Duration::from_millis(1000);

/// How long each highlighted cell stays lit.
pub const REVEAL_ACTIVE_DURATION: Duration = Duration::from_millis(500);

/// Valid transitions:
/// - Setup -> Revealing
/// - Revealing -> AwaitingInput
/// - AwaitingInput -> Won
/// - AwaitingInput -> Lost
/// - Won/Lost -> Revealing (play again)
/// - any -> Setup (reset)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// No game yet, configuration may still change.
    Setup,
    /// The secret path is being shown to the player.
    Revealing,
    /// The player is reproducing the path.
    AwaitingInput,
    /// Game ended and the player reproduced the whole path.
    Won,
    /// Game ended on a wrong guess.
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn accepts_guesses(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    /// A new game may start before the first one and after a finished one,
    /// never over a game in flight.
    pub const fn can_start(self) -> bool {
        matches!(self, Self::Setup | Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Setup
    }
}

/// One highlight of the reveal animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub cell: Cell,
    /// Offset from the start of the reveal at which the highlight turns on.
    /// It turns off [`REVEAL_ACTIVE_DURATION`] later.
    pub starts_at: Duration,
}

/// Timing schedule for replaying the secret path to the player. The session
/// keeps no clock of its own, callers drive their timers off this plan and
/// call [`GameSession::finish_reveal`] when the last highlight has faded.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPlan<'a> {
    cells: &'a [Cell],
}

impl<'a> RevealPlan<'a> {
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    pub fn steps(&self) -> impl Iterator<Item = RevealStep> + 'a {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| RevealStep {
                cell,
                starts_at: REVEAL_STEP_INTERVAL * (index as u32),
            })
    }

    pub fn step_count(&self) -> usize {
        self.cells.len()
    }

    /// Time from the first highlight turning on to the last one turning off.
    pub fn total_duration(&self) -> Duration {
        match self.cells.len() as u32 {
            0 => Duration::ZERO,
            n => REVEAL_STEP_INTERVAL * (n - 1) + REVEAL_ACTIVE_DURATION,
        }
    }
}

/// Represents a game session from setup to win or loss. Every fallible
/// operation leaves the session unchanged when it returns an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    path: Path,
    progress: CellCount,
    state: SessionState,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        let grid = Grid::build(config.width, config.height)?;
        Ok(Self {
            config,
            grid,
            path: Path::default(),
            progress: 0,
            state: Default::default(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Correct guesses so far in the current game.
    pub fn score(&self) -> CellCount {
        self.progress
    }

    /// The cells the player has correctly reproduced so far, always a
    /// prefix of the secret path.
    pub fn user_path(&self) -> &[Cell] {
        &self.path.cells()[..usize::from(self.progress)]
    }

    /// The secret path, exposed only while it is being shown to the player.
    pub fn path(&self) -> Option<&Path> {
        match self.state {
            SessionState::Revealing => Some(&self.path),
            _ => None,
        }
    }

    pub fn reveal_plan(&self) -> Option<RevealPlan<'_>> {
        self.path().map(|path| RevealPlan {
            cells: path.cells(),
        })
    }

    /// Replaces the configuration and rebuilds the grid to match. Only
    /// allowed during setup, the board of a running game never changes
    /// under the player.
    pub fn configure(&mut self, config: GameConfig) -> Result<()> {
        self.check_setup()?;
        let grid = Grid::build(config.width, config.height)?;
        self.config = config;
        self.grid = grid;
        Ok(())
    }

    /// Starts a new game and returns the reveal plan for the caller to
    /// animate. Allowed from setup and from the terminal states, a game in
    /// flight has to be [`reset`](Self::reset) first.
    pub fn start(&mut self, generator: impl PathGenerator) -> Result<RevealPlan<'_>> {
        self.check_can_start()?;
        let grid = Grid::build(self.config.width, self.config.height)?;
        let path = generator.generate(self.config)?;

        log::debug!("game started, {} cells to memorize", path.len());
        self.grid = grid;
        self.path = path;
        self.progress = 0;
        self.state = SessionState::Revealing;
        Ok(RevealPlan {
            cells: self.path.cells(),
        })
    }

    /// Ends the reveal phase and hands the board over to the player.
    pub fn finish_reveal(&mut self) -> Result<()> {
        self.check_revealing()?;
        self.state = SessionState::AwaitingInput;
        Ok(())
    }

    /// Submits one guessed cell. The next path cell advances the game and
    /// wins it on the final cell, anything else loses immediately.
    pub fn guess(&mut self, cell: Cell) -> Result<GuessOutcome> {
        let cell = self.grid.validate_cell(cell)?;
        self.check_awaiting_input()?;

        match self.path.get(usize::from(self.progress)) {
            Some(expected) if expected == cell => {
                self.progress += 1;
                if usize::from(self.progress) == self.path.len() {
                    log::debug!("path reproduced, session won");
                    self.state = SessionState::Won;
                    Ok(GuessOutcome::Won)
                } else {
                    Ok(GuessOutcome::Progress)
                }
            }
            _ => {
                log::debug!("wrong cell {:?}, session lost", cell);
                self.state = SessionState::Lost;
                Ok(GuessOutcome::Miss)
            }
        }
    }

    /// Abandons any game in flight and returns to setup, keeping the config
    /// and grid.
    pub fn reset(&mut self) {
        self.path = Path::default();
        self.progress = 0;
        self.state = SessionState::Setup;
    }

    fn check_setup(&self) -> Result<()> {
        match self.state {
            SessionState::Setup => Ok(()),
            _ => Err(GameError::InvalidTransition),
        }
    }

    fn check_can_start(&self) -> Result<()> {
        if self.state.can_start() {
            Ok(())
        } else {
            Err(GameError::InvalidTransition)
        }
    }

    fn check_revealing(&self) -> Result<()> {
        match self.state {
            SessionState::Revealing => Ok(()),
            _ => Err(GameError::InvalidTransition),
        }
    }

    fn check_awaiting_input(&self) -> Result<()> {
        if self.state.accepts_guesses() {
            Ok(())
        } else {
            Err(GameError::InvalidTransition)
        }
    }
}
