use web_time::Instant;

use crate::*;

/// A sequence of rounds sharing one configuration and one sampler. Each new
/// game replaces the board wholesale and resets the clock.
#[derive(Clone, Debug)]
pub struct Session<S = RandomSampler> {
    config: GameConfig,
    preset: Preset,
    board: Board,
    clock: RoundClock,
    sampler: S,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_sampler(config, RandomSampler::from_entropy())
    }
}

impl<S: IndexSampler> Session<S> {
    pub fn with_sampler(config: GameConfig, mut sampler: S) -> Result<Self> {
        let board = Board::generate(&config, &mut sampler)?;
        Ok(Self {
            preset: Preset::matching(&config).unwrap_or_default(),
            config,
            board,
            clock: RoundClock::default(),
            sampler,
        })
    }

    pub fn with_clock(mut self, clock: RoundClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Last preset in effect; falls back to the default one for custom configs.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    pub fn new_game(&mut self) -> Result<()> {
        self.board = Board::generate(&self.config, &mut self.sampler)?;
        self.clock.reset();
        log::debug!("New game with {:?}", self.config);
        Ok(())
    }

    /// Switches configuration and starts a new game; on error nothing changes.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<()> {
        let board = Board::generate(&config, &mut self.sampler)?;
        if let Some(preset) = Preset::matching(&config) {
            self.preset = preset;
        }
        self.config = config;
        self.board = board;
        self.clock.reset();
        log::debug!("New game with {:?}", self.config);
        Ok(())
    }

    /// Changes the board size, the difficulty, or both, and starts a new game.
    pub fn select_preset(
        &mut self,
        size: Option<BoardSize>,
        difficulty: Option<Difficulty>,
    ) -> Result<()> {
        let preset = self.preset.with(size, difficulty);
        self.reconfigure(preset.config())?;
        self.preset = preset;
        Ok(())
    }

    pub fn reveal(&mut self, index: usize) -> Result<GameOutcome> {
        self.reveal_at(index, Instant::now())
    }

    /// Reveals `index`, unless the deadline passed before `now`, in which case
    /// the round is lost to the timeout instead.
    pub fn reveal_at(&mut self, index: usize, now: Instant) -> Result<GameOutcome> {
        self.board.dimensions().check_index(index)?;
        if self.tick_at(now).is_finished() {
            return Ok(self.outcome());
        }

        self.clock.start_at(now);
        let outcome = self.board.reveal(index)?;
        if outcome.is_finished() {
            self.clock.stop_at(now);
        }
        Ok(outcome)
    }

    pub fn toggle_mark(&mut self, index: usize) -> Result<MarkOutcome> {
        self.toggle_mark_at(index, Instant::now())
    }

    /// Toggles a mark, unless the round already timed out before `now`.
    pub fn toggle_mark_at(&mut self, index: usize, now: Instant) -> Result<MarkOutcome> {
        self.board.dimensions().check_index(index)?;
        self.tick_at(now);
        self.board.toggle_mark(index)
    }

    pub fn tick(&mut self) -> GameOutcome {
        self.tick_at(Instant::now())
    }

    /// Applies the timeout loss if the clock ran out while the round is open.
    pub fn tick_at(&mut self, now: Instant) -> GameOutcome {
        if !self.board.is_finished() && self.clock.is_expired_at(now) {
            log::debug!("Round timed out");
            self.force_loss_at(now)
        } else {
            self.outcome()
        }
    }

    pub fn force_loss(&mut self) -> GameOutcome {
        self.force_loss_at(Instant::now())
    }

    pub fn force_loss_at(&mut self, now: Instant) -> GameOutcome {
        let outcome = self.board.force_loss();
        self.clock.stop_at(now);
        outcome
    }
}
