use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single round: the minefield plus what the player has uncovered so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    minefield: Minefield,
    visibility: Array2<CellVisibility>,
    revealed_count: CellCount,
    marked_count: CellCount,
    outcome: GameOutcome,
    loss_cause: Option<LossCause>,
}

impl Board {
    /// Fresh board with `mines` mines placed uniformly at random.
    pub fn new(dimensions: Dimensions, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(dimensions, mines)?;
        Self::generate(&config, &mut RandomSampler::from_entropy())
    }

    pub fn generate(config: &GameConfig, sampler: &mut impl IndexSampler) -> Result<Self> {
        Ok(Self::from_minefield(Minefield::generate(config, sampler)?))
    }

    pub fn from_minefield(minefield: Minefield) -> Self {
        let dimensions = minefield.dimensions();
        Self {
            minefield,
            visibility: Array2::default(dimensions.shape()),
            revealed_count: 0,
            marked_count: 0,
            outcome: GameOutcome::default(),
            loss_cause: None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.minefield.dimensions()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn loss_cause(&self) -> Option<LossCause> {
        self.loss_cause
    }

    /// The mine whose click lost the round.
    pub fn triggered_mine(&self) -> Option<usize> {
        match self.loss_cause {
            Some(LossCause::MineHit(index)) => Some(index),
            _ => None,
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.minefield.mine_count()
    }

    pub fn marked_count(&self) -> CellCount {
        self.marked_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been marked yet, negative when over-marked.
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.marked_count as isize)
    }

    pub fn visibility_at(&self, index: usize) -> Result<CellVisibility> {
        let index = self.dimensions().check_index(index)?;
        Ok(self.visibility_of(index))
    }

    /// Content of a cell, only once it has been revealed.
    pub fn content_at(&self, index: usize) -> Result<Option<CellContent>> {
        Ok(self.cell_view(index)?.content())
    }

    pub fn cell_view(&self, index: usize) -> Result<CellView> {
        let index = self.dimensions().check_index(index)?;
        Ok(CellView::new(self.visibility_of(index), self.minefield[index]))
    }

    /// Row-major views of every cell.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.visibility
            .iter()
            .zip(self.minefield.iter())
            .map(|(&visibility, content)| CellView::new(visibility, content))
    }

    pub fn toggle_mark(&mut self, index: usize) -> Result<MarkOutcome> {
        use CellVisibility::*;
        use MarkOutcome::*;

        let index = self.dimensions().check_index(index)?;
        if self.is_finished() {
            return Ok(NoChange);
        }

        Ok(match self.visibility_of(index) {
            Hidden => {
                *self.visibility_mut(index) = Marked;
                self.marked_count += 1;
                Changed
            }
            Marked => {
                *self.visibility_mut(index) = Hidden;
                self.marked_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn reveal(&mut self, index: usize) -> Result<GameOutcome> {
        let index = self.dimensions().check_index(index)?;

        if self.is_finished() || self.visibility_of(index) == CellVisibility::Revealed {
            return Ok(self.outcome);
        }

        if self.minefield.contains_mine(index) {
            log::debug!("Mine hit at {:?}", self.dimensions().coords_of(index));
            self.minefield.explode(index);
            self.end_game(GameOutcome::Lost, Some(LossCause::MineHit(index)));
            return Ok(self.outcome);
        }

        let opened = flood_fill(&self.minefield, index);
        log::debug!(
            "Reveal at {:?} opened {} cells",
            self.dimensions().coords_of(index),
            opened.len()
        );
        for cell in opened {
            self.set_revealed(cell);
        }

        if is_winning(&self.minefield, self.visibility.iter().copied()) {
            self.end_game(GameOutcome::Won, None);
        }
        Ok(self.outcome)
    }

    /// Timeout path: every mine explodes and the whole board is shown.
    pub fn force_loss(&mut self) -> GameOutcome {
        if !self.is_finished() {
            self.minefield.explode_all();
            self.end_game(GameOutcome::Lost, Some(LossCause::Timeout));
        }
        self.outcome
    }

    fn end_game(&mut self, outcome: GameOutcome, loss_cause: Option<LossCause>) {
        if self.is_finished() {
            return;
        }

        log::debug!("Round ended: {:?} ({:?})", outcome, loss_cause);
        self.outcome = outcome;
        self.loss_cause = loss_cause;
        for index in 0..self.dimensions().len() {
            self.set_revealed(index);
        }
    }

    fn set_revealed(&mut self, index: usize) {
        let cell = self.visibility_mut(index);
        let previous = *cell;
        *cell = CellVisibility::Revealed;
        match previous {
            CellVisibility::Hidden => self.revealed_count += 1,
            CellVisibility::Marked => {
                self.revealed_count += 1;
                self.marked_count -= 1;
            }
            CellVisibility::Revealed => {}
        }
    }

    fn visibility_of(&self, index: usize) -> CellVisibility {
        self.visibility[self.dimensions().coords_of(index).to_nd_index()]
    }

    fn visibility_mut(&mut self, index: usize) -> &mut CellVisibility {
        let coords = self.dimensions().coords_of(index);
        &mut self.visibility[coords.to_nd_index()]
    }
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct BoardData {
    minefield: Minefield,
    visibility: Array2<CellVisibility>,
    revealed_count: CellCount,
    marked_count: CellCount,
    outcome: GameOutcome,
    loss_cause: Option<LossCause>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let [rows, columns] = data.minefield.dimensions().shape();
        if data.visibility.dim() != (rows, columns) {
            return Err(GameError::InvalidBoardShape);
        }

        let count = |wanted: CellVisibility| {
            data.visibility.iter().filter(|&&visibility| visibility == wanted).count() as CellCount
        };
        if count(CellVisibility::Revealed) != data.revealed_count
            || count(CellVisibility::Marked) != data.marked_count
        {
            return Err(GameError::InvalidBoardShape);
        }

        let consistent = match (data.outcome, data.loss_cause) {
            (GameOutcome::InProgress, None) => data
                .visibility
                .iter()
                .zip(data.minefield.iter())
                .all(|(&visibility, content)| {
                    visibility != CellVisibility::Revealed || !content.is_mine()
                }),
            (GameOutcome::Won, None) | (GameOutcome::Lost, Some(LossCause::Timeout)) => {
                data.revealed_count == data.minefield.total_cells()
            }
            (GameOutcome::Lost, Some(LossCause::MineHit(index))) => {
                data.revealed_count == data.minefield.total_cells()
                    && data.minefield.get(index) == Some(CellContent::Exploded)
            }
            _ => false,
        };
        if !consistent {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            minefield: data.minefield,
            visibility: data.visibility,
            revealed_count: data.revealed_count,
            marked_count: data.marked_count,
            outcome: data.outcome,
            loss_cause: data.loss_cause,
        })
    }
}
