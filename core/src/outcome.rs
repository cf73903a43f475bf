use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Why a round was lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    MineHit(usize),
    Timeout,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// True once every safe cell is revealed. Marks play no part: the cells left
/// unrevealed must be exactly the mines.
pub fn is_winning(
    minefield: &Minefield,
    visibility: impl IntoIterator<Item = CellVisibility>,
) -> bool {
    minefield
        .iter()
        .zip(visibility)
        .all(|(content, visibility)| visibility == CellVisibility::Revealed || content.is_mine())
}
