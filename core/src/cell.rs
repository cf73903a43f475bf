use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed once the minefield is generated, except that a
/// mine becomes [`CellContent::Exploded`] when it ends the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Exploded,
    /// Safe cell with the number of mines among its neighbors.
    Empty(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::Exploded)
    }

    /// Safe cell with no adjacent mines, which propagates a cascading reveal.
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Empty(0))
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Empty(count) => Some(count),
            Self::Mine | Self::Exploded => None,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty(0)
    }
}

/// Player-visible state of a cell.
///
/// `Hidden` and `Marked` toggle into each other, both may become `Revealed`,
/// and nothing leaves `Revealed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellVisibility {
    Hidden,
    Marked,
    Revealed,
}

impl CellVisibility {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Marked)
    }
}

impl Default for CellVisibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a presentation layer may see of a cell: content only once revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Marked,
    Revealed(CellContent),
}

impl CellView {
    pub const fn new(visibility: CellVisibility, content: CellContent) -> Self {
        match visibility {
            CellVisibility::Hidden => Self::Hidden,
            CellVisibility::Marked => Self::Marked,
            CellVisibility::Revealed => Self::Revealed(content),
        }
    }

    pub const fn content(self) -> Option<CellContent> {
        match self {
            Self::Revealed(content) => Some(content),
            Self::Hidden | Self::Marked => None,
        }
    }
}
