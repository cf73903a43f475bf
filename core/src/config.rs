use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dimensions: Dimensions,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(dimensions: Dimensions, mines: CellCount) -> Self {
        Self { dimensions, mines }
    }

    pub fn new(dimensions: Dimensions, mines: CellCount) -> Result<Self> {
        let dimensions = dimensions.validate()?;
        let capacity = dimensions.total_cells();
        if mines > capacity {
            return Err(GameError::TooManyMines {
                requested: mines,
                capacity,
            });
        }
        Ok(Self::new_unchecked(dimensions, mines))
    }

    /// Derives the mine count as `ceil(cells * density)`.
    pub fn from_density(dimensions: Dimensions, density: f64) -> Result<Self> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(GameError::InvalidDensity);
        }
        let dimensions = dimensions.validate()?;
        let total = dimensions.total_cells();
        Self::new(dimensions, ceil_share(total, density).min(total))
    }

    pub fn preset(size: BoardSize, difficulty: Difficulty) -> Self {
        let dimensions = size.dimensions();
        let mines = ceil_share(dimensions.total_cells(), difficulty.density());
        Self::new_unchecked(dimensions, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.dimensions.total_cells()
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

// `f64::ceil` lives in std
fn ceil_share(total: CellCount, density: f64) -> CellCount {
    let exact = f64::from(total) * density;
    let floor = exact as CellCount;
    if f64::from(floor) < exact {
        floor + 1
    } else {
        floor
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(BoardSize::default(), Difficulty::default())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BoardSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const fn dimensions(self) -> Dimensions {
        match self {
            Self::Small => Dimensions::new(14, 12),
            Self::Medium => Dimensions::new(14, 21),
            Self::Large => Dimensions::new(14, 30),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Fraction of cells that hold a mine.
    pub const fn density(self) -> f64 {
        match self {
            Self::Easy => 0.07,
            Self::Medium => 0.14,
            Self::Hard => 0.28,
        }
    }
}

/// A board size and difficulty picked independently of each other.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preset {
    pub size: BoardSize,
    pub difficulty: Difficulty,
}

impl Preset {
    pub const fn new(size: BoardSize, difficulty: Difficulty) -> Self {
        Self { size, difficulty }
    }

    pub fn config(self) -> GameConfig {
        GameConfig::preset(self.size, self.difficulty)
    }

    /// The preset producing exactly `config`, if any.
    pub fn matching(config: &GameConfig) -> Option<Self> {
        BoardSize::ALL
            .into_iter()
            .flat_map(|size| Difficulty::ALL.map(|difficulty| Self::new(size, difficulty)))
            .find(|preset| preset.config() == *config)
    }

    /// Replaces whichever of the two choices is given, keeping the other.
    pub fn with(self, size: Option<BoardSize>, difficulty: Option<Difficulty>) -> Self {
        Self {
            size: size.unwrap_or(self.size),
            difficulty: difficulty.unwrap_or(self.difficulty),
        }
    }
}
