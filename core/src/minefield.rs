use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine layout with adjacency labels, computed once at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinefieldData")]
pub struct Minefield {
    dimensions: Dimensions,
    content: Array2<CellContent>,
    mine_count: CellCount,
}

impl Minefield {
    /// Places `config.mines` mines at indices drawn from `sampler`.
    pub fn generate(config: &GameConfig, sampler: &mut impl IndexSampler) -> Result<Self> {
        let config = GameConfig::new(config.dimensions, config.mines)?;
        let dimensions = config.dimensions;
        let total_cells = dimensions.len();

        // optimize for full boards
        if config.mines == config.total_cells() {
            log::warn!(
                "Generating a {}x{} board made only of mines",
                dimensions.rows,
                dimensions.columns
            );
            return Self::from_mine_mask(dimensions, &vec![true; total_cells]);
        }

        let mine_indices = sampler.sample_distinct(config.mines as usize, total_cells);
        let minefield = Self::from_mine_indices(dimensions, &mine_indices)?;

        // double check mine count
        if minefield.mine_count != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                minefield.mine_count,
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} minefield with {} mines",
            dimensions.rows,
            dimensions.columns,
            minefield.mine_count
        );
        Ok(minefield)
    }

    /// Builds a layout from explicit mine positions; repeated indices collapse.
    pub fn from_mine_indices(dimensions: Dimensions, mine_indices: &[usize]) -> Result<Self> {
        let dimensions = dimensions.validate()?;
        let mut mine_mask = vec![false; dimensions.len()];

        for &index in mine_indices {
            mine_mask[dimensions.check_index(index)?] = true;
        }

        Self::from_mine_mask(dimensions, &mine_mask)
    }

    /// Builds a layout from a row-major mask, `true` marking a mine.
    pub fn from_mine_mask(dimensions: Dimensions, mine_mask: &[bool]) -> Result<Self> {
        let dimensions = dimensions.validate()?;
        if mine_mask.len() != dimensions.len() {
            return Err(GameError::InvalidBoardShape);
        }

        let cells: Vec<CellContent> = mine_mask
            .iter()
            .map(|&is_mine| {
                if is_mine {
                    CellContent::Mine
                } else {
                    CellContent::Empty(0)
                }
            })
            .collect();
        let layout = Array2::from_shape_vec(dimensions.shape(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;

        let content = Array2::from_shape_fn(dimensions.shape(), |(row, column)| {
            let cell = layout[[row, column]];
            if cell.is_mine() {
                cell
            } else {
                let index = row * usize::from(dimensions.columns) + column;
                CellContent::Empty(neighbor_mine_count(&layout.view(), dimensions, index))
            }
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Ok(Self {
            dimensions,
            content,
            mine_count,
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.dimensions, self.mine_count)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn total_cells(&self) -> CellCount {
        self.dimensions.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, index: usize) -> bool {
        self[index].is_mine()
    }

    pub fn get(&self, index: usize) -> Option<CellContent> {
        self.dimensions
            .check_index(index)
            .ok()
            .map(|index| self[index])
    }

    pub fn grid(&self) -> ArrayView2<'_, CellContent> {
        self.content.view()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellContent> + '_ {
        self.content.iter().copied()
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(index, _)| index)
    }

    pub(crate) fn explode(&mut self, index: usize) {
        let coords = self.dimensions.coords_of(index);
        let cell = &mut self.content[coords.to_nd_index()];
        if cell.is_mine() {
            *cell = CellContent::Exploded;
        }
    }

    pub(crate) fn explode_all(&mut self) {
        for cell in self.content.iter_mut() {
            if cell.is_mine() {
                *cell = CellContent::Exploded;
            }
        }
    }
}

/// Unchecked wire form of [`Minefield`].
#[derive(Deserialize)]
struct MinefieldData {
    dimensions: Dimensions,
    content: Array2<CellContent>,
    mine_count: CellCount,
}

impl TryFrom<MinefieldData> for Minefield {
    type Error = GameError;

    /// Accepts the data only if it is what generation would have produced,
    /// allowing mines that have since exploded.
    fn try_from(data: MinefieldData) -> Result<Self> {
        let dimensions = data.dimensions.validate()?;
        let [rows, columns] = dimensions.shape();
        if data.content.dim() != (rows, columns) {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_mask: Vec<bool> = data.content.iter().map(|cell| cell.is_mine()).collect();
        let generated = Self::from_mine_mask(dimensions, &mine_mask)?;
        let labels_match = generated
            .iter()
            .zip(data.content.iter())
            .all(|(expected, &actual)| expected == actual || actual == CellContent::Exploded);
        if !labels_match || generated.mine_count != data.mine_count {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            dimensions,
            content: data.content,
            mine_count: data.mine_count,
        })
    }
}

impl Index<usize> for Minefield {
    type Output = CellContent;

    fn index(&self, index: usize) -> &Self::Output {
        &self.content[self.dimensions.coords_of(index).to_nd_index()]
    }
}

/// Number of mines among the in-range 8-neighbors of `index`.
pub fn neighbor_mine_count(
    content: &ArrayView2<'_, CellContent>,
    dimensions: Dimensions,
    index: usize,
) -> u8 {
    dimensions
        .iter_neighbors(index)
        .filter(|&neighbor| content[dimensions.coords_of(neighbor).to_nd_index()].is_mine())
        .count() as u8
}
