use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{GameError, Result};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of a board. Cells are addressed row-major: index `i` lives at
/// `(i / columns, i % columns)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: Coord,
    pub columns: Coord,
}

impl Dimensions {
    pub const fn new(rows: Coord, columns: Coord) -> Self {
        Self { rows, columns }
    }

    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.columns == 0 {
            Err(GameError::EmptyBoard)
        } else {
            Ok(self)
        }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn len(self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn shape(self) -> [usize; 2] {
        (self.rows, self.columns).to_nd_index()
    }

    pub fn contains(self, (row, column): Coord2) -> bool {
        row < self.rows && column < self.columns
    }

    pub fn check_index(self, index: usize) -> Result<usize> {
        let len = self.len();
        if index < len {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfRange { index, len })
        }
    }

    /// Decodes a flat index, which must be in range.
    pub fn coords_of(self, index: usize) -> Coord2 {
        let columns = usize::from(self.columns);
        ((index / columns) as Coord, (index % columns) as Coord)
    }

    pub fn index_of(self, (row, column): Coord2) -> usize {
        usize::from(row) * usize::from(self.columns) + usize::from(column)
    }

    /// In-range 8-neighborhood of `index`, as flat indices. The board does not wrap around.
    pub fn iter_neighbors(self, index: usize) -> NeighborIter {
        NeighborIter::new(self, self.coords_of(index))
    }

    pub fn neighbors(self, index: usize) -> SmallVec<[usize; 8]> {
        self.iter_neighbors(index).collect()
    }
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i16, i16), bounds: Dimensions) -> Option<Coord2> {
    let (row, column) = coords;
    let (dr, dc) = delta;

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= bounds.rows {
        return None;
    }

    let next_column = column.checked_add_signed(dc)?;
    if next_column >= bounds.columns {
        return None;
    }

    Some((next_row, next_column))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Dimensions,
    index: u8,
}

impl NeighborIter {
    fn new(bounds: Dimensions, center: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if let Some(coords) = next_item {
                return Some(self.bounds.index_of(coords));
            }
        }
    }
}
