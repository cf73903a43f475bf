use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Cells opened by a click on `start`.
///
/// The cascade spreads through blank cells and stops at numbered ones, which
/// are included but not expanded. Mines are never part of the result. The
/// order is the traversal order; only the set is meaningful.
pub fn flood_fill(minefield: &Minefield, start: usize) -> Vec<usize> {
    let dimensions = minefield.dimensions();
    let mut visited = HashSet::new();
    let mut result = Vec::new();
    let mut to_visit = vec![start];

    while let Some(index) = to_visit.pop() {
        if !visited.insert(index) {
            continue;
        }

        let cell = minefield[index];
        if cell.is_mine() {
            continue;
        }
        result.push(index);

        if !cell.is_blank() {
            continue;
        }

        let neighbors = dimensions.neighbors(index);
        log::trace!("Flood expanding {} into {:?}", index, neighbors);
        // reversed so the first neighbor is visited first
        to_visit.extend(
            neighbors
                .into_iter()
                .rev()
                .filter(|neighbor| !visited.contains(neighbor)),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn field(dimensions: Dimensions, mines: &[usize]) -> Minefield {
        Minefield::from_mine_indices(dimensions, mines).unwrap()
    }

    fn fill_set(field: &Minefield, start: usize) -> BTreeSet<usize> {
        flood_fill(field, start).into_iter().collect()
    }

    #[test]
    fn numbered_start_opens_only_itself() {
        let field = field(Dimensions::new(3, 3), &[0]);

        assert_eq!(flood_fill(&field, 4), [4]);
    }

    #[test]
    fn blank_start_stops_at_numbered_border() {
        let field = field(Dimensions::new(3, 3), &[0]);

        assert_eq!(fill_set(&field, 8), BTreeSet::from([1, 2, 3, 4, 5, 6, 7, 8]));
    }

    #[test]
    fn cascade_does_not_cross_a_wall_of_mines() {
        // column 2 is all mines on a 3x5 board
        let field = field(Dimensions::new(3, 5), &[2, 7, 12]);

        assert_eq!(fill_set(&field, 0), BTreeSet::from([0, 1, 5, 6, 10, 11]));
        assert_eq!(fill_set(&field, 4), BTreeSet::from([3, 4, 8, 9, 13, 14]));
    }

    #[test]
    fn starting_on_a_mine_opens_nothing() {
        let field = field(Dimensions::new(2, 2), &[3]);

        assert!(flood_fill(&field, 3).is_empty());
    }

    #[test]
    fn result_has_no_duplicates() {
        let field = field(Dimensions::new(6, 6), &[14]);

        let cells = flood_fill(&field, 0);
        let unique: BTreeSet<_> = cells.iter().copied().collect();

        assert_eq!(cells.len(), unique.len());
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0], 0);
    }
}
