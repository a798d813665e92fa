//! Fixed-size 2D grid with deferred mutations

use crate::direction::Direction;
use crate::error::GridError;
use std::fmt;

/// A mutation recorded on a [`Grid`] and applied later by
/// [`Grid::apply_queued_ops`].
///
/// Queued ops are plain data, so cloning a grid clones its pending intents
/// without sharing anything with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridOp<C> {
    /// Overwrite the cell at `(x, y)` with `value`
    Set { x: usize, y: usize, value: C },
}

/// A rectangular, row-major grid of cells.
///
/// Width and height are fixed at construction. Coordinates passed to the
/// checked accessors are signed so that stepping off the grid (for example
/// with [`Direction::apply`]) reports [`GridError::OutOfBounds`] instead of
/// wrapping.
///
/// Besides direct reads and writes the grid keeps a FIFO queue of
/// [`GridOp`]s. This supports simultaneous updates: compute the next state of
/// every cell from the current state while queueing the changes, then apply
/// them all at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<C> {
    cells: Vec<C>,
    width: usize,
    height: usize,
    queued: Vec<GridOp<C>>,
}

impl<C> Grid<C> {
    /// Build a grid from a list of rows, taking ownership of the cells.
    ///
    /// # Errors
    /// * [`GridError::NoRows`] - `rows` is empty
    /// * [`GridError::RaggedRow`] - a row is not as long as the first one
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().ok_or(GridError::NoRows)?.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }

        Ok(Self {
            cells,
            width,
            height,
            queued: Vec::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        self.index_of(x, y).is_some()
    }

    #[inline]
    fn index_of(&self, x: isize, y: isize) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: isize, y: isize) -> Result<&C, GridError> {
        self.index_of(x, y)
            .map(|i| &self.cells[i])
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Overwrite the cell at `(x, y)`. The grid is left untouched on error.
    pub fn set(&mut self, x: isize, y: isize, value: C) -> Result<(), GridError> {
        let i = self.index_of(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells[i] = value;
        Ok(())
    }

    /// The 8 neighbors of `(x, y)` in compass order, `None` where off-grid.
    pub fn neighbors(&self, x: isize, y: isize) -> [Option<&C>; 8] {
        Direction::ALL.map(|d| {
            let (nx, ny) = d.apply(x, y);
            self.get(nx, ny).ok()
        })
    }

    /// The 8 neighbors of `(x, y)` in compass order N, NE, E, SE, S, SW, W, NW.
    ///
    /// Off-grid neighbors are reported as `C::default()`, which callers cannot
    /// tell apart from an on-grid default cell. Use [`Grid::neighbors`] when
    /// that distinction matters.
    pub fn adjacencies(&self, x: isize, y: isize) -> [C; 8]
    where
        C: Clone + Default,
    {
        self.neighbors(x, y).map(|n| n.cloned().unwrap_or_default())
    }

    /// Visit every cell in row-major order (y outer, x inner).
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&C, usize, usize),
    {
        for (x, y, cell) in self.iter() {
            visit(cell, x, y);
        }
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &C)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    /// Queue a mutation for the next [`Grid::apply_queued_ops`].
    ///
    /// Bounds are checked now so that applying the queue cannot fail.
    pub fn queue_op(&mut self, op: GridOp<C>) -> Result<(), GridError> {
        let GridOp::Set { x, y, .. } = &op;
        if *x >= self.width || *y >= self.height {
            return Err(GridError::OutOfBounds {
                x: *x as isize,
                y: *y as isize,
            });
        }
        self.queued.push(op);
        Ok(())
    }

    /// Queue `set(x, y, value)` for later.
    pub fn queue_set(&mut self, x: isize, y: isize, value: C) -> Result<(), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        self.queued.push(GridOp::Set {
            x: x as usize,
            y: y as usize,
            value,
        });
        Ok(())
    }

    pub fn queued_ops(&self) -> &[GridOp<C>] {
        &self.queued
    }

    /// Apply all queued ops in the order they were queued, then clear the
    /// queue. Returns how many ops ran.
    pub fn apply_queued_ops(&mut self) -> usize {
        let ops = std::mem::take(&mut self.queued);
        let applied = ops.len();
        for op in ops {
            match op {
                GridOp::Set { x, y, value } => self.cells[y * self.width + x] = value,
            }
        }
        applied
    }

    /// Unchecked read for callers that already validated the position.
    #[inline]
    pub(crate) fn cell(&self, x: usize, y: usize) -> &C {
        &self.cells[y * self.width + x]
    }

    /// Swap in `value` at a validated position, returning the old cell.
    #[inline]
    pub(crate) fn replace(&mut self, x: usize, y: usize, value: C) -> C {
        std::mem::replace(&mut self.cells[y * self.width + x], value)
    }

    /// Render the grid as column-aligned text, one line per row.
    ///
    /// Each cell is formatted with `formatter`, padded to the widest
    /// rendering in its column and followed by a single space.
    pub fn render<F>(&self, formatter: F) -> String
    where
        F: Fn(&C) -> String,
    {
        if self.width == 0 {
            return "(empty grid)\n".to_string();
        }

        let rendered: Vec<String> = self.cells.iter().map(formatter).collect();

        let mut col_widths = vec![0; self.width];
        for (i, text) in rendered.iter().enumerate() {
            let col = i % self.width;
            col_widths[col] = col_widths[col].max(text.chars().count());
        }

        let mut out = String::new();
        for row in rendered.chunks(self.width) {
            for (text, width) in row.iter().zip(&col_widths) {
                out.push_str(&format!("{:<width$} ", text, width = *width));
            }
            out.push('\n');
        }
        out
    }

    /// Print [`Grid::render`] to stdout.
    pub fn debug_print<F>(&self, formatter: F)
    where
        F: Fn(&C) -> String,
    {
        print!("{}", self.render(formatter));
    }
}

impl<C: Clone> Grid<C> {
    /// Build a `width` x `height` grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: C) -> Result<Self, GridError> {
        Self::from_rows(vec![vec![value; width]; height])
    }
}

impl<C: fmt::Display> fmt::Display for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|cell| cell.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> Grid<u32> {
        let rows = (0..height)
            .map(|y| (0..width).map(|x| (y * width + x + 1) as u32).collect())
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_dimensions() {
        let grid = numbered(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(3, 2), Ok(&12));
    }

    #[test]
    fn test_from_rows_rejects_empty_and_ragged() {
        assert_eq!(Grid::<u8>::from_rows(vec![]), Err(GridError::NoRows));
        assert_eq!(
            Grid::from_rows(vec![vec![1, 2], vec![3]]),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = numbered(2, 2);
        assert_eq!(grid.get(-1, 0), Err(GridError::OutOfBounds { x: -1, y: 0 }));
        assert_eq!(grid.get(0, 2), Err(GridError::OutOfBounds { x: 0, y: 2 }));
        assert!(grid.set(2, 0, 99).is_err());
        assert_eq!(grid, numbered(2, 2));
    }

    #[test]
    fn test_adjacencies_at_corner() {
        // 1 2 3
        // 4 5 6
        // 7 8 9
        let grid = numbered(3, 3);
        assert_eq!(grid.adjacencies(0, 0), [0, 0, 2, 5, 4, 0, 0, 0]);
        assert_eq!(grid.adjacencies(2, 2), [6, 0, 0, 0, 0, 0, 8, 5]);
        assert_eq!(grid.adjacencies(1, 1), [2, 3, 6, 9, 8, 7, 4, 1]);
    }

    #[test]
    fn test_neighbors_distinguish_off_grid() {
        let grid = Grid::from_rows(vec![vec![0u8, 0]]).unwrap();
        let neighbors = grid.neighbors(0, 0);
        assert_eq!(neighbors[Direction::E.index()], Some(&0));
        assert_eq!(neighbors[Direction::W.index()], None);
        assert_eq!(neighbors[Direction::N.index()], None);
    }

    #[test]
    fn test_for_each_row_major() {
        let grid = numbered(3, 2);
        let mut seen = Vec::new();
        grid.for_each(|cell, x, y| seen.push((x, y, *cell)));
        assert_eq!(
            seen,
            vec![(0, 0, 1), (1, 0, 2), (2, 0, 3), (0, 1, 4), (1, 1, 5), (2, 1, 6)]
        );
    }

    #[test]
    fn test_queued_ops_apply_in_order() {
        let mut grid = numbered(2, 2);
        grid.queue_set(0, 0, 10).unwrap();
        grid.queue_set(0, 0, 20).unwrap();
        grid.queue_op(GridOp::Set { x: 1, y: 1, value: 30 }).unwrap();

        // Nothing lands until applied
        assert_eq!(grid.get(0, 0), Ok(&1));
        assert_eq!(grid.queued_ops().len(), 3);

        assert_eq!(grid.apply_queued_ops(), 3);
        assert_eq!(grid.get(0, 0), Ok(&20));
        assert_eq!(grid.get(1, 1), Ok(&30));
        assert!(grid.queued_ops().is_empty());

        // Applying again is a no-op
        assert_eq!(grid.apply_queued_ops(), 0);
        assert_eq!(grid.get(0, 0), Ok(&20));
    }

    #[test]
    fn test_queue_rejects_out_of_bounds() {
        let mut grid = numbered(2, 2);
        assert!(grid.queue_set(5, 0, 1).is_err());
        assert!(grid.queue_op(GridOp::Set { x: 0, y: 2, value: 1 }).is_err());
        assert!(grid.queued_ops().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = numbered(2, 2);
        original.queue_set(1, 0, 77).unwrap();

        let mut copy = original.clone();
        copy.set(0, 0, 100).unwrap();
        copy.apply_queued_ops();

        assert_eq!(original.get(0, 0), Ok(&1));
        assert_eq!(original.get(1, 0), Ok(&2));
        assert_eq!(original.queued_ops().len(), 1);
        assert_eq!(copy.get(1, 0), Ok(&77));

        original.apply_queued_ops();
        assert_eq!(copy.get(0, 0), Ok(&100));
    }

    #[test]
    fn test_render_aligns_columns() {
        let grid = Grid::from_rows(vec![vec![1, 200], vec![30, 4]]).unwrap();
        assert_eq!(grid.render(|c| c.to_string()), "1  200 \n30 4   \n");
        assert_eq!(grid.to_string(), "1  200 \n30 4   \n");
    }

    #[test]
    fn test_render_empty_grid() {
        let grid: Grid<u8> = Grid::from_rows(vec![vec![]]).unwrap();
        assert_eq!(grid.render(|c| c.to_string()), "(empty grid)\n");
        assert_eq!(grid.iter().count(), 0);
    }
}
