//! Backtracking search for placing a multiset of shapes on a grid

use crate::grid::Grid;
use crate::shape::{PlacementFlags, Shape};
use std::collections::BTreeMap;

/// Decide whether every required shape instance can be placed on `grid`
/// without overlap.
///
/// `counts[id]` instances of `shapes[id]` are required; ids missing from
/// `counts` or with a count of zero are ignored. A cell may host part of a
/// shape only when `is_suitable(cell, x, y)` holds. On success the covered
/// cells are overwritten with `marker`; on failure the grid is left exactly
/// as it was.
///
/// See [`ShapePacker`] for the search order.
pub fn fit_shapes<K, C, F>(
    grid: &mut Grid<C>,
    shapes: &BTreeMap<K, Shape>,
    counts: &BTreeMap<K, usize>,
    flags: PlacementFlags,
    is_suitable: F,
    marker: C,
) -> bool
where
    K: Ord + Clone,
    C: Clone,
    F: Fn(&C, usize, usize) -> bool,
{
    shapes
        .iter()
        .fold(ShapePacker::new(flags), |packer, (id, shape)| {
            let count = counts.get(id).copied().unwrap_or(0);
            packer.require(id.clone(), shape.clone(), count)
        })
        .fit(grid, is_suitable, marker)
}

/// Shape-packing feasibility search.
///
/// The search is a depth-first backtracking over shape kinds:
/// - kinds with fewer distinct transformations go first (ties by id)
/// - each transformation is tried only at anchors where its bounding box
///   fits inside the grid, in row-major order
/// - the first complete placement found is accepted
///
/// Every tentative placement records the cells it overwrote and restores
/// them exactly when the branch fails.
///
/// # Example
///
/// ```
/// use aoc_shared::{Grid, PlacementFlags, Shape, ShapePacker};
///
/// let mut grid = Grid::filled(2, 2, '.').unwrap();
/// let fits = ShapePacker::new(PlacementFlags::NONE)
///     .require("dot", Shape::from(vec![(0, 0)]), 2)
///     .fit(&mut grid, |c, _, _| *c == '.', '#');
///
/// assert!(fits);
/// assert_eq!(grid.to_string(), "# # \n. . \n");
/// ```
#[derive(Debug, Clone)]
pub struct ShapePacker<K> {
    flags: PlacementFlags,
    required: BTreeMap<K, (Shape, usize)>,
}

impl<K: Ord> ShapePacker<K> {
    pub fn new(flags: PlacementFlags) -> Self {
        Self {
            flags,
            required: BTreeMap::new(),
        }
    }

    /// Require `count` instances of `shape` under `id`, replacing any earlier
    /// requirement for the same id.
    pub fn require(mut self, id: K, shape: Shape, count: usize) -> Self {
        self.required.insert(id, (shape, count));
        self
    }

    /// Run the search on `grid`. See [`fit_shapes`] for the contract.
    pub fn fit<C, F>(&self, grid: &mut Grid<C>, is_suitable: F, marker: C) -> bool
    where
        C: Clone,
        F: Fn(&C, usize, usize) -> bool,
    {
        let mut pieces: Vec<Piece> = Vec::new();
        let mut needed_area = 0usize;

        for (shape, count) in self.required.values() {
            if *count == 0 {
                continue;
            }
            if shape.is_empty() {
                log::debug!("packing failed: a required shape has no cells");
                return false;
            }
            let Some(area) = shape
                .len()
                .checked_mul(*count)
                .and_then(|area| needed_area.checked_add(area))
            else {
                log::debug!("packing failed: required area overflows");
                return false;
            };
            needed_area = area;
            pieces.push(Piece {
                variants: shape
                    .transformations(self.flags)
                    .iter()
                    .map(Variant::from_shape)
                    .collect(),
                remaining: *count,
            });
        }

        if pieces.is_empty() {
            return true;
        }

        let grid_area = grid.width() * grid.height();
        if needed_area > grid_area {
            log::debug!("packing failed: needs {needed_area} cells, grid has {grid_area}");
            return false;
        }

        // Stable sort keeps id order among equally constrained kinds
        pieces.sort_by_key(|p| p.variants.len());

        log::debug!(
            "packing {} shape kinds ({} cells) into {}x{} grid",
            pieces.len(),
            needed_area,
            grid.width(),
            grid.height()
        );

        let mut search = Search {
            grid,
            is_suitable,
            marker,
            pieces,
            placements: 0,
        };
        let fits = search.descend(0);

        log::debug!(
            "packing {} after {} placements",
            if fits { "succeeded" } else { "failed" },
            search.placements
        );
        fits
    }
}

/// One shape kind still to place
struct Piece {
    variants: Vec<Variant>,
    remaining: usize,
}

/// A normalized transformation with its bounding box
struct Variant {
    cells: Vec<(usize, usize)>,
    width: usize,
    height: usize,
}

impl Variant {
    fn from_shape(shape: &Shape) -> Self {
        let (width, height) = shape.bounds();
        // Transformations are normalized, so every offset is non-negative
        let cells = shape
            .offsets()
            .iter()
            .map(|o| (o.dx as usize, o.dy as usize))
            .collect();
        Self {
            cells,
            width,
            height,
        }
    }
}

/// Cells overwritten by one placement, with their previous values
type UndoLog<C> = Vec<(usize, usize, C)>;

struct Search<'g, C, F> {
    grid: &'g mut Grid<C>,
    is_suitable: F,
    marker: C,
    pieces: Vec<Piece>,
    placements: u64,
}

impl<C, F> Search<'_, C, F>
where
    C: Clone,
    F: Fn(&C, usize, usize) -> bool,
{
    fn descend(&mut self, piece: usize) -> bool {
        if piece == self.pieces.len() {
            return true;
        }

        let (grid_w, grid_h) = (self.grid.width(), self.grid.height());

        for variant in 0..self.pieces[piece].variants.len() {
            let (w, h) = {
                let v = &self.pieces[piece].variants[variant];
                (v.width, v.height)
            };
            if w > grid_w || h > grid_h {
                continue;
            }

            for anchor_y in 0..=grid_h - h {
                for anchor_x in 0..=grid_w - w {
                    if !self.can_place(piece, variant, anchor_x, anchor_y) {
                        continue;
                    }

                    let undo = self.place(piece, variant, anchor_x, anchor_y);
                    self.placements += 1;

                    self.pieces[piece].remaining -= 1;
                    let next = if self.pieces[piece].remaining == 0 {
                        piece + 1
                    } else {
                        piece
                    };

                    if self.descend(next) {
                        return true;
                    }

                    self.pieces[piece].remaining += 1;
                    self.restore(undo);
                }
            }
        }

        false
    }

    fn can_place(&self, piece: usize, variant: usize, anchor_x: usize, anchor_y: usize) -> bool {
        self.pieces[piece].variants[variant]
            .cells
            .iter()
            .all(|&(dx, dy)| {
                let (x, y) = (anchor_x + dx, anchor_y + dy);
                (self.is_suitable)(self.grid.cell(x, y), x, y)
            })
    }

    fn place(&mut self, piece: usize, variant: usize, anchor_x: usize, anchor_y: usize) -> UndoLog<C> {
        let cells = &self.pieces[piece].variants[variant].cells;
        let mut undo = Vec::with_capacity(cells.len());
        for &(dx, dy) in cells {
            let (x, y) = (anchor_x + dx, anchor_y + dy);
            let previous = self.grid.replace(x, y, self.marker.clone());
            undo.push((x, y, previous));
        }
        undo
    }

    fn restore(&mut self, undo: UndoLog<C>) {
        for (x, y, previous) in undo.into_iter().rev() {
            self.grid.replace(x, y, previous);
        }
    }
}
