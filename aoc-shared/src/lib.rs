//! Shared helpers for Advent of Code solutions
//!
//! This crate holds the pieces that more than one puzzle needs:
//! - [`Grid`]: a fixed-size 2D array with bounds-checked access, 8-way
//!   adjacency queries and deferred ("queued") mutations
//! - [`Direction`]: the 8 compass directions with delta arithmetic
//! - [`Shape`] and [`PlacementFlags`]: polyomino-like offset sets and their
//!   rotated/mirrored variants
//! - [`fit_shapes`] / [`ShapePacker`]: a backtracking search that decides if a
//!   multiset of shapes can be placed on a grid without overlap
//! - [`timer`]: small timing and duration formatting helpers
//!
//! # Example
//!
//! ```
//! use aoc_shared::{Grid, PlacementFlags, Shape, ShapePacker};
//!
//! let mut grid = Grid::filled(3, 2, false).unwrap();
//! let tromino = Shape::from_pattern("##\n#.", '#');
//!
//! let fits = ShapePacker::new(PlacementFlags::ALL)
//!     .require(0, tromino, 2)
//!     .fit(&mut grid, |occupied, _, _| !occupied, true);
//!
//! assert!(fits);
//! ```

mod direction;
mod error;
mod grid;
mod packing;
mod shape;
pub mod timer;

pub use direction::Direction;
pub use error::GridError;
pub use grid::{Grid, GridOp};
pub use packing::{ShapePacker, fit_shapes};
pub use shape::{PlacementFlags, Shape, ShapeKey, ShapeOffset};
