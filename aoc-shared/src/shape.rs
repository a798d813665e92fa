//! Polyomino-like shapes and their rotated/mirrored variants

use std::collections::HashSet;

/// One cell of a [`Shape`], relative to the shape's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeOffset {
    pub dx: isize,
    pub dy: isize,
}

impl ShapeOffset {
    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

/// Which symmetric variants of a shape may be tried during placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementFlags {
    /// Try 90, 180 and 270 degree rotations
    pub allow_rotate: bool,
    /// Try horizontal and vertical mirror images
    pub allow_flip: bool,
}

impl PlacementFlags {
    pub const NONE: Self = Self {
        allow_rotate: false,
        allow_flip: false,
    };
    pub const ROTATE: Self = Self {
        allow_rotate: true,
        allow_flip: false,
    };
    pub const ALL: Self = Self {
        allow_rotate: true,
        allow_flip: true,
    };
}

/// Canonical form of a shape: its offsets sorted ascending.
///
/// Two normalized shapes covering the same cells have equal keys regardless
/// of offset order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeKey(Vec<(isize, isize)>);

/// An ordered list of cell offsets describing a multi-cell footprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    offsets: Vec<ShapeOffset>,
}

impl Shape {
    pub fn new(offsets: Vec<ShapeOffset>) -> Self {
        Self { offsets }
    }

    /// Parse ASCII art where `filled` marks an occupied cell.
    ///
    /// Line `y`, column `x` becomes offset `(x, y)`; every other character is
    /// empty space. Offsets come out in row-major order.
    pub fn from_pattern(pattern: &str, filled: char) -> Self {
        let offsets = pattern
            .lines()
            .enumerate()
            .flat_map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .filter(move |&(_, c)| c == filled)
                    .map(move |(x, _)| ShapeOffset::new(x as isize, y as isize))
            })
            .collect();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[ShapeOffset] {
        &self.offsets
    }

    /// Number of cells the shape covers
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn map(&self, f: impl Fn(ShapeOffset) -> ShapeOffset) -> Self {
        Self {
            offsets: self.offsets.iter().copied().map(f).collect(),
        }
    }

    /// Quarter turn: `(dx, dy) -> (-dy, dx)`
    pub fn rotated_90(&self) -> Self {
        self.map(|o| ShapeOffset::new(-o.dy, o.dx))
    }

    /// Mirror left-right: `dx -> -dx`
    pub fn flipped_horizontal(&self) -> Self {
        self.map(|o| ShapeOffset::new(-o.dx, o.dy))
    }

    /// Mirror top-bottom: `dy -> -dy`
    pub fn flipped_vertical(&self) -> Self {
        self.map(|o| ShapeOffset::new(o.dx, -o.dy))
    }

    /// Translate so the smallest `dx` and the smallest `dy` are both zero.
    pub fn normalized(&self) -> Self {
        let min_dx = self.offsets.iter().map(|o| o.dx).min().unwrap_or(0);
        let min_dy = self.offsets.iter().map(|o| o.dy).min().unwrap_or(0);
        self.map(|o| ShapeOffset::new(o.dx - min_dx, o.dy - min_dy))
    }

    pub fn key(&self) -> ShapeKey {
        let mut coords: Vec<_> = self.offsets.iter().map(|o| (o.dx, o.dy)).collect();
        coords.sort_unstable();
        ShapeKey(coords)
    }

    /// Bounding box size as `(width, height)`; `(0, 0)` for an empty shape.
    pub fn bounds(&self) -> (usize, usize) {
        let span = |values: &mut dyn Iterator<Item = isize>| -> usize {
            let (lo, hi) = values.fold((isize::MAX, isize::MIN), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            if lo > hi { 0 } else { (hi - lo + 1) as usize }
        };
        (
            span(&mut self.offsets.iter().map(|o| o.dx)),
            span(&mut self.offsets.iter().map(|o| o.dy)),
        )
    }

    /// Every distinct normalized variant reachable under `flags`.
    ///
    /// Variants are produced in a fixed order: identity, the rotations by
    /// 90/180/270 degrees, the horizontal then vertical mirrors, then the
    /// rotations of the horizontal mirror followed by those of the vertical
    /// mirror. A variant whose [`ShapeKey`] was already produced is skipped,
    /// so symmetric shapes yield fewer entries.
    pub fn transformations(&self, flags: PlacementFlags) -> Vec<Shape> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |candidate: Shape| {
            let candidate = candidate.normalized();
            if seen.insert(candidate.key()) {
                out.push(candidate);
            }
        };

        let base = self.normalized();
        push(base.clone());

        if flags.allow_rotate {
            for turned in quarter_turns(&base) {
                push(turned);
            }
        }

        if flags.allow_flip {
            let flip_h = base.flipped_horizontal().normalized();
            let flip_v = base.flipped_vertical().normalized();
            push(flip_h.clone());
            push(flip_v.clone());

            if flags.allow_rotate {
                for mirrored in [flip_h, flip_v] {
                    for turned in quarter_turns(&mirrored) {
                        push(turned);
                    }
                }
            }
        }

        out
    }
}

/// The 90, 180 and 270 degree rotations of `shape`, each normalized.
fn quarter_turns(shape: &Shape) -> [Shape; 3] {
    let r90 = shape.rotated_90().normalized();
    let r180 = r90.rotated_90().normalized();
    let r270 = r180.rotated_90().normalized();
    [r90, r180, r270]
}

impl FromIterator<ShapeOffset> for Shape {
    fn from_iter<I: IntoIterator<Item = ShapeOffset>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<(isize, isize)>> for Shape {
    fn from(coords: Vec<(isize, isize)>) -> Self {
        coords
            .into_iter()
            .map(|(dx, dy)| ShapeOffset::new(dx, dy))
            .collect()
    }
}
