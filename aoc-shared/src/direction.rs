//! 8-way compass directions

/// One of the 8 compass directions, ordered clockwise starting at north.
///
/// `y` grows downwards, so [`Direction::N`] has delta `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const DELTAS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

impl Direction {
    /// All directions in compass order N, NE, E, SE, S, SW, W, NW
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Position of this direction in [`Direction::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `index` in compass order, wrapping modulo 8
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        DELTAS[self.index()]
    }

    /// Move `(x, y)` one step in this direction
    #[inline]
    pub const fn apply(self, x: isize, y: isize) -> (isize, isize) {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 7)
    }
}
