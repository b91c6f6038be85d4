//! Ball headings and the reflection table
//!
//! The ball never travels horizontally. Each step it looks at three cells
//! ahead of it (listed clockwise relative to its heading) and picks a new
//! heading from a fixed table keyed by which of those cells are occupied.

use glam::IVec2;

/// One of the six legal ball headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    DownRight,
    Down,
    DownLeft,
    UpLeft,
}

/// The three cells the ball is about to touch, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub left: IVec2,
    pub front: IVec2,
    pub right: IVec2,
}

impl Adjacent {
    /// All three cells, left to right
    pub fn cells(&self) -> [IVec2; 3] {
        [self.left, self.front, self.right]
    }
}

/// Which of the three adjacent cells block the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    pub on_left: bool,
    pub in_front: bool,
    pub on_right: bool,
}

impl Occupancy {
    pub fn new(on_left: bool, in_front: bool, on_right: bool) -> Self {
        Self {
            on_left,
            in_front,
            on_right,
        }
    }

    /// Table index: left is the high bit, right the low bit
    #[inline]
    pub fn bits(&self) -> usize {
        (self.on_left as usize) << 2 | (self.in_front as usize) << 1 | self.on_right as usize
    }

    /// Flags in the same order as `Adjacent::cells`
    pub fn flags(&self) -> [bool; 3] {
        [self.on_left, self.in_front, self.on_right]
    }
}

use Direction::*;

/// Reflection table, indexed by `[heading as usize][occupancy.bits()]`.
///
/// Up/Down only look at the front bit. The diagonal rows are billiard-style
/// but hand-tuned: a lone front-corner hit reverses both axes, while a side
/// hit reverses only the axis it blocks, even when the corner is also solid.
const REFLECT: [[Direction; 8]; 6] = [
    // Up
    [Up, Up, Down, Down, Up, Up, Down, Down],
    // UpRight
    [UpRight, UpLeft, DownLeft, UpLeft, DownRight, DownLeft, DownRight, DownLeft],
    // DownRight
    [DownRight, UpRight, UpLeft, UpRight, DownLeft, UpLeft, DownLeft, UpLeft],
    // Down
    [Down, Down, Up, Up, Down, Down, Up, Up],
    // DownLeft
    [DownLeft, DownRight, UpRight, DownRight, UpLeft, UpRight, UpLeft, UpRight],
    // UpLeft
    [UpLeft, DownLeft, DownRight, DownLeft, UpRight, DownRight, UpRight, DownRight],
];

impl Direction {
    /// Every heading, in table order
    pub const ALL: [Direction; 6] = [Up, UpRight, DownRight, Down, DownLeft, UpLeft];

    /// True for headings that can reach the paddle this step
    #[inline]
    pub fn is_down(&self) -> bool {
        matches!(self, DownLeft | Down | DownRight)
    }

    /// True for the two headings that only check their front cell
    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Up | Down)
    }

    /// Unit step for this heading
    pub fn delta(&self) -> IVec2 {
        match self {
            Up => IVec2::new(0, -1),
            UpRight => IVec2::new(1, -1),
            DownRight => IVec2::new(1, 1),
            Down => IVec2::new(0, 1),
            DownLeft => IVec2::new(-1, 1),
            UpLeft => IVec2::new(-1, -1),
        }
    }

    /// Cells to test for collision from `pos`.
    ///
    /// For `Up` and `Down` only `front` matters; `left` and `right` are the
    /// neighbouring cells of the row ahead and must be ignored by callers.
    pub fn adjacent_cells(&self, pos: IVec2) -> Adjacent {
        let IVec2 { x, y } = pos;
        let (left, front, right) = match self {
            Up => ((x - 1, y - 1), (x, y - 1), (x + 1, y - 1)),
            UpRight => ((x, y - 1), (x + 1, y - 1), (x + 1, y)),
            DownRight => ((x + 1, y), (x + 1, y + 1), (x, y + 1)),
            Down => ((x - 1, y + 1), (x, y + 1), (x + 1, y + 1)),
            DownLeft => ((x, y + 1), (x - 1, y + 1), (x - 1, y)),
            UpLeft => ((x - 1, y), (x - 1, y - 1), (x, y - 1)),
        };
        Adjacent {
            left: left.into(),
            front: front.into(),
            right: right.into(),
        }
    }

    /// New heading given which adjacent cells are occupied
    #[inline]
    pub fn reflect(&self, on_left: bool, in_front: bool, on_right: bool) -> Direction {
        self.reflect_occupancy(Occupancy::new(on_left, in_front, on_right))
    }

    /// Table lookup behind [`Direction::reflect`]
    #[inline]
    pub fn reflect_occupancy(&self, occupancy: Occupancy) -> Direction {
        REFLECT[*self as usize][occupancy.bits()]
    }
}
