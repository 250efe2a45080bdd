//! The six lattice directions and bitsets over them.
//!
//! Directions form a fixed cycle UR, R, DR, DL, L, UL. All derived
//! operations are arithmetic mod 6 over that cycle.

use crate::Coord;

/// One of the six lattice directions, in ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    UpRight = 0,
    Right = 1,
    DownRight = 2,
    DownLeft = 3,
    Left = 4,
    UpLeft = 5,
}

impl Direction {
    /// All directions in ring order.
    pub const ALL: [Self; 6] = [
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    /// The three directions that name every undirected edge exactly once.
    pub const FORWARD: [Self; 3] = [Self::UpRight, Self::Right, Self::DownRight];

    /// Coordinate deltas, indexed by direction.
    const DELTAS: [Coord; 6] = [
        Coord { x: 1, y: 1 },   // UR
        Coord { x: 2, y: 0 },   // R
        Coord { x: 1, y: -1 },  // DR
        Coord { x: -1, y: -1 }, // DL
        Coord { x: -2, y: 0 },  // L
        Coord { x: -1, y: 1 },  // UL
    ];

    /// Position in the ring (0..6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `index` mod 6.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    #[inline]
    const fn rotate(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Coordinate delta of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Coord {
        Self::DELTAS[self.index()]
    }

    /// Direction pointing back (half a turn).
    pub const fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Next direction around the ring.
    pub const fn next(self) -> Self {
        self.rotate(1)
    }

    /// Previous direction around the ring.
    pub const fn prev(self) -> Self {
        self.rotate(5)
    }

    /// Converts a direction pointing out of a candidate site into the
    /// direction used to walk the ring of lattice neighbors around it.
    pub const fn out_to_sideways(self) -> Self {
        self.rotate(2)
    }

    /// Direction whose delta equals `delta`, if any.
    pub fn from_delta(delta: Coord) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }

    /// Short compass label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpRight => "UR",
            Self::Right => "R",
            Self::DownRight => "DR",
            Self::DownLeft => "DL",
            Self::Left => "L",
            Self::UpLeft => "UL",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of directions stored as six bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// No directions.
    pub const EMPTY: Self = Self(0);

    /// All six directions.
    pub const FULL: Self = Self(0b11_1111);

    /// Raw bits (bit `i` is direction `i`).
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= 1 << dir as u8;
    }

    #[inline]
    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !(1 << dir as u8);
    }

    /// Number of directions in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Members in ring order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl std::fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<_> = self.iter().map(Direction::label).collect();
        write!(f, "[{}]", labels.join(" "))
    }
}
