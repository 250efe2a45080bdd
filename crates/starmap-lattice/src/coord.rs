//! Doubled-coordinate lattice positions.
//!
//! Horizontal neighbors sit two columns apart and diagonal neighbors one
//! column and one row apart. Valid lattice positions are exactly the pairs
//! with an even coordinate sum; every direction delta preserves that parity.

use std::ops::{Add, Neg, Sub};

use crate::Direction;

/// A position on the triangular lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    /// Column (doubled)
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Coord {
    /// Origin of the lattice.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this pair is reachable from the origin by direction steps.
    pub const fn is_lattice_point(&self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// The position one step away in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    /// All six lattice neighbors, in direction order.
    pub fn neighbors(&self) -> [Self; 6] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Number of lattice steps between two positions.
    ///
    /// Each diagonal step covers one row and one column, a horizontal step
    /// two columns. Rows are therefore paid for first and any column surplus
    /// is covered two at a time.
    pub fn lattice_distance(&self, other: &Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dy + dx.saturating_sub(dy) / 2
    }
}

impl Add for Coord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Coord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Coord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_zero() {
        assert_eq!(Coord::ORIGIN, Coord::new(0, 0));
        assert!(Coord::ORIGIN.is_lattice_point());
    }

    #[test]
    fn parity_marks_lattice_points() {
        assert!(Coord::new(2, 0).is_lattice_point());
        assert!(Coord::new(-1, 1).is_lattice_point());
        assert!(Coord::new(-3, -5).is_lattice_point());
        assert!(!Coord::new(1, 0).is_lattice_point());
        assert!(!Coord::new(0, -1).is_lattice_point());
    }

    #[test]
    fn six_unique_neighbors_at_distance_one() {
        let neighbors = Coord::ORIGIN.neighbors();

        for n in neighbors {
            assert!(n.is_lattice_point());
            assert_eq!(n.lattice_distance(&Coord::ORIGIN), 1);
        }

        let mut sorted = neighbors.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
    }

    #[test]
    fn distance_counts_steps() {
        // Two steps right
        assert_eq!(Coord::ORIGIN.lattice_distance(&Coord::new(4, 0)), 2);
        // UR then R
        assert_eq!(Coord::ORIGIN.lattice_distance(&Coord::new(3, 1)), 2);
        // Straight up is a zig-zag of UR and UL
        assert_eq!(Coord::ORIGIN.lattice_distance(&Coord::new(0, 2)), 2);
        assert_eq!(Coord::new(-3, 3).lattice_distance(&Coord::new(3, -3)), 6);
    }

    #[test]
    fn addition_subtraction() {
        let a = Coord::new(1, 3);
        let b = Coord::new(4, -2);

        assert_eq!(a + b, Coord::new(5, 1));
        assert_eq!(a - b, Coord::new(-3, 5));
        assert_eq!(a + (-b), a - b);
    }

    #[test]
    fn display_format() {
        assert_eq!(Coord::new(-2, 4).to_string(), "(-2, 4)");
    }
}
