//! Pixel coordinates and the fixed neighbourhood stencil.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel coordinate in a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// X coordinate (column).
    pub x: usize,
    /// Y coordinate (row).
    pub y: usize,
}

impl Coord {
    /// Creates a new pixel coordinate.
    #[inline]
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Applies `offset`, returning `None` if the result leaves a
    /// `width` x `height` raster.
    #[inline]
    #[must_use]
    pub fn checked_offset(&self, offset: Offset, width: usize, height: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(offset.dx)?;
        let y = self.y.checked_add_signed(offset.dy)?;
        (x < width && y < height).then_some(Coord { x, y })
    }

    /// Applies `offset` without bounds checking.
    ///
    /// Callers must guarantee the result stays inside the raster; this is
    /// used for interior pixels where every stencil cell is known to exist.
    #[inline]
    #[must_use]
    pub fn offset_unchecked(&self, offset: Offset) -> Coord {
        Coord {
            x: self.x.wrapping_add_signed(offset.dx),
            y: self.y.wrapping_add_signed(offset.dy),
        }
    }
}

/// Relative displacement between two pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    /// Horizontal displacement.
    pub dx: isize,
    /// Vertical displacement.
    pub dy: isize,
}

impl Offset {
    /// Creates a new offset.
    #[must_use]
    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }

    /// Returns true for the zero offset.
    #[must_use]
    pub const fn is_center(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Von Neumann stencil: center, left, right, up, down.
///
/// Order matters: the center is always sampled first and the four axis
/// neighbours follow in this fixed order. Diagonals are never included.
pub const VON_NEUMANN: [Offset; 5] = [
    Offset::new(0, 0),
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(0, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stencil_has_no_diagonals() {
        assert!(VON_NEUMANN[0].is_center());
        for offset in &VON_NEUMANN[1..] {
            assert_eq!(offset.dx.abs() + offset.dy.abs(), 1);
        }
    }

    #[test]
    fn test_checked_offset_corner() {
        let corner = Coord::new(0, 0);
        let inside: Vec<_> = VON_NEUMANN
            .iter()
            .filter_map(|&o| corner.checked_offset(o, 10, 10))
            .collect();
        assert_eq!(
            inside,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)]
        );
    }

    #[test]
    fn test_checked_offset_far_edge() {
        let c = Coord::new(9, 4);
        assert_eq!(c.checked_offset(Offset::new(1, 0), 10, 10), None);
        assert_eq!(
            c.checked_offset(Offset::new(-1, 0), 10, 10),
            Some(Coord::new(8, 4))
        );
    }

    #[test]
    fn test_offset_unchecked_interior() {
        let c = Coord::new(5, 5);
        assert_eq!(c.offset_unchecked(Offset::new(0, -1)), Coord::new(5, 4));
    }
}
