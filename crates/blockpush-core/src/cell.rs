//! Integer grid cells and the six axis directions.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A discrete grid position.
///
/// Equality is exact. Float world positions are snapped once at the
/// boundary with [`Cell::quantize`]; the registries never compare with
/// a tolerance.
///
/// The `+`, `-`, unary `-` and `* i32` operators follow plain `i32`
/// arithmetic and panic on overflow in debug builds. Use
/// [`checked_add`](Cell::checked_add), [`checked_sub`](Cell::checked_sub),
/// [`checked_mul`](Cell::checked_mul) or [`displaced`](Cell::displaced)
/// for coordinates near the edge of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Horizontal axis (left/right).
    pub x: i32,
    /// Vertical axis (down/up).
    pub y: i32,
    /// Depth axis (forward/back).
    pub z: i32,
}

impl Cell {
    /// The origin cell `(0, 0, 0)`.
    pub const ORIGIN: Cell = Cell::new(0, 0, 0);

    /// Create a cell from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Snap a float world position to the nearest cell.
    ///
    /// Rounds half away from zero on each axis. Non-finite or
    /// out-of-range components return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockpush_core::Cell;
    ///
    /// assert_eq!(Cell::quantize(0.49, 1.5, -2.51), Some(Cell::new(0, 2, -3)));
    /// assert_eq!(Cell::quantize(f32::NAN, 0.0, 0.0), None);
    /// ```
    pub fn quantize(x: f32, y: f32, z: f32) -> Option<Self> {
        fn axis(v: f32) -> Option<i32> {
            let r = v.round();
            if !r.is_finite() || r < i32::MIN as f32 || r > i32::MAX as f32 {
                return None;
            }
            Some(r as i32)
        }
        Some(Self::new(axis(x)?, axis(y)?, axis(z)?))
    }

    /// Whether this is the zero vector.
    pub fn is_zero(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// The cell reached by moving `distance` steps along `direction`.
    ///
    /// Returns `None` if any coordinate overflows `i32`.
    pub fn displaced(self, direction: Cell, distance: u32) -> Option<Cell> {
        let d = i32::try_from(distance).ok()?;
        Some(Self::new(
            self.x.checked_add(direction.x.checked_mul(d)?)?,
            self.y.checked_add(direction.y.checked_mul(d)?)?,
            self.z.checked_add(direction.z.checked_mul(d)?)?,
        ))
    }

    /// Component-wise `self + rhs`, or `None` on overflow.
    pub fn checked_add(self, rhs: Cell) -> Option<Cell> {
        Some(Self::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
            self.z.checked_add(rhs.z)?,
        ))
    }

    /// Component-wise `self - rhs`, or `None` on overflow.
    pub fn checked_sub(self, rhs: Cell) -> Option<Cell> {
        Some(Self::new(
            self.x.checked_sub(rhs.x)?,
            self.y.checked_sub(rhs.y)?,
            self.z.checked_sub(rhs.z)?,
        ))
    }

    /// `self * k` on every axis, or `None` on overflow.
    pub fn checked_mul(self, k: i32) -> Option<Cell> {
        Some(Self::new(
            self.x.checked_mul(k)?,
            self.y.checked_mul(k)?,
            self.z.checked_mul(k)?,
        ))
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(&self, other: &Cell) -> u64 {
        u64::from(self.x.abs_diff(other.x))
            + u64::from(self.y.abs_diff(other.y))
            + u64::from(self.z.abs_diff(other.z))
    }

    /// Chebyshev (L∞) distance to `other`.
    pub fn chebyshev(&self, other: &Cell) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    /// Dot product, used to order blocks along a push direction.
    pub fn dot(&self, other: &Cell) -> i64 {
        i64::from(self.x) * i64::from(other.x)
            + i64::from(self.y) * i64::from(other.y)
            + i64::from(self.z) * i64::from(other.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Cell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Cell> for [i32; 3] {
    fn from(c: Cell) -> Self {
        [c.x, c.y, c.z]
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Cell {
    type Output = Cell;

    fn neg(self) -> Cell {
        Cell::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i32> for Cell {
    type Output = Cell;

    fn mul(self, rhs: i32) -> Cell {
        Cell::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// One of the six axis-aligned unit directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// `-x`
    Left = 0,
    /// `+x`
    Right = 1,
    /// `-y`
    Down = 2,
    /// `+y`
    Up = 3,
    /// `-z`
    Forward = 4,
    /// `+z`
    Back = 5,
}

impl Direction {
    /// All six directions, in discriminant order.
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
        Direction::Forward,
        Direction::Back,
    ];

    /// The unit offset for this direction.
    pub fn offset(self) -> Cell {
        match self {
            Direction::Left => Cell::new(-1, 0, 0),
            Direction::Right => Cell::new(1, 0, 0),
            Direction::Down => Cell::new(0, -1, 0),
            Direction::Up => Cell::new(0, 1, 0),
            Direction::Forward => Cell::new(0, 0, -1),
            Direction::Back => Cell::new(0, 0, 1),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
        }
    }

    /// Parse a unit offset back into a direction.
    pub fn from_offset(offset: Cell) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

impl From<Direction> for Cell {
    fn from(d: Direction) -> Self {
        d.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displaced_scales_direction_by_distance() {
        let c = Cell::new(1, 2, 3);
        assert_eq!(c.displaced(Cell::new(1, 0, 0), 3), Some(Cell::new(4, 2, 3)));
        assert_eq!(c.displaced(Direction::Down.into(), 2), Some(Cell::new(1, 0, 3)));
    }

    #[test]
    fn displaced_detects_overflow() {
        let c = Cell::new(i32::MAX, 0, 0);
        assert_eq!(c.displaced(Cell::new(1, 0, 0), 1), None);
        assert_eq!(Cell::ORIGIN.displaced(Cell::new(2, 0, 0), u32::MAX), None);
    }

    #[test]
    fn checked_operators_report_overflow() {
        let edge = Cell::new(i32::MAX, 0, i32::MIN);
        assert_eq!(edge.checked_add(Cell::new(1, 0, 0)), None);
        assert_eq!(edge.checked_sub(Cell::new(0, 0, 1)), None);
        assert_eq!(edge.checked_mul(2), None);
        assert_eq!(
            Cell::new(1, 2, 3).checked_add(Cell::new(-1, 0, 4)),
            Some(Cell::new(0, 2, 7))
        );
        assert_eq!(Cell::new(1, 2, 3).checked_sub(Cell::new(1, 2, 3)), Some(Cell::ORIGIN));
        assert_eq!(Cell::new(1, -2, 3).checked_mul(-2), Some(Cell::new(-2, 4, -6)));
    }

    #[test]
    fn directions_are_unit_and_opposed() {
        for d in Direction::ALL {
            assert_eq!(d.offset().manhattan(&Cell::ORIGIN), 1);
            assert_eq!(d.opposite().offset(), -d.offset());
            assert_eq!(Direction::from_offset(d.offset()), Some(d));
        }
        assert_eq!(Direction::from_offset(Cell::new(1, 1, 0)), None);
    }

    #[test]
    fn display_uses_tuple_form() {
        assert_eq!(Cell::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }

    #[test]
    fn chebyshev_takes_largest_axis() {
        let a = Cell::new(0, 0, 0);
        assert_eq!(a.chebyshev(&Cell::new(2, -5, 1)), 5);
        assert_eq!(a.manhattan(&Cell::new(2, -5, 1)), 8);
    }

    proptest! {
        #[test]
        fn add_sub_inverse(
            ax in -1000i32..1000, ay in -1000i32..1000, az in -1000i32..1000,
            bx in -1000i32..1000, by in -1000i32..1000, bz in -1000i32..1000,
        ) {
            let a = Cell::new(ax, ay, az);
            let b = Cell::new(bx, by, bz);
            prop_assert_eq!((a + b) - b, a);
            prop_assert_eq!(a.checked_add(b), Some(a + b));
            prop_assert_eq!(a.checked_sub(b), Some(a - b));
            prop_assert_eq!(a.manhattan(&b), b.manhattan(&a));
        }

        #[test]
        fn displaced_matches_arithmetic(
            x in -1000i32..1000, dir in 0usize..6, distance in 1u32..50,
        ) {
            let start = Cell::new(x, 0, 0);
            let d = Direction::ALL[dir].offset();
            prop_assert_eq!(start.displaced(d, distance), Some(start + d * distance as i32));
        }
    }
}
