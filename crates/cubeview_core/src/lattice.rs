//! Discrete lattice of facelet positions.
//!
//! Coordinates are stored in half-units, where one unit is the distance
//! between the centers of adjacent facelets. Facelet centers lie at `-2`, `0`,
//! or `+2` along the two axes parallel to their face, and at `-3` or `+3` along
//! the axis perpendicular to it.

use std::fmt;

use cgmath::{Matrix3, Rad, Vector3};
use strum::{Display, EnumIter, VariantArray};

/// Side length of one facelet, in world units.
pub const SIDE_WIDTH: f64 = 20.0;
/// Ratio between facelet spacing and facelet side length.
pub const SEPARATION: f64 = 1.1;
/// Length of one lattice half-unit, in world units.
pub const HALF_UNIT: f64 = SIDE_WIDTH * SEPARATION / 2.0;

/// Every coordinate that a facelet center may have along one axis, in
/// half-units.
pub const LATTICE_COORDS: [i8; 5] = [-3, -2, 0, 2, 3];

/// Coordinate of the outer face planes, in half-units.
const FACE_PLANE: i8 = 3;

/// World axis.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, VariantArray)]
#[allow(missing_docs)]
pub enum Axis {
    X,
    Y,
    Z,
}
impl Axis {
    /// Returns the index of the axis: 0, 1, or 2.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the unit vector along the positive direction of the axis.
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
    /// Returns the presentation rotation by `angle` radians
    /// counterclockwise around the positive direction of the axis.
    pub fn rotation(self, angle: f64) -> Matrix3<f64> {
        Matrix3::from_axis_angle(self.unit_vector(), Rad(angle))
    }
}

/// Positive or negative direction along an axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Sign {
    Neg,
    Pos,
}
impl Sign {
    /// Returns `-1` or `1`.
    pub fn to_i8(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
}

/// Exact position of a facelet center, in half-units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticePoint(pub [i8; 3]);
impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "({x}, {y}, {z})")
    }
}
impl LatticePoint {
    /// Constructs a lattice point from coordinates in half-units.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self([x, y, z])
    }

    /// Returns the coordinate along `axis`.
    pub fn coord(self, axis: Axis) -> i8 {
        self.0[axis.index()]
    }

    /// Returns whether this is a valid facelet center: exactly one coordinate
    /// lies on an outer face plane and the other two lie on the 3x3 grid of
    /// that face.
    pub fn is_facelet_position(self) -> bool {
        let on_face_plane = self.0.iter().filter(|c| c.abs() == FACE_PLANE).count();
        let on_grid = self.0.iter().filter(|c| matches!(c, -2 | 0 | 2)).count();
        on_face_plane == 1 && on_grid == 2
    }

    /// Returns the outward normal of the face that the point lies on, or
    /// `None` if it is not a valid facelet position.
    pub fn normal(self) -> Option<(Axis, Sign)> {
        if !self.is_facelet_position() {
            return None;
        }
        let axis = [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .find(|&axis| self.coord(axis).abs() == FACE_PLANE)?;
        let sign = if self.coord(axis) > 0 {
            Sign::Pos
        } else {
            Sign::Neg
        };
        Some((axis, sign))
    }

    /// Returns the point rotated by `quarter_turns` counterclockwise quarter
    /// turns around the positive direction of `axis`. Negative values rotate
    /// clockwise.
    #[must_use]
    pub fn rotated(self, axis: Axis, quarter_turns: i8) -> Self {
        (0..quarter_turns.rem_euclid(4)).fold(self, |p, _| p.rotated_once(axis))
    }
    fn rotated_once(self, axis: Axis) -> Self {
        let [x, y, z] = self.0;
        Self(match axis {
            Axis::X => [x, -z, y],
            Axis::Y => [z, y, -x],
            Axis::Z => [-y, x, z],
        })
    }

    /// Returns the point in world coordinates.
    pub fn to_world(self) -> Vector3<f64> {
        let [x, y, z] = self.0.map(|c| f64::from(c) * HALF_UNIT);
        Vector3::new(x, y, z)
    }

    /// Returns the lattice point nearest to a position in world coordinates,
    /// rounding each coordinate independently to the nearest value in
    /// [`LATTICE_COORDS`].
    pub fn nearest(world: Vector3<f64>) -> Self {
        Self([world.x, world.y, world.z].map(nearest_coord))
    }
}

fn nearest_coord(world: f64) -> i8 {
    let half_units = world / HALF_UNIT;
    LATTICE_COORDS
        .into_iter()
        .min_by(|&a, &b| {
            let da = (f64::from(a) - half_units).abs();
            let db = (f64::from(b) - half_units).abs();
            da.total_cmp(&db)
        })
        .unwrap_or(0)
}
