use cgmath::{Matrix3, SquareMatrix, Vector3};

use crate::{Color, LatticePoint};

/// One colored sticker on the surface of the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Facelet {
    color: Color,
    /// Exact lattice position. Only changes when a turn settles.
    lattice: LatticePoint,
    /// Presentation position in world coordinates.
    position: Vector3<f64>,
    /// Presentation rotation accumulated since the facelet was built.
    orientation: Matrix3<f64>,
}
impl Facelet {
    /// Constructs a facelet resting at a lattice position.
    pub fn new(color: Color, lattice: LatticePoint) -> Self {
        Self {
            color,
            lattice,
            position: lattice.to_world(),
            orientation: Matrix3::identity(),
        }
    }

    /// Returns the color of the facelet.
    pub fn color(&self) -> Color {
        self.color
    }
    /// Returns the exact lattice position of the facelet.
    pub fn lattice(&self) -> LatticePoint {
        self.lattice
    }
    /// Returns the presentation position of the facelet in world coordinates.
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }
    /// Returns the presentation rotation of the facelet relative to the
    /// orientation it was built with.
    pub fn orientation(&self) -> Matrix3<f64> {
        self.orientation
    }
    /// Returns the outward unit normal of the face that the facelet rests on,
    /// or zero if the facelet is off the lattice.
    pub fn normal(&self) -> Vector3<f64> {
        match self.lattice.normal() {
            Some((axis, sign)) => axis.unit_vector() * f64::from(sign.to_i8()),
            None => Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Moves the facelet to a lattice position, resetting its presentation
    /// position to match exactly.
    pub fn set_lattice(&mut self, lattice: LatticePoint) {
        self.lattice = lattice;
        self.position = lattice.to_world();
    }

    /// Overwrites the presentation position without touching the lattice
    /// position.
    pub fn set_position(&mut self, position: Vector3<f64>) {
        self.position = position;
    }

    /// Rotates the presentation transform around an axis through the center
    /// of the cube.
    pub fn apply_rotation(&mut self, rotation: &Matrix3<f64>) {
        self.position = rotation * self.position;
        self.orientation = rotation * self.orientation;
    }

    /// Rounds the presentation position to the nearest lattice position and
    /// the presentation rotation to the nearest quarter-turn rotation,
    /// correcting floating-point drift. Returns the new lattice position.
    pub fn snap(&mut self) -> LatticePoint {
        self.set_lattice(LatticePoint::nearest(self.position));
        let m = &mut self.orientation;
        for col in [&mut m.x, &mut m.y, &mut m.z] {
            *col = col.map(f64::round);
        }
        self.lattice
    }
}

/// Kind of decoration attached to a facelet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Copy of the facelet floating away from the cube, so that the back
    /// faces are visible from the front. Hidden by default.
    FloatingBack,
    /// Black square behind the facelet.
    Backing,
}
impl DecorationKind {
    /// Returns the distance of the decoration from its facelet, along the
    /// facelet's outward normal, in world units.
    pub fn offset(self) -> f64 {
        match self {
            DecorationKind::FloatingBack => 80.0,
            DecorationKind::Backing => 0.0,
        }
    }
}

/// Rigid decoration that rotates together with the facelet that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    /// Kind of decoration.
    pub kind: DecorationKind,
    /// Color, or `None` for black.
    pub color: Option<Color>,
    /// Whether the decoration is drawn.
    pub visible: bool,
    /// Presentation position in world coordinates.
    pub position: Vector3<f64>,
    /// Presentation rotation relative to the orientation it was built with.
    pub orientation: Matrix3<f64>,
}
impl Decoration {
    /// Constructs a decoration resting at its place relative to `facelet`.
    pub fn new(kind: DecorationKind, facelet: &Facelet) -> Self {
        let (color, visible) = match kind {
            DecorationKind::FloatingBack => (Some(facelet.color()), false),
            DecorationKind::Backing => (None, true),
        };
        let mut ret = Self {
            kind,
            color,
            visible,
            position: facelet.position(),
            orientation: Matrix3::identity(),
        };
        ret.snap_to(facelet);
        ret
    }

    /// Rotates the presentation transform around an axis through the center
    /// of the cube.
    pub fn apply_rotation(&mut self, rotation: &Matrix3<f64>) {
        self.position = rotation * self.position;
        self.orientation = rotation * self.orientation;
    }

    /// Places the decoration exactly at its resting place relative to
    /// `facelet`.
    pub fn snap_to(&mut self, facelet: &Facelet) {
        self.position = facelet.position() + facelet.normal() * self.kind.offset();
        self.orientation = facelet.orientation();
    }
}
